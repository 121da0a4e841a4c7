pub const METRICSET: &str = "rds";

/// IAM permissions the credentials must grant for the rds metricset to fetch its metrics.
pub const RDS_IAM_PERMISSIONS: [&str; 5] = [
    "cloudwatch:GetMetricData",
    "ec2:DescribeRegions",
    "rds:DescribeDBInstances",
    "sts:GetCallerIdentity",
    "iam:ListAccountAliases",
];

/// Required permissions not found in `granted`, in documented order.
pub fn missing_permissions<'a, I>(granted: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let granted: Vec<&str> = granted.into_iter().collect();
    RDS_IAM_PERMISSIONS
        .iter()
        .copied()
        .filter(|required| !granted.contains(required))
        .collect()
}
