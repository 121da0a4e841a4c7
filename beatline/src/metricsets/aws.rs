use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{check_metricsets, check_period};
use crate::error::SettingsError;
use crate::settings::PeriodString;

pub mod rds;

pub use rds::{missing_permissions, RDS_IAM_PERMISSIONS};

pub const MODULE: &str = "aws";
pub const METRICSETS: [&str; 1] = [rds::METRICSET];

/// Configuration of the cloud relational-database module. Secrets are never serialized and are
/// redacted from debug output.
#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
pub struct AwsModuleSettings {
    #[serde(default = "AwsModuleSettings::default_period")]
    #[serde_as(as = "PeriodString")]
    pub period: Duration,

    #[serde(default)]
    pub metricsets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing)]
    pub secret_access_key: Option<SecretString>,

    #[serde(default, skip_serializing)]
    pub session_token: Option<SecretString>,
}

impl Default for AwsModuleSettings {
    fn default() -> Self {
        Self {
            period: Self::default_period(),
            metricsets: vec![rds::METRICSET.to_string()],
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

impl PartialEq for AwsModuleSettings {
    fn eq(&self, other: &Self) -> bool {
        fn exposed(secret: &Option<SecretString>) -> Option<&str> {
            secret.as_ref().map(|s| s.expose_secret().as_str())
        }

        self.period == other.period
            && self.metricsets == other.metricsets
            && self.access_key_id == other.access_key_id
            && exposed(&self.secret_access_key) == exposed(&other.secret_access_key)
            && exposed(&self.session_token) == exposed(&other.session_token)
    }
}

impl AwsModuleSettings {
    const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

    pub const fn default_period() -> Duration {
        Self::DEFAULT_PERIOD
    }

    /// Static credentials are optional, but a key id and its secret come as a pair. A session
    /// token is only meaningful alongside them.
    #[tracing::instrument(level = "debug")]
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_period(self.period)?;
        check_metricsets(MODULE, &METRICSETS, &self.metricsets)?;

        match (&self.access_key_id, &self.secret_access_key, &self.session_token) {
            (Some(_), Some(_), _) | (None, None, None) => Ok(()),
            _ => Err(SettingsError::IncompleteCredentials),
        }
    }
}
