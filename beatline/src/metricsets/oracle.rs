use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{check_metricsets, check_period};
use crate::error::SettingsError;
use crate::settings::PeriodString;

pub mod tablespace;

pub use tablespace::{
    DataFile, DataFileSize, DataFileStatus, OnlineStatus, SpaceUsage, Tablespace, TABLESPACE_FIELDS,
};

pub const MODULE: &str = "oracle";
pub const METRICSETS: [&str; 1] = [tablespace::METRICSET];

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
pub struct OracleModuleSettings {
    #[serde(default = "OracleModuleSettings::default_period")]
    #[serde_as(as = "PeriodString")]
    pub period: Duration,

    #[serde(default)]
    pub metricsets: Vec<String>,

    /// Connection strings of the databases to poll.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,
}

impl Default for OracleModuleSettings {
    fn default() -> Self {
        Self {
            period: Self::default_period(),
            metricsets: vec![tablespace::METRICSET.to_string()],
            hosts: Vec::default(),
            username: None,
            password: None,
        }
    }
}

impl PartialEq for OracleModuleSettings {
    fn eq(&self, other: &Self) -> bool {
        let exposed = |s: &Option<SecretString>| s.as_ref().map(|p| p.expose_secret().clone());

        self.period == other.period
            && self.metricsets == other.metricsets
            && self.hosts == other.hosts
            && self.username == other.username
            && exposed(&self.password) == exposed(&other.password)
    }
}

impl OracleModuleSettings {
    const DEFAULT_PERIOD: Duration = Duration::from_secs(10);

    pub const fn default_period() -> Duration {
        Self::DEFAULT_PERIOD
    }

    #[tracing::instrument(level = "debug")]
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_period(self.period)?;
        check_metricsets(MODULE, &METRICSETS, &self.metricsets)
    }
}
