use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::metricsets::aws::AwsModuleSettings;
use crate::metricsets::oracle::OracleModuleSettings;

/// A configured metrics module, selected by its `module` name.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module", rename_all = "lowercase")]
pub enum ModuleSettings {
    Aws(AwsModuleSettings),
    Oracle(OracleModuleSettings),
}

impl ModuleSettings {
    pub const fn module(&self) -> &'static str {
        match self {
            Self::Aws(_) => crate::metricsets::aws::MODULE,
            Self::Oracle(_) => crate::metricsets::oracle::MODULE,
        }
    }

    pub fn metricsets(&self) -> &[String] {
        match self {
            Self::Aws(s) => s.metricsets.as_slice(),
            Self::Oracle(s) => s.metricsets.as_slice(),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match self {
            Self::Aws(s) => s.validate(),
            Self::Oracle(s) => s.validate(),
        }
    }
}
