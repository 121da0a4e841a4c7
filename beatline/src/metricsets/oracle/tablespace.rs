use std::str::FromStr;

use chrono::{DateTime, Utc};
use strum_macros::{Display, EnumString};

use crate::error::FieldsError;
use crate::metricsets::FieldTaxonomy;
use crate::model::{Event, FieldValue, MapStr};

pub const METRICSET: &str = "tablespace";

pub const DATA_FILE_ID: &str = "data_file.id";
pub const DATA_FILE_NAME: &str = "data_file.name";
pub const DATA_FILE_ONLINE_STATUS: &str = "data_file.online_status";
pub const DATA_FILE_SIZE_BYTES: &str = "data_file.size.bytes";
pub const DATA_FILE_SIZE_FREE_BYTES: &str = "data_file.size.free.bytes";
pub const DATA_FILE_SIZE_MAX_BYTES: &str = "data_file.size.max.bytes";
pub const DATA_FILE_STATUS: &str = "data_file.status";
pub const NAME: &str = "name";
pub const SPACE_FREE_BYTES: &str = "space.free.bytes";
pub const SPACE_TOTAL_BYTES: &str = "space.total.bytes";
pub const SPACE_USED_BYTES: &str = "space.used.bytes";

pub const TABLESPACE_FIELDS: [&str; 11] = [
    DATA_FILE_ID,
    DATA_FILE_NAME,
    DATA_FILE_ONLINE_STATUS,
    DATA_FILE_SIZE_BYTES,
    DATA_FILE_SIZE_FREE_BYTES,
    DATA_FILE_SIZE_MAX_BYTES,
    DATA_FILE_STATUS,
    NAME,
    SPACE_FREE_BYTES,
    SPACE_TOTAL_BYTES,
    SPACE_USED_BYTES,
];

/// Online status of a data file as reported by the database.
#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum OnlineStatus {
    Sysoff,
    System,
    Offline,
    Online,
    Recover,
}

#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DataFileStatus {
    Available,
    Invalid,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DataFileSize {
    pub bytes: u64,
    pub free_bytes: u64,
    pub max_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub id: i64,
    pub name: String,
    pub online_status: OnlineStatus,
    pub size: DataFileSize,
    pub status: DataFileStatus,
}

/// Aggregate space figures of the tablespace, independent of any single data file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SpaceUsage {
    pub free_bytes: u64,
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl SpaceUsage {
    pub const fn from_total_and_free(total_bytes: u64, free_bytes: u64) -> Self {
        Self {
            free_bytes,
            total_bytes,
            used_bytes: total_bytes.saturating_sub(free_bytes),
        }
    }
}

/// One tablespace document: a data file of the tablespace together with the tablespace's
/// aggregate space usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tablespace {
    pub name: String,
    pub data_file: DataFile,
    pub space: SpaceUsage,
}

fn bytes_value(bytes: u64) -> FieldValue {
    FieldValue::Integer(i64::try_from(bytes).unwrap_or(i64::MAX))
}

fn byte_count(bytes: u64) -> FieldValue {
    MapStr::from_iter([("bytes".to_string(), bytes_value(bytes))]).into()
}

fn get_byte_count(fields: &MapStr, key: &str) -> Result<u64, FieldsError> {
    let value = fields.get_value(key)?.as_i64()?;
    u64::try_from(value).map_err(|_| FieldsError::InvalidValue {
        key: key.to_string(),
        reason: format!("byte count cannot be negative: {value}"),
    })
}

fn get_enum<T: FromStr>(fields: &MapStr, key: &str) -> Result<T, FieldsError> {
    let rep = fields.get_value(key)?.as_str()?;
    rep.parse().map_err(|_| FieldsError::InvalidValue {
        key: key.to_string(),
        reason: format!("unrecognized value: {rep}"),
    })
}

impl Tablespace {
    pub fn to_map_str(&self) -> MapStr {
        let data_file_size = MapStr::from_iter([
            ("bytes".to_string(), bytes_value(self.data_file.size.bytes)),
            ("free".to_string(), byte_count(self.data_file.size.free_bytes)),
            ("max".to_string(), byte_count(self.data_file.size.max_bytes)),
        ]);

        let data_file = MapStr::from_iter([
            ("id".to_string(), self.data_file.id.into()),
            ("name".to_string(), self.data_file.name.as_str().into()),
            ("online_status".to_string(), self.data_file.online_status.to_string().into()),
            ("size".to_string(), data_file_size.into()),
            ("status".to_string(), self.data_file.status.to_string().into()),
        ]);

        let space = MapStr::from_iter([
            ("free".to_string(), byte_count(self.space.free_bytes)),
            ("total".to_string(), byte_count(self.space.total_bytes)),
            ("used".to_string(), byte_count(self.space.used_bytes)),
        ]);

        MapStr::from_iter([
            ("data_file".to_string(), data_file.into()),
            (NAME.to_string(), self.name.as_str().into()),
            ("space".to_string(), space.into()),
        ])
    }

    pub fn into_event(self, timestamp: DateTime<Utc>) -> Event {
        Event::from_map(timestamp, self.to_map_str())
    }
}

impl TryFrom<&MapStr> for Tablespace {
    type Error = FieldsError;

    #[tracing::instrument(level = "trace", skip(fields))]
    fn try_from(fields: &MapStr) -> Result<Self, Self::Error> {
        Self::conforms(fields)?;

        let data_file = DataFile {
            id: fields.get_value(DATA_FILE_ID)?.as_i64()?,
            name: fields.get_value(DATA_FILE_NAME)?.as_str()?.to_string(),
            online_status: get_enum(fields, DATA_FILE_ONLINE_STATUS)?,
            size: DataFileSize {
                bytes: get_byte_count(fields, DATA_FILE_SIZE_BYTES)?,
                free_bytes: get_byte_count(fields, DATA_FILE_SIZE_FREE_BYTES)?,
                max_bytes: get_byte_count(fields, DATA_FILE_SIZE_MAX_BYTES)?,
            },
            status: get_enum(fields, DATA_FILE_STATUS)?,
        };

        Ok(Self {
            name: fields.get_value(NAME)?.as_str()?.to_string(),
            data_file,
            space: SpaceUsage {
                free_bytes: get_byte_count(fields, SPACE_FREE_BYTES)?,
                total_bytes: get_byte_count(fields, SPACE_TOTAL_BYTES)?,
                used_bytes: get_byte_count(fields, SPACE_USED_BYTES)?,
            },
        })
    }
}

impl FieldTaxonomy for Tablespace {
    const NAME: &'static str = "oracle.tablespace";

    fn fields() -> &'static [&'static str] {
        &TABLESPACE_FIELDS
    }
}
