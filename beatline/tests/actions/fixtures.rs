use beatline::metricsets::oracle::{
    DataFile, DataFileSize, DataFileStatus, OnlineStatus, SpaceUsage, Tablespace,
};
use beatline::{Event, FieldValue, MapStr};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref DT_1: DateTime<Utc> = DateTime::parse_from_str("2021-05-05T17:11:07.246310806Z", "%+")
        .unwrap()
        .with_timezone(&Utc);
    pub static ref DT_1_STR: String = format!("{}", DT_1.format("%+"));
}

pub fn make_tablespace(name: &str, data_file_id: i64, total_bytes: u64, free_bytes: u64) -> Tablespace {
    Tablespace {
        name: name.to_string(),
        data_file: DataFile {
            id: data_file_id,
            name: format!("/u01/app/oracle/oradata/ORCLCDB/{}01.dbf", name.to_lowercase()),
            online_status: OnlineStatus::Online,
            size: DataFileSize {
                bytes: total_bytes,
                free_bytes,
                max_bytes: 34_359_721_984,
            },
            status: DataFileStatus::Available,
        },
        space: SpaceUsage::from_total_and_free(total_bytes, free_bytes),
    }
}

pub fn make_host_event(host: &str) -> Event {
    let fields: MapStr = maplit::btreemap! {
        "host".to_string() => FieldValue::from(host),
    }
    .into();
    Event::from_map(*DT_1, fields)
}
