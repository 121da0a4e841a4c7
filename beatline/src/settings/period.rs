use std::fmt;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

use crate::error::SettingsError;

static PERIOD_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<amount>\d+)\s*(?P<unit>ms|s|m|h)?\s*$").expect("failed to compile period regex")
});

/// Parses a collection period such as `"60s"`, `"5m"`, `"500ms"` or `"1h"`. A bare number is read
/// as seconds.
pub fn parse_period(rep: &str) -> Result<Duration, SettingsError> {
    let invalid = || SettingsError::InvalidPeriod(rep.to_string());
    let captures = PERIOD_FORM.captures(rep).ok_or_else(invalid)?;
    let amount: u64 = captures["amount"].parse().map_err(|_| invalid())?;

    let period = match captures.name("unit").map(|u| u.as_str()) {
        Some("ms") => Duration::from_millis(amount),
        Some("m") => Duration::from_secs(amount.checked_mul(60).ok_or_else(invalid)?),
        Some("h") => Duration::from_secs(amount.checked_mul(60 * 60).ok_or_else(invalid)?),
        _ => Duration::from_secs(amount),
    };

    Ok(period)
}

/// Renders a period in the largest whole unit.
pub fn format_period(period: Duration) -> String {
    let millis = period.as_millis();
    if millis % 1_000 != 0 {
        return format!("{millis}ms");
    }

    match period.as_secs() {
        0 => "0s".to_string(),
        secs if secs % (60 * 60) == 0 => format!("{}h", secs / (60 * 60)),
        secs if secs % 60 == 0 => format!("{}m", secs / 60),
        secs => format!("{secs}s"),
    }
}

/// `serde_with` adapter reading a [`Duration`] from a period string or a number of seconds.
pub struct PeriodString;

impl SerializeAs<Duration> for PeriodString {
    fn serialize_as<S>(source: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format_period(*source).as_str())
    }
}

impl<'de> DeserializeAs<'de, Duration> for PeriodString {
    fn deserialize_as<D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PeriodVisitor)
    }
}

struct PeriodVisitor;

impl<'de> Visitor<'de> for PeriodVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a period such as \"60s\" or a whole number of seconds")
    }

    fn visit_u64<E: de::Error>(self, secs: u64) -> Result<Self::Value, E> {
        Ok(Duration::from_secs(secs))
    }

    fn visit_i64<E: de::Error>(self, secs: i64) -> Result<Self::Value, E> {
        u64::try_from(secs)
            .map(Duration::from_secs)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(secs), &self))
    }

    fn visit_str<E: de::Error>(self, rep: &str) -> Result<Self::Value, E> {
        parse_period(rep).map_err(E::custom)
    }
}
