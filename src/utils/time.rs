use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Timestamp for a record update. Strictly later than `previous`, even when
/// the wall clock has not advanced.
pub fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Accepts RFC 3339 as well as naive `YYYY-MM-DDTHH:MM:SS[.f]`, read as UTC.
pub fn parse_flexible(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = from_rfc3339(s) {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")?;
    Ok(naive.and_utc())
}

pub fn deserialize_timestamp_flexible<'de, D>(
    deserializer: D,
) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible(&raw).map_err(|e| {
        serde::de::Error::custom(format!("Invalid timestamp {:?}: {}", raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_timestamp_moves_forward_from_future_value() {
        let future = now() + Duration::hours(1);
        let next = next_update_timestamp(future);
        assert!(next > future);
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let parsed = parse_flexible("2024-01-15T10:30:00.123456").unwrap();
        assert_eq!(parsed, from_rfc3339("2024-01-15T10:30:00.123456Z").unwrap());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_flexible("yesterday").is_err());
    }
}
