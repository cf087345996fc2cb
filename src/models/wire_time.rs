//! Lenient readers for the date and time shapes the API emits. Dates may
//! arrive as `2026-03-09` or as a midnight timestamp `2026-03-09T00:00:00`,
//! times with or without seconds, and instants with or without an offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer};

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub(crate) fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date {raw:?}")))
}

pub(crate) fn time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).ok_or_else(|| de::Error::custom(format!("invalid time {raw:?}")))
}

pub(crate) fn optional_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_instant(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_with_and_without_time_part() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert_eq!(parse_date("2026-03-09"), expected);
        assert_eq!(parse_date("2026-03-09T00:00:00"), expected);
        assert_eq!(parse_date("09/03/2026"), None);
    }

    #[test]
    fn times_with_and_without_seconds() {
        let expected = NaiveTime::from_hms_opt(18, 30, 0);
        assert_eq!(parse_time("18:30:00"), expected);
        assert_eq!(parse_time("18:30"), expected);
        assert_eq!(parse_time("half past six"), None);
    }

    #[test]
    fn instants_with_offset_are_converted() {
        let with_offset = parse_instant("2026-10-18T22:00:00+02:00").unwrap();
        let naive = parse_instant("2026-10-18T20:00:00").unwrap();
        assert_eq!(with_offset, naive);
    }
}
