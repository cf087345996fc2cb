use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A dining table as the API reports it. The availability endpoint fills in
/// `is_available`; the plain table endpoints leave it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i32,
    pub table_number: i32,
    pub capacity: i32,
    #[serde(default)]
    pub is_available: bool,
}

/// Query string of `GET api/tables/available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
}

impl AvailabilityQuery {
    pub fn to_query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("time", self.time.format("%H:%M").to_string()),
            ("guests", self.guests.to_string()),
        ]
    }
}
