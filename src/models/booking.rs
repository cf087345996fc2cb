use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
}

/// A stored reservation, with the customer and table the API joins in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    #[serde(deserialize_with = "super::wire_time::date")]
    pub booking_date: NaiveDate,
    #[serde(deserialize_with = "super::wire_time::time")]
    pub start_time: NaiveTime,
    pub number_of_guests: u32,
    #[serde(default)]
    pub customer_id: i32,
    #[serde(default)]
    pub table_id: i32,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub table: Option<Table>,
}

/// Body of `POST api/bookings`. `start_time` goes out as `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub booking_date: NaiveDate,
    #[serde(serialize_with = "serialize_full_time")]
    pub start_time: NaiveTime,
    pub number_of_guests: u32,
    pub table_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
}

fn serialize_full_time<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.format("%H:%M:%S"))
}
