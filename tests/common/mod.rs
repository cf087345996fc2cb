#![allow(dead_code)]

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tumba_bistro::services::{ApiClient, Credential};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap()
}

pub fn credential() -> Credential {
    Credential::new(TOKEN, Utc::now() + Duration::hours(1))
}

pub fn table_json(id: i32, number: i32, capacity: i32, available: bool) -> Value {
    json!({ "id": id, "tableNumber": number, "capacity": capacity, "isAvailable": available })
}

pub fn booking_json(id: i32, customer: &str, table_number: i32) -> Value {
    json!({
        "id": id,
        "bookingDate": "2026-03-09T00:00:00",
        "startTime": "18:30:00",
        "numberOfGuests": 4,
        "customerId": id * 10,
        "tableId": table_number + 100,
        "customer": { "id": id * 10, "name": customer, "phoneNumber": "070-123 45 67" },
        "table": { "id": table_number + 100, "tableNumber": table_number, "capacity": 4 }
    })
}

pub async fn requests_with_method(server: &MockServer, verb: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == verb)
        .count()
}
