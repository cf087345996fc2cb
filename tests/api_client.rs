mod common;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use common::{api, credential, table_json};
use serde_json::json;
use tumba_bistro::error::ApiError;
use tumba_bistro::menu;
use tumba_bistro::models::{AvailabilityQuery, BookingRequest, LoginRequest};
use tumba_bistro::services::{ApiClient, Credential};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn booking_request() -> BookingRequest {
    BookingRequest {
        booking_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        start_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        number_of_guests: 4,
        table_id: 7,
        customer_name: "Ada Lindqvist".into(),
        customer_phone: "+46 70 123 45 67".into(),
    }
}

#[tokio::test]
async fn base_url_without_trailing_slash_keeps_its_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/dishes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/v1", server.uri()), std::time::Duration::from_secs(5)).unwrap();
    assert!(client.list_dishes().await.unwrap().is_empty());
}

#[tokio::test]
async fn relative_base_url_is_rejected() {
    let result = ApiClient::new("localhost/api", std::time::Duration::from_secs(5));
    assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
}

#[tokio::test]
async fn availability_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tables/available"))
        .and(query_param("date", "2026-03-09"))
        .and(query_param("time", "09:05"))
        .and(query_param("guests", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([table_json(7, 3, 12, true)])))
        .expect(1)
        .mount(&server)
        .await;

    let query = AvailabilityQuery {
        date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
        guests: 12,
    };
    let tables = api(&server).available_tables(&query).await.unwrap();
    assert_eq!(tables[0].id, 7);
    assert_eq!(tables[0].table_number, 3);
}

#[tokio::test]
async fn create_booking_returns_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Booking created successfully" })))
        .mount(&server)
        .await;

    let message = api(&server)
        .create_booking(&booking_request(), &credential())
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Booking created successfully"));
}

#[tokio::test]
async fn create_booking_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let message = api(&server)
        .create_booking(&booking_request(), &credential())
        .await
        .unwrap();
    assert!(message.is_none());
}

#[tokio::test]
async fn expired_credential_fails_without_sending() {
    let server = MockServer::start().await;
    let stale = Credential::new("old-token", Utc::now() - Duration::minutes(1));

    let result = api(&server).list_bookings(&stale).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_carries_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dishes/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Dish not found"))
        .mount(&server)
        .await;

    match api(&server).get_dish(99).await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "Dish not found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_its_own_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tables"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let error = api(&server).list_tables(&credential()).await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized));
    assert!(error.is_auth_failure());
}

#[tokio::test]
async fn login_reads_token_and_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "expires": "2030-06-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let response = api(&server)
        .login(&LoginRequest {
            username: "admin".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.token, "abc");
    assert_eq!(response.expires.unwrap().to_rfc3339(), "2030-06-01T12:00:00+00:00");
}

#[tokio::test]
async fn dish_list_feeds_popular_highlights() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dishes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Toast Skagen", "price": 145.0, "isPopular": true },
            { "id": 2, "name": "Pyttipanna", "price": 129.0, "isPopular": false },
            { "id": 3, "name": "Kanelbulle", "price": 35.5 }
        ])))
        .mount(&server)
        .await;

    let dishes = api(&server).list_dishes().await.unwrap();
    assert_eq!(dishes.len(), 3);
    let popular = menu::popular(&dishes);
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].name, "Toast Skagen");
}

#[tokio::test]
async fn unauthorized_wins_over_an_unreadable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"definitely not gzip".to_vec()),
        )
        .mount(&server)
        .await;

    let error = api(&server).list_bookings(&credential()).await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized), "got {error:?}");
}
