//! Client for the restaurant REST API.
//!
//! Every call is a single request with no retry. Authenticated calls take the
//! caller's [`Credential`] explicitly and fail with `SessionExpired` before
//! sending anything once it has run out.

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{self, ApiConfig};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthResponse, AvailabilityQuery, Booking, BookingRequest, Dish, LoginRequest, Table,
};
use crate::services::credential::Credential;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let normalized =
            config::normalize_base_url(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(timeout)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        info!("API client configured for {}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn authorized(&self, request: RequestBuilder, credential: &Credential) -> ApiResult<RequestBuilder> {
        Ok(request.bearer_auth(credential.bearer()?))
    }

    /// Sends the request and returns the body of a success response as text.
    async fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("API rejected credentials");
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "API call failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /* ---------- AUTH ---------- */

    // POST api/auth/login
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        debug!(username = %request.username, "logging in");
        self.send_json(self.http.post(self.url("api/auth/login")?).json(request))
            .await
    }

    /* ---------- TABLES ---------- */

    // GET api/tables/available?date=..&time=..&guests=..
    pub async fn available_tables(&self, query: &AvailabilityQuery) -> ApiResult<Vec<Table>> {
        debug!(?query, "checking availability");
        let request = self
            .http
            .get(self.url("api/tables/available")?)
            .query(&query.to_query_pairs());
        self.send_json(request).await
    }

    // GET api/tables
    pub async fn list_tables(&self, credential: &Credential) -> ApiResult<Vec<Table>> {
        let request = self.authorized(self.http.get(self.url("api/tables")?), credential)?;
        self.send_json(request).await
    }

    // GET api/tables/{id}
    pub async fn get_table(&self, id: i32, credential: &Credential) -> ApiResult<Table> {
        let request = self.authorized(self.http.get(self.url(&format!("api/tables/{id}"))?), credential)?;
        self.send_json(request).await
    }

    // POST api/tables
    pub async fn create_table(&self, table: &Table, credential: &Credential) -> ApiResult<()> {
        let request = self.authorized(self.http.post(self.url("api/tables")?).json(table), credential)?;
        self.send(request).await.map(|_| ())
    }

    // PUT api/tables/{id}
    pub async fn update_table(&self, table: &Table, credential: &Credential) -> ApiResult<()> {
        let url = self.url(&format!("api/tables/{}", table.id))?;
        let request = self.authorized(self.http.put(url).json(table), credential)?;
        self.send(request).await.map(|_| ())
    }

    // DELETE api/tables/{id}
    pub async fn delete_table(&self, id: i32, credential: &Credential) -> ApiResult<()> {
        let request = self.authorized(self.http.delete(self.url(&format!("api/tables/{id}"))?), credential)?;
        self.send(request).await.map(|_| ())
    }

    /* ---------- BOOKINGS ---------- */

    /// Creates a booking and returns the API's confirmation message, if any.
    // POST api/bookings
    pub async fn create_booking(
        &self,
        booking: &BookingRequest,
        credential: &Credential,
    ) -> ApiResult<Option<String>> {
        info!(table_id = booking.table_id, date = %booking.booking_date, "creating booking");
        let request = self.authorized(self.http.post(self.url("api/bookings")?).json(booking), credential)?;
        let body = self.send(request).await?;
        Ok(serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|m| m.message))
    }

    // GET api/bookings
    pub async fn list_bookings(&self, credential: &Credential) -> ApiResult<Vec<Booking>> {
        let request = self.authorized(self.http.get(self.url("api/bookings")?), credential)?;
        self.send_json(request).await
    }

    // GET api/bookings/{id}
    pub async fn get_booking(&self, id: i32, credential: &Credential) -> ApiResult<Booking> {
        let request = self.authorized(self.http.get(self.url(&format!("api/bookings/{id}"))?), credential)?;
        self.send_json(request).await
    }

    // PUT api/bookings/{id}
    pub async fn update_booking(&self, booking: &Booking, credential: &Credential) -> ApiResult<()> {
        let url = self.url(&format!("api/bookings/{}", booking.id))?;
        let request = self.authorized(self.http.put(url).json(booking), credential)?;
        self.send(request).await.map(|_| ())
    }

    // DELETE api/bookings/{id}
    pub async fn delete_booking(&self, id: i32, credential: &Credential) -> ApiResult<()> {
        info!(booking_id = id, "deleting booking");
        let request = self.authorized(self.http.delete(self.url(&format!("api/bookings/{id}"))?), credential)?;
        self.send(request).await.map(|_| ())
    }

    /* ---------- DISHES ---------- */

    // GET api/dishes
    pub async fn list_dishes(&self) -> ApiResult<Vec<Dish>> {
        self.send_json(self.http.get(self.url("api/dishes")?)).await
    }

    // GET api/dishes/{id}
    pub async fn get_dish(&self, id: i32) -> ApiResult<Dish> {
        self.send_json(self.http.get(self.url(&format!("api/dishes/{id}"))?))
            .await
    }

    // POST api/dishes
    pub async fn create_dish(&self, dish: &Dish, credential: &Credential) -> ApiResult<()> {
        let request = self.authorized(self.http.post(self.url("api/dishes")?).json(dish), credential)?;
        self.send(request).await.map(|_| ())
    }

    // PUT api/dishes/{id}
    pub async fn update_dish(&self, dish: &Dish, credential: &Credential) -> ApiResult<()> {
        let url = self.url(&format!("api/dishes/{}", dish.id))?;
        let request = self.authorized(self.http.put(url).json(dish), credential)?;
        self.send(request).await.map(|_| ())
    }

    // DELETE api/dishes/{id}
    pub async fn delete_dish(&self, id: i32, credential: &Credential) -> ApiResult<()> {
        let request = self.authorized(self.http.delete(self.url(&format!("api/dishes/{id}"))?), credential)?;
        self.send(request).await.map(|_| ())
    }
}
