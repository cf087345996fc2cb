//! Admin dashboard: log in, list bookings, delete bookings, manage the
//! catalogue.
//!
//! The dashboard owns its [`AdminSession`] and the [`Credential`] behind it.
//! A 401 or an expired credential on any authenticated call ends the session
//! and drops everything that was loaded, so the login form shows again.

pub mod catalog;

use chrono::Duration;
use std::fmt::Write;
use std::future::Future;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::{Booking, LoginRequest};
use crate::services::{ApiClient, Credential};

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_LOAD_FAILED: &str = "Failed to load bookings";
pub const MSG_DELETE_FAILED: &str = "Failed to delete booking";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this booking?";

/// A blocking yes/no question put to the operator.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    pub authenticated: bool,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator said no; nothing was sent.
    Cancelled,
    Deleted,
    /// The API refused; the list is as it was.
    Failed,
    /// The session ended; the login form is back.
    LoggedOut,
}

#[derive(Debug)]
pub struct AdminDashboard {
    session: AdminSession,
    credential: Option<Credential>,
    session_ttl: Duration,
    /// Inline message on the login form.
    pub error: Option<String>,
    /// Pop-up style message for failed list loads and writes.
    pub alert: Option<String>,
}

impl AdminDashboard {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            session: AdminSession::default(),
            credential: None,
            session_ttl,
            error: None,
            alert: None,
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.session.bookings
    }

    /// The credential of the current session, for other authenticated calls.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub async fn login(&mut self, api: &ApiClient, username: &str, password: &str) {
        self.error = None;
        self.alert = None;
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match api.login(&request).await {
            Ok(response) => {
                info!(username, "admin logged in");
                self.credential = Some(Credential::from_auth(response, self.session_ttl));
                self.session.authenticated = true;
                self.load_bookings(api).await;
            }
            Err(e) => {
                warn!(username, error = %e, "admin login failed");
                self.error = Some(MSG_INVALID_CREDENTIALS.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        if self.session.authenticated {
            info!("admin logged out");
        }
        self.credential = None;
        self.session = AdminSession::default();
        self.alert = None;
    }

    /// Credential to use for the next call. Ends the session if there is
    /// none or it has expired.
    fn live_credential(&mut self) -> Option<Credential> {
        if let Some(credential) = self.credential.as_ref().filter(|c| !c.is_expired()) {
            return Some(credential.clone());
        }
        self.logout();
        None
    }

    /// Runs an authenticated call. Auth failures end the session.
    async fn authorized<T, F, Fut>(&mut self, call: F) -> ApiResult<T>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let Some(credential) = self.live_credential() else {
            return Err(ApiError::SessionExpired);
        };
        let result = call(credential).await;
        if matches!(&result, Err(e) if e.is_auth_failure()) {
            warn!("admin session rejected by API");
            self.logout();
        }
        result
    }

    /// Fetches the bookings list. A body that does not parse leaves an empty
    /// list; other failures keep the current list and raise an alert.
    pub async fn load_bookings(&mut self, api: &ApiClient) {
        let result = self
            .authorized(|credential| async move { api.list_bookings(&credential).await })
            .await;

        match result {
            Ok(bookings) => {
                info!(count = bookings.len(), "bookings loaded");
                self.session.bookings = bookings;
            }
            Err(e) if e.is_auth_failure() => {}
            Err(ApiError::Decode(e)) => {
                warn!(error = %e, "bookings list did not parse");
                self.session.bookings = Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "bookings list failed");
                self.alert = Some(MSG_LOAD_FAILED.to_string());
            }
        }
    }

    /// Deletes a booking after asking `confirm`, then refreshes the list.
    pub async fn delete_booking(
        &mut self,
        api: &ApiClient,
        id: i32,
        mut confirm: impl Confirm,
    ) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        let result = self
            .authorized(|credential| async move { api.delete_booking(id, &credential).await })
            .await;

        match result {
            Ok(()) => {
                self.load_bookings(api).await;
                DeleteOutcome::Deleted
            }
            Err(e) if e.is_auth_failure() => DeleteOutcome::LoggedOut,
            Err(e) => {
                warn!(booking_id = id, error = %e, "delete failed");
                self.alert = Some(MSG_DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.session.authenticated {
            let _ = writeln!(out, "Admin Login");
            if let Some(error) = &self.error {
                let _ = writeln!(out, "  [!] {error}");
            }
            let _ = writeln!(out, "  login <username> <password>");
            return out;
        }

        let _ = writeln!(out, "Bookings");
        if let Some(alert) = &self.alert {
            let _ = writeln!(out, "  [!] {alert}");
        }
        let _ = writeln!(
            out,
            "  {:>5}  {:<10}  {:<5}  {:>6}  {:<24}  {:>5}",
            "ID", "Date", "Time", "Guests", "Customer", "Table"
        );
        for booking in &self.session.bookings {
            let customer = booking.customer.as_ref().map(|c| c.name.as_str()).unwrap_or("");
            let table = booking
                .table
                .as_ref()
                .map(|t| t.table_number.to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:>5}  {:<10}  {:<5}  {:>6}  {:<24}  {:>5}",
                booking.id,
                booking.booking_date.format("%Y-%m-%d"),
                booking.start_time.format("%H:%M"),
                booking.number_of_guests,
                customer,
                table
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let dashboard = AdminDashboard::new(Duration::minutes(60));
        assert!(!dashboard.is_authenticated());
        assert!(dashboard.render().contains("Admin Login"));
    }

    #[test]
    fn closures_answer_the_prompt() {
        let mut asked = String::new();
        let mut confirm = |prompt: &str| {
            asked = prompt.to_string();
            false
        };
        assert!(!Confirm::confirm(&mut confirm, DELETE_PROMPT));
        assert_eq!(asked, DELETE_PROMPT);
    }
}
