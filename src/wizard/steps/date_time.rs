//! Step 1: pick a date, time and party size, then look up free tables.

use chrono::NaiveDate;
use std::fmt::Write;
use tracing::{info, warn};
use validator::Validate;

use super::{banner, first_message};
use super::{MSG_AVAILABILITY_FAILED, MSG_BAD_DATE_TIME, MSG_GUESTS_RANGE, MSG_MISSING_DATE_TIME, MSG_NO_TABLES};
use crate::models::wire_time::parse_time;
use crate::models::{AvailabilityQuery, Table};
use crate::services::ApiClient;
use crate::wizard::{BookingDraft, DraftPatch, WizardState, WizardStore};

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DateTimeStep {
    pub date: String,
    pub time: String,
    #[validate(range(min = 1, max = 20, message = "Number of guests must be between 1 and 20."))]
    pub guests: u32,
}

impl DateTimeStep {
    /// Form prefilled from whatever the draft already holds.
    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self {
            date: draft.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            time: draft.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            guests: draft.guests,
        }
    }

    /// Checks the input and turns it into an availability query. The error is
    /// the message to show.
    pub fn to_query(&self) -> Result<AvailabilityQuery, String> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() {
            return Err(MSG_MISSING_DATE_TIME.to_string());
        }

        if let Err(errors) = self.validate() {
            return Err(first_message(&errors, "guests").unwrap_or_else(|| MSG_GUESTS_RANGE.to_string()));
        }

        match (parse_form_date(date), parse_time(time)) {
            (Some(date), Some(time)) => Ok(AvailabilityQuery {
                date,
                time,
                guests: self.guests,
            }),
            _ => Err(MSG_BAD_DATE_TIME.to_string()),
        }
    }

    /// "Check availability". Stays on this step with an error unless at least
    /// one table is free; otherwise stores the free tables and moves on.
    pub async fn submit(&self, store: &WizardStore, api: &ApiClient) {
        if store.is_loading() {
            return;
        }
        store.set_error(None);

        let query = match self.to_query() {
            Ok(query) => query,
            Err(message) => {
                store.set_error(Some(message));
                return;
            }
        };

        store.set_loading(true);
        let result = api.available_tables(&query).await;
        store.set_loading(false);

        let tables = match result {
            Ok(tables) => tables,
            Err(e) => {
                warn!(error = %e, "availability check failed");
                store.set_error(Some(MSG_AVAILABILITY_FAILED.to_string()));
                return;
            }
        };

        let available: Vec<Table> = tables.into_iter().filter(|t| t.is_available).collect();
        if available.is_empty() {
            info!(date = %query.date, time = %query.time, guests = query.guests, "no free tables");
            store.set_error(Some(MSG_NO_TABLES.to_string()));
            return;
        }

        info!(count = available.len(), "tables available");
        store.update_draft(DraftPatch {
            date: Some(query.date),
            time: Some(query.time),
            guests: Some(query.guests),
            ..Default::default()
        });
        store.set_available_tables(available);
        store.next_step();
    }

    pub fn render(&self, state: &WizardState, today: NaiveDate) -> String {
        if state.loading {
            return "  Checking availability...\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "Select Date & Time");
        let _ = writeln!(out, "Choose when you'd like to visit us");
        out.push_str(&banner(state.error.as_deref()));
        let _ = writeln!(out, "  Date   : {:<12} (from {})", self.date, today.format("%Y-%m-%d"));
        let _ = writeln!(out, "  Time   : {}", self.time);
        let _ = writeln!(out, "  Guests : {} (1-20)", self.guests);
        out
    }
}

/// Form dates are `YYYY-MM-DD` and nothing else.
fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
