//! Step 3: collect the guest's name and phone, then create the booking.
//!
//! Booking creation goes to `POST api/bookings` and needs a live credential;
//! without one the step stays where it is with a login message.

use std::fmt::Write;
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use super::{banner, first_message, guests_label, long_date};
use super::{MSG_CREATE_FAILED, MSG_INCOMPLETE, MSG_LOGIN_REQUIRED, MSG_NAME_REQUIRED, MSG_PHONE_INVALID, MSG_PHONE_REQUIRED};
use crate::error::ApiError;
use crate::models::BookingRequest;
use crate::services::{ApiClient, Credential};
use crate::wizard::{BookingDraft, Confirmation, DraftPatch, WizardState, WizardStore};

const MIN_PHONE_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ContactInfoStep {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_required").with_message(MSG_NAME_REQUIRED.into()));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::new("phone_required").with_message(MSG_PHONE_REQUIRED.into()));
    }
    if !is_valid_phone(phone) {
        return Err(ValidationError::new("phone_format").with_message(MSG_PHONE_INVALID.into()));
    }
    Ok(())
}

/// Digits, whitespace, `-`, `+`, `(` and `)` only, at least eight characters.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= MIN_PHONE_LEN
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')'))
}

impl ContactInfoStep {
    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self {
            name: draft.customer_name.clone(),
            phone: draft.customer_phone.clone(),
        }
    }

    /// Trimmed name and phone, or the message for the first bad field.
    pub fn validated(&self) -> Result<(String, String), String> {
        if let Err(errors) = self.validate() {
            let message = first_message(&errors, "name")
                .or_else(|| first_message(&errors, "phone"))
                .unwrap_or_else(|| MSG_PHONE_INVALID.to_string());
            return Err(message);
        }
        Ok((self.name.trim().to_string(), self.phone.trim().to_string()))
    }

    /// "Complete booking".
    pub async fn submit(&self, store: &WizardStore, api: &ApiClient, credential: Option<&Credential>) {
        if store.is_loading() {
            return;
        }
        store.set_error(None);

        let (name, phone) = match self.validated() {
            Ok(contact) => contact,
            Err(message) => {
                store.set_error(Some(message));
                return;
            }
        };

        let draft = store.draft();
        let (Some(date), Some(time), Some(table)) = (draft.date, draft.time, draft.selected_table) else {
            store.set_error(Some(MSG_INCOMPLETE.to_string()));
            return;
        };

        let Some(credential) = credential.filter(|c| !c.is_expired()) else {
            store.set_error(Some(MSG_LOGIN_REQUIRED.to_string()));
            return;
        };

        let request = BookingRequest {
            booking_date: date,
            start_time: time,
            number_of_guests: draft.guests,
            table_id: table.id,
            customer_name: name.clone(),
            customer_phone: phone.clone(),
        };

        store.set_loading(true);
        let result = api.create_booking(&request, credential).await;
        store.set_loading(false);

        match result {
            Ok(message) => {
                info!(table = table.table_number, message = message.as_deref().unwrap_or(""), "booking created");
                store.update_draft(DraftPatch {
                    customer_name: Some(name.clone()),
                    customer_phone: Some(phone.clone()),
                    ..Default::default()
                });
                store.set_confirmation(Confirmation {
                    date,
                    time,
                    guests: draft.guests,
                    table,
                    customer_name: name,
                    customer_phone: phone,
                });
                store.next_step();
            }
            Err(e) if e.is_auth_failure() => {
                warn!("booking rejected: not logged in");
                store.set_error(Some(MSG_LOGIN_REQUIRED.to_string()));
            }
            Err(ApiError::Status { status, body }) if !body.trim().is_empty() => {
                warn!(status, "booking rejected");
                store.set_error(Some(body.trim().to_string()));
            }
            Err(e) => {
                warn!(error = %e, "booking failed");
                store.set_error(Some(MSG_CREATE_FAILED.to_string()));
            }
        }
    }

    pub fn render(&self, state: &WizardState) -> String {
        if state.loading {
            return "  Creating your booking...\n".to_string();
        }

        let draft = &state.draft;
        let mut out = String::new();
        let _ = writeln!(out, "Your Contact Information");
        let _ = writeln!(out, "We'll use this to confirm your booking");
        out.push_str(&banner(state.error.as_deref()));

        let _ = writeln!(out, "  Booking Summary");
        if let Some(date) = draft.date {
            let _ = writeln!(out, "    Date   : {}", long_date(date));
        }
        if let Some(time) = draft.time {
            let _ = writeln!(out, "    Time   : {}", time.format("%H:%M"));
        }
        let _ = writeln!(out, "    Guests : {}", guests_label(draft.guests));
        match &draft.selected_table {
            Some(table) => {
                let _ = writeln!(out, "    Table  : Table {} ({} seats)", table.table_number, table.capacity);
            }
            None => {
                let _ = writeln!(out, "    Table  : not selected");
            }
        }

        let _ = writeln!(out, "  Full Name *    : {}", self.name);
        let _ = writeln!(out, "  Phone Number * : {}", self.phone);
        out
    }
}
