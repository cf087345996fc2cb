//! One module per wizard stage. Each validates its own input and moves the
//! wizard through the [`WizardStore`](super::WizardStore).

pub mod confirmation;
pub mod contact_info;
pub mod date_time;
pub mod table_selection;

use chrono::NaiveDate;
use validator::ValidationErrors;

pub use contact_info::ContactInfoStep;
pub use date_time::DateTimeStep;

pub const MSG_MISSING_DATE_TIME: &str = "Please select both date and time.";
pub const MSG_BAD_DATE_TIME: &str = "Please enter the date as YYYY-MM-DD and the time as HH:MM.";
pub const MSG_GUESTS_RANGE: &str = "Number of guests must be between 1 and 20.";
pub const MSG_AVAILABILITY_FAILED: &str = "Failed to check availability. Please try again.";
pub const MSG_NO_TABLES: &str =
    "No tables available for the selected time. Please try another time slot.";
pub const MSG_UNKNOWN_TABLE: &str = "Please choose one of the listed tables.";
pub const MSG_NAME_REQUIRED: &str = "Please enter your name.";
pub const MSG_PHONE_REQUIRED: &str = "Please enter your phone number.";
pub const MSG_PHONE_INVALID: &str = "Please enter a valid phone number.";
pub const MSG_INCOMPLETE: &str = "Your booking is missing a date, time or table. Please start over.";
pub const MSG_LOGIN_REQUIRED: &str = "You must be logged in as an administrator to create bookings.";
pub const MSG_CREATE_FAILED: &str = "Failed to create booking. Please try again.";
pub const MSG_NO_CONFIRMATION: &str = "No booking confirmation available.";

/// `Monday, March 9, 2026`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `1 guest`, `4 guests`
pub fn guests_label(guests: u32) -> String {
    if guests == 1 {
        "1 guest".to_string()
    } else {
        format!("{guests} guests")
    }
}

fn first_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|list| list.first())
        .and_then(|error| error.message.as_ref())
        .map(|message| message.to_string())
}

fn banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("  [!] {message}\n"),
        None => String::new(),
    }
}
