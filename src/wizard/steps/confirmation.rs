//! Step 4: show the finished booking.

use std::fmt::Write;

use super::{guests_label, long_date, MSG_NO_CONFIRMATION};
use crate::wizard::{WizardState, WizardStore};

pub const HOME_LINK: &str = "/";

/// "Make another booking".
pub fn start_over(store: &WizardStore) {
    store.reset();
}

pub fn render(state: &WizardState, restaurant: &str) -> String {
    let Some(confirmation) = &state.confirmation else {
        return format!("  {MSG_NO_CONFIRMATION}\n");
    };

    let mut out = String::new();
    let _ = writeln!(out, "Booking Confirmed!");
    let _ = writeln!(out, "Thank you for your reservation at {restaurant}");
    let _ = writeln!(out);
    let _ = writeln!(out, "  Booking Details");
    let _ = writeln!(out, "    Name   : {}", confirmation.customer_name);
    let _ = writeln!(out, "    Phone  : {}", confirmation.customer_phone);
    let _ = writeln!(out, "    Date   : {}", long_date(confirmation.date));
    let _ = writeln!(out, "    Time   : {}", confirmation.time.format("%H:%M"));
    let _ = writeln!(out, "    Guests : {}", guests_label(confirmation.guests));
    let _ = writeln!(out, "    Table  : Table {}", confirmation.table.table_number);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "You will receive a confirmation call shortly. Please arrive 5-10 minutes before your reservation time."
    );
    let _ = writeln!(out, "  [new] Make Another Booking    [home] Back to Home ({HOME_LINK})");
    out
}
