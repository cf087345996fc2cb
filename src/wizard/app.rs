//! The whole booking page: header, progress indicator and the mounted step.
//!
//! Steps 1 and 3 keep their own form input. Like a remounted form, that
//! input is reloaded from the draft whenever the wizard arrives at the step.

use chrono::NaiveDate;
use std::fmt::Write;

use super::steps::{confirmation, table_selection, ContactInfoStep, DateTimeStep};
use super::{indicator, Step, WizardStore};

#[derive(Debug)]
pub struct BookingApp {
    store: WizardStore,
    restaurant_name: String,
    mounted: Step,
    pub date_time: DateTimeStep,
    pub contact: ContactInfoStep,
}

impl BookingApp {
    pub fn new(restaurant_name: impl Into<String>) -> Self {
        let store = WizardStore::new();
        let draft = store.draft();
        Self {
            date_time: DateTimeStep::from_draft(&draft),
            contact: ContactInfoStep::from_draft(&draft),
            mounted: store.current_step(),
            restaurant_name: restaurant_name.into(),
            store,
        }
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    /// Reloads the form of a step the wizard has just arrived at. Call after
    /// each observed store change.
    pub fn remount(&mut self) {
        let current = self.store.current_step();
        if current == self.mounted {
            return;
        }
        let draft = self.store.draft();
        match current {
            Step::DateTime => self.date_time = DateTimeStep::from_draft(&draft),
            Step::ContactInfo => self.contact = ContactInfoStep::from_draft(&draft),
            Step::TableSelect | Step::Confirmation => {}
        }
        self.mounted = current;
    }

    pub fn render(&self, today: NaiveDate) -> String {
        let state = self.store.snapshot();
        let mut out = String::new();
        let _ = writeln!(out, "Book Your Table");
        let _ = writeln!(out, "Reserve your spot at {}", self.restaurant_name);
        if state.current_step != Step::Confirmation {
            let _ = writeln!(out, "{}", indicator::render(state.current_step));
        }
        let _ = writeln!(out);

        let body = match state.current_step {
            Step::DateTime => self.date_time.render(&state, today),
            Step::TableSelect => table_selection::render(&state),
            Step::ContactInfo => self.contact.render(&state),
            Step::Confirmation => confirmation::render(&state, &self.restaurant_name),
        };
        out.push_str(&body);
        out
    }
}
