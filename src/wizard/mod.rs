//! Booking wizard: the reservation draft, the step machine, and the store
//! that owns both.
//!
//! [`WizardStore`] is the single owner of [`WizardState`]. Steps get it by
//! reference and change it only through its methods; every change is
//! published on a `watch` channel so a front end can redraw after each one.

pub mod app;
pub mod indicator;
pub mod steps;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::watch;
use tracing::debug;

use crate::models::Table;

pub use app::BookingApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    DateTime = 1,
    TableSelect = 2,
    ContactInfo = 3,
    Confirmation = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::DateTime,
        Step::TableSelect,
        Step::ContactInfo,
        Step::Confirmation,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::DateTime => "Date & Time",
            Step::TableSelect => "Select Table",
            Step::ContactInfo => "Your Info",
            Step::Confirmation => "Confirmation",
        }
    }

    /// The following step; `Confirmation` stays put.
    pub fn next(self) -> Step {
        match self {
            Step::DateTime => Step::TableSelect,
            Step::TableSelect => Step::ContactInfo,
            Step::ContactInfo | Step::Confirmation => Step::Confirmation,
        }
    }

    /// The preceding step; `DateTime` stays put.
    pub fn prev(self) -> Step {
        match self {
            Step::DateTime | Step::TableSelect => Step::DateTime,
            Step::ContactInfo => Step::TableSelect,
            Step::Confirmation => Step::ContactInfo,
        }
    }
}

/// Party size a new draft starts with.
pub const DEFAULT_GUESTS: u32 = 2;

/// The reservation being put together across the steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// Party size.
    pub guests: u32,
    pub selected_table: Option<Table>,
    pub customer_name: String,
    pub customer_phone: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            date: None,
            time: None,
            guests: DEFAULT_GUESTS,
            selected_table: None,
            customer_name: String::new(),
            customer_phone: String::new(),
        }
    }
}

/// Fields to merge into a [`BookingDraft`]; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: Option<u32>,
    pub selected_table: Option<Table>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl DraftPatch {
    fn apply_to(self, draft: &mut BookingDraft) {
        if let Some(date) = self.date {
            draft.date = Some(date);
        }
        if let Some(time) = self.time {
            draft.time = Some(time);
        }
        if let Some(guests) = self.guests {
            draft.guests = guests;
        }
        if let Some(table) = self.selected_table {
            draft.selected_table = Some(table);
        }
        if let Some(name) = self.customer_name {
            draft.customer_name = name;
        }
        if let Some(phone) = self.customer_phone {
            draft.customer_phone = phone;
        }
    }
}

/// Snapshot of a completed booking, shown on the last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    pub table: Table,
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: Step,
    pub draft: BookingDraft,
    pub available_tables: Vec<Table>,
    pub loading: bool,
    pub error: Option<String>,
    pub confirmation: Option<Confirmation>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: Step::DateTime,
            draft: BookingDraft::default(),
            available_tables: Vec::new(),
            loading: false,
            error: None,
            confirmation: None,
        }
    }
}

#[derive(Debug)]
pub struct WizardStore {
    state: watch::Sender<WizardState>,
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(WizardState::default());
        Self { state }
    }

    /// Receiver that is marked changed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn current_step(&self) -> Step {
        self.state.borrow().current_step
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn draft(&self) -> BookingDraft {
        self.state.borrow().draft.clone()
    }

    pub fn update_draft(&self, patch: DraftPatch) {
        self.state.send_modify(|state| patch.apply_to(&mut state.draft));
    }

    pub fn set_available_tables(&self, tables: Vec<Table>) {
        self.state.send_modify(|state| state.available_tables = tables);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|state| state.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|state| state.error = error);
    }

    pub fn set_confirmation(&self, confirmation: Confirmation) {
        self.state.send_modify(|state| state.confirmation = Some(confirmation));
    }

    pub fn next_step(&self) {
        self.state.send_modify(|state| {
            let from = state.current_step;
            state.current_step = from.next();
            debug!(from = from.number(), to = state.current_step.number(), "wizard forward");
        });
    }

    pub fn prev_step(&self) {
        self.state.send_modify(|state| {
            let from = state.current_step;
            state.current_step = from.prev();
            debug!(from = from.number(), to = state.current_step.number(), "wizard back");
        });
    }

    /// Start over: step 1, empty draft, nothing loaded, no error.
    pub fn reset(&self) {
        self.state.send_modify(|state| *state = WizardState::default());
        debug!("wizard reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: i32, number: i32, capacity: i32) -> Table {
        Table {
            id,
            table_number: number,
            capacity,
            is_available: true,
        }
    }

    #[test]
    fn steps_clamp_at_both_ends() {
        let store = WizardStore::new();
        store.prev_step();
        assert_eq!(store.current_step(), Step::DateTime);

        for _ in 0..6 {
            store.next_step();
        }
        assert_eq!(store.current_step(), Step::Confirmation);

        store.prev_step();
        assert_eq!(store.current_step(), Step::ContactInfo);
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let store = WizardStore::new();
        store.update_draft(DraftPatch {
            customer_name: Some("Ada".into()),
            ..Default::default()
        });
        store.update_draft(DraftPatch {
            selected_table: Some(table(7, 3, 4)),
            ..Default::default()
        });

        let draft = store.draft();
        assert_eq!(draft.customer_name, "Ada");
        assert_eq!(draft.guests, DEFAULT_GUESTS);
        assert_eq!(draft.selected_table.map(|t| t.table_number), Some(3));
    }

    #[test]
    fn reset_clears_everything() {
        let store = WizardStore::new();
        store.update_draft(DraftPatch {
            guests: Some(6),
            ..Default::default()
        });
        store.set_available_tables(vec![table(1, 1, 2)]);
        store.set_error(Some("boom".into()));
        store.set_loading(true);
        store.next_step();
        store.next_step();

        store.reset();
        assert_eq!(store.snapshot(), WizardState::default());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let store = WizardStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.set_error(Some("No tables".into()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().error.as_deref(), Some("No tables"));
        assert!(!rx.has_changed().unwrap());

        store.next_step();
        assert!(rx.has_changed().unwrap());
    }
}
