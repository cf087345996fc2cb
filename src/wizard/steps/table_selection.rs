//! Step 2: pick one of the tables found in step 1. No network traffic; a
//! single selection commits the choice and moves on.

use std::fmt::Write;

use super::{banner, guests_label, long_date, MSG_UNKNOWN_TABLE};
use crate::models::Table;
use crate::wizard::{DraftPatch, WizardState, WizardStore};

pub fn select(store: &WizardStore, table: Table) {
    store.set_error(None);
    store.update_draft(DraftPatch {
        selected_table: Some(table),
        ..Default::default()
    });
    store.next_step();
}

/// Selects the listed table with the given number, as shown to the guest.
pub fn select_number(store: &WizardStore, table_number: i32) {
    let table = store
        .snapshot()
        .available_tables
        .into_iter()
        .find(|t| t.table_number == table_number);

    match table {
        Some(table) => select(store, table),
        None => store.set_error(Some(MSG_UNKNOWN_TABLE.to_string())),
    }
}

/// Back to step 1. The fetched tables stay loaded.
pub fn back(store: &WizardStore) {
    store.set_error(None);
    store.prev_step();
}

pub fn render(state: &WizardState) -> String {
    let draft = &state.draft;
    let mut out = String::new();
    let _ = writeln!(out, "Select Your Table");

    let when = match (draft.date, draft.time) {
        (Some(date), Some(time)) => format!(" on {} at {}", long_date(date), time.format("%H:%M")),
        _ => String::new(),
    };
    let _ = writeln!(out, "Available tables for {}{}", guests_label(draft.guests), when);
    out.push_str(&banner(state.error.as_deref()));

    for table in &state.available_tables {
        let _ = writeln!(
            out,
            "  Table {:<4} {:>2} seats   Available",
            table.table_number, table.capacity
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Step;

    fn listed(store: &WizardStore) {
        store.set_available_tables(vec![
            Table {
                id: 7,
                table_number: 3,
                capacity: 4,
                is_available: true,
            },
            Table {
                id: 9,
                table_number: 5,
                capacity: 6,
                is_available: true,
            },
        ]);
        store.next_step();
    }

    #[test]
    fn selecting_commits_and_advances() {
        let store = WizardStore::new();
        listed(&store);

        select_number(&store, 3);
        let state = store.snapshot();
        assert_eq!(state.current_step, Step::ContactInfo);
        assert_eq!(state.draft.selected_table.map(|t| t.id), Some(7));
    }

    #[test]
    fn unknown_number_stays_put() {
        let store = WizardStore::new();
        listed(&store);

        select_number(&store, 42);
        let state = store.snapshot();
        assert_eq!(state.current_step, Step::TableSelect);
        assert_eq!(state.error.as_deref(), Some(MSG_UNKNOWN_TABLE));
        assert!(state.draft.selected_table.is_none());
    }

    #[test]
    fn back_keeps_fetched_tables() {
        let store = WizardStore::new();
        listed(&store);

        back(&store);
        let state = store.snapshot();
        assert_eq!(state.current_step, Step::DateTime);
        assert_eq!(state.available_tables.len(), 2);
    }

    #[test]
    fn lists_every_table() {
        let store = WizardStore::new();
        listed(&store);
        let text = render(&store.snapshot());
        assert!(text.contains("Table 3"));
        assert!(text.contains("Table 5"));
        assert!(text.contains("2 guests"));
    }
}
