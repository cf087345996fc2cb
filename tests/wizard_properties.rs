use proptest::prelude::*;
use tumba_bistro::wizard::{Step, WizardStore};

proptest! {
    #[test]
    fn step_stays_within_bounds(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
        let store = WizardStore::new();
        let mut expected: u8 = 1;

        for forward in moves {
            if forward {
                store.next_step();
                expected = (expected + 1).min(4);
            } else {
                store.prev_step();
                expected = expected.saturating_sub(1).max(1);
            }
            let number = store.current_step().number();
            prop_assert!((1..=4).contains(&number));
            prop_assert_eq!(number, expected);
        }
    }

    #[test]
    fn reset_always_returns_to_first_step(forward in 0usize..10) {
        let store = WizardStore::new();
        for _ in 0..forward {
            store.next_step();
        }
        store.reset();
        prop_assert_eq!(store.current_step(), Step::DateTime);
        prop_assert!(store.snapshot().confirmation.is_none());
    }
}
