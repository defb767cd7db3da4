use std::sync::Arc;

use popnote_core::clock::ManualClock;
use popnote_core::storage::MemoryStore;
use popnote_core::{Note, NotesWidget};
use proptest::prelude::*;

fn arb_note_text() -> impl Strategy<Value = String> {
    "[ \t\n]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ,.!?-]{0,40}[ \t\n]{0,3}"
}

fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,8}"
}

fn arb_clock_readings() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0_i64..1_000_000, 1..20)
}

/// Session-only widget filled with one note per clock reading.
fn widget_with_notes(readings: &[i64]) -> (NotesWidget<MemoryStore>, ManualClock) {
    let clock = ManualClock::starting_at(0);
    let mut widget = NotesWidget::with_clock(None, Arc::new(clock.clone()));
    for (n, reading) in readings.iter().enumerate() {
        clock.set(*reading);
        widget.add_note(&format!("note {n}"));
    }
    (widget, clock)
}

fn is_newest_first(notes: &[Note]) -> bool {
    notes.windows(2).all(|pair| pair[0].created >= pair[1].created)
}

proptest! {
    #[test]
    fn adding_text_grows_list_by_one(
        readings in arb_clock_readings(),
        now in 0_i64..1_000_000,
        text in arb_note_text(),
    ) {
        let (mut widget, clock) = widget_with_notes(&readings);
        let before = widget.notes().len();

        clock.set(now);
        let id = widget.add_note(&text);

        prop_assert!(id.is_some());
        prop_assert_eq!(widget.notes().len(), before + 1);
        let added = widget.notes().iter().find(|note| Some(note.id) == id);
        prop_assert_eq!(added.map(|note| note.text.as_str()), Some(text.trim()));
        prop_assert_eq!(added.map(|note| note.created), Some(now));
    }

    #[test]
    fn blank_text_changes_nothing(
        readings in arb_clock_readings(),
        text in arb_blank_text(),
    ) {
        let (mut widget, _clock) = widget_with_notes(&readings);
        let before = widget.notes().to_vec();

        prop_assert_eq!(widget.add_note(&text), None);
        prop_assert_eq!(widget.notes(), before.as_slice());
    }

    #[test]
    fn adds_keep_list_newest_first(readings in arb_clock_readings()) {
        let (widget, _clock) = widget_with_notes(&readings);

        prop_assert_eq!(widget.notes().len(), readings.len());
        prop_assert!(is_newest_first(widget.notes()));
    }

    #[test]
    fn deleting_removes_exactly_that_note(
        readings in arb_clock_readings(),
        pick in any::<prop::sample::Index>(),
    ) {
        let (mut widget, _clock) = widget_with_notes(&readings);
        let before = widget.notes().to_vec();
        let target = before[pick.index(before.len())].id;

        prop_assert!(widget.delete_note(target));

        let expected: Vec<Note> = before
            .into_iter()
            .filter(|note| note.id != target)
            .collect();
        prop_assert_eq!(widget.notes(), expected.as_slice());
    }
}
