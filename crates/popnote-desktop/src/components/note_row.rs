//! A single note in the list, in view or inline-edit mode

use dioxus::prelude::*;
use popnote_core::Note;

use crate::state::AppState;

const ROW_STYLE: &str = "
    display: flex;
    align-items: center;
    gap: 4px;
    padding: 8px;
    margin-bottom: 8px;
    border-radius: 8px;
    background: rgba(0, 0, 0, 0.05);
";

/// One note row.
///
/// `edit_text` is the unsaved text when this note is being edited.
#[component]
pub fn NoteRow(note: Note, #[props(!optional)] edit_text: Option<String>) -> Element {
    let mut state = use_context::<AppState>();
    let id = note.id;

    if let Some(text) = edit_text {
        let handle_keydown = move |evt: Event<KeyboardData>| match evt.key() {
            Key::Enter => {
                state.widget.write().save_edit(id);
            }
            Key::Escape => state.widget.write().cancel_edit(),
            _ => {}
        };

        return rsx! {
            li {
                class: "note-item editing",
                style: ROW_STYLE,

                input {
                    r#type: "text",
                    style: "flex: 1; padding: 4px 8px;",
                    value: "{text}",
                    autofocus: true,
                    oninput: move |evt| state.widget.write().set_edit_draft(evt.value()),
                    onkeydown: handle_keydown,
                }

                button {
                    title: "Save",
                    onclick: move |_| {
                        state.widget.write().save_edit(id);
                    },
                    "Save"
                }

                button {
                    title: "Cancel",
                    onclick: move |_| state.widget.write().cancel_edit(),
                    "Cancel"
                }
            }
        };
    }

    rsx! {
        li {
            class: "note-item",
            style: ROW_STYLE,

            span {
                style: "flex: 1; overflow-wrap: anywhere;",
                "{note.text}"
            }

            button {
                title: "Edit",
                onclick: move |_| {
                    state.widget.write().start_edit(id);
                },
                "Edit"
            }

            button {
                title: "Delete",
                onclick: move |_| {
                    state.widget.write().delete_note(id);
                },
                "Delete"
            }
        }
    }
}
