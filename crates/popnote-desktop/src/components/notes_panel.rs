//! Notes panel: draft input and the note list

use dioxus::prelude::*;

use super::NoteRow;
use crate::state::AppState;

/// The popup body: header, draft input with add button, and the note list
#[component]
pub fn NotesPanel() -> Element {
    let mut state = use_context::<AppState>();
    let draft = state.draft();
    let notes = state.notes();
    let editing = state.editing();
    let loaded = state.is_loaded();
    let placeholder = if loaded { "Type a note..." } else { "Loading notes..." };

    let add_note = move |_| {
        state.widget.write().submit_draft();
    };

    let handle_keydown = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter {
            state.widget.write().submit_draft();
        }
    };

    rsx! {
        div {
            class: "notes-panel",
            style: "padding: 12px; max-height: 500px; overflow-y: auto; box-sizing: border-box;",

            h1 {
                style: "margin: 0 0 12px 0; font-size: 18px; text-align: center;",
                "My Notes"
            }

            div {
                class: "draft-row",
                style: "display: flex; gap: 8px; margin-bottom: 12px;",

                input {
                    r#type: "text",
                    style: "flex: 1; padding: 4px 8px;",
                    value: "{draft}",
                    placeholder,
                    disabled: !loaded,
                    oninput: move |evt| state.widget.write().set_draft(evt.value()),
                    onkeydown: handle_keydown,
                }

                button {
                    title: "Add note",
                    disabled: !loaded,
                    onclick: add_note,
                    "+"
                }
            }

            if notes.is_empty() {
                p {
                    style: "margin: 0; font-size: 13px; opacity: 0.6;",
                    "No notes yet"
                }
            } else {
                ul {
                    style: "list-style: none; margin: 0; padding: 0;",
                    for note in notes {
                        {
                            let note_id = note.id;
                            let edit_text = editing
                                .as_ref()
                                .filter(|session| session.id == note.id)
                                .map(|session| session.text.clone());

                            rsx! {
                                NoteRow {
                                    key: "{note_id}",
                                    note,
                                    edit_text,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
