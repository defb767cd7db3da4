//! Main application component

use dioxus::prelude::*;
use popnote_core::config::PopnoteConfig;

use crate::components::NotesPanel;
use crate::services::open_widget;
use crate::state::AppState;

/// Root application component
#[component]
pub fn App() -> Element {
    let config = use_context::<PopnoteConfig>();
    let mut widget = use_signal(|| open_widget(&config));

    // Load stored notes once on mount; edits stay disabled until this lands
    use_future(move || async move {
        let Some(store) = widget.peek().store().cloned() else {
            return;
        };

        let result = store.load().await;
        widget.write().finish_load(result);
    });

    use_context_provider(|| AppState { widget });

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
            ",
            NotesPanel {}
        }
    }
}
