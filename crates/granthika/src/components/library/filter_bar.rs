use dioxus::prelude::*;

use granthika_core::poll::DebounceGate;

use crate::platform;

/// Idle time before a filter change reaches the parent.
const FILTER_DEBOUNCE_MS: u64 = 500;

/// Debounced text filter over the loaded rows.
///
/// The draft updates on every keystroke; the parent callback only fires
/// after 500 ms of idle typing, guarded by a generation gate so a
/// superseded timer never reports a stale draft.
#[component]
pub fn FilterBar(on_change: EventHandler<String>) -> Element {
    let mut draft = use_signal(String::new);
    let mut gate = use_signal(DebounceGate::new);

    rsx! {
        div { class: "gk-filter-bar",
            input {
                class: "gk-filter-input",
                r#type: "text",
                placeholder: "Filter rows by Sanskrit, English, or tags…",
                value: "{draft}",
                oninput: move |evt| {
                    draft.set(evt.value());
                    let generation = gate.write().arm();
                    spawn(async move {
                        platform::sleep_ms(FILTER_DEBOUNCE_MS).await;
                        if gate.read().is_current(generation) {
                            on_change.call(draft.read().clone());
                        }
                    });
                },
            }
        }
    }
}
