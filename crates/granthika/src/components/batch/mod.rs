//! Batch run views: start a server-side generation job over the selected
//! files, poll its status, review the results, save a curated subset.
//!
//! Two variants share the plumbing here: the detailed view (rich per-file
//! progress, cross-file save) and the quick view (condensed progress,
//! per-file save). Both poll on a fixed interval through
//! [`run_poll_loop`], which honors the stop signal and drops out-of-order
//! responses via the core [`PollController`].

mod detailed;
mod progress_card;
mod results;
mod simple;

pub use detailed::DetailedBatchView;
pub use simple::QuickBatchView;

use dioxus::prelude::*;
use std::future::Future;

use granthika_core::poll::PollController;

use crate::components::{use_batch_selection, use_files};
use crate::error::ApiError;
use crate::platform;

/// Fixed status-poll interval.
const POLL_INTERVAL_MS: u64 = 2_000;

/// Poll `fetch` every 2 seconds until `apply` reports a terminal status or
/// the controller is stopped.
///
/// Every response carries the ticket taken before its request; a response
/// whose ticket is no longer newest — or that lands after stop — is
/// discarded without touching shared state. Fetch errors are surfaced via
/// `on_error` but do not end the loop; transient failures resolve on the
/// next tick.
async fn run_poll_loop<S, FetchFut>(
    mut poll: Signal<PollController>,
    fetch: impl Fn() -> FetchFut,
    mut apply: impl FnMut(S) -> bool,
    mut on_error: impl FnMut(ApiError),
) where
    FetchFut: Future<Output = Result<S, ApiError>>,
{
    loop {
        platform::sleep_ms(POLL_INTERVAL_MS).await;
        if poll.read().is_stopped() {
            break;
        }

        let ticket = poll.write().begin();
        match fetch().await {
            Ok(update) => {
                if !poll.write().accept(ticket) {
                    if poll.read().is_stopped() {
                        break;
                    }
                    continue;
                }
                if apply(update) {
                    poll.write().stop();
                    break;
                }
            }
            Err(err) => {
                if poll.write().accept(ticket) {
                    on_error(err);
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum BatchMode {
    Detailed,
    Quick,
}

/// Batch view shell: mode toggle over the two run variants.
///
/// Switching modes unmounts the other variant, which stops its poll loop
/// and discards its in-memory job state.
#[component]
pub fn BatchView() -> Element {
    let mut mode = use_signal(|| BatchMode::Detailed);

    rsx! {
        section { class: "gk-view gk-view--batch",
            header { class: "gk-view-header",
                h2 { class: "gk-view-title", "Batch runs" }
                div { class: "gk-mode-toggle",
                    button {
                        class: if mode() == BatchMode::Detailed { "gk-tab gk-tab--active" } else { "gk-tab" },
                        onclick: move |_| mode.set(BatchMode::Detailed),
                        "Detailed"
                    }
                    button {
                        class: if mode() == BatchMode::Quick { "gk-tab gk-tab--active" } else { "gk-tab" },
                        onclick: move |_| mode.set(BatchMode::Quick),
                        "Quick"
                    }
                }
            }

            if mode() == BatchMode::Detailed {
                DetailedBatchView {}
            } else {
                QuickBatchView {}
            }
        }
    }
}

/// File checklist shared by both variants; drives the top-level batch
/// selection held by the app shell.
#[component]
fn FileChecklist() -> Element {
    let files = use_files();
    let batch_selection = use_batch_selection();

    let state = files.read();
    let list = state.files();

    if list.is_empty() {
        return rsx! {
            div { class: "gk-placeholder", "Upload files in the library first." }
        };
    }

    rsx! {
        div { class: "gk-checklist",
            for file in list.iter() {
                {
                    let file_id = file.file_id.clone();
                    let checked = batch_selection.read().contains(&file_id);
                    rsx! {
                        label { key: "{file.file_id}", class: "gk-checklist-item",
                            input {
                                r#type: "checkbox",
                                checked,
                                onchange: move |_| {
                                    let mut selection = batch_selection;
                                    let mut selected = selection.write();
                                    if !selected.remove(&file_id) {
                                        selected.insert(file_id.clone());
                                    }
                                },
                            }
                            span { class: "gk-checklist-name", "{file.filename}" }
                            span { class: "gk-checklist-meta", "{file.row_count} rows" }
                        }
                    }
                }
            }
        }
    }
}
