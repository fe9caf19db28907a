use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use std::collections::BTreeMap;

use granthika_core::poll::PollController;
use granthika_core::progress::{estimated_remaining_secs, RunTimer};
use granthika_core::selection::{validate_batch_start, validate_save_selection, RowSelection};
use granthika_core::types::{DetailedProcessStatus, RunStatus};

use crate::components::{
    use_api, use_batch_selection, use_library_sender, ErrorBanner, LibraryMessage, NoticeBanner,
};
use crate::utils::formatting::format_duration_short;

use super::progress_card::ProgressCard;
use super::results::ResultsPanel;
use super::{run_poll_loop, FileChecklist};

/// Default number of pairs to request per row in a batch run.
const DEFAULT_QA_COUNT: usize = 4;

/// Detailed batch run: rich per-file progress while the job runs, then a
/// tabbed review with one save across all files.
#[component]
pub fn DetailedBatchView() -> Element {
    let api = use_api();
    let batch_selection = use_batch_selection();
    let refresh = use_library_sender();

    let mut process_id = use_signal(|| None::<String>);
    let mut status = use_signal(|| None::<DetailedProcessStatus>);
    let mut poll = use_signal(PollController::new);
    let mut timer = use_signal(|| None::<RunTimer>);
    let mut selection = use_signal(RowSelection::new);
    let mut active_tab = use_signal(|| None::<String>);
    let mut qa_count = use_signal(|| DEFAULT_QA_COUNT);
    let mut starting = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let banner = use_signal(|| None::<String>);
    let notice = use_signal(|| None::<String>);

    // Unmounting stops the loop; the server-side job keeps running
    // unobserved, by design.
    use_drop(move || {
        let mut poll = poll;
        poll.write().stop();
    });

    let start_api = api.clone();
    let start_run = move |_| {
        let files = batch_selection.read().clone();
        let mut banner = banner;
        if let Err(err) = validate_batch_start(&files) {
            banner.set(Some(err.to_string()));
            return;
        }

        let api = start_api.clone();
        let count = qa_count();
        let mut notice = notice;
        spawn(async move {
            starting.set(true);
            banner.set(None);
            notice.set(None);
            selection.set(RowSelection::new());
            status.set(None);
            active_tab.set(None);

            let file_ids: Vec<String> = files.iter().cloned().collect();
            match api.start_batch_detailed(&file_ids, count).await {
                Ok(started) => {
                    info!(
                        "Started detailed batch {} over {} file(s)",
                        started.process_id, started.file_count
                    );
                    process_id.set(Some(started.process_id.clone()));
                    timer.set(Some(RunTimer::start()));
                    poll.set(PollController::new());
                    starting.set(false);

                    let pid = started.process_id;
                    let fetch_api = api.clone();
                    let fetch = move || {
                        let api = fetch_api.clone();
                        let pid = pid.clone();
                        async move { api.batch_status_detailed(&pid).await }
                    };

                    let apply = move |update: DetailedProcessStatus| {
                        let terminal = update.status.is_terminal();
                        if terminal {
                            if update.status == RunStatus::Error {
                                let message = if update.current_operation.is_empty() {
                                    "Batch run failed".to_string()
                                } else {
                                    update.current_operation.clone()
                                };
                                banner.set(Some(message));
                            }
                            if let Some(first) = update.first_file_with_results() {
                                active_tab.set(Some(first.to_string()));
                            }
                        }
                        status.set(Some(update));
                        terminal
                    };

                    let on_error = move |err| {
                        warn!("Status poll failed: {err}");
                        let mut banner = banner;
                        banner.set(Some(format!("Status poll failed: {err}")));
                    };

                    run_poll_loop(poll, fetch, apply, on_error).await;
                }
                Err(err) => {
                    error!("Failed to start batch: {err}");
                    banner.set(Some(format!("Failed to start batch: {err}")));
                    starting.set(false);
                }
            }
        });
    };

    let save_api = api.clone();
    let save_results = move |_| {
        let Some(current) = status.read().clone() else {
            return;
        };
        let Some(pid) = process_id.read().clone() else {
            return;
        };
        let mut banner = banner;
        let rows = selection.read().pick_all(&current.results);
        if let Err(err) = validate_save_selection(rows.len()) {
            banner.set(Some(err.to_string()));
            return;
        }

        let api = save_api.clone();
        let mut notice = notice;
        spawn(async move {
            saving.set(true);
            match api.save_batch_results(&pid, rows).await {
                Ok(outcome) => {
                    let message = if outcome.message.is_empty() {
                        format!("Saved {} row(s)", outcome.saved)
                    } else {
                        outcome.message
                    };
                    info!("Batch save done: {message}");
                    banner.set(None);
                    notice.set(Some(message));
                    refresh.send(LibraryMessage::Refresh);
                }
                Err(err) => {
                    error!("Saving results failed: {err}");
                    banner.set(Some(format!("Saving results failed: {err}")));
                }
            }
            saving.set(false);
        });
    };

    let close_run = move |_| {
        poll.write().stop();
        process_id.set(None);
        status.set(None);
        selection.set(RowSelection::new());
        active_tab.set(None);
        timer.set(None);
        let mut banner = banner;
        banner.set(None);
        let mut notice = notice;
        notice.set(None);
    };

    let selected_files = batch_selection.read().len();
    let current = status.read().clone();

    let pane = match current {
        None => rsx! {
            section { class: "gk-batch-setup",
                FileChecklist {}
                div { class: "gk-editor-controls",
                    label { class: "gk-control",
                        "Pairs per row"
                        input {
                            r#type: "number",
                            class: "gk-count-input",
                            min: "1",
                            max: "10",
                            value: "{qa_count}",
                            oninput: move |evt| {
                                if let Ok(n) = evt.value().parse::<usize>() {
                                    qa_count.set(n.clamp(1, 10));
                                }
                            },
                        }
                    }
                    button {
                        class: "gk-btn gk-btn--primary",
                        disabled: starting(),
                        onclick: start_run,
                        if starting() {
                            "Starting…"
                        } else {
                            "Start run ({selected_files} files)"
                        }
                    }
                }
            }
        },
        Some(run) if !run.status.is_terminal() => {
            let elapsed = match *timer.read() {
                Some(run_timer) => run_timer.elapsed_secs(),
                None => 0.0,
            };
            let remaining =
                estimated_remaining_secs(elapsed, run.processed_rows, run.total_rows);
            let remaining_text = remaining
                .map(|secs| format!("~{} left", format_duration_short(secs as u64)))
                .unwrap_or_else(|| "calculating…".to_string());
            let elapsed_text = format_duration_short(elapsed as u64);
            let pct = run.overall_percent();

            rsx! {
                section { class: "gk-batch-running",
                    div { class: "gk-batch-overall",
                        div { class: "gk-batch-operation", "{run.current_operation}" }
                        div { class: "gk-progress-bar gk-progress-bar--large",
                            span { style: "width: {pct}%;" }
                        }
                        div { class: "gk-batch-meta",
                            span { "{run.processed_rows} / {run.total_rows} rows · {pct}%" }
                            span { "{run.processed_files} / {run.total_files} files" }
                            span { "Elapsed {elapsed_text} · {remaining_text}" }
                        }
                    }
                    div { class: "gk-batch-files",
                        for progress in run.file_progress.values() {
                            ProgressCard {
                                key: "{progress.file_id}",
                                progress: progress.clone(),
                            }
                        }
                    }
                    button {
                        class: "gk-btn gk-btn--secondary",
                        onclick: close_run,
                        "Stop watching"
                    }
                }
            }
        }
        Some(run) => {
            let filenames = tab_labels(&run);
            let selected_rows = selection.read().count();
            let total_rows = run.result_count();

            rsx! {
                section { class: "gk-batch-review",
                    div { class: "gk-batch-meta",
                        span { "Run {run.process_id} finished · {total_rows} generated row(s)" }
                    }

                    ResultsPanel {
                        results: run.results.clone(),
                        filenames,
                        selection,
                        active_tab,
                    }

                    div { class: "gk-editor-controls",
                        button {
                            class: "gk-btn gk-btn--primary",
                            disabled: saving(),
                            onclick: save_results,
                            if saving() {
                                "Saving…"
                            } else {
                                "Save selected ({selected_rows})"
                            }
                        }
                        button {
                            class: "gk-btn gk-btn--secondary",
                            onclick: close_run,
                            "Close run"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "gk-batch-pane",
            ErrorBanner { message: banner }
            NoticeBanner { message: notice }

            {pane}
        }
    }
}

/// Tab labels: filenames from the progress map, falling back to the
/// filename carried on result rows, then the raw id.
fn tab_labels(status: &DetailedProcessStatus) -> BTreeMap<String, String> {
    let mut labels: BTreeMap<String, String> = status
        .file_progress
        .iter()
        .map(|(id, progress)| (id.clone(), progress.filename.clone()))
        .collect();
    for (id, rows) in &status.results {
        if labels.get(id).is_none_or(String::is_empty) {
            if let Some(named) = rows.iter().find(|row| !row.filename.is_empty()) {
                labels.insert(id.clone(), named.filename.clone());
            }
        }
    }
    labels
}
