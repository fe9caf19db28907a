use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;

use granthika_core::poll::PollController;
use granthika_core::progress::percent;
use granthika_core::selection::{validate_batch_start, validate_save_selection, RowSelection};
use granthika_core::types::{ProcessStatus, RunStatus};

use crate::components::{
    use_api, use_batch_selection, use_files, use_library_sender, ErrorBanner, LibraryMessage,
    NoticeBanner,
};

use super::{run_poll_loop, FileChecklist};

const DEFAULT_QA_COUNT: usize = 4;

/// Quick batch run: condensed progress from the simple status endpoint and
/// a per-file save over the results.
#[component]
pub fn QuickBatchView() -> Element {
    let api = use_api();
    let batch_selection = use_batch_selection();
    let files = use_files();
    let refresh = use_library_sender();

    let mut process_id = use_signal(|| None::<String>);
    let mut status = use_signal(|| None::<ProcessStatus>);
    let mut poll = use_signal(PollController::new);
    let mut selection = use_signal(RowSelection::new);
    let mut qa_count = use_signal(|| DEFAULT_QA_COUNT);
    let mut starting = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let banner = use_signal(|| None::<String>);
    let notice = use_signal(|| None::<String>);

    use_drop(move || {
        let mut poll = poll;
        poll.write().stop();
    });

    let start_api = api.clone();
    let start_run = move |_| {
        let picked = batch_selection.read().clone();
        let mut banner = banner;
        if let Err(err) = validate_batch_start(&picked) {
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

            let file_ids: Vec<String> = picked.iter().cloned().collect();
            match api.start_batch(&file_ids, count).await {
                Ok(started) => {
                    info!(
                        "Started batch {} over {} file(s)",
                        started.process_id, started.file_count
                    );
                    process_id.set(Some(started.process_id.clone()));
                    poll.set(PollController::new());
                    starting.set(false);

                    let pid = started.process_id;
                    let fetch_api = api.clone();
                    let fetch = move || {
                        let api = fetch_api.clone();
                        let pid = pid.clone();
                        async move { api.batch_status(&pid).await }
                    };

                    let apply = move |update: ProcessStatus| {
                        let terminal = update.status.is_terminal();
                        if terminal && update.status == RunStatus::Error {
                            let message = if update.error_message.is_empty() {
                                "Batch run failed".to_string()
                            } else {
                                update.error_message.clone()
                            };
                            banner.set(Some(message));
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

    let close_run = move |_| {
        poll.write().stop();
        process_id.set(None);
        status.set(None);
        selection.set(RowSelection::new());
        let mut banner = banner;
        banner.set(None);
        let mut notice = notice;
        notice.set(None);
    };

    // Resolve a file id to its display name via the cached file list.
    let display_name = move |file_id: &str| -> String {
        files
            .read()
            .files()
            .iter()
            .find(|f| f.file_id == file_id)
            .map(|f| f.filename.clone())
            .unwrap_or_else(|| file_id.to_string())
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
            let pct = run.overall_percent();
            let processed = run.processed_rows();
            let total = run.total_rows();

            rsx! {
                section { class: "gk-batch-running",
                    div { class: "gk-batch-overall",
                        div { class: "gk-batch-operation",
                            if run.current_file.is_empty() {
                                "Starting…"
                            } else {
                                "{run.current_file} · row {run.current_row} · {run.current_sanskrit}"
                            }
                        }
                        div { class: "gk-progress-bar gk-progress-bar--large",
                            span { style: "width: {pct}%;" }
                        }
                        div { class: "gk-batch-meta",
                            span { "{processed} / {total} rows · {pct}%" }
                            span { "{run.processed_files} / {run.total_files} files" }
                        }
                    }
                    div { class: "gk-batch-files",
                        for (file_id, sub) in run.progress.iter() {
                            {
                                let name = display_name(file_id);
                                let file_pct = percent(sub.processed, sub.total);
                                let sub_label = sub.status.label();
                                rsx! {
                                    div { key: "{file_id}", class: "gk-file-row",
                                        div { class: "gk-file-main",
                                            div { class: "gk-file-name", "{name}" }
                                            div { class: "gk-file-sub", "{sub_label}" }
                                        }
                                        div { class: "gk-file-progress",
                                            div { class: "gk-progress-bar",
                                                span { style: "width: {file_pct}%;" }
                                            }
                                            div { class: "gk-file-percent", "{file_pct}%" }
                                        }
                                    }
                                }
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
        Some(run) => rsx! {
            section { class: "gk-batch-review",
                for (file_id, rows) in run.results.iter().filter(|(_, rows)| !rows.is_empty()) {
                    {
                        let name = display_name(file_id);
                        let save_id = file_id.clone();
                        let save_rows = rows.clone();
                        let save_api = api.clone();
                        let selected_in_file = selection.read().count_file(file_id);
                        let save_file = move |_| {
                            let Some(pid) = process_id.read().clone() else {
                                return;
                            };
                            let mut banner = banner;
                            let picked = selection.read().pick_file(&save_id, &save_rows);
                            if let Err(err) = validate_save_selection(picked.len()) {
                                banner.set(Some(err.to_string()));
                                return;
                            }
                            let api = save_api.clone();
                            let mut notice = notice;
                            spawn(async move {
                                saving.set(true);
                                match api.save_batch_results(&pid, picked).await {
                                    Ok(outcome) => {
                                        info!("Saved {} row(s)", outcome.saved);
                                        notice.set(Some(format!("Saved {} row(s)", outcome.saved)));
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
                        rsx! {
                            section { key: "{file_id}", class: "gk-result-file",
                                header { class: "gk-result-file-header",
                                    h3 { class: "gk-result-file-title", "{name}" }
                                    button {
                                        class: "gk-btn gk-btn--primary",
                                        disabled: saving(),
                                        onclick: save_file,
                                        "Save file ({selected_in_file})"
                                    }
                                }
                                for (index, row) in rows.iter().enumerate() {
                                    {
                                        let tab = file_id.clone();
                                        let first_question = row.qa.q_en.first().cloned().unwrap_or_default();
                                        let checked = selection.read().is_selected(file_id, index);
                                        rsx! {
                                            div {
                                                key: "{index}",
                                                class: if checked { "gk-result-line gk-result-line--selected" } else { "gk-result-line" },
                                                label { class: "gk-result-select",
                                                    input {
                                                        r#type: "checkbox",
                                                        checked,
                                                        onchange: move |_| {
                                                            let mut sel = selection;
                                                            sel.write().toggle(&tab, index);
                                                        },
                                                    }
                                                }
                                                div { class: "gk-result-main",
                                                    div { class: "gk-result-source",
                                                        span { class: "gk-row-id", "#{row.id}" }
                                                        span { class: "gk-row-sanskrit", "{row.sanskrit}" }
                                                    }
                                                    div { class: "gk-result-preview", "{first_question}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                if run.results.values().all(Vec::is_empty) {
                    div { class: "gk-placeholder", "The run produced no new rows." }
                }
                button {
                    class: "gk-btn gk-btn--secondary",
                    onclick: close_run,
                    "Close run"
                }
            }
        },
    };

    rsx! {
        div { class: "gk-batch-pane",
            ErrorBanner { message: banner }
            NoticeBanner { message: notice }

            {pane}
        }
    }
}
