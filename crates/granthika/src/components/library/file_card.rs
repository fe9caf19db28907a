use dioxus::prelude::*;

use granthika_core::qa::split_tags;
use granthika_core::types::{FileInfo, FileStatus, RowSummary};

use crate::components::use_api;
use crate::utils::formatting::format_created_date;

/// One uploaded file: metadata, processing progress, and its rows when
/// expanded.
#[component]
pub fn FileCard(
    info: FileInfo,
    selected: bool,
    expanded: bool,
    rows: Option<Vec<RowSummary>>,
    filter_active: bool,
    on_toggle_select: EventHandler<String>,
    on_toggle_expand: EventHandler<String>,
    on_delete: EventHandler<String>,
    on_open_row: EventHandler<RowSummary>,
) -> Element {
    let api = use_api();
    let mut confirm_delete = use_signal(|| false);

    let pct = info.completion_percent();
    let status_class = match info.status {
        FileStatus::Pending => "gk-tag gk-tag--muted",
        FileStatus::Processing => "gk-tag gk-tag--warn",
        FileStatus::Completed => "gk-tag gk-tag--success",
        FileStatus::Error => "gk-tag gk-tag--error",
    };

    let file_id = info.file_id.clone();
    let toggle_id = file_id.clone();
    let expand_id = file_id.clone();
    let delete_id = file_id.clone();
    let download_href = api.download_url(&file_id);
    let uploaded = format_created_date(&info.created_at).to_string();
    let status_label = info.status.label();

    let rows_body = match rows {
        None => rsx! {
            div { class: "gk-file-rows-empty", "Loading rows…" }
        },
        Some(rows) if rows.is_empty() => rsx! {
            div { class: "gk-file-rows-empty",
                if filter_active {
                    "No rows match the filter."
                } else {
                    "This file has no rows."
                }
            }
        },
        Some(rows) => rsx! {
            for row in rows.iter() {
                RowLine {
                    key: "{row.id}",
                    row: row.clone(),
                    on_open: on_open_row,
                }
            }
        },
    };

    rsx! {
        article { class: if selected { "gk-file-card gk-file-card--selected" } else { "gk-file-card" },
            div { class: "gk-file-row",
                input {
                    r#type: "checkbox",
                    class: "gk-file-select",
                    checked: selected,
                    title: "Include in batch run",
                    onchange: move |_| on_toggle_select.call(toggle_id.clone()),
                }

                div { class: "gk-file-main",
                    div { class: "gk-file-name", "{info.filename}" }
                    div { class: "gk-file-sub",
                        "{info.row_count} rows · {info.processed_count} processed · uploaded {uploaded}"
                    }
                }

                div { class: "gk-file-progress",
                    div { class: "gk-progress-bar",
                        span { style: "width: {pct}%;" }
                    }
                    div { class: "gk-file-percent", "{pct}%" }
                }

                span { class: status_class, "{status_label}" }

                div { class: "gk-file-actions",
                    a {
                        class: "gk-icon-button",
                        href: "{download_href}",
                        download: "{info.filename}",
                        title: "Download CSV",
                        "⬇"
                    }
                    if confirm_delete() {
                        button {
                            class: "gk-icon-button gk-icon-button--danger",
                            title: "Click again to delete",
                            onclick: move |_| {
                                confirm_delete.set(false);
                                on_delete.call(delete_id.clone());
                            },
                            "Delete?"
                        }
                        button {
                            class: "gk-icon-button",
                            onclick: move |_| confirm_delete.set(false),
                            "Keep"
                        }
                    } else {
                        button {
                            class: "gk-icon-button",
                            title: "Delete file",
                            onclick: move |_| confirm_delete.set(true),
                            "🗑"
                        }
                    }
                    button {
                        class: if expanded { "gk-expand-btn gk-expand-btn--expanded" } else { "gk-expand-btn" },
                        "aria-label": if expanded { "Collapse rows" } else { "Expand rows" },
                        onclick: move |_| on_toggle_expand.call(expand_id.clone()),
                        "▼"
                    }
                }
            }

            if expanded {
                div { class: "gk-file-rows", {rows_body} }
            }
        }
    }
}

/// One row preview line inside an expanded file card.
#[component]
fn RowLine(row: RowSummary, on_open: EventHandler<RowSummary>) -> Element {
    let tags = split_tags(&row.tags);
    let row_for_open = row.clone();

    rsx! {
        div {
            class: "gk-row-line",
            onclick: move |_| on_open.call(row_for_open.clone()),
            span { class: "gk-row-id", "#{row.id}" }
            span { class: "gk-row-sanskrit", "{row.sanskrit}" }
            span { class: "gk-row-english", "{row.english}" }
            span { class: "gk-row-tags",
                for tag in tags.iter() {
                    span { class: "gk-chip", "{tag}" }
                }
            }
        }
    }
}
