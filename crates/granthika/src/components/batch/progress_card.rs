use dioxus::prelude::*;

use granthika_core::types::{FileProgress, FileStatus};

/// Per-file progress row with a bar, status line, and the row preview the
/// backend is currently generating.
#[component]
pub fn ProgressCard(progress: FileProgress) -> Element {
    let pct = progress.percent();

    let status_text = match progress.status {
        FileStatus::Processing => {
            if progress.current_sanskrit.is_empty() {
                format!("Row {} / {}", progress.current_row, progress.total_rows)
            } else {
                format!(
                    "Row {} / {} · {}",
                    progress.current_row, progress.total_rows, progress.current_sanskrit
                )
            }
        }
        FileStatus::Error => {
            if progress.error_message.is_empty() {
                "Error".to_string()
            } else {
                format!("Error: {}", progress.error_message)
            }
        }
        other => other.label().to_string(),
    };

    rsx! {
        div { class: "gk-file-row",
            div { class: "gk-file-main",
                div { class: "gk-file-name", "{progress.filename}" }
                div { class: "gk-file-sub", "{status_text}" }
            }
            div { class: "gk-file-progress",
                div { class: "gk-progress-bar",
                    span { style: "width: {pct}%;" }
                }
                div { class: "gk-file-percent", "{pct}%" }
            }
        }
    }
}
