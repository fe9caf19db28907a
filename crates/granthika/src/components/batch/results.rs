use dioxus::prelude::*;
use std::collections::BTreeMap;

use granthika_core::selection::RowSelection;
use granthika_core::types::ResultRow;

/// Generated results grouped by file into tabs, with per-row selection.
///
/// Selection indices point into the result ordering of the most recent
/// accepted poll; the parent resets them whenever a new run starts.
#[component]
pub fn ResultsPanel(
    results: BTreeMap<String, Vec<ResultRow>>,
    filenames: BTreeMap<String, String>,
    selection: Signal<RowSelection>,
    active_tab: Signal<Option<String>>,
) -> Element {
    if results.values().all(Vec::is_empty) {
        return rsx! {
            div { class: "gk-placeholder", "The run produced no new rows." }
        };
    }

    let active = active_tab().or_else(|| results.keys().next().cloned());

    rsx! {
        section { class: "gk-results",
            div { class: "gk-tabs",
                for (file_id, rows) in results.iter() {
                    {
                        let id = file_id.clone();
                        let label = filenames
                            .get(file_id)
                            .cloned()
                            .unwrap_or_else(|| file_id.clone());
                        let selected_count = selection.read().count_file(file_id);
                        let total = rows.len();
                        let is_active = active.as_deref() == Some(file_id.as_str());
                        rsx! {
                            button {
                                key: "{file_id}",
                                class: if is_active { "gk-tab gk-tab--active" } else { "gk-tab" },
                                onclick: move |_| {
                                    let mut tab = active_tab;
                                    tab.set(Some(id.clone()));
                                },
                                "{label} ({selected_count}/{total})"
                            }
                        }
                    }
                }
            }

            if let Some(active_id) = active {
                if let Some(rows) = results.get(&active_id) {
                    div { class: "gk-result-list",
                        header { class: "gk-result-list-header",
                            {
                                let all_id = active_id.clone();
                                let clear_id = active_id.clone();
                                let count = rows.len();
                                rsx! {
                                    button {
                                        class: "gk-btn gk-btn--secondary",
                                        onclick: move |_| {
                                            let mut sel = selection;
                                            sel.write().select_all(&all_id, count);
                                        },
                                        "Select all"
                                    }
                                    button {
                                        class: "gk-btn gk-btn--secondary",
                                        onclick: move |_| {
                                            let mut sel = selection;
                                            sel.write().clear_file(&clear_id);
                                        },
                                        "Clear"
                                    }
                                }
                            }
                        }

                        for (index, row) in rows.iter().enumerate() {
                            {
                                let tab = active_id.clone();
                                rsx! {
                                    ResultLine {
                                        key: "{index}",
                                        index,
                                        row: row.clone(),
                                        selected: selection.read().is_selected(&active_id, index),
                                        on_toggle: move |i: usize| {
                                            let mut sel = selection;
                                            sel.write().toggle(&tab, i);
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One generated row: checkbox, source preview, first generated pair.
#[component]
fn ResultLine(index: usize, row: ResultRow, selected: bool, on_toggle: EventHandler<usize>) -> Element {
    let pair_count = row.qa.pair_count();
    let first_question = row.qa.q_en.first().cloned().unwrap_or_default();

    rsx! {
        div { class: if selected { "gk-result-line gk-result-line--selected" } else { "gk-result-line" },
            label { class: "gk-result-select",
                input {
                    r#type: "checkbox",
                    checked: selected,
                    onchange: move |_| on_toggle.call(index),
                }
            }
            div { class: "gk-result-main",
                div { class: "gk-result-source",
                    span { class: "gk-row-id", "#{row.id}" }
                    span { class: "gk-row-sanskrit", "{row.sanskrit}" }
                }
                div { class: "gk-result-preview",
                    "{pair_count} pair(s) · {first_question}"
                }
            }
        }
    }
}
