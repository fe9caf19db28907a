use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;

use granthika_core::error::SelectionError;
use granthika_core::payload::SaveRowPayload;
use granthika_core::poll::DebounceGate;
use granthika_core::qa::{collect_generated, split_tags, QaPairSet};
use granthika_core::selection::{validate_save_selection, PairSelection};
use granthika_core::types::GeneratedQa;

use crate::api::ApiClient;
use crate::components::{
    use_api, use_editor_target, use_library_sender, EditorTarget, ErrorBanner, LibraryMessage,
    NoticeBanner,
};
use crate::platform;

use super::pair_card::PairCard;

/// Idle time on the source fields before auto-generate fires.
const AUTO_GENERATE_DEBOUNCE_MS: u64 = 1_500;

/// Default number of pairs to request per row.
const DEFAULT_QA_COUNT: usize = 4;

/// Editor lifecycle for the open row.
#[derive(Clone, Copy, PartialEq)]
enum EditorPhase {
    Unloaded,
    Loading,
    Loaded,
    Generating,
    Generated,
    Saving,
}

/// Call the generation endpoint and land the result in the review state.
///
/// On failure the phase rolls back to whatever it was, leaving the
/// in-memory row untouched.
async fn run_generation(
    api: ApiClient,
    target: EditorTarget,
    qa_count: usize,
    mut phase: Signal<EditorPhase>,
    mut pairs: Signal<Vec<QaPairSet>>,
    mut pair_sel: Signal<PairSelection>,
    mut banner: Signal<Option<String>>,
) {
    let previous = *phase.peek();
    phase.set(EditorPhase::Generating);

    match api
        .generate_row(&target.file_id, target.row_id, qa_count)
        .await
    {
        Ok(generated) => {
            // Widen the CSV schema up front so the later save has columns
            // for every pair.
            if let Err(err) = api.ensure_headers(&target.file_id, qa_count).await {
                warn!("Failed to widen headers for {}: {err}", target.file_id);
            }

            let count = generated.pair_count();
            info!(
                "Generated {count} pair(s) for row {} of {}",
                target.row_id, target.file_id
            );
            pairs.set(generated.to_pairs());
            pair_sel.set(PairSelection::all(count));
            banner.set(None);
            phase.set(EditorPhase::Generated);
        }
        Err(err) => {
            error!("Generation failed: {err}");
            banner.set(Some(format!("Generation failed: {err}")));
            phase.set(previous);
        }
    }
}

/// Single-row editor: source text, tag list, generation, review, save.
#[component]
pub fn EditorView() -> Element {
    let api = use_api();
    let editor_target = use_editor_target();
    let refresh = use_library_sender();

    let mut phase = use_signal(|| EditorPhase::Unloaded);
    let mut sanskrit = use_signal(String::new);
    let mut english = use_signal(String::new);
    let mut tag_input = use_signal(String::new);
    let mut qa_count = use_signal(|| DEFAULT_QA_COUNT);
    let mut pairs = use_signal(Vec::<QaPairSet>::new);
    let mut pair_sel = use_signal(PairSelection::default);
    let mut auto_generate = use_signal(|| false);
    let gate = use_signal(DebounceGate::new);
    let banner = use_signal(|| None::<String>);
    let notice = use_signal(|| None::<String>);
    let loaded_target = use_signal(|| None::<EditorTarget>);

    // Load the row whenever the library hands over a new target.
    let load_api = api.clone();
    use_effect(move || {
        let Some(target) = editor_target() else {
            return;
        };
        if *loaded_target.peek() == Some(target.clone()) {
            return;
        }

        let mut loaded = loaded_target;
        let mut banner = banner;
        loaded.set(Some(target.clone()));
        phase.set(EditorPhase::Loading);

        let api = load_api.clone();
        spawn(async move {
            match api.get_row(&target.file_id, target.row_id).await {
                Ok(row) => {
                    sanskrit.set(row.sanskrit.clone());
                    english.set(row.english.clone());
                    tag_input.set(row.tags.clone());

                    let existing = collect_generated(&row);
                    if existing.is_empty() {
                        pairs.set(Vec::new());
                        pair_sel.set(PairSelection::default());
                        phase.set(EditorPhase::Loaded);
                    } else {
                        // The row was generated before; open it in review.
                        let count = existing.pair_count();
                        pairs.set(existing.to_pairs());
                        pair_sel.set(PairSelection::all(count));
                        phase.set(EditorPhase::Generated);
                    }
                }
                Err(err) => {
                    error!("Failed to load row: {err}");
                    banner.set(Some(format!("Failed to load row: {err}")));
                    phase.set(EditorPhase::Unloaded);
                }
            }
        });
    });

    // Auto-generate: re-trigger after idle edits once both sources are
    // non-empty. The gate discards superseded timers.
    let auto_api = api.clone();
    use_effect(move || {
        let enabled = auto_generate();
        let s = sanskrit();
        let e = english();
        if !enabled || s.trim().is_empty() || e.trim().is_empty() {
            return;
        }

        let mut gate = gate;
        let generation = gate.write().arm();
        let api = auto_api.clone();
        spawn(async move {
            platform::sleep_ms(AUTO_GENERATE_DEBOUNCE_MS).await;
            if !gate.peek().is_current(generation) {
                return;
            }
            if *phase.peek() == EditorPhase::Generating {
                return;
            }
            let Some(target) = editor_target.peek().clone() else {
                return;
            };
            let count = *qa_count.peek();
            run_generation(api, target, count, phase, pairs, pair_sel, banner).await;
        });
    });

    let generate_api = api.clone();
    let start_generation = move |_| {
        let Some(target) = editor_target.read().clone() else {
            return;
        };
        if sanskrit.read().trim().is_empty() || english.read().trim().is_empty() {
            let mut banner = banner;
            banner.set(Some(SelectionError::MissingSourceText.to_string()));
            return;
        }
        spawn(run_generation(
            generate_api.clone(),
            target,
            qa_count(),
            phase,
            pairs,
            pair_sel,
            banner,
        ));
    };

    let save_api = api.clone();
    let save_row = move |_| {
        let Some(target) = editor_target.read().clone() else {
            return;
        };
        let mut banner = banner;
        if let Err(err) = validate_save_selection(pair_sel.read().count()) {
            banner.set(Some(err.to_string()));
            return;
        }

        let payload = SaveRowPayload::new(
            sanskrit.read().clone(),
            english.read().clone(),
            &split_tags(&tag_input.read()),
            &GeneratedQa::from_pairs(&pairs.read()),
            &pair_sel.read(),
        );

        let api = save_api.clone();
        let mut notice = notice;
        spawn(async move {
            phase.set(EditorPhase::Saving);
            match api.save_row(&target.file_id, target.row_id, &payload).await {
                Ok(_) => {
                    info!("Saved row {} of {}", target.row_id, target.file_id);
                    banner.set(None);
                    notice.set(Some("Row saved.".to_string()));
                    phase.set(EditorPhase::Generated);
                    refresh.send(LibraryMessage::Refresh);
                }
                Err(err) => {
                    error!("Save failed: {err}");
                    banner.set(Some(format!("Save failed: {err}")));
                    phase.set(EditorPhase::Generated);
                }
            }
        });
    };

    let handle_toggle = move |index: usize| {
        pair_sel.write().toggle(index);
    };

    let handle_edit = move |(index, updated): (usize, QaPairSet)| {
        if let Some(slot) = pairs.write().get_mut(index) {
            *slot = updated;
        }
    };

    let Some(target) = editor_target() else {
        return rsx! {
            section { class: "gk-view gk-view--editor",
                div { class: "gk-placeholder",
                    "No row open. Pick one from the library to edit it here."
                }
            }
        };
    };

    let current_phase = phase();
    let busy = matches!(
        current_phase,
        EditorPhase::Loading | EditorPhase::Generating | EditorPhase::Saving
    );
    let phase_note = match current_phase {
        EditorPhase::Loading => Some("Loading row…"),
        EditorPhase::Generating => Some("Generating Q&A…"),
        EditorPhase::Saving => Some("Saving…"),
        _ => None,
    };
    let tags = split_tags(&tag_input.read());
    let selected_pairs = pair_sel.read().count();
    let has_pairs = !pairs.read().is_empty();

    rsx! {
        section { class: "gk-view gk-view--editor",
            header { class: "gk-view-header",
                h2 { class: "gk-view-title", "{target.filename} · row #{target.row_id}" }
                if let Some(note) = phase_note {
                    span { class: "gk-status-pill gk-status-pill--warn",
                        span { class: "gk-status-dot gk-status-dot--warn" }
                        "{note}"
                    }
                }
            }

            ErrorBanner { message: banner }
            NoticeBanner { message: notice }

            section { class: "gk-source-card",
                div { class: "gk-source-field",
                    label { class: "gk-pair-label", "Sanskrit" }
                    textarea {
                        class: "gk-source-input gk-source-input--sanskrit",
                        rows: "3",
                        value: "{sanskrit}",
                        oninput: move |evt| sanskrit.set(evt.value()),
                    }
                }
                div { class: "gk-source-field",
                    label { class: "gk-pair-label", "English" }
                    textarea {
                        class: "gk-source-input",
                        rows: "3",
                        value: "{english}",
                        oninput: move |evt| english.set(evt.value()),
                    }
                }
                div { class: "gk-source-field",
                    label { class: "gk-pair-label", "Tags (comma-separated)" }
                    input {
                        class: "gk-source-input",
                        r#type: "text",
                        value: "{tag_input}",
                        oninput: move |evt| tag_input.set(evt.value()),
                    }
                    div { class: "gk-row-tags",
                        for tag in tags.iter() {
                            span { class: "gk-chip", "{tag}" }
                        }
                    }
                }
            }

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
                label { class: "gk-control",
                    input {
                        r#type: "checkbox",
                        checked: auto_generate(),
                        onchange: move |evt| auto_generate.set(evt.checked()),
                    }
                    "Auto-generate on edit"
                }
                button {
                    class: "gk-btn gk-btn--primary",
                    disabled: busy,
                    onclick: start_generation,
                    if current_phase == EditorPhase::Generating {
                        "Generating…"
                    } else {
                        "Generate"
                    }
                }
                if has_pairs {
                    button {
                        class: "gk-btn gk-btn--primary",
                        disabled: busy,
                        onclick: save_row,
                        if current_phase == EditorPhase::Saving {
                            "Saving…"
                        } else {
                            "Save selected ({selected_pairs})"
                        }
                    }
                }
            }

            if has_pairs {
                section { class: "gk-pair-list",
                    for (index, pair) in pairs.read().iter().enumerate() {
                        PairCard {
                            key: "{index}",
                            index,
                            pair: pair.clone(),
                            selected: pair_sel.read().is_selected(index),
                            on_toggle: handle_toggle,
                            on_edit: handle_edit,
                        }
                    }
                }
            }
        }
    }
}
