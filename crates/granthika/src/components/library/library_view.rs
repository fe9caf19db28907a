use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use granthika_core::filter::filter_rows;
use granthika_core::types::RowSummary;

use crate::api::ApiClient;
use crate::components::{
    use_api, use_batch_selection, use_editor_target, use_files, use_library_sender, EditorTarget,
    ErrorBanner, FilesState, LibraryMessage, View,
};

use super::file_card::FileCard;
use super::filter_bar::FilterBar;
use super::upload_card::UploadCard;

async fn load_rows(
    api: ApiClient,
    file_id: String,
    mut rows_cache: Signal<BTreeMap<String, Vec<RowSummary>>>,
    mut banner: Signal<Option<String>>,
) {
    match api.fetch_all_rows(&file_id).await {
        Ok(rows) => {
            rows_cache.write().insert(file_id, rows);
        }
        Err(err) => {
            error!("Failed to load rows for {file_id}: {err}");
            banner.set(Some(format!("Failed to load rows: {err}")));
        }
    }
}

/// Multi-file browser: upload, filter, per-file progress, row previews.
#[component]
pub fn LibraryView(on_navigate: EventHandler<View>) -> Element {
    let api = use_api();
    let files = use_files();
    let refresh = use_library_sender();
    let batch_selection = use_batch_selection();
    let mut editor_target = use_editor_target();

    let mut filter = use_signal(String::new);
    let mut expanded = use_signal(BTreeSet::<String>::new);
    let rows_cache = use_signal(BTreeMap::<String, Vec<RowSummary>>::new);
    let banner = use_signal(|| None::<String>);
    let mut uploading = use_signal(|| false);

    // A refresh cascades into the row caches: drop state for files that
    // no longer exist and re-fetch rows for the ones still expanded.
    let cascade_api = api.clone();
    use_effect(move || {
        let state = files();
        let FilesState::Ready(list) = state else {
            return;
        };
        let live: BTreeSet<String> = list.iter().map(|f| f.file_id.clone()).collect();

        let stale: Vec<String> = rows_cache
            .peek()
            .keys()
            .filter(|id| !live.contains(*id))
            .cloned()
            .collect();
        let mut cache = rows_cache;
        let mut open = expanded;
        for id in &stale {
            cache.write().remove(id);
            open.write().remove(id);
        }

        let reload: Vec<String> = open.peek().iter().cloned().collect();
        for file_id in reload {
            spawn(load_rows(cascade_api.clone(), file_id, rows_cache, banner));
        }
    });

    let upload_api = api.clone();
    let handle_upload = use_callback(move |selected: Vec<(String, String)>| {
        let api = upload_api.clone();
        let mut banner = banner;
        spawn(async move {
            uploading.set(true);
            for (name, contents) in selected {
                match api.upload_file(&name, contents.into_bytes()).await {
                    Ok(uploaded) => {
                        info!("Uploaded {} as {}", uploaded.filename, uploaded.file_id);
                    }
                    Err(err) => {
                        error!("Upload failed for {name}: {err}");
                        banner.set(Some(format!("Upload failed for {name}: {err}")));
                    }
                }
            }
            uploading.set(false);
            // Refresh rather than patching local state; the effect above
            // reloads expanded rows once the new list lands.
            refresh.send(LibraryMessage::Refresh);
        });
    });

    let expand_api = api.clone();
    let handle_toggle_expand = use_callback(move |file_id: String| {
        let mut open = expanded;
        if open.peek().contains(&file_id) {
            open.write().remove(&file_id);
            return;
        }
        open.write().insert(file_id.clone());
        if !rows_cache.peek().contains_key(&file_id) {
            spawn(load_rows(expand_api.clone(), file_id, rows_cache, banner));
        }
    });

    let delete_api = api.clone();
    let handle_delete = use_callback(move |file_id: String| {
        let api = delete_api.clone();
        let mut banner = banner;
        let mut selection = batch_selection;
        spawn(async move {
            match api.delete_file(&file_id).await {
                Ok(_) => {
                    info!("Deleted file {file_id}");
                    selection.write().remove(&file_id);
                    refresh.send(LibraryMessage::Refresh);
                }
                Err(err) => {
                    error!("Failed to delete {file_id}: {err}");
                    banner.set(Some(format!("Failed to delete file: {err}")));
                }
            }
        });
    });

    let handle_toggle_select = use_callback(move |file_id: String| {
        let mut selection = batch_selection;
        let mut selected = selection.write();
        if !selected.remove(&file_id) {
            selected.insert(file_id);
        }
    });

    let selected_count = batch_selection.read().len();
    let files_state = files();
    let filter_text = filter.read().clone();
    let filter_active = !filter_text.trim().is_empty();

    let file_section = match files_state {
        FilesState::Loading => rsx! {
            div { class: "gk-placeholder", "Loading files…" }
        },
        FilesState::Failed(err) => rsx! {
            div { class: "gk-placeholder gk-placeholder--error",
                "Could not load files: {err}"
                button {
                    class: "gk-btn gk-btn--secondary",
                    onclick: move |_| refresh.send(LibraryMessage::Refresh),
                    "Retry"
                }
            }
        },
        FilesState::Ready(list) if list.is_empty() => rsx! {
            div { class: "gk-placeholder",
                "No files yet. Upload a CSV to get started."
            }
        },
        FilesState::Ready(list) => rsx! {
            div { class: "gk-file-list",
                for file in list.iter() {
                    {
                        let filename = file.filename.clone();
                        let cached = rows_cache.read().get(&file.file_id).cloned();
                        let visible = cached.map(|rows| {
                            filter_rows(&rows, &filter_text)
                                .into_iter()
                                .cloned()
                                .collect::<Vec<_>>()
                        });
                        let open_row = move |row: RowSummary| {
                            editor_target.set(Some(EditorTarget {
                                file_id: row.file_id.clone(),
                                filename: filename.clone(),
                                row_id: row.id,
                            }));
                            on_navigate.call(View::Editor);
                        };
                        rsx! {
                            FileCard {
                                key: "{file.file_id}",
                                info: file.clone(),
                                selected: batch_selection.read().contains(&file.file_id),
                                expanded: expanded.read().contains(&file.file_id),
                                rows: visible,
                                filter_active,
                                on_toggle_select: handle_toggle_select,
                                on_toggle_expand: handle_toggle_expand,
                                on_delete: handle_delete,
                                on_open_row: open_row,
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        section { class: "gk-view gk-view--library",
            header { class: "gk-view-header",
                h2 { class: "gk-view-title", "Library" }
                div { class: "gk-view-actions",
                    button {
                        class: "gk-btn gk-btn--secondary",
                        onclick: move |_| refresh.send(LibraryMessage::Refresh),
                        "Refresh"
                    }
                    button {
                        class: "gk-btn gk-btn--primary",
                        onclick: move |_| on_navigate.call(View::Batch),
                        "Batch run ({selected_count} selected)"
                    }
                }
            }

            ErrorBanner { message: banner }

            UploadCard {
                on_files_selected: handle_upload,
                busy: uploading,
            }

            FilterBar {
                on_change: move |text| filter.set(text),
            }

            {file_section}
        }
    }
}
