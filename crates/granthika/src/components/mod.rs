//! UI components for the Granthika application.
//!
//! # Component Architecture
//!
//! - `app_shell`: AppBar (navigation + backend status pill), Footer
//! - `library`: LibraryView, UploadCard, FileCard, FilterBar
//! - `editor`: EditorView, PairCard
//! - `batch`: BatchView with the detailed and quick run variants
//!
//! # Context Providers
//!
//! Top-level state lives in App and is shared through Dioxus context:
//!
//! ```ignore
//! let api = use_api();                    // ApiClient
//! let files = use_files();                // Signal<FilesState>
//! let selection = use_batch_selection();  // Signal<BTreeSet<String>> of file ids
//! let target = use_editor_target();       // Signal<Option<EditorTarget>>
//! let refresh = use_library_sender();     // Coroutine<LibraryMessage>
//! ```

mod app_shell;
mod batch;
mod editor;
mod library;

pub use app_shell::{AppBar, Footer, View};
pub use batch::BatchView;
pub use editor::EditorView;
pub use library::LibraryView;

use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use std::collections::BTreeSet;

use granthika_core::types::FileInfo;

use crate::api::ApiClient;

// ============================================================================
// Shared state types
// ============================================================================

/// Backend reachability, shown as a pill in the app bar.
#[derive(Clone, PartialEq)]
pub enum BackendStatus {
    Checking,
    Ready,
    Unreachable(String),
}

/// The cached file collection.
#[derive(Clone, PartialEq)]
pub enum FilesState {
    Loading,
    Ready(Vec<FileInfo>),
    Failed(String),
}

impl FilesState {
    /// The files when loaded, empty otherwise.
    pub fn files(&self) -> &[FileInfo] {
        match self {
            FilesState::Ready(files) => files,
            _ => &[],
        }
    }
}

/// The row currently open in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorTarget {
    pub file_id: String,
    pub filename: String,
    pub row_id: usize,
}

/// Messages for the library refresh coroutine.
pub enum LibraryMessage {
    Refresh,
}

// ============================================================================
// Context accessors
// ============================================================================

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_backend_status() -> Signal<BackendStatus> {
    use_context::<Signal<BackendStatus>>()
}

pub fn use_files() -> Signal<FilesState> {
    use_context::<Signal<FilesState>>()
}

/// File ids marked for the next batch run.
pub fn use_batch_selection() -> Signal<BTreeSet<String>> {
    use_context::<Signal<BTreeSet<String>>>()
}

pub fn use_editor_target() -> Signal<Option<EditorTarget>> {
    use_context::<Signal<Option<EditorTarget>>>()
}

pub fn use_library_sender() -> Coroutine<LibraryMessage> {
    use_context::<Coroutine<LibraryMessage>>()
}

// ============================================================================
// Shared widgets
// ============================================================================

/// Dismissible error banner; the views park their failure messages here.
#[component]
pub fn ErrorBanner(message: Signal<Option<String>>) -> Element {
    let Some(text) = message() else {
        return rsx! {
            Fragment {}
        };
    };

    rsx! {
        div { class: "gk-banner gk-banner--error", role: "alert",
            span { class: "gk-banner-text", "{text}" }
            button {
                class: "gk-banner-dismiss",
                onclick: move |_| message.set(None),
                "aria-label": "Dismiss",
                "✕"
            }
        }
    }
}

/// Success/notice banner counterpart of [`ErrorBanner`].
#[component]
pub fn NoticeBanner(message: Signal<Option<String>>) -> Element {
    let Some(text) = message() else {
        return rsx! {
            Fragment {}
        };
    };

    rsx! {
        div { class: "gk-banner gk-banner--notice",
            span { class: "gk-banner-text", "{text}" }
            button {
                class: "gk-banner-dismiss",
                onclick: move |_| message.set(None),
                "aria-label": "Dismiss",
                "✕"
            }
        }
    }
}

// ============================================================================
// App root
// ============================================================================

#[component]
pub fn App() -> Element {
    // Shared API client, bound to the configured base URL.
    let api = ApiClient::from_env();
    use_context_provider(|| api.clone());

    // Backend reachability pill state.
    let backend_status = use_signal(|| BackendStatus::Checking);
    use_context_provider(|| backend_status);

    // File collection cache.
    let files = use_signal(|| FilesState::Loading);
    use_context_provider(|| files);

    // Top-level selection state: files for the next batch run, and the
    // row open in the editor.
    let batch_selection = use_signal(BTreeSet::<String>::new);
    use_context_provider(|| batch_selection);

    let editor_target = use_signal(|| None::<EditorTarget>);
    use_context_provider(|| editor_target);

    // Startup health probe.
    let mut status_signal = backend_status;
    let health_api = api.clone();
    use_effect(move || {
        let api = health_api.clone();
        spawn(async move {
            match api.health().await {
                Ok(_) => status_signal.set(BackendStatus::Ready),
                Err(err) => {
                    error!("Backend health check failed: {err}");
                    status_signal.set(BackendStatus::Unreachable(err.to_string()));
                }
            }
        });
    });

    // Library refresh coroutine: every mutation funnels through this so
    // the file list is always re-fetched rather than patched locally.
    let refresh = use_coroutine({
        let api = api.clone();
        let mut files_signal = files;
        move |mut rx: UnboundedReceiver<LibraryMessage>| {
            let api = api.clone();
            async move {
                while let Some(msg) = rx.next().await {
                    match msg {
                        LibraryMessage::Refresh => match api.list_files().await {
                            Ok(list) => {
                                info!("Loaded {} file(s)", list.len());
                                files_signal.set(FilesState::Ready(list));
                            }
                            Err(err) => {
                                error!("Failed to list files: {err}");
                                files_signal.set(FilesState::Failed(err.to_string()));
                            }
                        },
                    }
                }
            }
        }
    });
    use_context_provider(|| refresh);

    // Initial load.
    use_effect(move || {
        refresh.send(LibraryMessage::Refresh);
    });

    // View routing.
    let mut current_view = use_signal(|| View::Library);

    let active_view = match current_view() {
        View::Library => rsx! {
            LibraryView {
                on_navigate: move |view| current_view.set(view),
            }
        },
        View::Editor => rsx! {
            EditorView {}
        },
        View::Batch => rsx! {
            BatchView {}
        },
    };

    rsx! {
        div { class: "gk-app",
            AppBar {
                current_view,
                on_view_change: move |view| current_view.set(view),
            }

            main { class: "gk-main", {active_view} }

            Footer {}
        }
    }
}
