use dioxus::prelude::*;

use crate::components::{use_backend_status, BackendStatus};

/// View selection enum for navigation
#[derive(Clone, Copy, PartialEq)]
pub enum View {
    Library,
    Editor,
    Batch,
}

/// Global app bar with logo, navigation, and the backend status pill
#[component]
pub fn AppBar(current_view: ReadSignal<View>, on_view_change: EventHandler<View>) -> Element {
    let backend_status = use_backend_status();

    let backend_pill = {
        let status = backend_status.read().clone();
        match status {
            BackendStatus::Checking => rsx! {
                span { class: "gk-status-pill gk-status-pill--warn",
                    span { class: "gk-status-dot gk-status-dot--warn" }
                    "Backend: checking…"
                }
            },
            BackendStatus::Ready => rsx! {
                span { class: "gk-status-pill gk-status-pill--ok",
                    span { class: "gk-status-dot gk-status-dot--ok" }
                    "Backend: connected"
                }
            },
            BackendStatus::Unreachable(err) => rsx! {
                span { class: "gk-status-pill gk-status-pill--error",
                    span { class: "gk-status-dot gk-status-dot--error" }
                    "Backend offline: {err}"
                }
            },
        }
    };

    let nav_class = move |view: View| {
        if current_view() == view {
            "gk-nav-link gk-nav-link--active"
        } else {
            "gk-nav-link"
        }
    };

    rsx! {
        header { class: "gk-appbar",
            div { class: "gk-appbar-left",
                div { class: "gk-logo",
                    span { class: "gk-logo-word", "Gran" }
                    span { class: "gk-logo-word gk-logo-word--accent", "thika" }
                }
            }
            nav { class: "gk-appbar-center",
                button {
                    class: nav_class(View::Library),
                    onclick: move |_| on_view_change.call(View::Library),
                    "Library"
                }
                button {
                    class: nav_class(View::Editor),
                    onclick: move |_| on_view_change.call(View::Editor),
                    "Editor"
                }
                button {
                    class: nav_class(View::Batch),
                    onclick: move |_| on_view_change.call(View::Batch),
                    "Batch"
                }
            }
            div { class: "gk-appbar-right",
                {backend_pill}
            }
        }
    }
}
