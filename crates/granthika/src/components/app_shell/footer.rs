use dioxus::prelude::*;

/// Global footer
#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "gk-footer",
            span { "Granthika · Sanskrit Q&A dataset studio" }
            span { class: "gk-footer-hint",
                "Generation runs on the backend; nothing is saved until you choose to."
            }
        }
    }
}
