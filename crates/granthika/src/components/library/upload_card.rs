use dioxus::logger::tracing::error;
use dioxus::prelude::*;

/// Upload card with a dropzone for CSV selection
#[component]
pub fn UploadCard(on_files_selected: EventHandler<Vec<(String, String)>>, busy: ReadSignal<bool>) -> Element {
    rsx! {
        section { class: "gk-upload-card",
            label { class: if busy() { "gk-dropzone gk-dropzone--busy" } else { "gk-dropzone" },
                input {
                    r#type: "file",
                    class: "gk-dropzone-input",
                    accept: ".csv",
                    multiple: true,
                    disabled: busy(),
                    onchange: move |evt: dioxus::events::FormEvent| {
                        spawn(async move {
                            let files = evt.files();
                            if files.is_empty() {
                                return;
                            }

                            let mut contents = Vec::new();
                            for file in files {
                                let name = file.name().to_string();
                                match file.read_string().await {
                                    Ok(text) => contents.push((name, text)),
                                    Err(err) => {
                                        error!("Failed to read {name}: {err}");
                                    }
                                }
                            }

                            if !contents.is_empty() {
                                on_files_selected.call(contents);
                            }
                        });
                    }
                }
                div { class: "gk-dropzone-inner",
                    div { class: "gk-dropzone-icon", "📜" }
                    div { class: "gk-dropzone-title",
                        if busy() {
                            "Uploading…"
                        } else {
                            "Drop in CSV files of Sanskrit/English pairs"
                        }
                    }
                    div { class: "gk-dropzone-subtitle",
                        "Each row needs a sanskrit and an english column; tags are optional."
                    }
                }
            }
        }
    }
}
