use crate::api::SummarizerApi;
use crate::markdown::markdown_to_html;
use crate::settings::ProviderSettings;
use crate::summarize::SummarizeForm;
use crate::types::UploadFile;
use crate::ui::AppContext;
use crate::views::shared::{AlertDialog, copy_to_clipboard};
use dioxus::html::FileEngine;
use dioxus::prelude::*;
use std::sync::Arc;

async fn read_first_file(engine: Arc<dyn FileEngine>) -> Option<UploadFile> {
    let name = engine.files().into_iter().next()?;
    let bytes = engine.read_file(&name).await?;
    // Keep only the file name, desktop engines report full paths.
    let display_name = std::path::Path::new(&name)
        .file_name()
        .and_then(|stem| stem.to_str())
        .unwrap_or(&name)
        .to_string();
    Some(UploadFile::new(display_name, bytes))
}

#[component]
pub fn SummarizeView(settings: Signal<ProviderSettings>, history_reload: Signal<u32>) -> Element {
    let app = use_context::<AppContext>();
    let mut form = use_signal(SummarizeForm::new);
    let mut history_reload = history_reload;

    let snapshot = form.read().clone();
    let summary_html = snapshot.summary().map(markdown_to_html);
    let summary_raw = snapshot.summary().map(str::to_string);

    rsx! {
        div { class: "main-container",
            div { class: "input-section",
                textarea {
                    id: "text-input",
                    rows: "10",
                    placeholder: "Paste text here or upload a .txt / .pdf file…",
                    value: "{snapshot.text}",
                    oninput: move |evt: FormEvent| {
                        form.write().text = evt.value();
                    },
                }
                div { class: "upload-row",
                    label { class: "btn btn-ghost file-picker",
                        input {
                            id: "file-input",
                            r#type: "file",
                            accept: ".txt,.pdf",
                            multiple: false,
                            onchange: move |evt: FormEvent| async move {
                                let picked = match evt.files() {
                                    Some(engine) => read_first_file(engine).await,
                                    None => None,
                                };
                                form.write().select_file(picked);
                            },
                        }
                        "Choose file"
                    }
                    span { id: "file-name", class: "text-muted", "{snapshot.file_label()}" }
                    button {
                        id: "upload-btn",
                        class: "btn",
                        r#type: "button",
                        disabled: snapshot.is_uploading(),
                        onclick: {
                            let app = app.clone();
                            move |_| {
                                let file = form.write().begin_upload();
                                let Some(file) = file else {
                                    return;
                                };
                                let app = app.clone();
                                spawn(async move {
                                    let result = app.api.upload(file).await;
                                    form.write().finish_upload(result);
                                });
                            }
                        },
                        "{snapshot.upload_label()}"
                    }
                }
                div { class: "field",
                    label { for: "prompt", "Prompt" }
                    input {
                        id: "prompt",
                        r#type: "text",
                        placeholder: "summarize the given text into brief info.",
                        value: "{snapshot.prompt}",
                        oninput: move |evt: FormEvent| {
                            form.write().prompt = evt.value();
                        },
                    }
                }
                button {
                    id: "summarize-btn",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: snapshot.is_summarizing(),
                    onclick: {
                        let app = app.clone();
                        move |_| {
                            let request = form.write().begin_summarize(&settings.read());
                            let Some(request) = request else {
                                return;
                            };
                            let app = app.clone();
                            spawn(async move {
                                let result = app.api.summarize(&request, &app.visitor).await;
                                let reload = {
                                    let mut state = form.write();
                                    state.finish_summarize(&app.store, result);
                                    state.take_history_reload()
                                };
                                if reload {
                                    history_reload += 1;
                                }
                            });
                        }
                    },
                    "{snapshot.summarize_label()}"
                }
            }

            if let Some(html) = summary_html {
                section { id: "result-section", class: "result-section",
                    div { class: "result-header",
                        h3 { class: "section-title", "Summary" }
                        button {
                            class: "action-btn",
                            title: "Copy summary",
                            onclick: move |_| {
                                if let Some(raw) = summary_raw.clone() {
                                    copy_to_clipboard(raw);
                                }
                            },
                            "Copy"
                        }
                    }
                    div { id: "summary-output", class: "md", dangerous_inner_html: html }
                }
            }

            if let Some(message) = snapshot.alert() {
                AlertDialog {
                    message: message.to_string(),
                    on_dismiss: move |_| form.write().dismiss_alert(),
                }
            }
        }
    }
}
