use crate::api::SummarizerApi;
use crate::chat::{ChatSession, Speaker};
use crate::markdown::markdown_to_html;
use crate::settings::ProviderSettings;
use crate::ui::AppContext;
use crate::views::shared::scroll_to_bottom;
use dioxus::events::Key;
use dioxus::prelude::*;

const CHAT_BOX_ID: &str = "chat-box";

fn submit_question(
    mut session: Signal<ChatSession>,
    mut input: Signal<String>,
    settings: Signal<ProviderSettings>,
    app: AppContext,
) {
    let question = input();
    let request = session
        .write()
        .begin_send(&question, &settings.read(), Some(&app.visitor));
    let Some(request) = request else {
        return;
    };
    input.set(String::new());

    spawn(async move {
        let result = app.api.chat(&request).await;
        session.write().finish_send(&request, result);
    });
}

#[component]
pub fn ChatView(settings: Signal<ProviderSettings>) -> Element {
    let app = use_context::<AppContext>();
    let session = use_signal(|| ChatSession::from_store(&app.store));
    let mut input = use_signal(String::new);

    // Effects run after the render that shows the new entry.
    use_effect(move || {
        let _entries = session.read().transcript().len();
        scroll_to_bottom(CHAT_BOX_ID);
    });

    let snapshot = session.read().clone();
    let sending = snapshot.is_sending();

    rsx! {
        div { class: "main-container",
            if let Some(context) = snapshot.context() {
                details { class: "chat-context",
                    summary { "Chatting after your last summary" }
                    p { class: "text-muted", "{context}" }
                }
            }
            div { id: CHAT_BOX_ID, class: "chat-box",
                for (i, entry) in snapshot.transcript().iter().enumerate() {
                    div { key: "{i}", class: entry.css_class(),
                        if entry.speaker == Speaker::Ai {
                            div { class: "md", dangerous_inner_html: markdown_to_html(&entry.text) }
                        } else {
                            "{entry.text}"
                        }
                    }
                }
                if sending {
                    div { class: "chat-msg ai-msg pending", "Thinking…" }
                }
            }

            form { class: "composer",
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                div { class: "composer-inner",
                    textarea {
                        id: "chat-input",
                        rows: "1",
                        placeholder: "Ask about your text…",
                        value: "{input}",
                        oninput: move |evt: FormEvent| input.set(evt.value()),
                        onkeydown: {
                            let app = app.clone();
                            move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter && !evt.modifiers().shift() {
                                    evt.prevent_default();
                                    submit_question(session, input, settings, app.clone());
                                }
                            }
                        },
                    }
                    button {
                        id: "send-btn",
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: sending || input().trim().is_empty(),
                        onclick: {
                            let app = app.clone();
                            move |_| submit_question(session, input, settings, app.clone())
                        },
                        "Send"
                    }
                }
            }
        }
    }
}
