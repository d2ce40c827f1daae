use crate::history::{HistoryCard, HistoryViewer};
use crate::ui::AppContext;
use dioxus::prelude::*;

#[component]
pub fn HistoryView(reload: Signal<u32>) -> Element {
    let app = use_context::<AppContext>();
    let limit = app.history_limit;
    let mut viewer = use_signal(move || HistoryViewer::new(limit));
    let mut history = use_resource(move || {
        let app = app.clone();
        // Subscribes the resource to reload requests.
        let generation = reload();
        async move {
            tracing::debug!(generation, "loading history");
            // Work on a copy so the signal is not held across the request.
            let mut next = viewer.peek().clone();
            if next.load(app.api.as_ref(), Some(&app.visitor)).await {
                viewer.set(next);
            }
        }
    });

    // Nothing to show until the first request has finished.
    let cards: Option<Vec<HistoryCard>> = history
        .read()
        .as_ref()
        .map(|_| viewer.read().cards().to_vec());

    rsx! {
        div { class: "main-container",
            div { class: "history-header",
                h3 { class: "section-title", "Your Summaries" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| history.restart(),
                    "Refresh"
                }
            }
            div { id: "history-list", class: "history-list",
                match cards {
                    None => rsx! { p { class: "text-muted", "Loading history…" } },
                    Some(cards) if cards.is_empty() => rsx! {
                        p { class: "text-muted", "No summaries yet." }
                    },
                    Some(cards) => rsx! {
                        for (i, card) in cards.into_iter().enumerate() {
                            HistoryItem { key: "{i}", card }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn HistoryItem(card: HistoryCard) -> Element {
    rsx! {
        div { class: "history-item",
            time { "{card.timestamp}" }
            h4 { "{card.model_line}" }
            if let Some(provider) = card.provider.as_ref() {
                span { class: "tag-pill", "{provider}" }
            }
            if let Some(preview) = card.input_preview.as_ref() {
                p { class: "history-input text-muted", "{preview}" }
            }
            p { class: "history-summary", "{card.summary}" }
        }
    }
}
