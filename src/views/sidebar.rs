use crate::api::SummarizerApi;
use crate::settings::ProviderSettings;
use crate::types::Provider;
use crate::ui::AppContext;
use dioxus::prelude::*;

#[component]
pub fn ConfigSidebar(
    settings: Signal<ProviderSettings>,
    class: &'static str,
    always_show_endpoint: bool,
) -> Element {
    let mut settings = settings;
    let current = settings.read().clone();
    let show_endpoint = always_show_endpoint || current.shows_endpoint_fields();
    let show_version = current.shows_endpoint_fields();

    rsx! {
        aside { id: "sidebar", class: class,
            h3 { class: "section-title", "AI Config" }
            div { class: "field",
                label { for: "provider", "Provider" }
                select {
                    id: "provider",
                    value: current.provider.as_str(),
                    onchange: move |evt: FormEvent| {
                        if let Some(provider) = Provider::from_wire(&evt.value()) {
                            settings.write().provider = provider;
                        }
                    },
                    for provider in Provider::ALL {
                        option {
                            key: "{provider.as_str()}",
                            value: provider.as_str(),
                            selected: provider == current.provider,
                            "{provider.label()}"
                        }
                    }
                }
            }
            if show_endpoint {
                div { class: "field api-url-wrapper",
                    label { for: "api-url", "API URL" }
                    input {
                        id: "api-url",
                        r#type: "url",
                        value: "{current.api_url}",
                        oninput: move |evt: FormEvent| {
                            settings.write().api_url = evt.value();
                        },
                    }
                }
            }
            div { class: "field",
                label { for: "api-key", "API Key" }
                input {
                    id: "api-key",
                    r#type: "password",
                    autocomplete: "off",
                    value: "{current.api_key}",
                    oninput: move |evt: FormEvent| {
                        settings.write().api_key = evt.value();
                    },
                }
            }
            div { class: "field",
                label { for: "model", "Model" }
                input {
                    id: "model",
                    r#type: "text",
                    placeholder: "gpt-4o, claude-3-5-sonnet, gemini-1.5-flash…",
                    value: "{current.model}",
                    oninput: move |evt: FormEvent| {
                        settings.write().model = evt.value();
                    },
                }
            }
            div { class: "field",
                label { for: "temperature", "Temperature" }
                input {
                    id: "temperature",
                    r#type: "number",
                    min: "0",
                    max: "1",
                    step: "0.1",
                    placeholder: "0.7",
                    value: "{current.temperature}",
                    oninput: move |evt: FormEvent| {
                        settings.write().temperature = evt.value();
                    },
                }
            }
            if show_version {
                div { class: "field api-version-wrapper",
                    label { for: "api-version", "API Version" }
                    input {
                        id: "api-version",
                        r#type: "text",
                        placeholder: "2025-01-01",
                        value: "{current.api_version}",
                        oninput: move |evt: FormEvent| {
                            settings.write().api_version = evt.value();
                        },
                    }
                }
            }
            VisitorCounter {}
        }
    }
}

#[component]
fn VisitorCounter() -> Element {
    let app = use_context::<AppContext>();
    let count = use_resource(move || {
        let api = app.api.clone();
        async move {
            match api.visitor_count().await {
                Ok(count) => Some(count),
                Err(err) => {
                    tracing::warn!(error = %err, "visitor count unavailable");
                    None
                }
            }
        }
    });

    let visitors = count.read().as_ref().copied().flatten();
    rsx! {
        if let Some(visitors) = visitors {
            p { class: "sidebar-footer text-muted", "{visitors} unique visitors" }
        }
    }
}
