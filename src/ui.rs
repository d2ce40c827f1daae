use crate::api::{HttpApi, SummarizerApi};
use crate::config::ClientConfig;
use crate::settings::ProviderSettings;
use crate::storage::LocalStore;
use crate::theme::{ThemeController, theme_definition};
use crate::types::VisitorId;
use crate::views::{ChatView, ConfigSidebar, HistoryView, SummarizeView};
use crate::visitor::{VisitorIdentity, announce_visit};
use dioxus::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Everything handlers need to reach the backend and local storage.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<HttpApi>,
    pub store: LocalStore,
    pub visitor: VisitorId,
    pub first_visit: bool,
    pub history_limit: Option<u32>,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> Self {
        let store = LocalStore::new(&config.app_dir);
        tracing::debug!(app = store.app(), "local storage opened");
        let (visitor, first_visit) = match VisitorIdentity::new(store.clone()).get_or_create() {
            Ok(resolved) => (resolved.id, resolved.first_visit),
            Err(err) => {
                // Still attribute this session, just not across restarts.
                tracing::warn!(error = %err, "visitor id not persisted");
                (VisitorId::new(Uuid::new_v4().to_string()), true)
            }
        };
        Self {
            api: Arc::new(HttpApi::new(config.api_base.clone())),
            store,
            visitor,
            first_visit,
            history_limit: config.history_limit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Summarize,
    Chat,
    History,
}

#[component]
pub fn App() -> Element {
    let config = use_context::<ClientConfig>();
    let app = use_context_provider(|| AppContext::new(&config));
    let theme = use_signal(|| ThemeController::load(app.store.clone()));
    let settings = use_signal(ProviderSettings::default);
    let active_tab = use_signal(|| AppTab::Summarize);
    let history_reload = use_signal(|| 0u32);

    use_visit_announcement(app.clone());

    let sidebar_class = theme.read().sidebar_class();
    let main_class = theme.read().main_class();

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_tab, theme }
        ConfigSidebar {
            settings,
            class: sidebar_class,
            always_show_endpoint: active_tab() == AppTab::Summarize,
        }
        div { class: main_class,
            TabPanels { active_tab, settings, history_reload }
        }
    }
}

fn use_visit_announcement(app: AppContext) {
    use_hook(move || {
        if app.first_visit {
            spawn(async move {
                announce_visit(app.api.as_ref(), &app.visitor).await;
            });
        }
    });
}

#[component]
fn ThemeStyles(theme: Signal<ThemeController<LocalStore>>) -> Element {
    let definition = theme_definition(theme.read().mode());

    use_effect(move || {
        let class = theme.read().body_class();
        let _ = document::eval(&format!("document.body.className = '{class}';"));
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>, theme: Signal<ThemeController<LocalStore>>) -> Element {
    let mut theme = theme;
    let toggle_label = theme.read().toggle_label();
    rsx! {
        div { class: "header",
            div { class: "header-content",
                button {
                    id: "menuBtn",
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        theme.write().toggle_sidebar();
                    },
                    "☰"
                }
                h1 { class: "header-title", "AI Summarizer" }
                TabNavigation { active_tab }
                BackendStatus {}
                button {
                    id: "themeToggle",
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        theme.write().toggle();
                    },
                    "{toggle_label}"
                }
            }
        }
    }
}

#[component]
fn BackendStatus() -> Element {
    let app = use_context::<AppContext>();
    let health = use_resource(move || {
        let api = app.api.clone();
        async move {
            match api.health().await {
                Ok(status) => Some(status),
                Err(err) => {
                    tracing::warn!(error = %err, "health check failed");
                    None
                }
            }
        }
    });

    let online = matches!(&*health.read(), Some(Some(status)) if status.eq_ignore_ascii_case("ok"));
    let (class, title) = if online {
        ("status-dot online", "Backend reachable")
    } else {
        ("status-dot", "Backend unreachable")
    };
    rsx! {
        span { class: class, title: title }
    }
}

#[component]
fn TabPanels(
    active_tab: Signal<AppTab>,
    settings: Signal<ProviderSettings>,
    history_reload: Signal<u32>,
) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Summarize,
                children: rsx!( SummarizeView { settings, history_reload } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView { settings } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::History,
                children: rsx!( HistoryView { reload: history_reload } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Summarize, label: "Summarize" }
            TabButton { active_tab, tab: AppTab::Chat, label: "Chat" }
            TabButton { active_tab, tab: AppTab::History, label: "History" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h2 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}
