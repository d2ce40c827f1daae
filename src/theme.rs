use crate::storage::{KeyValueStore, THEME_KEY};
use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            toggle_label: "☀️ Light",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            toggle_label: "🌙 Dark",
        },
    }
}

/// Theme and sidebar state. The theme is persisted, the sidebar is not.
pub struct ThemeController<S> {
    store: S,
    mode: ThemeMode,
    sidebar_open: bool,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Apply the saved theme, light when nothing usable is stored.
    pub fn load(store: S) -> Self {
        let mode = store
            .get(THEME_KEY)
            .map(|value| ThemeMode::parse(&value))
            .unwrap_or_default();
        let mut controller = Self {
            store,
            mode,
            sidebar_open: false,
        };
        controller.set(mode);
        controller
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        if let Err(err) = self.store.set(THEME_KEY, mode.as_str()) {
            tracing::warn!(error = %err, "could not persist theme");
        }
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    pub fn body_class(&self) -> &'static str {
        self.mode.as_str()
    }

    pub fn toggle_label(&self) -> &'static str {
        theme_definition(self.mode).toggle_label
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    pub fn sidebar_class(&self) -> &'static str {
        if self.sidebar_open { "sidebar open" } else { "sidebar" }
    }

    pub fn main_class(&self) -> &'static str {
        if self.sidebar_open {
            "main with-sidebar"
        } else {
            "main"
        }
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #121212;
    --color-bg-secondary: #1c1c1c;
    --color-text-primary: #f2f2f2;
    --color-text-muted: #a8a8a8;
    --color-border: #2f2f2f;
    --color-input-bg: #1a1a1a;
    --color-input-border: #3a3a3a;
    --color-accent: #6ea8fe;
    --color-user-msg-bg: #2b4a7a;
    --color-ai-msg-bg: #242424;
    --color-history-bg: #1a1a1a;
    --color-timestamp: #8f8f8f;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.sidebar { background: var(--color-bg-secondary); border-right-color: var(--color-border); }
textarea, input, select { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.user-msg { background: var(--color-user-msg-bg); }
.ai-msg { background: var(--color-ai-msg-bg); }
.history-item { background: var(--color-history-bg); border-color: var(--color-border); }
.history-item time { color: var(--color-timestamp); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f4f5f7;
    --color-text-primary: #1d1d1f;
    --color-text-muted: #5c5c5c;
    --color-border: #d9d9d9;
    --color-input-bg: #ffffff;
    --color-input-border: #c2c2c2;
    --color-accent: #0d6efd;
    --color-user-msg-bg: #dbe8ff;
    --color-ai-msg-bg: #f1f1f1;
    --color-history-bg: #fafafa;
    --color-timestamp: #6b6b6b;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.sidebar { background: var(--color-bg-secondary); border-right-color: var(--color-border); }
textarea, input, select { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.user-msg { background: var(--color-user-msg-bg); }
.ai-msg { background: var(--color-ai-msg-bg); }
.history-item { background: var(--color-history-bg); border-color: var(--color-border); }
.history-item time { color: var(--color-timestamp); }
"#;
