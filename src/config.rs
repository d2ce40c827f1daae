use anyhow::{Context, Result};
use std::env;

/// Bundled config for builds without a `.env` next to them (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_APP_DIR: &str = "ai-summarizer";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub api_base: String,
    /// Maximum number of history records to request, backend default when unset.
    pub history_limit: Option<u32>,
    /// Directory name used by the durable store.
    pub app_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            history_limit: None,
            app_dir: DEFAULT_APP_DIR.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load `.env` (native) or the bundled config, then read the environment.
    pub fn load() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base = lookup("SUMMARIZER_API_BASE")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base);

        let history_limit = match lookup("SUMMARIZER_HISTORY_LIMIT") {
            Some(raw) if !raw.trim().is_empty() => {
                let limit = raw
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("Invalid SUMMARIZER_HISTORY_LIMIT: {raw}"))?;
                if limit == 0 {
                    anyhow::bail!("SUMMARIZER_HISTORY_LIMIT must be positive");
                }
                Some(limit)
            }
            _ => None,
        };

        let app_dir = lookup("SUMMARIZER_APP_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.app_dir);

        Ok(Self {
            api_base,
            history_limit,
            app_dir,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // .env wins for desktop dev
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called once at startup before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
