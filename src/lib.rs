//! Client for the AI Summarizer backend: chat, summarization with file
//! upload, and summary history.
//!
//! The core modules are UI-independent; the Dioxus front end lives behind
//! the `ui` feature (enabled by `web`, `desktop` or `mobile`).

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod markdown;
pub mod settings;
pub mod storage;
pub mod summarize;
pub mod theme;
pub mod types;
pub mod visitor;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;

pub use api::{HttpApi, SummarizerApi};
pub use error::{ClientError, ClientResult};
