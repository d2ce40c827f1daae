use crate::api::SummarizerApi;
use crate::types::{HistoryEntry, VisitorId};
use time::format_description::FormatItem;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const INPUT_PREVIEW_CHARS: usize = 120;

const HISTORY_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:zero], [year] [hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]"
);

/// Display-ready form of one history entry.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryCard {
    pub timestamp: String,
    pub model_line: String,
    pub summary: String,
    pub provider: Option<String>,
    /// Start of the summarized text, when the backend returns it.
    pub input_preview: Option<String>,
}

impl HistoryCard {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: format_created_at(&entry.created_at),
            model_line: format!("AI Model Used: {}", entry.model),
            summary: format!("Summary: \n {}", entry.summary_text),
            provider: entry.provider.clone().filter(|p| !p.trim().is_empty()),
            input_preview: entry.input_text.as_deref().and_then(input_preview),
        }
    }
}

/// The visitor's past summaries. Every load replaces the whole list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryViewer {
    cards: Vec<HistoryCard>,
    limit: Option<u32>,
}

impl HistoryViewer {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            cards: Vec::new(),
            limit,
        }
    }

    pub fn cards(&self) -> &[HistoryCard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn replace(&mut self, entries: &[HistoryEntry]) {
        self.cards = entries.iter().map(HistoryCard::from_entry).collect();
    }

    /// Rebuild the list from the backend. Failures are only logged and the
    /// cards already shown stay in place. Returns whether the list was rebuilt.
    pub async fn load<A: SummarizerApi + ?Sized>(
        &mut self,
        api: &A,
        visitor: Option<&VisitorId>,
    ) -> bool {
        match api.history(visitor, self.limit).await {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "history loaded");
                self.replace(&entries);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "history error");
                false
            }
        }
    }
}

fn input_preview(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut preview: String = text.chars().take(INPUT_PREVIEW_CHARS).collect();
    if text.chars().count() > INPUT_PREVIEW_CHARS {
        preview.push('…');
    }
    Some(preview)
}

/// Render a backend timestamp in local time. Naive timestamps are UTC.
pub fn format_created_at(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = OffsetDateTime::parse(trimmed, &Rfc3339).ok().or_else(|| {
        PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT)
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    });
    let Some(mut datetime) = parsed else {
        return raw.to_string();
    };
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime
        .format(HISTORY_TIME_FORMAT)
        .unwrap_or_else(|_| raw.to_string())
}
