use crate::api::SummarizerApi;
use crate::error::ClientResult;
use crate::settings::ProviderSettings;
use crate::storage::{KeyValueStore, SUMMARIZED_CONTEXT_KEY};
use crate::types::{ChatMessage, ChatReply, ChatRequest, VisitorId};

pub const CHAT_FAILURE_MESSAGE: &str = "Something went wrong.";
pub const NO_RESPONSE_PLACEHOLDER: &str = "[No response]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    You,
    Ai,
    Error,
}

/// One line of the visible chat transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn css_class(&self) -> &'static str {
        match self.speaker {
            Speaker::You => "chat-msg user-msg",
            Speaker::Ai | Speaker::Error => "chat-msg ai-msg",
        }
    }
}

/// Chat state for one page session. The transcript is what the user sees;
/// the history is what the backend is told about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    transcript: Vec<TranscriptEntry>,
    history: Vec<ChatMessage>,
    context: Option<String>,
    sending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, picking up the last summary if one was stored.
    pub fn from_store<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let context = store
            .get(SUMMARIZED_CONTEXT_KEY)
            .filter(|value| !value.trim().is_empty());
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Show the question and build the request. Returns `None` for blank
    /// questions or while another send is in flight.
    pub fn begin_send(
        &mut self,
        question: &str,
        settings: &ProviderSettings,
        visitor: Option<&VisitorId>,
    ) -> Option<ChatRequest> {
        let question = question.trim();
        if question.is_empty() || self.sending {
            return None;
        }

        self.push(Speaker::You, question);
        self.sending = true;

        let history = self
            .history
            .iter()
            .cloned()
            .chain(std::iter::once(ChatMessage::user(question)))
            .filter(|message| !message.content.trim().is_empty())
            .collect();

        Some(ChatRequest {
            message: question.to_string(),
            api_url: settings.api_url().to_string(),
            api_key: settings.api_key().to_string(),
            model: settings.model().to_string(),
            temperature: settings.chat_temperature(),
            provider: settings.provider,
            api_version: settings.api_version().to_string(),
            visitor_id: visitor.map(|v| v.as_str().to_string()).unwrap_or_default(),
            history,
        })
    }

    /// Apply the outcome of a request produced by `begin_send`.
    pub fn finish_send(&mut self, request: &ChatRequest, result: ClientResult<ChatReply>) {
        self.sending = false;
        match result {
            Ok(reply) => {
                let answer = reply.answer.filter(|answer| !answer.trim().is_empty());
                self.push(
                    Speaker::Ai,
                    answer.as_deref().unwrap_or(NO_RESPONSE_PLACEHOLDER),
                );
                self.history.push(ChatMessage::user(request.message.clone()));
                if let Some(answer) = answer {
                    self.history.push(ChatMessage::assistant(answer));
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                self.push(Speaker::Error, CHAT_FAILURE_MESSAGE);
            }
        }
    }

    /// Send one question and wait for the answer. Returns whether a request
    /// was made.
    pub async fn send_message<A: SummarizerApi + ?Sized>(
        &mut self,
        api: &A,
        question: &str,
        settings: &ProviderSettings,
        visitor: Option<&VisitorId>,
    ) -> bool {
        let Some(request) = self.begin_send(question, settings, visitor) else {
            return false;
        };
        let result = api.chat(&request).await;
        self.finish_send(&request, result);
        true
    }

    fn push(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text: text.to_string(),
        });
    }
}
