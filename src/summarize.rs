use crate::api::SummarizerApi;
use crate::error::ClientResult;
use crate::settings::ProviderSettings;
use crate::storage::{KeyValueStore, SUMMARIZED_CONTEXT_KEY};
use crate::types::{SummarizeRequest, UploadFile, VisitorId};

pub const DEFAULT_PROMPT: &str = "summarize the given text into brief info.";

pub const NO_FILE_ALERT: &str = "Please select a file to upload.";
pub const MISSING_TEXT_ALERT: &str = "Please enter some text or upload a file first.";
pub const MISSING_CREDENTIALS_ALERT: &str = "Please fill API URL, API Key, and Model fields.";
pub const UPLOAD_FAILED: &str = "File upload failed";
pub const SUMMARIZE_FAILED: &str = "Summarization failed";

const NO_FILE_LABEL: &str = "No file chosen";

/// State behind the summarize page: inputs, busy flags, result and alert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummarizeForm {
    pub text: String,
    pub prompt: String,
    file: Option<UploadFile>,
    uploading: bool,
    summarizing: bool,
    summary: Option<String>,
    alert: Option<String>,
    history_stale: bool,
}

impl SummarizeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: Option<UploadFile>) {
        self.file = file;
    }

    pub fn file_label(&self) -> &str {
        self.file
            .as_ref()
            .map(|file| file.name.as_str())
            .unwrap_or(NO_FILE_LABEL)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    pub fn upload_label(&self) -> &'static str {
        if self.uploading { "Uploading..." } else { "Upload" }
    }

    pub fn summarize_label(&self) -> &'static str {
        if self.summarizing {
            "Summarizing..."
        } else {
            "Summarize Text"
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// True once after a successful summary, telling the history list to reload.
    pub fn take_history_reload(&mut self) -> bool {
        std::mem::take(&mut self.history_stale)
    }

    /// Returns the file to send, or raises an alert when none is selected.
    pub fn begin_upload(&mut self) -> Option<UploadFile> {
        if self.uploading {
            return None;
        }
        let Some(file) = self.file.clone() else {
            self.alert = Some(NO_FILE_ALERT.to_string());
            return None;
        };
        self.uploading = true;
        Some(file)
    }

    /// Always re-enables the upload control.
    pub fn finish_upload(&mut self, result: ClientResult<String>) {
        self.uploading = false;
        match result {
            Ok(text) => self.text = text,
            Err(err) => {
                tracing::error!(error = %err, "file upload failed");
                self.alert = Some(err.user_message(UPLOAD_FAILED));
            }
        }
    }

    pub async fn upload<A: SummarizerApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(file) = self.begin_upload() else {
            return false;
        };
        let result = api.upload(file).await;
        self.finish_upload(result);
        true
    }

    /// Validate the form and build the request; raises an alert and returns
    /// `None` when a required field is empty.
    pub fn begin_summarize(&mut self, settings: &ProviderSettings) -> Option<SummarizeRequest> {
        if self.summarizing {
            return None;
        }
        let text = self.text.trim();
        if text.is_empty() {
            self.alert = Some(MISSING_TEXT_ALERT.to_string());
            return None;
        }
        if !settings.has_summarize_credentials() {
            self.alert = Some(MISSING_CREDENTIALS_ALERT.to_string());
            return None;
        }

        let prompt = match self.prompt.trim() {
            "" => DEFAULT_PROMPT,
            custom => custom,
        };

        self.summarizing = true;
        Some(SummarizeRequest {
            text: text.to_string(),
            api_url: settings.api_url().to_string(),
            api_key: settings.api_key().to_string(),
            model: settings.model().to_string(),
            temperature: settings.summarize_temperature(),
            prompt: prompt.to_string(),
            provider: settings.provider,
            api_version: settings.api_version().to_string(),
        })
    }

    /// Always re-enables the summarize control. A summary is kept as chat
    /// context in `store`.
    pub fn finish_summarize<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        result: ClientResult<String>,
    ) {
        self.summarizing = false;
        match result {
            Ok(summary) => {
                if let Err(err) = store.set(SUMMARIZED_CONTEXT_KEY, &summary) {
                    tracing::warn!(error = %err, "could not keep summary as chat context");
                }
                self.summary = Some(summary);
                self.history_stale = true;
            }
            Err(err) => {
                tracing::error!(error = %err, "summarization failed");
                self.alert = Some(err.user_message(SUMMARIZE_FAILED));
            }
        }
    }

    pub async fn summarize<A, S>(
        &mut self,
        api: &A,
        store: &S,
        settings: &ProviderSettings,
        visitor: &VisitorId,
    ) -> bool
    where
        A: SummarizerApi + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        let Some(request) = self.begin_summarize(settings) else {
            return false;
        };
        let result = api.summarize(&request, visitor).await;
        self.finish_summarize(store, result);
        true
    }
}
