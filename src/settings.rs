use crate::types::Provider;

pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;

/// Raw values of the AI configuration form. Held in memory only; the API key
/// in particular is never written to storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderSettings {
    pub provider: Provider,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: String,
    pub api_version: String,
}

impl ProviderSettings {
    pub fn api_url(&self) -> &str {
        self.api_url.trim()
    }

    pub fn api_key(&self) -> &str {
        self.api_key.trim()
    }

    pub fn model(&self) -> &str {
        self.model.trim()
    }

    pub fn api_version(&self) -> &str {
        self.api_version.trim()
    }

    fn parsed_temperature(&self) -> Option<f32> {
        self.temperature
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Chat always sends a temperature.
    pub fn chat_temperature(&self) -> f32 {
        self.parsed_temperature()
            .unwrap_or(DEFAULT_CHAT_TEMPERATURE)
    }

    /// Summarize leaves the temperature to the backend when it is unparseable.
    pub fn summarize_temperature(&self) -> Option<f32> {
        self.parsed_temperature()
    }

    /// Endpoint, key and model are all required before summarizing.
    pub fn has_summarize_credentials(&self) -> bool {
        !self.api_url().is_empty() && !self.api_key().is_empty() && !self.model().is_empty()
    }

    /// Endpoint and version inputs only apply to Azure deployments.
    pub fn shows_endpoint_fields(&self) -> bool {
        self.provider.uses_custom_endpoint()
    }
}
