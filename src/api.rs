//! HTTP contract with the summarizer backend.
//!
//! `SummarizerApi` is the seam every flow talks through; `HttpApi` is the
//! reqwest implementation used by the app.

use crate::error::{ClientError, ClientResult};
use crate::types::{
    ChatReply, ChatRequest, HealthStatus, HistoryEntry, HistoryReply, SummarizeReply,
    SummarizeRequest, UploadFile, UploadReply, VisitorCount, VisitorId,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::future::Future;

pub const VISITOR_HEADER: &str = "X-Visitor-ID";

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SummarizerApi {
    /// `POST /api/chat`
    async fn chat(&self, request: &ChatRequest) -> ClientResult<ChatReply>;

    /// `POST /api/upload`, returns the extracted text.
    async fn upload(&self, file: UploadFile) -> ClientResult<String>;

    /// `POST /api/summarize`, returns the summary.
    async fn summarize(
        &self,
        request: &SummarizeRequest,
        visitor: &VisitorId,
    ) -> ClientResult<String>;

    /// `GET /api/history`
    async fn history(
        &self,
        visitor: Option<&VisitorId>,
        limit: Option<u32>,
    ) -> ClientResult<Vec<HistoryEntry>>;

    /// `POST /api/visitor/visit`
    async fn register_visit(&self, visitor: &VisitorId) -> ClientResult<()>;

    /// `GET /api/visitor/count`
    async fn visitor_count(&self) -> ClientResult<u64>;

    /// `GET /api/health`
    async fn health(&self) -> ClientResult<String>;
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SummarizerApi for HttpApi {
    async fn chat(&self, request: &ChatRequest) -> ClientResult<ChatReply> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn upload(&self, file: UploadFile) -> ClientResult<String> {
        let content_type = file.content_type();
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let reply: UploadReply = decode_json(response).await?;
        Ok(reply.text)
    }

    async fn summarize(
        &self,
        request: &SummarizeRequest,
        visitor: &VisitorId,
    ) -> ClientResult<String> {
        let response = self
            .client
            .post(self.url("/api/summarize"))
            .header(VISITOR_HEADER, visitor.as_str())
            .json(request)
            .send()
            .await?;
        let reply: SummarizeReply = decode_json(response).await?;
        Ok(reply.summary)
    }

    async fn history(
        &self,
        visitor: Option<&VisitorId>,
        limit: Option<u32>,
    ) -> ClientResult<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.url("/api/history"))
            .query(&history_query(visitor, limit))
            .send()
            .await?;
        let reply: HistoryReply = decode_json(response).await?;
        Ok(reply.history)
    }

    async fn register_visit(&self, visitor: &VisitorId) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url("/api/visitor/visit"))
            .header(VISITOR_HEADER, visitor.as_str())
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(server_error(status.as_u16(), &body))
    }

    async fn visitor_count(&self) -> ClientResult<u64> {
        let response = self
            .client
            .get(self.url("/api/visitor/count"))
            .send()
            .await?;
        let reply: VisitorCount = decode_json(response).await?;
        Ok(reply.count)
    }

    async fn health(&self) -> ClientResult<String> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        let reply: HealthStatus = decode_json(response).await?;
        Ok(reply.status)
    }
}

fn history_query(visitor: Option<&VisitorId>, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(visitor) = visitor {
        query.push(("visitor_id", visitor.as_str().to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(server_error(status.as_u16(), &body))
    }
}

/// Build a server error, pulling `detail` out of a FastAPI-style error body.
pub fn server_error(status: u16, body: &str) -> ClientError {
    ClientError::Server {
        status,
        detail: extract_detail(body),
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Run a call whose failure must never reach the user; failures are logged.
pub async fn best_effort<F>(label: &str, call: F)
where
    F: Future<Output = ClientResult<()>>,
{
    match call.await {
        Ok(()) => tracing::debug!(task = label, "best-effort call finished"),
        Err(err) => tracing::warn!(task = label, error = %err, "best-effort call failed"),
    }
}
