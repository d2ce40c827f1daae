#![allow(dead_code)]

use ai_summarizer::api::SummarizerApi;
use ai_summarizer::error::{ClientError, ClientResult};
use ai_summarizer::types::{
    ChatReply, ChatRequest, HistoryEntry, SummarizeRequest, UploadFile, VisitorId,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-process backend that records every call and answers from fixed data.
#[derive(Default)]
pub struct StubApi {
    pub answer: Option<String>,
    pub summary: String,
    pub extracted_text: String,
    pub history: Vec<HistoryEntry>,
    pub visitors: u64,
    /// When set, every call fails with this status and detail.
    pub failure: Option<(u16, Option<String>)>,
    pub calls: Mutex<Vec<&'static str>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub summarize_requests: Mutex<Vec<(SummarizeRequest, VisitorId)>>,
    pub history_queries: Mutex<Vec<(Option<VisitorId>, Option<u32>)>>,
    pub uploads: Mutex<Vec<UploadFile>>,
}

impl StubApi {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, detail: Option<&str>) -> Self {
        Self {
            failure: Some((status, detail.map(str::to_string))),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, detail)) => Err(ClientError::Server {
                status: *status,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SummarizerApi for StubApi {
    async fn chat(&self, request: &ChatRequest) -> ClientResult<ChatReply> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.record("chat")?;
        Ok(ChatReply {
            answer: self.answer.clone(),
        })
    }

    async fn upload(&self, file: UploadFile) -> ClientResult<String> {
        self.uploads.lock().unwrap().push(file);
        self.record("upload")?;
        Ok(self.extracted_text.clone())
    }

    async fn summarize(
        &self,
        request: &SummarizeRequest,
        visitor: &VisitorId,
    ) -> ClientResult<String> {
        self.summarize_requests
            .lock()
            .unwrap()
            .push((request.clone(), visitor.clone()));
        self.record("summarize")?;
        Ok(self.summary.clone())
    }

    async fn history(
        &self,
        visitor: Option<&VisitorId>,
        limit: Option<u32>,
    ) -> ClientResult<Vec<HistoryEntry>> {
        self.history_queries
            .lock()
            .unwrap()
            .push((visitor.cloned(), limit));
        self.record("history")?;
        Ok(self.history.clone())
    }

    async fn register_visit(&self, _visitor: &VisitorId) -> ClientResult<()> {
        self.record("visit")
    }

    async fn visitor_count(&self) -> ClientResult<u64> {
        self.record("visitor_count")?;
        Ok(self.visitors)
    }

    async fn health(&self) -> ClientResult<String> {
        self.record("health")?;
        Ok("Ok".to_string())
    }
}
