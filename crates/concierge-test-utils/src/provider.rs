use async_trait::async_trait;
use concierge_core::provider::{ChatProvider, CompletionRequest, ProviderError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedProvider {
    reply: String,
}

impl FixedProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for FixedProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingProvider {
    reply: String,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl RecordingProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl ChatProvider for RecordingProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request.clone());
        Ok(self.reply.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Http(self.message.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct SlowProvider {
    reply: String,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(reply: impl Into<String>, delay: Duration) -> Self {
        Self {
            reply: reply.into(),
            delay,
        }
    }
}

#[async_trait]
impl ChatProvider for SlowProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}
