use super::error::LlmError;
use super::types::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;

/// A generative-AI client able to serve one-shot function-calling requests
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Issues a single request and waits for the complete response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }
}
