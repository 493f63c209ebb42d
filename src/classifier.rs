//! Single-shot function-calling request against the hosted model
//!
//! [`SessionClassifier`] is the request builder: it assembles the tool
//! declarations (the `update_session` tool plus one placeholder), fixes the
//! sampling temperature, and forwards one request through whatever
//! [`LlmClient`] it was given. The raw response passes through unchanged;
//! decoding it into a [`crate::session::SessionUpdate`] is the caller's
//! decision.

use crate::context::{ContextError, GcpContext};
use crate::llm::{GenerateRequest, GenerateResponse, LlmClient, LlmError, ToolDefinition};
use crate::session::build_session_update_tool;
use std::sync::Arc;
use tracing::debug;

/// Fixed sampling temperature for classification requests
pub const CLASSIFIER_TEMPERATURE: f32 = 0.3;

/// Issues function-calling requests with the session-update tool attached
pub struct SessionClassifier {
    client: Arc<dyn LlmClient>,
}

impl SessionClassifier {
    /// Creates a classifier over any LLM client (real or mock)
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Creates a classifier wired to the context's generative client
    ///
    /// # Errors
    ///
    /// Propagates credential and client-construction failures from the
    /// context unchanged.
    pub async fn from_context(context: &GcpContext) -> Result<Self, ContextError> {
        let client = context.generative_client().await?;
        Ok(Self::new(client))
    }

    /// Sends one prompt with the session-update tool declarations attached
    ///
    /// No retry, no streaming: the call blocks until the service answers or
    /// the transport times out, and every failure propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Network`/`Timeout` for transport failures and
    /// `LlmError::RemoteService` for service-level rejections.
    pub async fn generate_with_tools(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let tools = vec![build_session_update_tool(), ToolDefinition::placeholder()];

        debug!(
            backend = self.client.name(),
            tool_count = tools.len(),
            "issuing function-calling request"
        );

        let request = GenerateRequest::new(prompt)
            .with_tools(tools)
            .with_temperature(CLASSIFIER_TEMPERATURE);

        self.client.generate(request).await
    }
}

impl std::fmt::Debug for SessionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClassifier")
            .field("backend", &self.client.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use crate::session::SESSION_UPDATE_TOOL;

    #[tokio::test]
    async fn test_request_carries_two_tool_declarations() {
        let classifier = SessionClassifier::new(Arc::new(MockLlmClient::echo()));

        let response = classifier.generate_with_tools("test prompt").await.unwrap();

        // The echo mock mirrors one tool call per declaration it received.
        assert_eq!(response.tool_calls.len(), 2);
        assert_eq!(response.tool_calls[0].name, SESSION_UPDATE_TOOL);
        assert_eq!(response.content, "test prompt");
    }

    #[tokio::test]
    async fn test_errors_propagate_unchanged() {
        let mock = MockLlmClient::new();
        mock.add_response(crate::llm::MockResponse::error(LlmError::RemoteService {
            message: "quota exceeded".to_string(),
            status_code: Some(429),
        }));
        let classifier = SessionClassifier::new(Arc::new(mock));

        let result = classifier.generate_with_tools("prompt").await;
        assert!(matches!(
            result.unwrap_err(),
            LlmError::RemoteService {
                status_code: Some(429),
                ..
            }
        ));
    }
}
