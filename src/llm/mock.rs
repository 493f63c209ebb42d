use super::client::LlmClient;
use super::error::LlmError;
use super::types::{GenerateRequest, GenerateResponse, ToolCall};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory LLM client for tests
///
/// Two modes: queued responses popped in order, or echo mode where the
/// response mirrors the request (prompt as content, one tool call per
/// declared tool).
pub struct MockLlmClient {
    responses: Mutex<VecDeque<MockResponse>>,
    echo: bool,
    name: String,
}

#[derive(Debug)]
pub struct MockResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub error: Option<LlmError>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            error: None,
        }
    }

    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            error: None,
        }
    }

    pub fn error(error: LlmError) -> Self {
        Self {
            content: String::new(),
            tool_calls: Vec::new(),
            error: Some(error),
        }
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            echo: false,
            name: "MockLLM".to_string(),
        }
    }

    /// A client that reflects each request back as its response
    pub fn echo() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            echo: true,
            name: "EchoLLM".to_string(),
        }
    }

    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap();
        for response in responses {
            queue.push_back(response);
        }
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Builds an `update_session` tool call with the given arguments
    pub fn session_update_call(call_id: impl Into<String>, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            call_id: call_id.into(),
            name: "update_session".to_string(),
            arguments,
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        if self.echo {
            let tool_calls: Vec<ToolCall> = request
                .tools
                .iter()
                .enumerate()
                .map(|(i, tool)| ToolCall {
                    call_id: format!("echo-{i}"),
                    name: tool.name.clone(),
                    arguments: serde_json::json!({}),
                })
                .collect();

            return Ok(GenerateResponse::with_tool_calls(
                request.prompt,
                tool_calls,
                Duration::from_millis(1),
            ));
        }

        let response =
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LlmError::InvalidResponse {
                    message: "MockLlmClient: no more responses in queue".to_string(),
                })?;

        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(GenerateResponse::with_tool_calls(
            response.content,
            response.tool_calls,
            Duration::from_millis(1),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_info(&self) -> Option<String> {
        Some("mock-model".to_string())
    }
}

impl std::fmt::Debug for MockLlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLlmClient")
            .field("name", &self.name)
            .field("echo", &self.echo)
            .field("remaining_responses", &self.remaining_responses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::ToolDefinition;

    #[tokio::test]
    async fn test_mock_client_queued_text() {
        let client = MockLlmClient::new();
        client.add_response(MockResponse::text("Hello!"));

        let response = client.generate(GenerateRequest::new("hi")).await.unwrap();

        assert_eq!(response.content, "Hello!");
        assert!(!response.has_tool_calls());
    }

    #[tokio::test]
    async fn test_mock_client_queued_tool_call() {
        let client = MockLlmClient::new();
        let call =
            MockLlmClient::session_update_call("call_1", serde_json::json!({"session_end": true}));
        client.add_response(MockResponse::with_tool_calls("", vec![call]));

        let response = client.generate(GenerateRequest::new("hi")).await.unwrap();

        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].name, "update_session");
    }

    #[tokio::test]
    async fn test_mock_client_queued_error() {
        let client = MockLlmClient::new();
        client.add_response(MockResponse::error(LlmError::Timeout { seconds: 30 }));

        let result = client.generate(GenerateRequest::new("hi")).await;
        assert!(matches!(result.unwrap_err(), LlmError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_mock_client_exhausted_queue_errors() {
        let client = MockLlmClient::new();

        let result = client.generate(GenerateRequest::new("hi")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_echo_mode_mirrors_request() {
        let client = MockLlmClient::echo();
        let request = GenerateRequest::new("test prompt").with_tools(vec![
            ToolDefinition::new("update_session", "", serde_json::json!({})),
            ToolDefinition::placeholder(),
        ]);

        let response = client.generate(request).await.unwrap();

        assert_eq!(response.content, "test prompt");
        assert_eq!(response.tool_calls.len(), 2);
        assert_eq!(response.tool_calls[1].name, "placeholder");
    }

    #[tokio::test]
    async fn test_queue_ordering() {
        let client = MockLlmClient::new();
        client.add_responses(vec![MockResponse::text("first"), MockResponse::text("second")]);

        assert_eq!(client.remaining_responses(), 2);

        let r1 = client.generate(GenerateRequest::new("a")).await.unwrap();
        assert_eq!(r1.content, "first");

        let r2 = client.generate(GenerateRequest::new("b")).await.unwrap();
        assert_eq!(r2.content, "second");
        assert_eq!(client.remaining_responses(), 0);
    }
}
