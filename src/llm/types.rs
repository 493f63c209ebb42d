//! Request/response types for generative-AI communication
//!
//! These types are independent of any concrete transport; the Vertex and
//! mock clients both speak them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Definition of a tool (function declaration) offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name the model uses to invoke the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the tool's parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// An empty placeholder declaration with no parameters
    ///
    /// Carried alongside the real tool so the request always ships a fixed
    /// declaration count.
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".to_string(),
            description: String::new(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier correlating the call with a later tool response
    pub call_id: String,
    /// Name of the invoked tool
    pub name: String,
    /// Arguments the model filled in (JSON object)
    pub arguments: serde_json::Value,
}

/// A single text-generation request carrying tool declarations
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The prompt sent as the user turn
    pub prompt: String,
    /// Tools the model may invoke instead of replying with text
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Creates a new request for the given prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tools: Vec::new(),
            temperature: None,
        }
    }

    /// Adds tool declarations to the request
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Raw model response, passed through to the caller unchanged
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Text content of the response (may be empty on pure tool calls)
    pub content: String,
    /// Tool invocations the model chose to make
    pub tool_calls: Vec<ToolCall>,
    /// Time taken by the request
    pub response_time: Duration,
}

impl GenerateResponse {
    /// Creates a text-only response
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            response_time,
        }
    }

    /// Creates a response carrying tool calls
    pub fn with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
        response_time: Duration,
    ) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            response_time,
        }
    }

    /// Returns true if the model invoked at least one tool
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
