//! Generative-AI client abstraction layer
//!
//! A trait-based seam over the hosted model endpoint, letting the real
//! Vertex AI transport and the in-memory mock be used interchangeably.

mod client;
mod error;
mod mock;
mod types;
mod vertex;

pub use client::LlmClient;
pub use error::LlmError;
pub use mock::{MockLlmClient, MockResponse};
pub use types::{GenerateRequest, GenerateResponse, ToolCall, ToolDefinition};
pub use vertex::VertexClient;
