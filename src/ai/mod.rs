//! LLM backend abstractions and implementations

pub mod backend;
pub mod openai;

pub use backend::{BackendError, LLMBackend};
pub use openai::OpenAiClient;
