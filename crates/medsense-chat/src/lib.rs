//! MedSense Chat — prompt assembly, personalization, LLM client.

pub mod gemini;
pub mod prompt;
pub mod types;

pub use gemini::{GeminiClient, LlmClient};
pub use prompt::{build_prompt, extract_json, personalize, HISTORY_WINDOW};
pub use types::{ChatMessage, Personalization};
