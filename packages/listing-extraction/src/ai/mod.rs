//! AI provider implementations.

mod gemini;

pub use gemini::{GeminiAI, DEFAULT_MODEL};
