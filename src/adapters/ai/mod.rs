//! AI Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `MockTextGenerator` - Scripted responses for tests and offline demos
//! - `OpenAiTextGenerator` - OpenAI-compatible chat completions

mod mock_generator;
mod openai_generator;

pub use mock_generator::{MockError, MockResponse, MockTextGenerator, DEFAULT_MOCK_RESPONSE};
pub use openai_generator::{OpenAiConfig, OpenAiTextGenerator};
