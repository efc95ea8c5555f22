//! # rmai-model
//!
//! Narrator-style text about locations and characters.
//!
//! [`Generator`] asks an OpenAI chat model ([`ChatClient`]) when an API key
//! is available and falls back to fixed templates otherwise, so callers always
//! get text back.
//!
//! ```rust,ignore
//! use rmai_model::{GenerationConfig, Generator};
//!
//! let generator = Generator::from_env(GenerationConfig::default());
//! let summary = generator.summarize_location(&location).await;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod openai;
pub mod prompts;

pub use config::{GenerationConfig, GenerationConfigBuilder, OPENAI_API_BASE};
pub use error::{ModelError, Result};
pub use generator::Generator;
pub use openai::ChatClient;
