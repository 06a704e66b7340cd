//! Transport-only Gemini `generateContent` client primitives.
//!
//! This crate owns request building, header construction, and response/error
//! parsing for the Gemini REST endpoint only. It intentionally contains no
//! credential lookup, no conversation memory, and no retry policy: one call
//! maps to exactly one HTTP request.
//!
//! Content-safety outcomes are surfaced as [`GeminiApiError::Blocked`] so
//! callers can tell a refusal apart from a transport failure.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod response;
pub mod url;

pub use client::GeminiApiClient;
pub use config::GeminiApiConfig;
pub use error::GeminiApiError;
pub use payload::{Content, GenerateContentRequest, Part};
pub use response::{Candidate, GenerateContentResponse, PromptFeedback};
pub use url::generate_content_url;
