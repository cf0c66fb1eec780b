//! Credence Oracle Layer
//!
//! The Analysis Oracle performs the reasoning steps the core cannot do
//! deterministically: extracting candidate claims from raw text, verifying a
//! single claim against external evidence, classifying how a new batch of
//! claims interacts with the existing corpus, and synthesizing a prose
//! report. The oracle is an untrusted, failure-prone black box; this crate
//! owns the prompt/parse mechanics and validates every response shape before
//! anything reaches the core.
//!
//! # Architecture
//!
//! Raw text generation goes through the `LanguageModel` trait from
//! `credence-domain`. The typed operations live in [`OracleClient`], which
//! pairs a prompt builder with a defensive parser per call type.
//!
//! # Backends
//!
//! - [`MockModel`]: deterministic scripted responses for testing
//! - [`OllamaModel`]: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use credence_oracle::MockModel;
//! use credence_domain::traits::LanguageModel;
//!
//! let model = MockModel::new("[]");
//! let result = model.generate("any prompt").unwrap();
//! assert_eq!(result, "[]");
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod ollama;
pub mod parser;
pub mod prompt;
pub mod types;

use credence_domain::traits::LanguageModel;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use client::OracleClient;
pub use ollama::OllamaModel;
pub use types::{ClaimRef, VerificationOutcome};

/// Errors that can occur during oracle operations
#[derive(Error, Debug)]
pub enum OracleError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the backend
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Oracle error: {0}")]
    Other(String),
}

/// Deterministic language model for testing
///
/// Returns scripted responses in FIFO order, falling back to a fixed default
/// once the script is exhausted, without making any network calls. Clones
/// share the script and the call counter.
///
/// # Examples
///
/// ```
/// use credence_oracle::MockModel;
/// use credence_domain::traits::LanguageModel;
///
/// let model = MockModel::new("default");
/// model.enqueue_response("first");
/// assert_eq!(model.generate("p").unwrap(), "first");
/// assert_eq!(model.generate("p").unwrap(), "default");
/// assert_eq!(model.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockModel {
    /// Create a new MockModel with a fixed fallback response
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a response for the next unscripted call
    pub fn enqueue_response(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
    }

    /// Queue an error for the next unscripted call
    pub fn enqueue_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LanguageModel for MockModel {
    type Error = OracleError;

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(OracleError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_model_default() {
        let model = MockModel::new("Test response");
        assert_eq!(model.generate("any prompt").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_model_script_order() {
        let model = MockModel::default();
        model.enqueue_response("one");
        model.enqueue_response("two");

        assert_eq!(model.generate("p").unwrap(), "one");
        assert_eq!(model.generate("p").unwrap(), "two");
        assert_eq!(model.generate("p").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_model_error_injection() {
        let model = MockModel::default();
        model.enqueue_error("backend down");

        let result = model.generate("p");
        assert!(matches!(result, Err(OracleError::Other(_))));

        // Script is consumed; next call succeeds
        assert!(model.generate("p").is_ok());
    }

    #[test]
    fn test_mock_model_call_count_shared_across_clones() {
        let a = MockModel::new("x");
        let b = a.clone();

        a.generate("p").unwrap();
        b.generate("p").unwrap();

        assert_eq!(a.call_count(), 2);
        assert_eq!(b.call_count(), 2);
    }
}
