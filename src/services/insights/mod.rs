/// Insight generation
///
/// Builds a prompt from catalog data and user comments, asks a remote text
/// generator for a short insight, and falls back to templated text whenever
/// generation is unavailable.
pub mod fallback;
pub mod huggingface;
pub mod prompt;
pub mod sanitize;
pub mod service;

pub use huggingface::HuggingFaceGenerator;
pub use service::{InsightService, INSIGHT_UNAVAILABLE};

/// Remote text generation backend
///
/// `None` is the only failure signal: implementations absorb and log every
/// error themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt with a single attempt
    async fn generate(&self, prompt: &str) -> Option<String>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
