//! LLM completion port used by the forensic audit.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap a specific provider and handle authentication and
/// response parsing. They must be `Send + Sync` so one client can serve
/// audits from any task.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// decoded.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
