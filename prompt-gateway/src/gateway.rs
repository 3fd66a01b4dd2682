use async_trait::async_trait;

use crate::error_handler::Result;

/// "Send a question, receive an answer" capability.
///
/// Implementations are stateless per call: no retries, no caching.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    /// Returns a non-empty answer for `question`.
    ///
    /// # Errors
    /// - [`crate::ConfigError::MissingApiKey`] before any network traffic
    /// - [`crate::GatewayError::Unavailable`] / [`crate::GatewayError::HttpStatus`]
    ///   when the provider cannot be reached or rejects the call
    /// - [`crate::GatewayError::Decode`] when a successful body is not JSON
    async fn ask(&self, question: &str) -> Result<String>;
}
