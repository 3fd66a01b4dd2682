//! Unified error handling for `prompt-gateway`.
//!
//! This module exposes a single top-level error type [`GatewayError`] for the
//! whole library and groups startup/config problems in [`ConfigError`]. Small
//! helpers for reading environment variables return the unified [`Result<T>`].
//!
//! All messages include the suffix `[Prompt Gateway]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, GatewayError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `prompt-gateway` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration problems, including a missing provider credential.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection failure, timeout or any other transport-level error.
    #[error("[Prompt Gateway] provider unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[Prompt Gateway] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL (never carries the credential).
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// A successful response whose body is not JSON.
    #[error("[Prompt Gateway] decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// `true` when the provider could not be reached or refused the call.
    ///
    /// Callers surface these as "service unavailable"; everything else is
    /// either a configuration or an internal problem.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            GatewayError::Unavailable(_) | GatewayError::HttpStatus { .. }
        )
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors that happen at config load/validation time, plus the missing
/// credential which is also reported per call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key configured for the provider.
    #[error("[Prompt Gateway] server configuration error: GEMINI_API_KEY is missing")]
    MissingApiKey,

    /// A number failed to parse (timeouts).
    #[error("[Prompt Gateway] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Prompt Gateway] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[Prompt Gateway] model name must not be empty")]
    EmptyModel,

    /// The HTTP client could not be constructed.
    #[error("[Prompt Gateway] failed to build HTTP client: {0}")]
    HttpClient(String),
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-blank environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional positive `u64` (`Ok(None)` if unset).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the value is set but not a
/// valid positive `u64`.
pub fn parse_opt_u64(var: &'static str, value: Option<String>) -> Result<Option<u64>> {
    match value {
        Some(v) => match v.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber {
                var,
                reason: "expected positive u64",
            }
            .into()),
        },
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the scheme is missing.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Cuts a response body down to a log/error friendly snippet.
pub fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut snippet: String = trimmed.chars().take(240).collect();
    if trimmed.chars().count() > 240 {
        snippet.push('…');
    }
    snippet
}
