//! Gateway configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`      = provider credential (optional at load; checked per call)
//! - `GEMINI_API_URL`      = API base (default `https://generativelanguage.googleapis.com`)
//! - `GEMINI_MODEL`        = model id (default `gemini-1.5-flash`)
//! - `GEMINI_TIMEOUT_SECS` = request timeout in seconds (default `60`)
//! - `PROMPT_CONTEXT`      = subject the prompt template frames questions in

use std::fmt;

use crate::error_handler::{
    ConfigError, Result, env_opt, parse_opt_u64, validate_http_endpoint,
};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PROMPT_CONTEXT: &str = "ReactJS and FastAPI";

/// Configuration for the generative-language provider.
///
/// Constructed once at process start and handed to [`crate::GeminiService`].
/// `Debug` redacts the credential.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Provider credential. `None` means every call fails with
    /// [`ConfigError::MissingApiKey`].
    pub api_key: Option<String>,

    /// API base URL, without the `/v1beta/...` path.
    pub endpoint: String,

    /// Model identifier, e.g. `gemini-1.5-flash`.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Subject inserted into the instructional prompt template.
    pub prompt_context: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            prompt_context: DEFAULT_PROMPT_CONTEXT.to_string(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("prompt_context", &self.prompt_context)
            .finish()
    }
}

impl GatewayConfig {
    /// Loads the config from the process environment.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidNumber`] if `GEMINI_TIMEOUT_SECS` is not a positive number
    /// - [`ConfigError::InvalidFormat`] if `GEMINI_API_URL` is not http(s)
    /// - [`ConfigError::EmptyModel`] if the model resolves to an empty string
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_opt)
    }

    /// Same as [`GatewayConfig::from_env`], reading values through `get`.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cfg = Self {
            api_key: get("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            endpoint: get("GEMINI_API_URL").unwrap_or(defaults.endpoint),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            timeout_secs: parse_opt_u64("GEMINI_TIMEOUT_SECS", get("GEMINI_TIMEOUT_SECS"))?
                .unwrap_or(defaults.timeout_secs),
            prompt_context: get("PROMPT_CONTEXT").unwrap_or(defaults.prompt_context),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates endpoint scheme, model name and timeout.
    pub fn validate(&self) -> Result<()> {
        validate_http_endpoint("GEMINI_API_URL", self.endpoint.trim())?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "GEMINI_TIMEOUT_SECS",
                reason: "expected positive u64",
            }
            .into());
        }
        Ok(())
    }

    /// `true` if a non-blank credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
