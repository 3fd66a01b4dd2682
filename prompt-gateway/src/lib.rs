//! Prompt gateway for the learning assistant.
//!
//! Builds an instructional prompt around a user question, sends it to the
//! Gemini `generateContent` endpoint and extracts a plain-text answer from the
//! loosely structured response.
//!
//! # Example
//! ```no_run
//! use prompt_gateway::{GatewayConfig, GeminiService, PromptGateway};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = GeminiService::new(GatewayConfig::from_env()?)?;
//! let answer = svc.ask("What is a React hook?").await?;
//! println!("{answer}");
//! # Ok(()) }
//! ```

pub mod config;
pub mod error_handler;
pub mod extract;
pub mod gateway;
pub mod prompt;
pub mod services;
pub mod telemetry;

pub use config::gateway_config::GatewayConfig;
pub use error_handler::{ConfigError, GatewayError, Result};
pub use gateway::PromptGateway;
pub use services::gemini_service::GeminiService;
