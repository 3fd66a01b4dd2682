use serde::{Deserialize, Serialize};

/// Request payload for /api/ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question. Optional here so a missing field is
    /// reported as a validation error rather than a decode failure.
    #[serde(default)]
    pub question: Option<String>,
}

/// Response payload for /api/ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final model answer (plain text, never empty).
    pub answer: String,
}
