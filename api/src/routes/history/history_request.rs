use serde::Deserialize;

/// Request payload for PUT /api/history/{id}.
#[derive(Debug, Deserialize)]
pub struct HistoryItemUpdate {
    pub question: String,
    pub answer: String,
}
