use chrono::NaiveDateTime;
use serde::Serialize;

/// One persisted question/answer exchange.
///
/// `id` and `timestamp` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    /// Creation time, UTC.
    pub timestamp: NaiveDateTime,
    pub question: String,
    pub answer: String,
}
