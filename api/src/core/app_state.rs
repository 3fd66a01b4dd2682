use std::sync::Arc;

use file_store::FileStore;
use history_store::HistoryStore;
use prompt_gateway::PromptGateway;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provider used by `/api/ask`.
    pub gateway: Arc<dyn PromptGateway>,
    /// Question/answer history.
    pub history: HistoryStore,
    /// Flat text files, also receives a copy of every answer.
    pub files: FileStore,
    /// Tutorial video id served by `/video_id`.
    pub video_id: String,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn PromptGateway>,
        history: HistoryStore,
        files: FileStore,
        video_id: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            history,
            files,
            video_id: video_id.into(),
        }
    }
}
