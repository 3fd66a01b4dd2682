use file_store::FileEntry;
use serde::{Deserialize, Serialize};

/// Request payload for POST /api/files.
#[derive(Debug, Deserialize)]
pub struct FileCreateRequest {
    pub filename: String,
    pub content: String,
}

/// Request payload for PUT /api/files/{filename}.
#[derive(Debug, Deserialize)]
pub struct FileUpdateRequest {
    pub content: String,
}

/// Query for GET /api/files.
#[derive(Debug, Default, Deserialize)]
pub struct ListFilesQuery {
    #[serde(default)]
    pub sort: Option<FileSort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSort {
    /// Newest modification time first.
    Modified,
}

/// Response payload for GET /api/files/{filename}.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub filename: String,
    pub content: String,
}

/// One listing row. `lastModified` only appears in sorted listings.
#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub filename: String,
    #[serde(rename = "lastModified", skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl From<FileEntry> for FileInfo {
    fn from(entry: FileEntry) -> Self {
        Self {
            filename: entry.filename,
            last_modified: Some(entry.last_modified.to_rfc3339()),
        }
    }
}

/// Confirmation body for mutating file operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
