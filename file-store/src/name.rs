//! Validated filenames used as File Store keys.

use std::fmt;

use crate::errors::{FileStoreError, Result};

/// Longest accepted filename, in characters.
pub const MAX_FILENAME_CHARS: usize = 50;

const MIRROR_EXTENSION: &str = ".txt";
const UNTITLED: &str = "untitled";

/// A filename that is safe to join onto the store directory.
///
/// Non-empty, at most [`MAX_FILENAME_CHARS`] characters, a single path
/// component (no `/`, `\`, NUL, `.` or `..`). Every store operation takes a
/// `FileName`, so create/read/update/delete share one policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    /// Validates `raw` as-is; nothing is trimmed or truncated.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: String| FileStoreError::InvalidName {
            name: raw.to_string(),
            reason,
        };

        if raw.trim().is_empty() {
            return Err(invalid("must not be empty".into()));
        }
        if raw.chars().count() > MAX_FILENAME_CHARS {
            return Err(invalid(format!("longer than {MAX_FILENAME_CHARS} characters")));
        }
        if raw == "." || raw == ".." {
            return Err(invalid("reserved name".into()));
        }
        if raw.chars().any(is_forbidden) {
            return Err(invalid("contains a path separator or NUL".into()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Derives the `.txt` name an answer is mirrored under.
    ///
    /// Spaces become `_`, forbidden characters are dropped, and the stem is
    /// cut so the whole name fits [`MAX_FILENAME_CHARS`].
    pub fn from_question(question: &str) -> Self {
        let max_stem = MAX_FILENAME_CHARS - MIRROR_EXTENSION.len();
        let stem: String = question
            .trim()
            .chars()
            .filter(|c| !is_forbidden(*c))
            .map(|c| if c == ' ' { '_' } else { c })
            .take(max_stem)
            .collect();

        let stem = match stem.as_str() {
            "" | "." | ".." => UNTITLED.to_string(),
            _ => stem,
        };
        Self(format!("{stem}{MIRROR_EXTENSION}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '/' | '\\' | '\0')
}
