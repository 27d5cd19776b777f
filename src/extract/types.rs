use crate::records::Record;
use crate::utils::media_type::guess_media_type;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One user-chosen document. Bytes stay on disk until upload time.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub media_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            media_type: guess_media_type(path),
            size: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            path: path.to_path_buf(),
        }
    }
}

/// Per-file outcome shown next to each list entry. Within one pass a
/// status only ever moves Pending -> Processed or Pending -> Error.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Pending,
    Processed,
    Error(String),
}

/// Failure modes of a single upload. A rejection settles that one file
/// and the pass moves on; a transport failure ends the whole pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(String),
}

/// Events emitted by a processing pass, in file order, over the status
/// channel back to the UI thread. `Aborted` terminates the stream early;
/// otherwise every file gets `Started` then one settling event, and the
/// pass closes with `Finished`.
#[derive(Debug, Clone, PartialEq)]
pub enum PassEvent {
    Started { index: usize },
    Extracted { index: usize, record: Record },
    Failed { index: usize, message: String },
    Aborted { message: String },
    Finished,
}
