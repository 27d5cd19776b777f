use crate::extract::{DocumentStatus, PassEvent, SelectedFile};
use crate::preview::{build_preview, PreviewContent};
use crate::records::Record;
use std::sync::mpsc::Receiver;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/upload";

/// Everything session-scoped: the current selection, per-file statuses,
/// the accumulated records, and the in-flight pass bookkeeping. The
/// controller is the only writer; the table and the CSV export read it.
pub struct SessionState {
    pub endpoint: String,
    pub files: Vec<SelectedFile>,
    /// Parallel to `files`; exactly one status per listed file.
    pub statuses: Vec<DocumentStatus>,
    /// Accumulated output: grows during passes, cleared only by Clear.
    pub records: Vec<Record>,
    pub preview: PreviewContent,
    pub current_file: Option<String>,
    /// User-visible notice (pass aborts, empty-state misuse, save errors).
    pub notice: Option<String>,
    pub is_extracting: bool,
    pub event_receiver: Option<Receiver<PassEvent>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("INVOICE_EXTRACTOR_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            files: Vec::new(),
            statuses: Vec::new(),
            records: Vec::new(),
            preview: PreviewContent::Empty,
            current_file: None,
            notice: None,
            is_extracting: false,
            event_receiver: None,
        }
    }
}

impl SessionState {
    /// Replaces the current selection. Every selection gesture starts
    /// over: statuses reset to Pending and the first file becomes the
    /// preview, matching how the registry is iterated later.
    pub fn set_files(&mut self, files: Vec<SelectedFile>) {
        self.statuses = vec![DocumentStatus::Pending; files.len()];
        self.preview = build_preview(files.first());
        self.files = files;
        self.notice = None;
    }

    pub fn preview_file(&mut self, index: usize) {
        self.preview = build_preview(self.files.get(index));
    }

    /// Arms a new processing pass. Statuses go back to Pending because a
    /// re-triggered pass re-processes the whole current selection.
    pub fn begin_pass(&mut self, receiver: Receiver<PassEvent>) {
        self.is_extracting = true;
        self.notice = None;
        self.current_file = None;
        self.statuses = vec![DocumentStatus::Pending; self.files.len()];
        self.event_receiver = Some(receiver);
    }

    /// Applies one pass event. Records only ever grow here; a failure of
    /// a later file never rolls back an earlier append.
    pub fn apply_event(&mut self, event: PassEvent) {
        match event {
            PassEvent::Started { index } => {
                self.current_file = self.files.get(index).map(|f| f.name.clone());
            }
            PassEvent::Extracted { index, record } => {
                self.records.push(record);
                if let Some(status) = self.statuses.get_mut(index) {
                    *status = DocumentStatus::Processed;
                }
            }
            PassEvent::Failed { index, message } => {
                if let Some(status) = self.statuses.get_mut(index) {
                    *status = DocumentStatus::Error(message);
                }
            }
            PassEvent::Aborted { message } => {
                println!("Extraction pass aborted: {}", message);
                self.notice = Some("Error processing files. Please try again.".to_string());
                self.finish_pass();
            }
            PassEvent::Finished => self.finish_pass(),
        }
    }

    fn finish_pass(&mut self) {
        self.is_extracting = false;
        self.event_receiver = None;
        self.current_file = None;
    }

    /// Resets the session. The endpoint setting survives, like keeping a
    /// configured address across runs against the same service.
    pub fn clear(&mut self) {
        let endpoint = std::mem::take(&mut self.endpoint);
        *self = SessionState {
            endpoint,
            ..SessionState::default()
        };
    }

    pub fn can_extract(&self) -> bool {
        !self.files.is_empty() && !self.is_extracting
    }

    pub fn can_download(&self) -> bool {
        !self.records.is_empty() && !self.is_extracting
    }

    pub fn settled_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| !matches!(s, DocumentStatus::Pending))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| matches!(s, DocumentStatus::Error(_)))
            .count()
    }

    pub fn progress_fraction(&self) -> f32 {
        if self.files.is_empty() {
            0.0
        } else {
            self.settled_count() as f32 / self.files.len() as f32
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "Progress: {}/{} files | ✅ Extracted: {} | ❌ Failed: {}",
            self.settled_count(),
            self.files.len(),
            self.settled_count() - self.failed_count(),
            self.failed_count()
        )
    }
}
