mod state;
mod ui;

use crate::extract::{run_pass, HttpTransport, SelectedFile};
use crate::records::csv;
use eframe::{egui, App};
pub use state::SessionState;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

pub struct InvoiceExtractor {
    state: SessionState,
    /// Texture for the current image preview. Replaced (and therefore
    /// freed) whenever the preview changes.
    preview_texture: Option<egui::TextureHandle>,
}

impl InvoiceExtractor {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        println!("Initializing Invoice Data Extractor");
        Self {
            state: SessionState::default(),
            preview_texture: None,
        }
    }

    pub fn select_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        println!("Selected {} files", paths.len());
        let files = paths
            .iter()
            .map(|path| SelectedFile::from_path(path))
            .collect();
        self.state.set_files(files);
        self.preview_texture = None;
    }

    pub fn preview_file(&mut self, index: usize) {
        self.state.preview_file(index);
        self.preview_texture = None;
    }

    /// Kicks off one processing pass on a worker thread. The guard flag
    /// blocks re-entrant passes so accumulated output stays append-only.
    pub fn start_extraction(&mut self) {
        if self.state.is_extracting {
            return;
        }
        if self.state.files.is_empty() {
            self.state.notice = Some("No files selected".to_string());
            return;
        }

        println!(
            "Starting extraction pass for {} files against {}",
            self.state.files.len(),
            self.state.endpoint
        );

        let (sender, receiver) = std_mpsc::channel();
        self.state.begin_pass(receiver);

        let files = self.state.files.clone();
        let endpoint = self.state.endpoint.trim().to_string();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let transport = HttpTransport::new(endpoint);
                run_pass(&files, &transport, &sender).await;
            });
        });
    }

    pub fn download_csv(&mut self) {
        if self.state.records.is_empty() {
            self.state.notice = Some("No data available to download".to_string());
            return;
        }

        let text = csv::to_csv(&self.state.records);
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(csv::CSV_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, text) {
            Ok(()) => println!("Saved CSV to {}", path.display()),
            Err(e) => self.state.notice = Some(format!("Failed to save CSV: {}", e)),
        }
    }

    pub fn clear_all(&mut self) {
        println!("Clearing session state");
        self.state.clear();
        self.preview_texture = None;
    }

    /// Files dropped anywhere on the window replace the selection, same
    /// as the dialog. Ignored while a pass is running.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.state.is_extracting {
            return;
        }
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !paths.is_empty() {
            self.select_files(paths);
        }
    }

    /// Drains pass events from the worker thread and folds them into the
    /// session state on the UI thread.
    fn drain_events(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        if let Some(receiver) = &self.state.event_receiver {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            self.state.apply_event(event);
        }

        if self.state.is_extracting {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for InvoiceExtractor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.drain_events(ctx);
        self.render(ctx);
    }
}
