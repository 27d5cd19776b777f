mod runner;
mod types;

pub use runner::{run_pass, ExtractTransport, HttpTransport};
pub use types::{DocumentStatus, ExtractError, PassEvent, SelectedFile};
