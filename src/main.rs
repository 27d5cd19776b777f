mod app;
mod extract;
mod preview;
mod records;
mod utils;

use app::InvoiceExtractor;
use eframe::CreationContext;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Invoice Data Extractor",
        options,
        Box::new(|cc: &CreationContext| Box::new(InvoiceExtractor::new(cc))),
    )
}
