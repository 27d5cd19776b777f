use super::InvoiceExtractor;
use crate::extract::DocumentStatus;
use crate::preview::PreviewContent;
use crate::records;
use crate::utils::file_size::human_size;
use crate::utils::media_type::SUPPORTED_EXTENSIONS;
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;

const GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const RED: Color32 = Color32::from_rgb(220, 50, 50);

impl InvoiceExtractor {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 30.0;

            egui::ScrollArea::vertical()
                .max_height(total_height - footer_height)
                .show(ui, |ui| {
                    ui.add_space(15.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Invoice Data Extractor");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload invoices and download the extracted fields as CSV")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(15.0);
                    self.render_endpoint(ui);
                    ui.add_space(10.0);
                    self.render_selection(ui, ctx);
                    ui.add_space(10.0);

                    if !self.state.files.is_empty() {
                        self.render_file_list(ui);
                        ui.add_space(10.0);
                    }

                    self.render_preview(ui, ctx);
                    ui.add_space(15.0);
                    self.render_actions(ui);
                    ui.add_space(10.0);
                    self.render_progress(ui);
                    ui.add_space(10.0);
                    self.render_results(ui);
                    ui.add_space(15.0);
                });

            if let Some(notice) = &self.state.notice {
                ui.vertical_centered(|ui| {
                    ui.colored_label(RED, notice);
                });
            }
        });
    }

    fn render_endpoint(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Extraction endpoint");
                ui.add_enabled_ui(!self.state.is_extracting, |ui| {
                    ui.add_sized(
                        [ui.available_width(), 20.0],
                        egui::TextEdit::singleline(&mut self.state.endpoint)
                            .font(egui::TextStyle::Monospace)
                            .hint_text("http://localhost:5000/upload"),
                    );
                });
            });
        });
    }

    fn render_selection(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let hovering_files = ctx.input(|i| !i.raw.hovered_files.is_empty());

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!self.state.is_extracting, |ui| {
                    if ui.button("📁 Select Files").clicked() {
                        if let Some(paths) = FileDialog::new()
                            .add_filter("Documents", &SUPPORTED_EXTENSIONS)
                            .pick_files()
                        {
                            self.select_files(paths);
                        }
                    }
                });

                if hovering_files && !self.state.is_extracting {
                    ui.colored_label(GREEN, "Release to load files");
                } else {
                    ui.label(
                        RichText::new("or drag and drop files anywhere in this window")
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                }
            });
        });
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;

        ui.group(|ui| {
            ui.label(RichText::new("Files").strong());
            ui.add_space(5.0);

            for (index, file) in self.state.files.iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.link(&file.name).on_hover_text("Click to preview").clicked() {
                        clicked = Some(index);
                    }
                    ui.label(
                        RichText::new(human_size(file.size))
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        match &self.state.statuses[index] {
                            DocumentStatus::Pending => {
                                ui.colored_label(Color32::GRAY, "Pending");
                            }
                            DocumentStatus::Processed => {
                                ui.colored_label(GREEN, "Processed");
                            }
                            DocumentStatus::Error(message) => {
                                ui.colored_label(RED, format!("Error: {}", message));
                            }
                        }
                    });
                });
            }
        });

        if let Some(index) = clicked {
            self.preview_file(index);
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.group(|ui| {
            ui.set_min_height(100.0);
            ui.set_width(ui.available_width());

            match &self.state.preview {
                PreviewContent::Empty => {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No document selected").color(Color32::GRAY));
                    });
                }
                PreviewContent::Image { name, image } => {
                    let texture = self.preview_texture.get_or_insert_with(|| {
                        ctx.load_texture(name.clone(), image.clone(), egui::TextureOptions::LINEAR)
                    });
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Image::new(&*texture)
                                .max_width(ui.available_width() - 20.0)
                                .max_height(300.0),
                        );
                        ui.label(RichText::new(name).color(Color32::GRAY));
                    });
                }
                PreviewContent::Pdf { name, path } => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(25.0);
                        ui.label(format!("📄 {}", name));
                        ui.add_space(5.0);
                        if ui.button("Open in system viewer").clicked() {
                            if let Err(e) = open::that(path) {
                                eprintln!("Failed to open document viewer: {}", e);
                            }
                        }
                    });
                }
                PreviewContent::Unsupported { name } => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("Preview not available for {}", name))
                                .color(Color32::GRAY),
                        );
                    });
                }
            }
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.state.can_extract(), |ui| {
                let button =
                    egui::Button::new("🔍 Extract Data").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.start_extraction();
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let row_width = 230.0;
                ui.add_space((ui.available_width() - row_width).max(0.0) / 2.0);
                ui.add_enabled_ui(self.state.can_download(), |ui| {
                    if ui.button("💾 Download CSV").clicked() {
                        self.download_csv();
                    }
                });
                ui.add_enabled_ui(!self.state.is_extracting, |ui| {
                    if ui.button("🗑 Clear All").clicked() {
                        self.clear_all();
                    }
                });
            });
        });
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        if !self.state.is_extracting && self.state.settled_count() == 0 {
            return;
        }

        ui.group(|ui| {
            if self.state.is_extracting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    let current = self.state.current_file.as_deref().unwrap_or("…");
                    ui.label(format!("📤 Extracting: {}", current));
                });
            } else if self.state.failed_count() > 0 {
                ui.colored_label(RED, "Extraction completed with failures");
            } else {
                ui.colored_label(GREEN, "✅ Extraction complete");
            }

            let progress_bar =
                egui::ProgressBar::new(self.state.progress_fraction()).show_percentage();
            ui.add(progress_bar);
            ui.label(self.state.status_line());
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new("Extracted Data").strong());
            ui.add_space(5.0);

            if self.state.records.is_empty() {
                ui.label(RichText::new("No data available").color(Color32::GRAY));
                return;
            }

            let columns = records::column_union(&self.state.records);
            egui::ScrollArea::horizontal().show(ui, |ui| {
                egui::Grid::new("results_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .show(ui, |ui| {
                        for column in &columns {
                            ui.label(RichText::new(column).strong());
                        }
                        ui.end_row();

                        for record in &self.state.records {
                            for column in &columns {
                                ui.label(records::cell_text(record.get(column)));
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    }
}
