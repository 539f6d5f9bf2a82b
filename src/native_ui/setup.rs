//! First-run setup: choose a workbook file and a sheet
//!
//! Shown when no config exists or the configured source fails to open; the
//! main view only starts once a source opens cleanly.

use std::path::Path;

use eframe::egui::{self, Color32, ComboBox, RichText, Rounding};
use rfd::FileDialog;

use super::theme::{FontSize, Palette, Radius, Spacing};
use crate::source::WorkbookSource;

pub struct SetupWindow {
    file_path: String,
    sheet_name: String,
    sheets: Vec<String>,
    error: Option<String>,
}

impl SetupWindow {
    pub fn new(file_path: &str, sheet_name: &str) -> Self {
        let mut setup = Self {
            file_path: file_path.to_string(),
            sheet_name: sheet_name.to_string(),
            sheets: Vec::new(),
            error: None,
        };
        if !setup.file_path.is_empty() {
            setup.refresh_sheets();
        }
        setup
    }

    /// Setup pre-filled from a config whose source failed to open.
    pub fn with_error(file_path: &str, sheet_name: &str, error: String) -> Self {
        let mut setup = Self::new(file_path, sheet_name);
        setup.error = Some(error);
        setup
    }

    /// Render the setup view. Returns an opened source once the user's
    /// choice validates.
    pub fn show(&mut self, ctx: &egui::Context, palette: &Palette) -> Option<WorkbookSource> {
        let mut opened = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.window_bg).inner_margin(Spacing::LG))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(Spacing::LG);
                    ui.label(
                        RichText::new("Select workbook and sheet")
                            .size(FontSize::LG)
                            .color(palette.header_text)
                            .strong(),
                    );
                    ui.add_space(Spacing::MD);

                    if let Some(error) = &self.error {
                        egui::Frame::none()
                            .fill(Color32::from_rgba_unmultiplied(239, 68, 68, 24))
                            .rounding(Rounding::same(Radius::SM))
                            .inner_margin(Spacing::SM)
                            .show(ui, |ui| {
                                ui.label(
                                    RichText::new(error)
                                        .size(FontSize::SM)
                                        .color(palette.down),
                                );
                            });
                        ui.add_space(Spacing::SM);
                    }

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Workbook").color(palette.text));
                        ui.add(
                            egui::TextEdit::singleline(&mut self.file_path)
                                .desired_width(ui.available_width() - 90.0),
                        );
                        if ui.button("Browse\u{2026}").clicked() {
                            let picked = FileDialog::new()
                                .add_filter("Spreadsheets", &["xlsx", "xlsm", "xls", "ods"])
                                .pick_file();
                            if let Some(path) = picked {
                                self.file_path = path.display().to_string();
                                self.refresh_sheets();
                            }
                        }
                    });

                    ui.add_space(Spacing::SM);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Sheet").color(palette.text));
                        if self.sheets.is_empty() {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.sheet_name)
                                    .desired_width(220.0),
                            );
                        } else {
                            ComboBox::from_id_salt("setup_sheet")
                                .selected_text(self.sheet_name.clone())
                                .show_ui(ui, |ui| {
                                    for sheet in &self.sheets {
                                        ui.selectable_value(
                                            &mut self.sheet_name,
                                            sheet.clone(),
                                            sheet,
                                        );
                                    }
                                });
                        }
                    });

                    ui.add_space(Spacing::MD);

                    let ready = !self.file_path.is_empty() && !self.sheet_name.is_empty();
                    if ui
                        .add_enabled(ready, egui::Button::new("Start"))
                        .clicked()
                    {
                        match WorkbookSource::open(Path::new(&self.file_path), &self.sheet_name) {
                            Ok(source) => {
                                self.error = None;
                                opened = Some(source);
                            }
                            Err(e) => {
                                tracing::error!("source open failed: {}", e);
                                self.error = Some(e.to_string());
                            }
                        }
                    }
                });
            });

        opened
    }

    /// Populate the sheet dropdown from the chosen workbook.
    fn refresh_sheets(&mut self) {
        match WorkbookSource::sheet_names(Path::new(&self.file_path)) {
            Ok(sheets) => {
                if !sheets.is_empty() && !sheets.contains(&self.sheet_name) {
                    self.sheet_name = sheets[0].clone();
                }
                self.sheets = sheets;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("failed to list sheets: {}", e);
                self.sheets = Vec::new();
                self.error = Some(e.to_string());
            }
        }
    }
}
