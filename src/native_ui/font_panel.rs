//! Font selection panel, opened with Ctrl+Shift+F

use eframe::egui::{self, ComboBox, RichText, Slider};

use super::theme::{FontSize, FAMILY_NAMES};

/// Floating panel for picking the overlay font family and size.
pub struct FontPanel {
    pub is_open: bool,
    family: String,
    size: f32,
}

impl FontPanel {
    pub fn closed() -> Self {
        Self {
            is_open: false,
            family: String::new(),
            size: 0.0,
        }
    }

    /// Open the panel pre-filled with the current choice.
    pub fn open(&mut self, family: &str, size: f32) {
        self.is_open = true;
        self.family = family.to_string();
        self.size = size;
    }

    /// Show the panel. Returns the chosen `(family, size)` when applied.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(String, f32)> {
        if !self.is_open {
            return None;
        }

        let mut applied = None;
        let mut keep_open = true;

        egui::Window::new("Font")
            .open(&mut keep_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ComboBox::from_label("Family")
                    .selected_text(self.family.clone())
                    .show_ui(ui, |ui| {
                        for name in FAMILY_NAMES {
                            ui.selectable_value(&mut self.family, name.to_string(), name);
                        }
                    });

                ui.add(Slider::new(&mut self.size, 8.0..=28.0).text("Size"));

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{} at {:.0} pt", self.family, self.size))
                        .size(self.size.clamp(8.0, 28.0))
                        .family(super::theme::family_from_name(&self.family)),
                );
                ui.add_space(4.0);

                if ui
                    .button(RichText::new("Apply").size(FontSize::MD))
                    .clicked()
                {
                    applied = Some((self.family.clone(), self.size));
                }
            });

        if applied.is_some() || !keep_open {
            self.is_open = false;
        }
        applied
    }
}
