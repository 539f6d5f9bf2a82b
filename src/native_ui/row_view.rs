//! One row's presentation: symbol, flash-colored bid/ask, affordances

use eframe::egui::{self, Color32, FontId, Rect, RichText, Rounding, Stroke};

use super::theme::{family_from_name, FontSize, Palette, Radius, Spacing};
use crate::core::{Flash, Row};

/// Actions a row can request; collected by the app and applied after the
/// row loop so the board is never mutated mid-render.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    StartAdd(usize),
    Select(usize, String),
}

/// State of the inline symbol picker. At most one row has it open.
#[derive(Debug, Default)]
pub struct PickerState {
    open_for: Option<usize>,
    pub filter: String,
    just_opened: bool,
    frame_rect: Option<Rect>,
}

impl PickerState {
    pub fn open(&mut self, row: usize) {
        self.open_for = Some(row);
        self.filter.clear();
        self.just_opened = true;
    }

    pub fn close(&mut self) {
        self.open_for = None;
        self.filter.clear();
        self.frame_rect = None;
    }

    pub fn is_open(&self) -> bool {
        self.open_for.is_some()
    }

    pub fn is_open_for(&self, row: usize) -> bool {
        self.open_for == Some(row)
    }

    /// Screen rect of the picker as of the last frame, for outside-click
    /// detection.
    pub fn frame_rect(&self) -> Option<Rect> {
        self.frame_rect
    }
}

/// Per-row render inputs computed by the app.
pub struct RowContext<'a> {
    pub palette: &'a Palette,
    pub font_family: &'a str,
    pub font_size: f32,
    pub is_add_slot: bool,
    /// Unused symbols matching the picker filter; only populated for the
    /// row whose picker is open.
    pub matches: Vec<String>,
}

/// Column widths shared by the header and every row so they line up.
pub struct Columns {
    pub symbol: f32,
    pub value: f32,
}

impl Columns {
    /// Width reserved on the right for the move/remove/add controls.
    pub const CONTROLS: f32 = 96.0;

    pub fn from_width(total: f32) -> Self {
        let symbol = total * 0.3;
        let value = ((total - symbol - Self::CONTROLS) / 4.0).max(60.0);
        Self { symbol, value }
    }
}

/// Render one price row; returns the action the user requested, if any.
pub fn price_row(
    ui: &mut egui::Ui,
    index: usize,
    row: &Row,
    picker: &mut PickerState,
    ctx: &RowContext<'_>,
) -> Option<RowAction> {
    let palette = ctx.palette;
    let bg = if index % 2 == 1 {
        palette.row_odd
    } else {
        palette.row_even
    };

    let mut action = None;
    egui::Frame::none()
        .fill(bg)
        .rounding(Rounding::same(Radius::SM))
        .inner_margin(egui::Margin::symmetric(Spacing::SM, Spacing::XS))
        .show(ui, |ui| {
            if picker.is_open_for(index) {
                action = picker_ui(ui, index, picker, ctx);
                return;
            }

            let family = family_from_name(ctx.font_family);
            let symbol_font = FontId::new(ctx.font_size * 1.3, family.clone());
            let value_font = FontId::new(ctx.font_size * 1.4, family);
            let row_height = ctx.font_size * 1.8;

            ui.horizontal(|ui| {
                let columns = Columns::from_width(ui.available_width());

                cell(ui, columns.symbol, row_height, &row.symbol, &symbol_font, palette.text, false);
                cell(
                    ui,
                    columns.value,
                    row_height,
                    &row.bid_text,
                    &value_font,
                    flash_color(row.bid_flash, palette),
                    row.bid_flash != Flash::Steady,
                );
                cell(
                    ui,
                    columns.value,
                    row_height,
                    &row.ask_text,
                    &value_font,
                    flash_color(row.ask_flash, palette),
                    row.ask_flash != Flash::Steady,
                );
                cell(ui, columns.value, row_height, &row.low_text, &value_font, palette.text, false);
                cell(ui, columns.value, row_height, &row.high_text, &value_font, palette.text, false);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if row.is_bound() {
                        if icon_button(ui, "\u{2716}", palette.remove) {
                            action = Some(RowAction::Remove(index));
                        }
                        if icon_button(ui, "\u{25bc}", palette.text_muted) {
                            action = Some(RowAction::MoveDown(index));
                        }
                        if icon_button(ui, "\u{25b2}", palette.text_muted) {
                            action = Some(RowAction::MoveUp(index));
                        }
                    } else if ctx.is_add_slot && icon_button(ui, "\u{2795}", palette.add) {
                        action = Some(RowAction::StartAdd(index));
                    }
                });
            });
        });

    action
}

/// Inline symbol picker: a filter box plus the matching unused symbols.
fn picker_ui(
    ui: &mut egui::Ui,
    index: usize,
    picker: &mut PickerState,
    ctx: &RowContext<'_>,
) -> Option<RowAction> {
    let palette = ctx.palette;
    let mut action = None;

    let inner = ui.vertical(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut picker.filter)
                .hint_text("Filter symbols")
                .desired_width(ui.available_width() * 0.4),
        );
        if picker.just_opened {
            response.request_focus();
            picker.just_opened = false;
        }

        if ctx.matches.is_empty() {
            ui.label(
                RichText::new("No unused symbols match")
                    .size(FontSize::SM)
                    .color(palette.text_muted),
            );
            return;
        }

        egui::Frame::none()
            .fill(palette.panel_bg)
            .rounding(Rounding::same(Radius::MD))
            .inner_margin(Spacing::XS)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(("symbol_picker", index))
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for symbol in &ctx.matches {
                            let label = ui.selectable_label(
                                false,
                                RichText::new(symbol).size(FontSize::MD).color(palette.text),
                            );
                            if label.clicked() {
                                action = Some(RowAction::Select(index, symbol.clone()));
                            }
                        }
                    });
            });
    });

    picker.frame_rect = Some(inner.response.rect);
    action
}

fn cell(
    ui: &mut egui::Ui,
    width: f32,
    height: f32,
    text: &str,
    font: &FontId,
    color: Color32,
    strong: bool,
) {
    let mut rich = RichText::new(text).font(font.clone()).color(color);
    if strong {
        rich = rich.strong();
    }
    ui.add_sized(
        [width, height],
        egui::Label::new(rich).truncate().halign(egui::Align::LEFT),
    );
}

fn flash_color(flash: Flash, palette: &Palette) -> Color32 {
    match flash {
        Flash::Steady => palette.text,
        Flash::Up => palette.up,
        Flash::Down => palette.down,
    }
}

/// Borderless icon button used for the row controls
fn icon_button(ui: &mut egui::Ui, text: &str, color: Color32) -> bool {
    ui.add(
        egui::Button::new(RichText::new(text).size(FontSize::MD).color(color))
            .fill(Color32::TRANSPARENT)
            .stroke(Stroke::NONE),
    )
    .clicked()
}
