//! The overlay application: tick scheduling, board rendering, shortcuts
//!
//! Owns all mutable UI state explicitly - the board, the source, the
//! settings, the picker - and passes it down to the view helpers.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::anyhow;
use eframe::egui::{self, Color32, Key, Modifiers, RichText, Rounding};

use super::font_panel::FontPanel;
use super::row_view::{self, Columns, PickerState, RowAction, RowContext};
use super::setup::SetupWindow;
use super::theme::{FontSize, Palette, Radius, Spacing};
use crate::core::{Board, QuoteBook, INITIAL_ROWS};
use crate::settings::Settings;
use crate::source::{QuoteSource, WorkbookSource};

/// Launch the overlay event loop
pub fn run(config_path: PathBuf, interval: Duration) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PriceBar")
            .with_inner_size([980.0, 640.0])
            .with_min_inner_size([640.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "pricebar",
        options,
        Box::new(move |cc| Ok(Box::new(BoardApp::new(cc, config_path, interval)))),
    )
    .map_err(|e| anyhow!("event loop failed: {e}"))
}

enum View {
    Setup(SetupWindow),
    Board,
}

pub struct BoardApp {
    config_path: PathBuf,
    interval: Duration,
    settings: Settings,
    board: Board,
    source: Option<WorkbookSource>,
    view: View,
    last_tick: Option<Instant>,
    picker: PickerState,
    font_panel: FontPanel,
    fullscreen: bool,
}

impl BoardApp {
    fn new(_cc: &eframe::CreationContext<'_>, config_path: PathBuf, interval: Duration) -> Self {
        let settings = Settings::load(&config_path).unwrap_or_default();

        let mut board = Board::new(INITIAL_ROWS);
        let (view, source) = if settings.file_path.is_empty() {
            (
                View::Setup(SetupWindow::new(&settings.file_path, &settings.sheet_name)),
                None,
            )
        } else {
            match WorkbookSource::open(Path::new(&settings.file_path), &settings.sheet_name) {
                Ok(source) => {
                    board.restore_layout(&settings.row_symbols);
                    (View::Board, Some(source))
                }
                Err(e) => {
                    tracing::error!("configured source failed to open: {}", e);
                    (
                        View::Setup(SetupWindow::with_error(
                            &settings.file_path,
                            &settings.sheet_name,
                            e.to_string(),
                        )),
                        None,
                    )
                }
            }
        };

        Self {
            config_path,
            interval,
            settings,
            board,
            source,
            view,
            last_tick: None,
            picker: PickerState::default(),
            font_panel: FontPanel::closed(),
            fullscreen: false,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let chord = Modifiers::CTRL | Modifiers::SHIFT;

        if ctx.input_mut(|i| i.consume_key(chord, Key::F1)) {
            self.fullscreen = !self.fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
        }
        if ctx.input_mut(|i| i.consume_key(chord, Key::F)) {
            self.font_panel
                .open(&self.settings.font_family, self.settings.font_size);
        }
        if self.picker.is_open() && ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape)) {
            self.picker.close();
        }
    }

    /// Run a poll when the interval has elapsed. Ticks are serialized by
    /// the event loop; a failed read degrades to an empty book and never
    /// stops future ticks.
    fn maybe_tick(&mut self, ctx: &egui::Context) {
        let due = self
            .last_tick
            .map_or(true, |last| last.elapsed() >= self.interval);

        if due {
            let book = match self.source.as_mut() {
                Some(source) => match source.read() {
                    Ok(book) => {
                        tracing::trace!(quotes = book.len(), "quotes read");
                        book
                    }
                    Err(e) => {
                        tracing::warn!("quote read failed: {}", e);
                        QuoteBook::empty()
                    }
                },
                None => QuoteBook::empty(),
            };
            self.board.tick(book);
            self.last_tick = Some(Instant::now());
        }

        ctx.request_repaint_after(self.interval);
    }

    fn show_board(&mut self, ctx: &egui::Context) {
        let palette = Palette::of(self.settings.is_darkmode);
        let add_slot = self.board.add_slot();

        let action = egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(palette.window_bg)
                    .inner_margin(Spacing::XS),
            )
            .show(ctx, |ui| {
                let mut action = None;

                self.header(ui, palette);
                ui.add_space(Spacing::XS);

                let footer_height = FontSize::XS + Spacing::SM;
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(ui.available_height() - footer_height)
                    .show(ui, |ui| {
                        for (index, row) in self.board.rows().iter().enumerate() {
                            let matches = if self.picker.is_open_for(index) {
                                self.board.matching_symbols(&self.picker.filter)
                            } else {
                                Vec::new()
                            };
                            let row_ctx = RowContext {
                                palette,
                                font_family: &self.settings.font_family,
                                font_size: self.settings.font_size,
                                is_add_slot: add_slot == Some(index),
                                matches,
                            };
                            if let Some(requested) =
                                row_view::price_row(ui, index, row, &mut self.picker, &row_ctx)
                            {
                                action = Some(requested);
                            }
                            ui.add_space(Spacing::XS / 2.0);
                        }
                    });

                ui.add_space(Spacing::XS / 2.0);
                let updated = self
                    .board
                    .book()
                    .read_at()
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S");
                ui.label(
                    RichText::new(format!("Updated {}", updated))
                        .size(FontSize::XS)
                        .color(palette.text_muted),
                );

                action
            })
            .inner;

        if let Some(action) = action {
            self.apply_action(action);
        }
        self.close_picker_on_outside_click(ctx);
    }

    fn header(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        egui::Frame::none()
            .fill(palette.header_bg)
            .rounding(Rounding::same(Radius::SM))
            .inner_margin(egui::Margin::symmetric(Spacing::SM, Spacing::SM))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let columns = Columns::from_width(ui.available_width());
                    for (i, title) in ["Symbol", "Bid", "Ask", "Low", "High"].into_iter().enumerate()
                    {
                        let width = if i == 0 { columns.symbol } else { columns.value };
                        ui.add_sized(
                            [width, 24.0],
                            egui::Label::new(
                                RichText::new(title)
                                    .size(FontSize::LG)
                                    .color(palette.header_text)
                                    .strong(),
                            )
                            .halign(egui::Align::LEFT),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let toggle = ui
                            .add(
                                egui::Button::new(
                                    RichText::new("\u{1f313}").size(FontSize::MD),
                                )
                                .fill(Color32::TRANSPARENT),
                            )
                            .on_hover_text("Toggle dark mode");
                        if toggle.clicked() {
                            self.settings.is_darkmode = !self.settings.is_darkmode;
                        }
                    });
                });
            });
    }

    fn apply_action(&mut self, action: RowAction) {
        match action {
            RowAction::Remove(index) => {
                self.board.clear_row(index);
                self.picker.close();
            }
            RowAction::StartAdd(index) => self.picker.open(index),
            RowAction::Select(index, symbol) => {
                self.board.assign_symbol(index, &symbol);
                self.picker.close();
            }
            RowAction::MoveUp(index) => {
                if let Some((from, to)) = self.board.move_row(index, -1) {
                    tracing::debug!(from, to, "row moved");
                }
            }
            RowAction::MoveDown(index) => {
                if let Some((from, to)) = self.board.move_row(index, 1) {
                    tracing::debug!(from, to, "row moved");
                }
            }
        }
    }

    /// Clicking anywhere outside an open picker dismisses it.
    fn close_picker_on_outside_click(&mut self, ctx: &egui::Context) {
        if !self.picker.is_open() {
            return;
        }
        let clicked_at = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let (Some(pos), Some(rect)) = (clicked_at, self.picker.frame_rect()) {
            if !rect.contains(pos) {
                self.picker.close();
            }
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.settings.is_darkmode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.handle_shortcuts(ctx);

        let palette = Palette::of(self.settings.is_darkmode);
        let mut opened = None;

        if let View::Setup(setup) = &mut self.view {
            if let Some(source) = setup.show(ctx, palette) {
                opened = Some(source);
            }
        } else {
            self.maybe_tick(ctx);
            self.show_board(ctx);
        }

        if let Some((family, size)) = self.font_panel.show(ctx) {
            self.settings.font_family = family;
            self.settings.font_size = size;
        }

        if let Some(source) = opened {
            self.settings.file_path = source.path().display().to_string();
            self.settings.sheet_name = source.sheet().to_string();
            if let Err(e) = self.settings.save(&self.config_path) {
                tracing::warn!("failed to save config: {:#}", e);
            }
            tracing::info!(
                file = %self.settings.file_path,
                sheet = %self.settings.sheet_name,
                "source opened"
            );
            self.source = Some(source);
            self.board = Board::new(INITIAL_ROWS);
            self.picker.close();
            self.last_tick = None;
            self.view = View::Board;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if matches!(self.view, View::Board) {
            self.settings.row_symbols = self.board.row_symbols();
            if let Err(e) = self.settings.save(&self.config_path) {
                tracing::warn!("failed to save config on exit: {:#}", e);
            }
        }
        // The single workbook connection is dropped exactly once, here.
        self.source = None;
    }
}
