//! Visual theme - palettes, spacing, and type scale for the overlay

use eframe::egui::{Color32, FontFamily};

/// Font sizes used across the UI
pub struct FontSize;

impl FontSize {
    pub const XS: f32 = 10.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 14.0;
    pub const LG: f32 = 18.0;
}

/// Spacing scale
pub struct Spacing;

impl Spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 12.0;
    pub const LG: f32 = 20.0;
}

/// Corner rounding scale
pub struct Radius;

impl Radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 6.0;
}

/// Color palette for one display mode
pub struct Palette {
    pub window_bg: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub row_even: Color32,
    pub row_odd: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub up: Color32,
    pub down: Color32,
    pub remove: Color32,
    pub add: Color32,
    pub panel_bg: Color32,
}

impl Palette {
    pub const DARK: Palette = Palette {
        window_bg: Color32::BLACK,
        header_bg: Color32::from_rgb(0x11, 0x11, 0x11),
        header_text: Color32::from_rgb(212, 175, 55),
        row_even: Color32::from_rgb(0x22, 0x27, 0x2b),
        row_odd: Color32::from_rgb(0x2f, 0x33, 0x38),
        text: Color32::WHITE,
        text_muted: Color32::GRAY,
        up: Color32::from_rgb(0, 255, 0),
        down: Color32::from_rgb(255, 0, 0),
        remove: Color32::from_rgb(255, 60, 60),
        add: Color32::from_rgb(50, 205, 50),
        panel_bg: Color32::from_rgb(0x1a, 0x1e, 0x22),
    };

    pub const LIGHT: Palette = Palette {
        window_bg: Color32::WHITE,
        header_bg: Color32::WHITE,
        header_text: Color32::BLACK,
        row_even: Color32::from_rgb(0xf7, 0xf4, 0xe9),
        row_odd: Color32::from_rgb(0xf5, 0xf4, 0xe9),
        text: Color32::BLACK,
        text_muted: Color32::LIGHT_GRAY,
        up: Color32::from_rgb(0, 160, 0),
        down: Color32::from_rgb(220, 0, 0),
        remove: Color32::from_rgb(200, 40, 40),
        add: Color32::from_rgb(40, 160, 40),
        panel_bg: Color32::from_rgb(0xfc, 0xf6, 0xdc),
    };

    pub fn of(is_darkmode: bool) -> &'static Palette {
        if is_darkmode {
            &Palette::DARK
        } else {
            &Palette::LIGHT
        }
    }
}

/// Map a persisted family name to an egui font family. Unknown names fall
/// back to the proportional family.
pub fn family_from_name(name: &str) -> FontFamily {
    match name {
        "Monospace" => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    }
}

/// Family names offered by the font panel, matching what
/// [`family_from_name`] understands.
pub const FAMILY_NAMES: [&str; 2] = ["Proportional", "Monospace"];
