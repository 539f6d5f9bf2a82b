//! Flat `KEY=VALUE` settings file
//!
//! Read once on startup, written once on shutdown. Last write wins, no
//! merge. Unknown keys and malformed values are tolerated on load so an
//! edited or stale file degrades to defaults instead of blocking startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const CONFIG_FILE: &str = "config.txt";

pub const DEFAULT_FONT_FAMILY: &str = "Proportional";
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Persisted window preferences and source selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file_path: String,
    pub sheet_name: String,
    pub font_family: String,
    pub font_size: f32,
    pub is_darkmode: bool,
    /// Saved symbol layout, one entry per row, empty slots as empty strings.
    pub row_symbols: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            sheet_name: String::new(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            is_darkmode: true,
            row_symbols: Vec::new(),
        }
    }
}

impl Settings {
    /// Default config location in the platform config directory, with a
    /// working-directory fallback when no home is resolvable.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "pricebar", "pricebar")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load settings from a flat `KEY=VALUE` file. Absent file yields
    /// `None`; the caller falls back to the interactive setup.
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let mut settings = Settings::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "FILE_PATH" => settings.file_path = value.to_string(),
                "SHEET_NAME" => settings.sheet_name = value.to_string(),
                "FONT" => {
                    if let Some((family, size)) = value.split_once(',') {
                        if let Ok(size) = size.trim().parse::<f32>() {
                            settings.font_family = family.to_string();
                            settings.font_size = size;
                        }
                    }
                }
                "IS_DARKMODE" => settings.is_darkmode = value.trim().eq_ignore_ascii_case("true"),
                "ROWS" => settings.row_symbols = value.split(',').map(str::to_string).collect(),
                _ => {}
            }
        }

        Some(settings)
    }

    /// Overwrite the config file with the current state.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir: {}", parent.display()))?;
        }

        let mut content = String::new();
        content.push_str(&format!("FILE_PATH={}\n", self.file_path));
        content.push_str(&format!("SHEET_NAME={}\n", self.sheet_name));
        content.push_str(&format!("FONT={},{}\n", self.font_family, self.font_size));
        content.push_str(&format!("IS_DARKMODE={}\n", self.is_darkmode));
        if !self.row_symbols.is_empty() {
            content.push_str(&format!("ROWS={}\n", self.row_symbols.join(",")));
        }

        fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_none() {
        let (_dir, path) = temp_config();
        assert!(Settings::load(&path).is_none());
    }

    #[test]
    fn test_round_trip() {
        let (_dir, path) = temp_config();
        let settings = Settings {
            file_path: "C:/data/prices.xlsx".to_string(),
            sheet_name: "Live".to_string(),
            font_family: "Monospace".to_string(),
            font_size: 16.0,
            is_darkmode: false,
            row_symbols: vec!["EURUSD".to_string(), String::new(), "USDJPY".to_string()],
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_empty_row_tokens_survive() {
        let (_dir, path) = temp_config();
        fs::write(&path, "ROWS=A,,B\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.row_symbols, vec!["A", "", "B"]);
    }

    #[test]
    fn test_parser_tolerates_noise() {
        let (_dir, path) = temp_config();
        fs::write(
            &path,
            "\nFILE_PATH=C:/a=b/prices.xlsx\n\nWHAT_IS_THIS=ignored\nno equals sign here\nSHEET_NAME=Live\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        // Values split on the first '=' only.
        assert_eq!(settings.file_path, "C:/a=b/prices.xlsx");
        assert_eq!(settings.sheet_name, "Live");
    }

    #[test]
    fn test_malformed_font_falls_back_to_default() {
        let (_dir, path) = temp_config();
        fs::write(&path, "FONT=justafamily\nIS_DARKMODE=maybe\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        // Anything but a true literal reads as false.
        assert!(!settings.is_darkmode);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.txt");
        Settings::default().save(&path).unwrap();
        assert!(path.exists());
    }
}
