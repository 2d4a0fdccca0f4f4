// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI configuration for the Gomoku client
//!
//! Loaded from an optional JSON file; command-line flags override individual
//! fields afterwards.

use crate::board_view::BoardStyle;
use anyhow::{ensure, Context as _, Result};
use egui::Color32;
use gomoku_core::ConnectParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest board accepted from a config file or the command line
pub const MAX_BOARD_SIZE: usize = 100;

/// Complete UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Board visual configuration
    pub board: BoardConfig,
    /// Defaults offered by the connect dialog
    pub connect: ConnectParams,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Room around the board for the controls, in pixels (width, height)
    pub chrome: (f32, f32),
}

/// Board visual configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Rows and columns
    pub size: usize,
    /// Pixels per cell, for both grid lines and markers
    pub cell_size: f32,
    pub background_color: SerializableColor,
    pub grid_color: SerializableColor,
    pub player_a_color: SerializableColor,
    pub player_b_color: SerializableColor,
}

/// Serializable color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color32> for SerializableColor {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_array();
        Self { r, g, b, a }
    }
}

impl From<SerializableColor> for Color32 {
    fn from(color: SerializableColor) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            board: BoardConfig::default(),
            connect: ConnectParams::new("localhost", 4000),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Gomoku".to_string(),
            chrome: (40.0, 100.0),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let style = BoardStyle::default();
        Self {
            size: 15,
            cell_size: 20.0,
            background_color: style.background.into(),
            grid_color: style.grid_line.into(),
            player_a_color: style.player_a.into(),
            player_b_color: style.player_b.into(),
        }
    }
}

impl BoardConfig {
    pub fn style(&self) -> BoardStyle {
        BoardStyle {
            background: self.background_color.into(),
            grid_line: self.grid_color.into(),
            player_a: self.player_a_color.into(),
            player_b: self.player_b_color.into(),
        }
    }
}

impl UiConfig {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_BOARD_SIZE).contains(&self.board.size),
            "board size must be between 1 and {MAX_BOARD_SIZE}, got {}",
            self.board.size
        );
        ensure!(
            self.board.cell_size.is_finite() && self.board.cell_size > 0.0,
            "cell size must be positive, got {}",
            self.board.cell_size
        );
        Ok(())
    }

    /// Initial window size: the board surface plus room for the controls
    pub fn window_size(&self) -> [f32; 2] {
        let board = self.board.size as f32 * self.board.cell_size + 1.0;
        [board + self.window.chrome.0, board + self.window.chrome.1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_matches_style_defaults() {
        let config = UiConfig::default();
        assert_eq!(config.board.style(), BoardStyle::default());
        assert_eq!(config.window_size(), [341.0, 401.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gomoku.json");

        let mut config = UiConfig::default();
        config.board.size = 19;
        config.board.player_b_color = Color32::BLUE.into();
        config.save_to_file(&path).unwrap();

        assert_eq!(UiConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: UiConfig = serde_json::from_str(r#"{ "board": { "cell_size": 32.0 } }"#).unwrap();
        assert_eq!(config.board.cell_size, 32.0);
        assert_eq!(config.board.size, 15);
        assert_eq!(config.connect, ConnectParams::new("localhost", 4000));
    }

    #[test]
    fn non_positive_or_infinite_cell_size_is_invalid() {
        let mut config = UiConfig::default();
        config.board.cell_size = 0.0;
        assert!(config.validate().is_err());
        config.board.cell_size = f32::INFINITY;
        assert!(config.validate().is_err());
        config.board.cell_size = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn board_size_is_bounded() {
        let mut config = UiConfig::default();
        config.board.size = 0;
        assert!(config.validate().is_err());
        config.board.size = MAX_BOARD_SIZE;
        assert!(config.validate().is_ok());
        config.board.size = 100_000;
        assert!(config.validate().is_err());
    }
}
