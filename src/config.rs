use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "tile-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_COLUMNS: u16 = 20;

/// Default board height in cells.
pub const DEFAULT_ROWS: u16 = 20;

/// Default number of terminal columns used to draw one grid cell.
pub const DEFAULT_TILE_WIDTH: u16 = 2;

/// Default target number of apples on the board.
pub const DEFAULT_APPLE_COUNT: usize = 5;

/// Default number of ticks per body movement.
pub const DEFAULT_CADENCE: u32 = 21;

/// Default wall-clock interval between ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 25;

/// Length a fresh snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Smallest board that fits the starting body laid out from `(2, 2)`.
pub const MIN_COLUMNS: u16 = 5;
pub const MIN_ROWS: u16 = 3;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Session geometry and pacing, fixed when the session starts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub columns: u16,
    pub rows: u16,
    pub tile_width: u16,
    pub apple_count: usize,
    pub cadence: u32,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            tile_width: DEFAULT_TILE_WIDTH,
            apple_count: DEFAULT_APPLE_COUNT,
            cadence: DEFAULT_CADENCE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl BoardConfig {
    /// Returns the board bounds.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.columns,
            height: self.rows,
        }
    }

    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_COLUMNS || self.rows < MIN_ROWS {
            return Err(ConfigError::Invalid(format!(
                "board must be at least {MIN_COLUMNS}x{MIN_ROWS}, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.tile_width == 0 {
            return Err(ConfigError::Invalid("tile_width must be at least 1".into()));
        }
        if self.apple_count == 0 {
            return Err(ConfigError::Invalid(
                "apple_count must be at least 1".into(),
            ));
        }
        if self.cadence == 0 {
            return Err(ConfigError::Invalid("cadence must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Loads the configuration file.
    ///
    /// With an explicit `path` the file must exist. Without one the platform
    /// default location is tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_from_path(path),
            None => match default_config_path() {
                Some(path) if path.exists() => load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Returns the platform-correct config file path, when the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Returns the directory used for the interactive log file.
#[must_use]
pub fn log_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

fn load_from_path(path: &Path) -> Result<BoardConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str::<BoardConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `config` as pretty JSON, creating parent directories when needed.
pub fn save_to_path(path: &Path, config: &BoardConfig) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub apple: Color,
    /// Background of even `(row + column)` cells.
    pub tile_light: Color,
    /// Background of odd `(row + column)` cells.
    pub tile_dark: Color,
    pub score: Color,
    pub border_fg: Color,
    pub hint: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::Rgb(38, 70, 83),
    snake_body: Color::Rgb(42, 157, 143),
    snake_tail: Color::Rgb(120, 120, 120),
    apple: Color::Rgb(214, 40, 40),
    tile_light: Color::Rgb(232, 232, 232),
    tile_dark: Color::Rgb(214, 214, 214),
    score: Color::Rgb(30, 201, 139),
    border_fg: Color::Gray,
    hint: Color::DarkGray,
};

pub const GLYPH_APPLE: &str = "●";
pub const GLYPH_HEAD_UP: &str = "▲";
pub const GLYPH_HEAD_RIGHT: &str = "▶";
pub const GLYPH_HEAD_DOWN: &str = "▼";
pub const GLYPH_HEAD_LEFT: &str = "◀";
pub const GLYPH_BODY_HORIZONTAL: &str = "━";
pub const GLYPH_BODY_VERTICAL: &str = "┃";
pub const GLYPH_CORNER_UP_LEFT: &str = "┛";
pub const GLYPH_CORNER_UP_RIGHT: &str = "┗";
pub const GLYPH_CORNER_DOWN_LEFT: &str = "┓";
pub const GLYPH_CORNER_DOWN_RIGHT: &str = "┏";
