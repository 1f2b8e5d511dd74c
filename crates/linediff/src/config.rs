//! Configuration file support
//!
//! Settings are read from `$CONFIG_DIR/linediff/config.toml`. Every key is
//! optional; a missing file means defaults.

use anyhow::{Context, Result};
use linediff_core::{Algorithm, DiffOptions, DiffSettings};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// How results are printed outside the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    SideBySide,
    Unified,
    Stats,
    Json,
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diff: DiffConfig,
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub algorithm: Algorithm,
}

impl DiffConfig {
    pub fn settings(&self) -> DiffSettings {
        DiffSettings {
            options: DiffOptions {
                ignore_case: self.ignore_case,
                ignore_whitespace: self.ignore_whitespace,
            },
            algorithm: self.algorithm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Total output width for side-by-side; terminal width when unset
    pub width: Option<usize>,
    pub line_numbers: bool,
    pub tab_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            width: None,
            line_numbers: true,
            tab_width: 4,
        }
    }
}

/// Colors for the TUI, as names (`"green"`) or hex (`"#1e3a28"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub added_fg: String,
    pub added_bg: String,
    pub removed_fg: String,
    pub removed_bg: String,
    pub context_fg: String,
    pub gutter_fg: String,
    pub border_focused: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            added_fg: "green".into(),
            added_bg: "#12301c".into(),
            removed_fg: "red".into(),
            removed_bg: "#3a1616".into(),
            context_fg: "gray".into(),
            gutter_fg: "darkgray".into(),
            border_focused: "cyan".into(),
        }
    }
}

/// Resolved TUI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub added_fg: Color,
    pub added_bg: Color,
    pub removed_fg: Color,
    pub removed_bg: Color,
    pub context_fg: Color,
    pub gutter_fg: Color,
    pub border_focused: Color,
}

impl ThemeConfig {
    pub fn resolve(&self) -> Result<Theme> {
        let parse = |name: &str, value: &str| {
            Color::from_str(value)
                .map_err(|_| anyhow::anyhow!("invalid color for theme.{}: '{}'", name, value))
        };
        Ok(Theme {
            added_fg: parse("added_fg", &self.added_fg)?,
            added_bg: parse("added_bg", &self.added_bg)?,
            removed_fg: parse("removed_fg", &self.removed_fg)?,
            removed_bg: parse("removed_bg", &self.removed_bg)?,
            context_fg: parse("context_fg", &self.context_fg)?,
            gutter_fg: parse("gutter_fg", &self.gutter_fg)?,
            border_focused: parse("border_focused", &self.border_focused)?,
        })
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linediff").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.theme.resolve()?;
        config.display.tab_width = config.display.tab_width.max(1);
        Ok(config)
    }
}
