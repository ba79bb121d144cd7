//! Configuration and color scheme management for slate.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.slate/config.toml`
//! - Built-in color schemes for prompt, output and error text
//!
//! # Configuration File
//!
//! ```toml
//! # Defaults for the launch parameters (command line wins)
//! vfs_path = "/home/me/vfs"
//! startup_script = "/home/me/startup.sh"
//!
//! # Color scheme: default, solarized-dark, nord, mono
//! color_scheme = "nord"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default virtual filesystem root
    pub vfs_path: Option<String>,
    /// Default startup script
    pub startup_script: Option<String>,
    /// Color scheme name
    pub color_scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vfs_path: None,
            startup_script: None,
            color_scheme: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults.
    ///
    /// A missing file is not an error; an unreadable or invalid one is
    /// logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::read(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.slate/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,
    pub background: Color,
    pub input_fg: Color,
    pub prompt_fg: Color,
    pub output_fg: Color,
    pub error_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),
            background: Color::new(0, 0, 0),
            input_fg: Color::new(255, 255, 255),
            prompt_fg: Color::new(80, 200, 80),
            output_fg: Color::new(200, 200, 200),
            error_fg: Color::new(230, 80, 80),
            selection_bg: Color::new(255, 255, 255),
            selection_fg: Color::new(0, 0, 0),
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),
            background: Color::new(0, 43, 54),
            input_fg: Color::new(238, 232, 213),
            prompt_fg: Color::new(133, 153, 0),
            output_fg: Color::new(147, 161, 161),
            error_fg: Color::new(220, 50, 47),
            selection_bg: Color::new(38, 139, 210),
            selection_fg: Color::new(253, 246, 227),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::new(46, 52, 64),
            input_fg: Color::new(236, 239, 244),
            prompt_fg: Color::new(136, 192, 208),
            output_fg: Color::new(216, 222, 233),
            error_fg: Color::new(191, 97, 106),
            selection_bg: Color::new(76, 86, 106),
            selection_fg: Color::new(236, 239, 244),
        }
    }

    /// Monochrome scheme
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            background: Color::new(0, 0, 0),
            input_fg: Color::new(255, 255, 255),
            prompt_fg: Color::new(255, 255, 255),
            output_fg: Color::new(190, 190, 190),
            error_fg: Color::new(255, 255, 255),
            selection_bg: Color::new(190, 190, 190),
            selection_fg: Color::new(0, 0, 0),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" => Self::solarized_dark(),
            "nord" => Self::nord(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "solarized-dark", "nord", "mono"]
    }
}

/// `~/.slate`
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".slate"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
