//! The main config loading module for fidx.
//!
//! Handles loading and deserializing settings from `fidx.toml`.
//!
//! Provides the main [Config] struct, as well as the [RawConfig] used for parsing.
//! Also implements default config generation for `fidx --init`.

use crate::config::Keys;
use crate::config::Theme;
use crate::config::{Companion, CompanionConfig};
use crate::config::{General, InternalGeneral};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    companion: Companion,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for fidx
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    companion: CompanionConfig,
    theme: Theme,
    keys: Keys,
}

/// Conversion from RawConfig to Config
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            companion: CompanionConfig::from(raw.companion),
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "config loaded");
                    config
                }
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    tracing::warn!(path = %path.display(), error = %e, "config parse failed, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Parses a full config from toml text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn companion(&self) -> &CompanionConfig {
        &self.companion
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the FIDX_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/fidx/fidx.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FIDX_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("fidx/fidx.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/fidx/fidx.toml");
        }
        PathBuf::from("fidx.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> std::io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# fidx.toml - default configuration for fidx

# Note:
# Commented values are the internal defaults of fidx
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# start_dir = "~/Downloads"
# directories_only = true
# sort = "modified"          # "modified" or "dirs_first"
# label_step = true
# default_name = "index"
# language = "en"            # "en" or "es"
# advanced = false
# scan_max_depth = 8
# scan_max_nodes = 4096

[companion]
# interpreter = "python3"
# script = "file_metadata_extractor.py"
# script_path = "~/tools/file_metadata_extractor.py"

[theme]
# title.fg = "#A3BE8C"
# accent.fg = "#88C0D0"
# border.fg = "#B48EAD"
# path.fg = "#B48EAD"
# selection.fg = "#A3BE8C"
# directory.fg = "#88C0D0"
# help.fg = "default"
# error.fg = "#BF616A"
# success.fg = "#A3BE8C"

# [keys]
# force_quit = ["Ctrl+c"]
# reset = ["Ctrl+r"]
# toggle_language = ["Ctrl+e"]
# quit = ["q"]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_top = ["g", "Home"]
# go_bottom = ["G", "End"]
# go_parent = ["h", "Left", "Backspace"]
# go_into_dir = ["l", "Right"]
# select = ["Enter"]
# select_current = ["Space"]
# filter = ["i", "/"]
# toggle_advanced = ["Ctrl+d"]
# confirm = ["Enter"]
# cancel = ["Esc"]
# back = ["b", "Backspace"]
# autocomplete = ["Tab"]
# toggle_extension = ["Tab"]
# cycle_format = ["f", "4"]
# toggle_debug = ["d"]
# edit_directory = ["1"]
# edit_output = ["2"]
# edit_label = ["3"]
# restart = ["r"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SortOrder;
    use crate::ui::i18n::Language;
    use tempfile::tempdir;

    #[test]
    fn default_toml_parses_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml(DEFAULT_TOML)?;
        let general = config.general();
        assert!(general.list_options().directories_only);
        assert_eq!(general.list_options().sort, SortOrder::Modified);
        assert_eq!(general.default_name(), "index");
        assert_eq!(general.language(), Language::English);
        assert!(general.label_step());
        Ok(())
    }

    #[test]
    fn values_are_processed() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml(
            r#"
            [general]
            sort = "dirs_first"
            language = "es"
            label_step = false
            scan_max_nodes = 1
            default_name = "  "

            [keys]
            quit = ["x"]
            "#,
        )?;
        let general = config.general();
        assert_eq!(general.list_options().sort, SortOrder::DirsFirst);
        assert_eq!(general.list_options().max_nodes, 16);
        assert_eq!(general.language(), Language::Spanish);
        assert!(!general.label_step());
        assert_eq!(general.default_name(), "index");
        assert_eq!(config.keys().quit(), ["x".to_string()]);
        assert_eq!(config.keys().go_up(), ["k".to_string(), "Up".to_string()]);
        Ok(())
    }

    #[test]
    fn invalid_sort_is_an_error() {
        assert!(Config::from_toml("[general]\nsort = \"size\"").is_err());
    }

    #[test]
    fn generate_default_refuses_to_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("fidx.toml");
        Config::generate_default(&path)?;
        assert!(path.exists());
        let err = Config::generate_default(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }
}
