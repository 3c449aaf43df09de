//! The general configuration settings for fidx.
//!
//! This module defines the [General] struct for deserializing the `[general]` table
//! of fidx.toml and the [InternalGeneral] struct used at runtime.

use crate::core::{ListOptions, SortOrder};
use crate::ui::i18n::Language;
use crate::utils::{DEFAULT_SCAN_NODES, clamp_scan_nodes, expand_home_path};

use serde::Deserialize;

use std::path::PathBuf;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    start_dir: Option<String>,
    directories_only: bool,
    sort: SortOrder,
    label_step: bool,
    default_name: String,
    language: String,
    advanced: bool,
    scan_max_depth: usize,
    #[serde(default = "default_scan_nodes")]
    scan_max_nodes: usize,
}

impl Default for General {
    fn default() -> Self {
        General {
            start_dir: None,
            directories_only: true,
            sort: SortOrder::Modified,
            label_step: true,
            default_name: "index".into(),
            language: "en".into(),
            advanced: false,
            scan_max_depth: 8,
            scan_max_nodes: DEFAULT_SCAN_NODES,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    start_dir: Option<PathBuf>,
    list_options: ListOptions,
    label_step: bool,
    default_name: String,
    language: Language,
    advanced: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let language = Language::from_code(&g.language).unwrap_or_else(|| {
            tracing::warn!(language = %g.language, "unknown language in config, using English");
            Language::English
        });
        let default_name = g.default_name.trim();
        Self {
            start_dir: g
                .start_dir
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(expand_home_path),
            list_options: ListOptions {
                directories_only: g.directories_only,
                sort: g.sort,
                max_depth: g.scan_max_depth,
                max_nodes: clamp_scan_nodes(g.scan_max_nodes),
            },
            label_step: g.label_step,
            default_name: if default_name.is_empty() {
                "index".into()
            } else {
                default_name.into()
            },
            language,
            advanced: g.advanced,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn start_dir(&self) -> Option<&PathBuf> {
        self.start_dir.as_ref()
    }

    #[inline]
    pub fn list_options(&self) -> &ListOptions {
        &self.list_options
    }

    #[inline]
    pub fn label_step(&self) -> bool {
        self.label_step
    }

    #[inline]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    #[inline]
    pub fn advanced(&self) -> bool {
        self.advanced
    }
}

/// Helper function for default scan_max_nodes
fn default_scan_nodes() -> usize {
    DEFAULT_SCAN_NODES
}
