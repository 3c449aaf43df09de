//! Companion configuration for fidx.
//!
//! The companion is the external metadata extractor fidx launches once the wizard
//! is complete. This module holds where to find it and which interpreter runs it.

use serde::Deserialize;

use std::path::PathBuf;

/// Script name looked up next to the executable, in the working directory and in `..`.
pub const DEFAULT_SCRIPT: &str = "file_metadata_extractor.py";

#[cfg(windows)]
const DEFAULT_INTERPRETER: &str = "python";
#[cfg(not(windows))]
const DEFAULT_INTERPRETER: &str = "python3";

/// `[companion]` table as read from the toml file.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Companion {
    interpreter: String,
    script: String,
    script_path: Option<String>,
}

impl Default for Companion {
    fn default() -> Self {
        Companion {
            interpreter: DEFAULT_INTERPRETER.into(),
            script: DEFAULT_SCRIPT.into(),
            script_path: None,
        }
    }
}

/// Processed companion settings, cheap to clone into a worker task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    interpreter: String,
    script: String,
    script_path: Option<PathBuf>,
}

impl From<Companion> for CompanionConfig {
    fn from(raw: Companion) -> Self {
        let interpreter = raw.interpreter.trim();
        let script = raw.script.trim();
        Self {
            interpreter: if interpreter.is_empty() {
                DEFAULT_INTERPRETER.into()
            } else {
                interpreter.into()
            },
            script: if script.is_empty() {
                DEFAULT_SCRIPT.into()
            } else {
                script.into()
            },
            script_path: raw
                .script_path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(crate::utils::expand_home_path),
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        CompanionConfig::from(Companion::default())
    }
}

impl CompanionConfig {
    pub fn new(interpreter: &str, script_path: Option<PathBuf>) -> Self {
        let mut cfg = CompanionConfig::from(Companion {
            interpreter: interpreter.into(),
            ..Companion::default()
        });
        cfg.script_path = script_path;
        cfg
    }

    #[inline]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    #[inline]
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Explicit script location, tried before the default search.
    #[inline]
    pub fn script_path(&self) -> Option<&PathBuf> {
        self.script_path.as_ref()
    }

    pub fn interpreter_exists(&self) -> bool {
        which::which(self.interpreter()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let raw: Companion = toml::from_str(
            r#"
            interpreter = "  "
            script = ""
            script_path = " "
            "#,
        )?;
        let cfg = CompanionConfig::from(raw);
        assert_eq!(cfg.interpreter(), DEFAULT_INTERPRETER);
        assert_eq!(cfg.script(), DEFAULT_SCRIPT);
        assert!(cfg.script_path().is_none());
        Ok(())
    }

    #[test]
    fn explicit_values_are_kept() -> Result<(), Box<dyn std::error::Error>> {
        let raw: Companion = toml::from_str(
            r#"
            interpreter = "/usr/bin/python3.12"
            script_path = "/opt/fidx/extract.py"
            "#,
        )?;
        let cfg = CompanionConfig::from(raw);
        assert_eq!(cfg.interpreter(), "/usr/bin/python3.12");
        assert_eq!(
            cfg.script_path(),
            Some(&PathBuf::from("/opt/fidx/extract.py"))
        );
        Ok(())
    }
}
