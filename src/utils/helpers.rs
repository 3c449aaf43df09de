//! Helpers for fidx.
//!
//! This module defines the bounds for the emptiness scan node budget and provides:
//! - Color parsing from strings or hex codes
//! - Home directory expansion and shortening ("~")
//! - Start directory resolution
//! - Width-aware truncation for the header path

use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// The minimum node budget of the emptiness scan.
pub const MIN_SCAN_NODES: usize = 16;
/// The default node budget. Can be overwritten in the fidx.toml.
pub const DEFAULT_SCAN_NODES: usize = 4096;
/// The maximum node budget.
pub const MAX_SCAN_NODES: usize = 1_000_000;

/// Parses a string (color name or hex) into a ratatui::style::color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Some(color) = s.strip_prefix('#') {
                let expanded = match color.len() {
                    6 => Some(color.to_string()),
                    3 => Some(color.chars().flat_map(|c| [c, c]).collect::<String>()),
                    _ => None,
                };
                if let Some(hex) = expanded
                    && let Ok(rgb) = u32::from_str_radix(&hex, 16)
                {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading "~" to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Util function to shorten home directory to ~.
/// Used by the header and the review screen.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Safely clamp the scan node budget.
pub fn clamp_scan_nodes(value: usize) -> usize {
    let clamped = value.clamp(MIN_SCAN_NODES, MAX_SCAN_NODES);
    if clamped != value {
        tracing::warn!(
            value,
            clamped,
            "scan_max_nodes out of range ({}..={})",
            MIN_SCAN_NODES,
            MAX_SCAN_NODES
        );
    }
    clamped
}

/// Turns a path into an absolute one, resolving symlinks when possible.
pub fn absolutize(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Resolves the path given on the command line.
pub fn resolve_initial_dir(arg: &str) -> PathBuf {
    absolutize(&expand_home_path(arg.trim()))
}

/// A directory fidx can start in: exists, is a directory and can be listed.
pub fn is_usable_directory(path: &Path) -> bool {
    path.is_dir() && fs::read_dir(path).is_ok()
}

/// Candidate start directories, most preferred first.
pub fn start_dir_candidates(home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = home {
        for sub in ["Downloads", "Download", "Documents"] {
            candidates.push(home.join(sub));
        }
        candidates.push(home.to_path_buf());
    }
    candidates.push(PathBuf::from("."));
    candidates
}

/// First candidate that is a usable directory, made absolute.
pub fn first_usable_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|p| is_usable_directory(p))
        .map(|p| absolutize(p))
}

/// Start directory when neither the command line nor the config name one.
pub fn default_start_dir() -> PathBuf {
    first_usable_dir(&start_dir_candidates(get_home().as_deref()))
        .unwrap_or_else(|| absolutize(Path::new(".")))
}

/// Cuts `s` down to `max` columns, keeping the tail and marking the cut with '…'.
/// Paths are more useful with their end visible.
pub fn truncate_start(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut kept = Vec::new();
    let mut width = 1;
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        kept.push(c);
    }
    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    out
}
