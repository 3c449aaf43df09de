//! Miscellaneous utility functions for fidx.
//!
//! This module holds the [helpers] submodule, which provides commonly used utilities such as:
//! - Color parsing
//! - Shortening the home directory path to "~"
//! - Start directory resolution
//!
//! as well as the command-line handling in [cli] and the log file setup in [logging].

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    DEFAULT_SCAN_NODES, MAX_SCAN_NODES, MIN_SCAN_NODES, absolutize, clamp_scan_nodes,
    default_start_dir, expand_home_path, first_usable_dir, get_home, is_usable_directory,
    parse_color, resolve_initial_dir, shorten_home_path, start_dir_candidates, truncate_start,
};
