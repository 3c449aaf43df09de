//! Core runtime logic for fidx.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and the bounded "contains a file" scan (see [list_dir], [Entry]).
//! - [naming]: output file names, extensions and export formats.
//! - [proc]: locating and running the companion metadata extractor.
//! - [worker]: the background thread the companion runs on.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//!
//! Most callers will import [list_dir], [Entry] and [ListOptions] from this module.

pub mod fm;
pub mod naming;
pub mod proc;
pub mod terminal;
pub mod worker;

pub use fm::{Entry, ListOptions, PARENT_NAME, SortOrder, has_regular_file, list_dir};
pub use naming::{ExportFormat, output_path, toggle_extension};
pub use proc::{InvokeError, InvokeRequest, Summary};
