//! Configuration module for fidx.
//!
//! Re-exports the config structs from the submodules so callers can use `crate::config::Config`.

pub mod companion;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use companion::{Companion, CompanionConfig};
pub use general::{General, InternalGeneral};
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::Theme;
