//! Terminal UI for fidx.
//!
//! [render] draws one frame from the application state. [i18n] holds every string the
//! renderer shows, in English and Spanish. [widgets] has the small building blocks
//! shared by the steps.

pub mod i18n;
pub mod render;
pub mod widgets;

pub use i18n::{I18n, Language, TextKey};
pub use render::render;
