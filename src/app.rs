//! Application state and wizard logic for fidx.
//!
//! Holds the main [AppState] which owns the [NavigationState] of the wizard, the keymap
//! and the worker channels, as well as the small building blocks it is made of:
//! - [nav]: the directory listing, filter and cursor of the browsing step
//! - [input]: single line text fields used by the filter and the prompts
//! - [keymap]: per-step key bindings
//! - [wizard]: the steps and the outcome of a run
//!
//! Keypress handling lives in [handlers].

pub mod handlers;
pub mod input;
pub mod keymap;
pub mod nav;
pub mod state;
pub mod wizard;

pub use input::TextInput;
pub use keymap::{Action, Context, Keymap};
pub use nav::NavState;
pub use state::{AppState, KeypressResult, NavigationState};
pub use wizard::{Outcome, Step};
