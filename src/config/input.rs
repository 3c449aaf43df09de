//! Input configuration options for fidx
//!
//! This module defines the key lists of every bindable action, read from the `[keys]`
//! table of the fidx.toml configuration file.

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    // global
    force_quit: Vec<String>,
    reset: Vec<String>,
    toggle_language: Vec<String>,

    // browsing
    quit: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_top: Vec<String>,
    go_bottom: Vec<String>,
    go_parent: Vec<String>,
    go_into_dir: Vec<String>,
    select: Vec<String>,
    select_current: Vec<String>,
    filter: Vec<String>,
    toggle_advanced: Vec<String>,

    // prompts
    confirm: Vec<String>,
    cancel: Vec<String>,
    back: Vec<String>,
    autocomplete: Vec<String>,
    toggle_extension: Vec<String>,

    // review
    cycle_format: Vec<String>,
    toggle_debug: Vec<String>,
    edit_directory: Vec<String>,
    edit_output: Vec<String>,
    edit_label: Vec<String>,

    // finished
    restart: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    force_quit,
    reset,
    toggle_language,
    quit,
    go_up,
    go_down,
    go_top,
    go_bottom,
    go_parent,
    go_into_dir,
    select,
    select_current,
    filter,
    toggle_advanced,
    confirm,
    cancel,
    back,
    autocomplete,
    toggle_extension,
    cycle_format,
    toggle_debug,
    edit_directory,
    edit_output,
    edit_label,
    restart,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            force_quit: vec!["Ctrl+c".into()],
            reset: vec!["Ctrl+r".into()],
            toggle_language: vec!["Ctrl+e".into()],

            quit: vec!["q".into()],
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_top: vec!["g".into(), "Home".into()],
            go_bottom: vec!["G".into(), "End".into()],
            go_parent: vec!["h".into(), "Left".into(), "Backspace".into()],
            go_into_dir: vec!["l".into(), "Right".into()],
            select: vec!["Enter".into()],
            select_current: vec!["Space".into()],
            filter: vec!["i".into(), "/".into()],
            toggle_advanced: vec!["Ctrl+d".into()],

            confirm: vec!["Enter".into()],
            cancel: vec!["Esc".into()],
            back: vec!["b".into(), "Backspace".into()],
            autocomplete: vec!["Tab".into()],
            toggle_extension: vec!["Tab".into()],

            cycle_format: vec!["f".into(), "4".into()],
            toggle_debug: vec!["d".into()],
            edit_directory: vec!["1".into()],
            edit_output: vec!["2".into()],
            edit_label: vec!["3".into()],

            restart: vec!["r".into()],
        }
    }
}
