//! Command-line argument parsing and help for fidx.
//!
//! This module handles all CLI flag parsing used for config initialization and help.
//!
//! When invoked with no args/flags (fidx), fidx simply launches the wizard

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Decides what to do from the arguments, program name excluded.
/// Informational flags print and return [CliAction::Exit].
pub fn parse_args(args: &[String]) -> CliAction {
    let Some(arg) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: fidx accepts only one argument at a time.");
        eprintln!("Usage: fidx [PATH] or fidx [OPTION]");
        return CliAction::Exit;
    }

    match arg.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" | "--keybind" | "--key" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("fidx {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"fidx - A terminal wizard for indexing file metadata

Pick a directory, name the output file and let the metadata extractor
(file_metadata_extractor.py) write an Excel or CSV index of its files.

USAGE:
  fidx [PATH]

PATH:
  Directory to start browsing in
  (defaults to Downloads, Documents or the home directory)

OPTIONS:
      --init              Generate a default configuration
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of fidx

ENVIRONMENT:
  FIDX_CONFIG             Override the default config path
  FIDX_LOG                Log filter, e.g. "debug" (log file in the cache directory)
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  Everywhere:
  force_quit                ["Ctrl+c"]
  reset                     ["Ctrl+r"]   (not while processing)
  toggle_language           ["Ctrl+e"]

  Step 1, browsing:
  go_up                     ["k", "Up"]
  go_down                   ["j", "Down"]
  go_top                    ["g", "Home"]
  go_bottom                 ["G", "End"]
  go_parent                 ["h", "Left", "Backspace"]
  go_into_dir               ["l", "Right"]
  select                    ["Enter"]    (select highlighted directory)
  select_current            ["Space"]    (select the directory being browsed)
  filter                    ["i", "/"]
  autocomplete              ["Tab"]      (while filtering)
  toggle_advanced           ["Ctrl+d"]
  quit                      ["q"]

  Steps 2 and 3, naming and label:
  confirm                   ["Enter"]
  cancel                    ["Esc"]      (go back)
  toggle_extension          ["Tab"]      (.xlsx <-> .csv)

  Step 4, review:
  confirm                   ["Enter"]    (start processing)
  back                      ["b", "Backspace"]
  edit_directory            ["1"]
  edit_output               ["2"]
  edit_label                ["3"]
  cycle_format              ["f", "4"]   (advanced mode)
  toggle_debug              ["d"]        (advanced mode)

  Finished:
  restart                   ["r"]
  back                      ["b"]        (retry from the review)

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   " ", "space", "back", "enter", "esc", "tab", "home", "end"

  Note:
    - Shorthand (c-, m-, s-) only works inside brackets <>.
    - Plain letters are ignored while typing a name, label or filter.
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}
