//! main.rs
//! Entry point for fidx

use fidx_tui::app::AppState;
use fidx_tui::config::Config;
use fidx_tui::core::terminal;
use fidx_tui::utils::cli::{CliAction, handle_args};
use fidx_tui::utils::{
    absolutize, default_start_dir, is_usable_directory, logging, resolve_initial_dir,
};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[fidx] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    if let CliAction::Exit = action {
        return Ok(());
    }

    // Dropping the guard flushes the log file
    let _log_guard = logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fidx starting");

    let config = Config::load();

    let start_dir = match action {
        CliAction::RunAppAtPath(path_arg) => {
            let target = resolve_initial_dir(&path_arg);

            if !is_usable_directory(&target) {
                eprintln!("\n[fidx] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            target
        }
        _ => match config.general().start_dir() {
            Some(dir) if is_usable_directory(dir) => absolutize(dir),
            Some(dir) => {
                tracing::warn!(path = %dir.display(), "configured start_dir is not usable");
                default_start_dir()
            }
            None => default_start_dir(),
        },
    };

    if !config.companion().interpreter_exists() {
        tracing::warn!(
            interpreter = config.companion().interpreter(),
            "interpreter not found in PATH, processing will fail"
        );
    }

    let mut app = AppState::new(&config, &start_dir);
    let result = terminal::run_terminal(&mut app);
    tracing::info!("fidx exiting");
    result
}
