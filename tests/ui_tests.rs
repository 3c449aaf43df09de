//! UI-related tests for fidx
//!
//! These tests render every wizard step into a ratatui TestBackend, at a normal and at a
//! tiny terminal size, and check the text that ends up on screen.
//!
//! These tests create temporary directories and files to simulate different UI scenarios.
//! These temporary resources are automatically cleaned up after the tests complete.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fidx_tui::app::{AppState, Step};
use fidx_tui::config::Config;
use fidx_tui::ui::render;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::error;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn error::Error>>;

fn press(app: &mut AppState, code: KeyCode) {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut AppState, c: char) {
    app.handle_keypress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

/// Draws one frame and returns the screen as text, one line per row.
fn screen(app: &AppState, width: u16, height: u16) -> Result<String, Box<dyn error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| render(f, app))?;

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    Ok(text)
}

fn sample_tree() -> Result<tempfile::TempDir, Box<dyn error::Error>> {
    let dir = tempdir()?;
    for name in ["reports", "photos"] {
        fs::create_dir(dir.path().join(name))?;
        fs::write(dir.path().join(name).join("a.txt"), b"x")?;
    }
    Ok(dir)
}

fn config_with_script(script: &Path, interpreter: &str) -> Result<Config, Box<dyn error::Error>> {
    let toml = format!(
        "[companion]\ninterpreter = '{}'\nscript_path = '{}'\n",
        interpreter,
        script.display()
    );
    Ok(Config::from_toml(&toml)?)
}

fn wait_until_finished(app: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while app.state().step() != Step::Finished && Instant::now() < deadline {
        app.tick();
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_browse_step_shows_entries() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::default();
    let app = AppState::new(&config, dir.path());

    let text = screen(&app, 100, 24)?;
    assert!(text.contains("Step 1"), "missing step title:\n{text}");
    assert!(text.contains("reports"));
    assert!(text.contains("photos"));
    assert!(text.contains("Go up to parent directory"));
    Ok(())
}

#[test]
fn test_empty_directory_placeholder() -> TestResult {
    let dir = tempdir()?;
    let empty = dir.path().join("empty");
    fs::create_dir(&empty)?;
    let config = Config::default();
    let app = AppState::new(&config, &empty);

    let text = screen(&app, 100, 24)?;
    assert!(text.contains("no subdirectories with files"), "{text}");
    Ok(())
}

#[test]
fn test_filter_without_matches() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path());

    press(&mut app, KeyCode::Char('/'));
    for c in "zzz".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    let text = screen(&app, 100, 24)?;
    assert!(text.contains("Filter:"));
    assert!(text.contains("zzz"));
    assert!(text.contains("(no matches)"));
    Ok(())
}

#[test]
fn test_every_step_renders_in_both_languages() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path());

    let mut seen = Vec::new();
    for _ in 0..2 {
        seen.push(screen(&app, 100, 30)?);
        press(&mut app, KeyCode::Char(' '));
        seen.push(screen(&app, 100, 30)?);
        press(&mut app, KeyCode::Enter);
        seen.push(screen(&app, 100, 30)?);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().step(), Step::ReviewingConfig);
        seen.push(screen(&app, 100, 30)?);

        ctrl(&mut app, 'r');
        ctrl(&mut app, 'e');
    }

    assert!(seen[1].contains("Output file name"));
    assert!(seen[1].contains("index.xlsx"));
    assert!(seen[2].contains("Litigant"));
    assert!(seen[3].contains("Review settings"));
    assert!(seen[5].contains("Nombre del archivo de salida"));
    assert!(seen[7].contains("Revisar configuración"));
    Ok(())
}

#[test]
fn test_legend_only_lists_bound_keys() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path());

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.state().step(), Step::NamingOutput);
    assert!(screen(&app, 100, 24)?.contains("Ctrl+D advanced mode"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step(), Step::LabelEntry);
    let text = screen(&app, 100, 24)?;
    assert!(text.contains("move cursor"), "{text}");
    assert!(!text.contains("Ctrl+D"), "{text}");

    // Ctrl+D has no binding while typing the label
    ctrl(&mut app, 'd');
    assert!(!app.state().is_advanced());
    assert_eq!(app.state().step(), Step::LabelEntry);
    Ok(())
}

#[test]
fn test_review_shows_advanced_options() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::from_toml("[general]\nadvanced = true")?;
    let mut app = AppState::new(&config, dir.path());
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('f'));

    let text = screen(&app, 100, 30)?;
    assert!(text.contains("ADVANCED"));
    assert!(text.contains("CSV (.csv)"));
    assert!(text.contains("index.csv"));
    Ok(())
}

#[test]
fn test_finished_step_explains_missing_interpreter() -> TestResult {
    let dir = sample_tree()?;
    let script = dir.path().join("file_metadata_extractor.py");
    fs::write(&script, b"print('hi')")?;
    let config = config_with_script(&script, "fidx-no-such-interpreter")?;
    let mut app = AppState::new(&config, dir.path());

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step(), Step::Processing);
    assert!(screen(&app, 100, 24)?.contains("Processing files"));

    wait_until_finished(&mut app);
    assert_eq!(app.state().step(), Step::Finished);
    let text = screen(&app, 100, 24)?;
    assert!(text.contains("Processing failed"), "{text}");
    assert!(text.contains("Python is not installed"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_debug_run_shows_companion_output() -> TestResult {
    let dir = sample_tree()?;
    let script = dir.path().join("extractor.sh");
    fs::write(&script, "echo 'Processed 2 files'\necho 'trace: walked reports'\n")?;
    let toml = format!(
        "[general]\nadvanced = true\n\n[companion]\ninterpreter = 'sh'\nscript_path = '{}'\n",
        script.display()
    );
    let config = Config::from_toml(&toml)?;
    let mut app = AppState::new(&config, dir.path());

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('d'));
    assert!(app.state().debug());
    press(&mut app, KeyCode::Enter);
    wait_until_finished(&mut app);

    let text = screen(&app, 100, 30)?;
    assert!(text.contains("completed successfully"), "{text}");
    assert!(text.contains("trace: walked reports"), "{text}");
    Ok(())
}

#[test]
fn test_finished_step_lists_searched_locations() -> TestResult {
    let dir = sample_tree()?;
    let missing = dir.path().join("nowhere").join("extractor.py");
    let config = config_with_script(&missing, "fidx-no-such-interpreter")?;
    let mut app = AppState::new(&config, dir.path());

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    wait_until_finished(&mut app);

    let text = screen(&app, 120, 30)?;
    assert!(text.contains("Could not find the metadata extractor"), "{text}");
    assert!(text.contains("requirements.txt"));
    assert!(text.contains("extractor.py"));
    Ok(())
}

#[test]
fn test_tiny_terminal_does_not_panic() -> TestResult {
    let dir = sample_tree()?;
    let config = Config::from_toml("[general]\nadvanced = true")?;
    let mut app = AppState::new(&config, dir.path());

    let sizes = [(1, 1), (5, 3), (20, 6), (40, 10)];
    for (w, h) in sizes {
        screen(&app, w, h)?;
    }
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Char('r'));
    for (w, h) in sizes {
        screen(&app, w, h)?;
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char(' '));
    for (w, h) in sizes {
        screen(&app, w, h)?;
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    for (w, h) in sizes {
        screen(&app, w, h)?;
    }
    Ok(())
}
