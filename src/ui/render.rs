//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and one draw
//! function per wizard step.
//!
//! This module should stay "pure rendering": it reads state + config and produces
//! widgets, without owning fidx core logic. It must never panic, whatever the terminal
//! size or the state.

use crate::app::{AppState, Context, NavigationState, Outcome, Step};
use crate::config::Theme;
use crate::core::naming::ExportFormat;
use crate::core::Entry;
use crate::core::proc::{InvokeError, REQUIRED_FILES};
use crate::ui::i18n::{I18n, TextKey};
use crate::ui::widgets::{hint_line, input_line, labelled_line, step_block};
use crate::utils::{shorten_home_path, truncate_start};

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use std::path::Path;

/// Shared, read-only context of one frame.
struct View<'a> {
    app: &'a AppState<'a>,
    state: &'a NavigationState,
    theme: &'a Theme,
    i18n: I18n,
}

impl View<'_> {
    #[inline]
    fn tr(&self, key: TextKey) -> &'static str {
        self.i18n.tr(key)
    }
}

/// Render function which renders the entire terminal UI for fidx on each frame.
/// Handles the layout: header, step body, key legend and footer.
pub fn render(frame: &mut Frame, app: &AppState) {
    let state = app.state();
    let view = View {
        app,
        state,
        theme: app.config().theme(),
        i18n: I18n::new(state.language()),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], &view);

    match state.step() {
        Step::BrowsingDirectory => draw_browse(frame, chunks[1], &view),
        Step::NamingOutput => draw_naming(frame, chunks[1], &view),
        Step::LabelEntry => draw_label(frame, chunks[1], &view),
        Step::ReviewingConfig => draw_review(frame, chunks[1], &view),
        Step::Processing => draw_processing(frame, chunks[1], &view),
        Step::Finished => draw_finished(frame, chunks[1], &view),
    }

    draw_legend(frame, chunks[2], &view);
    draw_footer(frame, chunks[3], &view);
}

fn step_title(step: Step) -> TextKey {
    match step {
        Step::BrowsingDirectory => TextKey::Step1Title,
        Step::NamingOutput => TextKey::Step2Title,
        Step::LabelEntry => TextKey::Step3Title,
        Step::ReviewingConfig => TextKey::Step4Title,
        Step::Processing => TextKey::ProcessingTitle,
        Step::Finished => TextKey::FinishedTitle,
    }
}

fn format_name(format: ExportFormat) -> TextKey {
    match format {
        ExportFormat::Excel => TextKey::FormatExcel,
        ExportFormat::Csv => TextKey::FormatCsv,
        ExportFormat::Both => TextKey::FormatBoth,
    }
}

/// Path shortened to "~" and cut from the left to fit `width`.
fn display_path(path: &Path, width: usize) -> String {
    truncate_start(&shorten_home_path(path), width)
}

fn draw_header(frame: &mut Frame, area: Rect, view: &View) {
    let step = view.state.step();
    let title = Line::from(vec![
        Span::styled(view.tr(TextKey::AppTitle), view.theme.title_style()),
        Span::raw("  "),
        Span::styled(
            format!("[{}/6] {}", step.number(), view.tr(step_title(step))),
            view.theme.accent_style(),
        ),
    ]);

    let dir = if step == Step::BrowsingDirectory {
        view.state.nav().current_dir()
    } else {
        view.state.target_dir()
    };
    let label = view.tr(TextKey::Current);
    let room = (area.width as usize).saturating_sub(label.width() + 1);
    let current = Line::from(vec![
        Span::styled(format!("{label} "), view.theme.accent_style()),
        Span::styled(display_path(dir, room), view.theme.path_style()),
    ]);

    frame.render_widget(Paragraph::new(vec![title, current]), area);
}

fn draw_browse(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::Step1Title), view.theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let nav = view.state.nav();
    let show_filter = view.state.is_filtering() || nav.is_filtered();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_filter { 1 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(inner);

    if show_filter {
        let prompt = format!("{} ", view.tr(TextKey::FilterPrompt));
        let line = if view.state.is_filtering() {
            input_line(
                &prompt,
                view.state.filter_input(),
                chunks[0].width as usize,
                view.theme,
            )
        } else {
            Line::from(vec![
                Span::styled(prompt, view.theme.accent_style()),
                Span::styled(nav.filter().to_string(), view.theme.path_style()),
            ])
        };
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }

    let list_area = chunks[1];
    if nav.shown_len() == 0 {
        let key = if nav.is_filtered() {
            TextKey::NoMatches
        } else {
            TextKey::EmptyListing
        };
        frame.render_widget(Paragraph::new(hint_line(view.tr(key), view.theme)), list_area);
        return;
    }

    // Only the parent entry left: still show it, with the empty hint under it.
    if !nav.is_filtered() && nav.shown_entries().all(Entry::is_parent) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(list_area);
        draw_entries(frame, parts[0], view);
        frame.render_widget(
            Paragraph::new(hint_line(view.tr(TextKey::EmptyListing), view.theme)),
            parts[1],
        );
        return;
    }

    draw_entries(frame, list_area, view);
}

fn draw_entries(frame: &mut Frame, area: Rect, view: &View) {
    let nav = view.state.nav();
    let items: Vec<ListItem> = nav
        .shown_entries()
        .map(|entry| ListItem::new(entry_row(entry, view)))
        .collect();

    let mut state = ListState::default();
    if nav.shown_len() > 0 {
        state.select(Some(nav.selected_idx()));
    }

    frame.render_stateful_widget(
        List::new(items)
            .highlight_style(view.theme.selection_style())
            .highlight_symbol("▶ ")
            .scroll_padding(2),
        area,
        &mut state,
    );
}

fn entry_row(entry: &Entry, view: &View) -> Line<'static> {
    if entry.is_parent() {
        return Line::from(vec![
            Span::styled("⬆ ..", view.theme.directory_style()),
            Span::raw("  "),
            Span::styled(view.tr(TextKey::GoToParent), view.theme.help_style()),
        ]);
    }

    let (icon, style) = if entry.is_dir() {
        ("📁", view.theme.directory_style())
    } else {
        ("📄", view.theme.help_style())
    };
    let modified: DateTime<Local> = entry.modified().into();
    Line::from(vec![
        Span::styled(format!("{icon} {}", entry.name()), style),
        Span::raw("  "),
        Span::styled(
            modified.format("%Y-%m-%d %H:%M").to_string(),
            view.theme.help_style(),
        ),
    ])
}

fn draw_naming(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::Step2Title), view.theme);
    let width = block.inner(area).width as usize;
    let state = view.state;

    let lines = vec![
        labelled_line(
            view.tr(TextKey::SelectedDirectory),
            display_path(state.target_dir(), width),
            view.theme.path_style(),
            view.theme,
        ),
        Line::default(),
        Line::from(Span::styled(
            view.tr(TextKey::OutputPrompt),
            view.theme.accent_style(),
        )),
        input_line("> ", state.output_name(), width, view.theme),
        Line::default(),
        labelled_line(
            view.tr(TextKey::WillSaveAs),
            display_path(&state.output_path(), width),
            view.theme.success_style(),
            view.theme,
        ),
        Line::default(),
        hint_line(view.tr(TextKey::FileSavedIn), view.theme),
        hint_line(view.tr(TextKey::ToggleExtension), view.theme),
        hint_line(view.tr(TextKey::ContinueBack), view.theme),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_label(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::Step3Title), view.theme);
    let width = block.inner(area).width as usize;

    let lines = vec![
        Line::from(Span::styled(
            view.tr(TextKey::LabelPrompt),
            view.theme.accent_style(),
        )),
        input_line("> ", view.state.label(), width, view.theme),
        Line::default(),
        hint_line(view.tr(TextKey::LabelOptional), view.theme),
        hint_line(view.tr(TextKey::ContinueBack), view.theme),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_review(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::Step4Title), view.theme);
    let width = block.inner(area).width as usize;
    let state = view.state;
    let theme = view.theme;
    let label_step = view.app.config().general().label_step();

    let label_value = if state.label().is_blank() {
        view.tr(TextKey::NoneValue).to_string()
    } else {
        state.label().value().trim().to_string()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            view.tr(TextKey::ReviewSettings),
            theme.title_style(),
        )),
        labelled_line(
            view.tr(TextKey::Directory),
            display_path(state.target_dir(), width),
            theme.path_style(),
            theme,
        ),
        labelled_line(
            view.tr(TextKey::Output),
            display_path(&state.output_path(), width),
            theme.path_style(),
            theme,
        ),
    ];
    if label_step {
        lines.push(labelled_line(
            view.tr(TextKey::Label),
            label_value,
            theme.path_style(),
            theme,
        ));
    }

    if state.is_advanced() {
        let debug = if state.debug() {
            TextKey::Enabled
        } else {
            TextKey::Disabled
        };
        lines.push(labelled_line(
            view.tr(TextKey::Format),
            view.tr(format_name(state.export_format())),
            theme.path_style(),
            theme,
        ));
        lines.push(labelled_line(
            view.tr(TextKey::Debug),
            view.tr(debug),
            theme.path_style(),
            theme,
        ));
    }

    lines.push(Line::default());
    lines.push(hint_line(view.tr(TextKey::EditDirectory), theme));
    lines.push(hint_line(view.tr(TextKey::EditOutput), theme));
    if label_step {
        lines.push(hint_line(view.tr(TextKey::EditLabel), theme));
    }

    if state.is_advanced() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            view.tr(TextKey::AdvancedTitle),
            theme.accent_style(),
        )));
        lines.push(hint_line(view.tr(TextKey::CycleFormat), theme));
        lines.push(hint_line(view.tr(TextKey::ToggleDebug), theme));
        lines.push(hint_line(view.tr(TextKey::ExitAdvanced), theme));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        view.tr(TextKey::EnterToStart),
        theme.success_style(),
    )));
    lines.push(hint_line(view.tr(TextKey::BackHint), theme));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_processing(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::ProcessingTitle), view.theme);
    let width = block.inner(area).width as usize;
    let state = view.state;

    let mut lines = vec![
        Line::from(Span::styled(
            view.tr(TextKey::Processing),
            view.theme.accent_style(),
        )),
        Line::default(),
    ];
    lines.extend(
        view.tr(TextKey::ProcessingDetails)
            .lines()
            .map(|l| hint_line(l, view.theme)),
    );
    lines.push(Line::default());
    lines.push(labelled_line(
        view.tr(TextKey::Directory),
        display_path(state.target_dir(), width),
        view.theme.path_style(),
        view.theme,
    ));
    lines.push(labelled_line(
        view.tr(TextKey::Output),
        display_path(&state.output_path(), width),
        view.theme.path_style(),
        view.theme,
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_finished(frame: &mut Frame, area: Rect, view: &View) {
    let block = step_block(view.tr(TextKey::FinishedTitle), view.theme);
    let width = block.inner(area).width as usize;
    let theme = view.theme;

    let mut lines = Vec::new();
    match view.state.outcome() {
        Some(Outcome::Success(summary)) => {
            let count = match summary.files_processed() {
                Some(n) => n.to_string(),
                None => view.tr(TextKey::Multiple).to_string(),
            };
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::ProcessingSuccess),
                theme.success_style(),
            )));
            lines.push(Line::default());
            lines.push(labelled_line(
                view.tr(TextKey::FilesProcessed),
                count,
                theme.path_style(),
                theme,
            ));
            lines.push(labelled_line(
                view.tr(TextKey::SavedTo),
                display_path(summary.saved_to(), width),
                theme.path_style(),
                theme,
            ));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::ReadyToUse),
                theme.success_style(),
            )));
            if view.state.debug() && !summary.output().trim().is_empty() {
                lines.push(Line::default());
                lines.push(hint_line(view.tr(TextKey::CompanionOutput), theme));
                lines.extend(summary.output().lines().map(|l| Line::from(l.to_string())));
            }
        }
        Some(Outcome::Failure(err)) => {
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::ProcessingFailed),
                theme.error_style(),
            )));
            lines.push(Line::default());
            lines.extend(failure_lines(err, view));
        }
        None => {}
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Explanation and remediation for a failed run.
fn failure_lines(err: &InvokeError, view: &View) -> Vec<Line<'static>> {
    let theme = view.theme;
    let mut lines = Vec::new();
    match err {
        InvokeError::CompanionNotFound { searched, .. } => {
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::NotFoundTitle),
                theme.error_style(),
            )));
            lines.push(hint_line(view.tr(TextKey::RequiredFiles), theme));
            for file in REQUIRED_FILES {
                lines.push(Line::from(format!("  • {file}")));
            }
            lines.push(hint_line(view.tr(TextKey::SearchedIn), theme));
            for dir in searched {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", shorten_home_path(dir)),
                    theme.path_style(),
                )));
            }
        }
        InvokeError::InterpreterMissing { interpreter } => {
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::InterpreterMissing),
                theme.error_style(),
            )));
            lines.push(hint_line(view.tr(TextKey::InstallPython), theme));
            lines.push(Line::from(format!("  • {interpreter}")));
        }
        InvokeError::Launch { message, .. } => {
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::LaunchFailed),
                theme.error_style(),
            )));
            lines.push(Line::from(message.clone()));
        }
        InvokeError::NonZeroExit { .. } => {
            lines.push(Line::from(Span::styled(
                view.tr(TextKey::ExitFailed),
                theme.error_style(),
            )));
            lines.push(Line::default());
            lines.push(hint_line(view.tr(TextKey::CompanionOutput), theme));
            lines.extend(err.to_string().lines().map(|l| Line::from(l.to_string())));
        }
    }
    lines
}

fn draw_legend(frame: &mut Frame, area: Rect, view: &View) {
    let keys: Vec<TextKey> = match view.app.context() {
        Context::Browse => {
            let mut keys = vec![
                TextKey::HintMove,
                TextKey::HintInto,
                TextKey::HintUp,
                TextKey::HintSelect,
                TextKey::HintSelectCurrent,
                TextKey::HintFilter,
            ];
            if view.state.nav().is_filtered() {
                keys.push(TextKey::HintClearFilter);
            }
            keys.extend([TextKey::HintAdvanced, TextKey::HintQuit]);
            keys
        }
        Context::Filter => vec![TextKey::HintFilterKeys],
        Context::Naming => vec![TextKey::HintEditKeys, TextKey::HintAdvanced],
        Context::Label => vec![TextKey::HintEditKeys],
        Context::Review => vec![TextKey::HintAdvanced, TextKey::HintQuit],
        Context::Processing => vec![TextKey::HintQuit],
        Context::Finished => vec![TextKey::FinishedKeys],
        Context::Global => Vec::new(),
    };

    let text = keys
        .into_iter()
        .map(|k| view.tr(k))
        .collect::<Vec<_>>()
        .join("  •  ");
    frame.render_widget(
        Paragraph::new(hint_line(&text, view.theme)).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &View) {
    let text = format!(
        "{}  •  {}  •  {} ({})",
        view.tr(TextKey::FooterQuit),
        view.tr(TextKey::FooterReset),
        view.tr(TextKey::FooterLanguage),
        view.state.language().display_name(),
    );
    frame.render_widget(Paragraph::new(hint_line(&text, view.theme)), area);

    if view.state.is_advanced() {
        let badge = Line::from(Span::styled(
            format!(" {} ", view.tr(TextKey::AdvancedBadge)),
            view.theme.error_style().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(badge).alignment(Alignment::Right), area);
    }
}
