//! Application State and main controller module for fidx.
//!
//! This module defines the [NavigationState] value, which holds everything the wizard
//! has collected so far, and the [AppState] struct which owns it together with:
//! - The configuration (loaded from fidx.toml)
//! - The per-step keymap
//! - The worker thread channels
//!
//! A reset replaces the [NavigationState] with a fresh one. The only asynchronous input
//! is the companion completion, drained from the worker channel by [AppState::tick].

use crate::app::input::TextInput;
use crate::app::keymap::{Context, Keymap};
use crate::app::nav::NavState;
use crate::app::wizard::{Outcome, Step};
use crate::config::Config;
use crate::core::naming::{self, ExportFormat};
use crate::core::proc::{InvokeError, InvokeRequest};
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};
use crate::core::{Entry, ListOptions, list_dir};
use crate::ui::i18n::Language;

use std::path::{Path, PathBuf};

/// Enumeration for each individual keypress result processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// The key did nothing.
    Continue,
    /// The key changed the state.
    Consumed,
    Quit,
}

/// Everything the wizard knows at one point in time.
#[derive(Debug, Clone)]
pub struct NavigationState {
    pub(super) step: Step,
    pub(super) nav: NavState,
    pub(super) filtering: bool,
    pub(super) filter_input: TextInput,
    pub(super) selected_dir: Option<PathBuf>,
    pub(super) output_name: TextInput,
    pub(super) label: TextInput,
    pub(super) export_format: ExportFormat,
    pub(super) debug: bool,
    pub(super) advanced: bool,
    pub(super) language: Language,
    pub(super) outcome: Option<Outcome>,
    pub(super) pending_request: Option<u64>,
}

impl NavigationState {
    pub fn new(
        start_dir: PathBuf,
        entries: Vec<Entry>,
        advanced: bool,
        language: Language,
    ) -> Self {
        NavigationState {
            step: Step::BrowsingDirectory,
            nav: NavState::new(start_dir, entries),
            filtering: false,
            filter_input: TextInput::default(),
            selected_dir: None,
            output_name: TextInput::default(),
            label: TextInput::default(),
            export_format: ExportFormat::default(),
            debug: false,
            advanced,
            language,
            outcome: None,
            pending_request: None,
        }
    }

    // Getters / accessors

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    #[inline]
    pub fn filter_input(&self) -> &TextInput {
        &self.filter_input
    }

    #[inline]
    pub fn selected_dir(&self) -> Option<&Path> {
        self.selected_dir.as_deref()
    }

    #[inline]
    pub fn output_name(&self) -> &TextInput {
        &self.output_name
    }

    #[inline]
    pub fn label(&self) -> &TextInput {
        &self.label
    }

    #[inline]
    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Format the companion will be asked for.
    /// Outside advanced mode this is always Excel, whatever was picked before.
    pub fn export_format(&self) -> ExportFormat {
        if self.advanced {
            self.export_format
        } else {
            ExportFormat::Excel
        }
    }

    /// Debug flag the companion will get. Only honoured in advanced mode.
    pub fn debug(&self) -> bool {
        self.advanced && self.debug
    }

    /// Directory the run targets: the selection, or the browsed directory before one is made.
    pub fn target_dir(&self) -> &Path {
        self.selected_dir
            .as_deref()
            .unwrap_or_else(|| self.nav.current_dir())
    }

    /// Where the output will be written with the current name and format.
    pub fn output_path(&self) -> PathBuf {
        naming::output_path(
            self.target_dir(),
            self.output_name.value().trim(),
            self.export_format(),
        )
    }

    /// The request a run started now would send.
    pub fn invoke_request(&self) -> InvokeRequest {
        InvokeRequest {
            directory: self.target_dir().to_path_buf(),
            output_name: self.output_name.value().trim().to_string(),
            format: self.export_format(),
            debug: self.debug(),
            label: self.label.value().trim().to_string(),
        }
    }
}

/// Main struct which holds the central application state of fidx.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) workers: Workers,
    pub(super) start_dir: PathBuf,
    pub(super) state: NavigationState,
    pub(super) last_request_id: u64,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config, start_dir: &Path) -> Self {
        let state = Self::fresh_state(config, start_dir, config.general().language());
        tracing::info!(start_dir = %start_dir.display(), "starting wizard");
        Self {
            config,
            keymap: Keymap::from_config(config),
            workers: Workers::spawn(),
            start_dir: start_dir.to_path_buf(),
            state,
            last_request_id: 0,
        }
    }

    fn fresh_state(config: &Config, start_dir: &Path, language: Language) -> NavigationState {
        let general = config.general();
        let entries = list_dir(start_dir, general.list_options());
        NavigationState::new(
            start_dir.to_path_buf(),
            entries,
            general.advanced(),
            language,
        )
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    #[inline]
    pub(super) fn list_options(&self) -> &ListOptions {
        self.config.general().list_options()
    }

    /// Keymap table that applies to the current step.
    pub fn context(&self) -> Context {
        match self.state.step {
            Step::BrowsingDirectory if self.state.filtering => Context::Filter,
            Step::BrowsingDirectory => Context::Browse,
            Step::NamingOutput => Context::Naming,
            Step::LabelEntry => Context::Label,
            Step::ReviewingConfig => Context::Review,
            Step::Processing => Context::Processing,
            Step::Finished => Context::Finished,
        }
    }

    /// Lists `path` and makes it the browsed directory. Leaves the filter sub-mode.
    pub(super) fn change_dir(&mut self, path: PathBuf) {
        let entries = list_dir(&path, self.list_options());
        tracing::debug!(path = %path.display(), entries = entries.len(), "changed directory");
        self.state.nav.set_listing(path, entries);
        self.state.filtering = false;
        self.state.filter_input.clear();
    }

    /// Re-reads the browsed directory.
    pub(super) fn refresh_listing(&mut self) {
        let path = self.state.nav.current_dir().to_path_buf();
        self.change_dir(path);
    }

    /// Back to a fresh wizard in the start directory. The language survives.
    pub(super) fn reset(&mut self) {
        tracing::info!("wizard reset");
        self.state = Self::fresh_state(self.config, &self.start_dir, self.state.language);
    }

    /// Sends the collected request to the process worker and enters Processing.
    pub(super) fn start_processing(&mut self) {
        let request = self.state.invoke_request();
        self.last_request_id += 1;
        let request_id = self.last_request_id;

        tracing::info!(
            request_id,
            directory = %request.directory.display(),
            output = %request.output_path().display(),
            format = ?request.format,
            debug = request.debug,
            "starting companion run"
        );

        self.state.outcome = None;
        self.state.pending_request = Some(request_id);
        self.state.step = Step::Processing;

        let task = WorkerTask::RunCompanion {
            request,
            companion: self.config.companion().clone(),
            request_id,
        };
        if self.workers.process_tx().send(task).is_err() {
            tracing::error!(request_id, "process worker is gone");
            self.finish(Outcome::Failure(InvokeError::Launch {
                interpreter: self.config.companion().interpreter().to_string(),
                message: "process worker is not running".into(),
            }));
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.pending_request = None;
        self.state.outcome = Some(outcome);
        self.state.step = Step::Finished;
    }

    /// Drains worker responses. Returns true if the state changed.
    pub fn tick(&mut self) -> bool {
        let responses: Vec<WorkerResponse> = self.workers.response_rx().try_iter().collect();
        let mut changed = false;
        for response in responses {
            changed |= self.apply_response(response);
        }
        changed
    }

    /// Applies one worker response. Returns true if the state changed.
    ///
    /// A completion is accepted only while Processing and only for the request in
    /// flight; anything else is logged and dropped.
    pub(crate) fn apply_response(&mut self, response: WorkerResponse) -> bool {
        match response {
            WorkerResponse::ProcessComplete { result, request_id } => {
                if self.state.step != Step::Processing
                    || self.state.pending_request != Some(request_id)
                {
                    tracing::warn!(
                        request_id,
                        step = ?self.state.step,
                        "dropping companion result that is no longer awaited"
                    );
                    return false;
                }

                match &result {
                    Ok(_) => tracing::info!(request_id, "companion run succeeded"),
                    Err(e) => tracing::warn!(request_id, error = %e, "companion run failed"),
                }
                self.finish(Outcome::from(result));
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn completion(request_id: u64) -> WorkerResponse {
        WorkerResponse::ProcessComplete {
            result: Err(InvokeError::InterpreterMissing {
                interpreter: "python3".into(),
            }),
            request_id,
        }
    }

    fn processing(app: &mut AppState, request_id: u64) {
        app.state.step = Step::Processing;
        app.state.pending_request = Some(request_id);
    }

    #[test]
    fn completion_for_another_request_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::new(&config, dir.path());
        processing(&mut app, 2);

        assert!(!app.apply_response(completion(1)));
        assert!(!app.apply_response(completion(3)));
        assert_eq!(app.state().step(), Step::Processing);
        assert!(app.state().outcome().is_none());
        Ok(())
    }

    #[test]
    fn completion_outside_processing_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::new(&config, dir.path());

        app.state.pending_request = Some(1);
        assert!(!app.apply_response(completion(1)));
        assert_eq!(app.state().step(), Step::BrowsingDirectory);
        assert!(app.state().outcome().is_none());

        processing(&mut app, 1);
        assert!(app.apply_response(completion(1)));
        assert_eq!(app.state().step(), Step::Finished);

        // A duplicate of the accepted completion leaves the finished step alone
        let shown = app.state().outcome().cloned();
        assert!(!app.apply_response(completion(1)));
        assert_eq!(app.state().step(), Step::Finished);
        assert_eq!(app.state().outcome().cloned(), shown);
        Ok(())
    }

    #[test]
    fn awaited_completion_finishes_the_run() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::new(&config, dir.path());
        processing(&mut app, 7);

        assert!(app.apply_response(completion(7)));
        assert_eq!(app.state().step(), Step::Finished);
        assert_eq!(app.state.pending_request, None);
        assert!(matches!(
            app.state().outcome(),
            Some(Outcome::Failure(InvokeError::InterpreterMissing { .. }))
        ));
        Ok(())
    }
}
