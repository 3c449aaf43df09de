//! Input action handler methods for fidx.
//!
//! This module implements [AppState] methods that turn a key event into state changes:
//! the keymap lookup per step, the navigation and filter actions of the browsing step,
//! the text editing of the prompts and the step transitions of the wizard.

use crate::app::keymap::{Action, Context, FilterAction, NavAction, SystemAction, WizardAction};
use crate::app::state::{AppState, KeypressResult};
use crate::app::wizard::Step;
use crate::core::naming::toggle_extension;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use std::path::PathBuf;

impl<'a> AppState<'a> {
    /// Handles one key press. Global bindings are checked before the step's own table;
    /// unbound printable keys go to the active text field, if any.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        let context = self.context();

        if let Some(action) = self.keymap.lookup(context, key) {
            return self.dispatch(action);
        }

        if context.is_text_entry() && self.handle_text_key(context, key) {
            return KeypressResult::Consumed;
        }

        KeypressResult::Continue
    }

    fn dispatch(&mut self, action: Action) -> KeypressResult {
        match action {
            Action::System(act) => self.handle_system_action(act),
            Action::Nav(act) => consumed(self.handle_nav_action(act)),
            Action::Filter(act) => consumed(self.handle_filter_action(act)),
            Action::Wizard(act) => consumed(self.handle_wizard_action(act)),
        }
    }

    // System

    fn handle_system_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => {
                tracing::info!(step = ?self.state.step, "quit requested");
                KeypressResult::Quit
            }
            SystemAction::Reset => {
                if self.state.step == Step::Processing {
                    return KeypressResult::Continue;
                }
                self.reset();
                KeypressResult::Consumed
            }
            SystemAction::ToggleLanguage => {
                self.state.language = self.state.language.toggle();
                KeypressResult::Consumed
            }
        }
    }

    // Browsing

    fn handle_nav_action(&mut self, action: NavAction) -> bool {
        let nav = &mut self.state.nav;
        match action {
            NavAction::GoUp => nav.move_up(),
            NavAction::GoDown => nav.move_down(),
            NavAction::GoTop => nav.go_top(),
            NavAction::GoBottom => nav.go_bottom(),
            NavAction::GoParent => self.ascend(),
            NavAction::GoIntoDir => {
                let Some(target) = nav
                    .highlighted()
                    .filter(|e| e.is_dir())
                    .map(|e| e.path().to_path_buf())
                else {
                    return false;
                };
                self.change_dir(target);
                true
            }
        }
    }

    /// Moves to the parent directory. A no-op at the filesystem root.
    fn ascend(&mut self) -> bool {
        let current = self.state.nav.current_dir();
        let Some(parent) = current
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && *p != current)
            .map(|p| p.to_path_buf())
        else {
            return false;
        };
        self.change_dir(parent);
        true
    }

    fn handle_filter_action(&mut self, action: FilterAction) -> bool {
        match action {
            FilterAction::Start => {
                self.refresh_listing();
                self.state.filtering = true;
                true
            }
            FilterAction::Apply => {
                self.state.filtering = false;
                true
            }
            FilterAction::Cancel => {
                let had_filter = self.state.nav.is_filtered() || self.state.filtering;
                self.state.filtering = false;
                self.state.filter_input.clear();
                self.state.nav.clear_filter();
                had_filter
            }
            FilterAction::AutoComplete => {
                let Some(name) = self.state.nav.first_match().map(|e| e.name().to_string()) else {
                    return false;
                };
                self.state.filter_input.set(&name);
                self.state.nav.apply_filter(&name);
                true
            }
        }
    }

    // Wizard steps

    fn handle_wizard_action(&mut self, action: WizardAction) -> bool {
        let label_step = self.config.general().label_step();
        match action {
            WizardAction::SelectHighlighted => {
                let highlighted = self
                    .state
                    .nav
                    .highlighted()
                    .map(|e| (e.is_parent(), e.is_dir(), e.path().to_path_buf()));
                match highlighted {
                    Some((true, _, _)) => self.ascend(),
                    Some((false, true, path)) => self.select_directory(path),
                    _ => self.select_current(),
                }
            }
            WizardAction::SelectCurrent => self.select_current(),
            WizardAction::Confirm => self.confirm(label_step),
            WizardAction::Back => {
                let previous = match self.state.step {
                    Step::NamingOutput => Step::BrowsingDirectory,
                    Step::LabelEntry => Step::NamingOutput,
                    Step::ReviewingConfig => Step::before_review(label_step),
                    _ => return false,
                };
                self.state.step = previous;
                true
            }
            WizardAction::ToggleExtension => {
                let toggled =
                    toggle_extension(self.state.output_name.value(), self.state.export_format());
                if toggled == self.state.output_name.value() {
                    return false;
                }
                self.state.output_name.set(&toggled);
                true
            }
            WizardAction::ToggleAdvanced => {
                self.state.advanced = !self.state.advanced;
                true
            }
            WizardAction::CycleFormat => {
                if !self.state.advanced {
                    return false;
                }
                self.state.export_format = self.state.export_format.next();
                true
            }
            WizardAction::ToggleDebug => {
                if !self.state.advanced {
                    return false;
                }
                self.state.debug = !self.state.debug;
                true
            }
            WizardAction::Edit(step) => {
                if step == Step::LabelEntry && !label_step {
                    return false;
                }
                self.state.step = step;
                true
            }
            WizardAction::Retry => {
                self.state.outcome = None;
                self.state.step = Step::ReviewingConfig;
                true
            }
            WizardAction::Restart => {
                self.reset();
                true
            }
        }
    }

    fn select_current(&mut self) -> bool {
        let current = self.state.nav.current_dir().to_path_buf();
        self.select_directory(current)
    }

    fn select_directory(&mut self, path: PathBuf) -> bool {
        tracing::info!(directory = %path.display(), "directory selected");
        self.state.selected_dir = Some(path);
        if self.state.output_name.is_blank() {
            let default_name = self.config.general().default_name();
            self.state.output_name.set(default_name);
        }
        self.state.step = Step::NamingOutput;
        true
    }

    fn confirm(&mut self, label_step: bool) -> bool {
        match self.state.step {
            Step::NamingOutput => {
                if self.state.output_name.is_blank() {
                    return false;
                }
                let trimmed = self.state.output_name.value().trim().to_string();
                self.state.output_name.set(&trimmed);
                self.state.step = Step::after_naming(label_step);
                true
            }
            Step::LabelEntry => {
                let trimmed = self.state.label.value().trim().to_string();
                self.state.label.set(&trimmed);
                self.state.step = Step::ReviewingConfig;
                true
            }
            Step::ReviewingConfig => {
                self.start_processing();
                true
            }
            _ => false,
        }
    }

    // Text entry

    fn handle_text_key(&mut self, context: Context, key: KeyEvent) -> bool {
        let input = match context {
            Context::Filter => &mut self.state.filter_input,
            Context::Naming => &mut self.state.output_name,
            Context::Label => &mut self.state.label,
            _ => return false,
        };

        let changed = match key.code {
            KeyCode::Char(c)
                if (key.modifiers - KeyModifiers::SHIFT).is_empty() && !c.is_control() =>
            {
                input.insert(c);
                true
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => {
                input.left();
                true
            }
            KeyCode::Right => {
                input.right();
                true
            }
            KeyCode::Home => {
                input.home();
                true
            }
            KeyCode::End => {
                input.end();
                true
            }
            _ => false,
        };

        if changed && context == Context::Filter {
            self.state.nav.apply_filter(self.state.filter_input.value());
        }
        changed
    }
}

#[inline]
fn consumed(changed: bool) -> KeypressResult {
    if changed {
        KeypressResult::Consumed
    } else {
        KeypressResult::Continue
    }
}
