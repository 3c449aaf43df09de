//! Key mapping and action dispatch system for fidx
//!
//! Every wizard step has its own table from [Key] to [Action], built from the `[keys]`
//! config. The global table is consulted first, whatever the step.

use crate::app::wizard::Step;
use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, filter, wizard or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    Filter(FilterAction),
    Wizard(WizardAction),
    System(SystemAction),
}

/// Cursor and directory movement on the browsing step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    GoTop,
    GoBottom,
    GoParent,
    GoIntoDir,
}

/// Filter sub-mode actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterAction {
    Start,
    Apply,
    Cancel,
    AutoComplete,
}

/// Step transitions and option toggles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WizardAction {
    SelectHighlighted,
    SelectCurrent,
    Confirm,
    Back,
    ToggleExtension,
    ToggleAdvanced,
    CycleFormat,
    ToggleDebug,
    Edit(Step),
    Retry,
    Restart,
}

/// System actions (quit, reset, language)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
    Reset,
    ToggleLanguage,
}

/// Which table a key is looked up in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Browse,
    Filter,
    Naming,
    Label,
    Review,
    Processing,
    Finished,
}

impl Context {
    /// Contexts where unbound printable keys are typed into a text field.
    #[inline]
    pub fn is_text_entry(self) -> bool {
        matches!(self, Context::Filter | Context::Naming | Context::Label)
    }
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action per context, built from the config
pub struct Keymap {
    tables: HashMap<Context, HashMap<Key, Action>>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut tables: HashMap<Context, HashMap<Key, Action>> = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($ctx:expr, $keys:expr, $action:expr) => {
                bind($keys, $action, tables.entry($ctx).or_default(), false);
            };
        }

        // Same as bind!, but skips plain characters so they stay typeable.
        macro_rules! bind_non_text {
            ($ctx:expr, $keys:expr, $action:expr) => {
                bind($keys, $action, tables.entry($ctx).or_default(), true);
            };
        }

        use Context as C;
        use FilterAction as F;
        use NavAction as N;
        use SystemAction as S;
        use WizardAction as W;

        // Global
        bind!(C::Global, keys.force_quit(),             Action::System(S::Quit));
        bind!(C::Global, keys.reset(),                  Action::System(S::Reset));
        bind!(C::Global, keys.toggle_language(),        Action::System(S::ToggleLanguage));

        // Browsing
        bind!(C::Browse, keys.quit(),                   Action::System(S::Quit));
        bind!(C::Browse, keys.go_up(),                  Action::Nav(N::GoUp));
        bind!(C::Browse, keys.go_down(),                Action::Nav(N::GoDown));
        bind!(C::Browse, keys.go_top(),                 Action::Nav(N::GoTop));
        bind!(C::Browse, keys.go_bottom(),              Action::Nav(N::GoBottom));
        bind!(C::Browse, keys.go_parent(),              Action::Nav(N::GoParent));
        bind!(C::Browse, keys.go_into_dir(),            Action::Nav(N::GoIntoDir));
        bind!(C::Browse, keys.select(),                 Action::Wizard(W::SelectHighlighted));
        bind!(C::Browse, keys.select_current(),         Action::Wizard(W::SelectCurrent));
        bind!(C::Browse, keys.filter(),                 Action::Filter(F::Start));
        bind!(C::Browse, keys.cancel(),                 Action::Filter(F::Cancel));
        bind!(C::Browse, keys.toggle_advanced(),        Action::Wizard(W::ToggleAdvanced));

        // Filter sub-mode
        bind!(C::Filter, keys.confirm(),                Action::Filter(F::Apply));
        bind!(C::Filter, keys.cancel(),                 Action::Filter(F::Cancel));
        bind!(C::Filter, keys.autocomplete(),           Action::Filter(F::AutoComplete));
        bind_non_text!(C::Filter, keys.go_up(),         Action::Nav(N::GoUp));
        bind_non_text!(C::Filter, keys.go_down(),       Action::Nav(N::GoDown));

        // Output name
        bind!(C::Naming, keys.confirm(),                Action::Wizard(W::Confirm));
        bind!(C::Naming, keys.cancel(),                 Action::Wizard(W::Back));
        bind!(C::Naming, keys.toggle_extension(),       Action::Wizard(W::ToggleExtension));
        bind_non_text!(C::Naming, keys.toggle_advanced(), Action::Wizard(W::ToggleAdvanced));

        // Label
        bind!(C::Label, keys.confirm(),                 Action::Wizard(W::Confirm));
        bind!(C::Label, keys.cancel(),                  Action::Wizard(W::Back));

        // Review
        bind!(C::Review, keys.quit(),                   Action::System(S::Quit));
        bind!(C::Review, keys.confirm(),                Action::Wizard(W::Confirm));
        bind!(C::Review, keys.back(),                   Action::Wizard(W::Back));
        bind!(C::Review, keys.cancel(),                 Action::Wizard(W::Back));
        bind!(C::Review, keys.cycle_format(),           Action::Wizard(W::CycleFormat));
        bind!(C::Review, keys.toggle_debug(),           Action::Wizard(W::ToggleDebug));
        bind!(C::Review, keys.toggle_advanced(),        Action::Wizard(W::ToggleAdvanced));
        bind!(C::Review, keys.edit_directory(),         Action::Wizard(W::Edit(Step::BrowsingDirectory)));
        bind!(C::Review, keys.edit_output(),            Action::Wizard(W::Edit(Step::NamingOutput)));
        bind!(C::Review, keys.edit_label(),             Action::Wizard(W::Edit(Step::LabelEntry)));

        // Processing
        bind!(C::Processing, keys.quit(),               Action::System(S::Quit));

        // Finished
        bind!(C::Finished, keys.quit(),                 Action::System(S::Quit));
        bind!(C::Finished, keys.confirm(),              Action::System(S::Quit));
        bind!(C::Finished, keys.cancel(),               Action::System(S::Quit));
        bind!(C::Finished, keys.back(),                 Action::Wizard(W::Retry));
        bind!(C::Finished, keys.restart(),              Action::Wizard(W::Restart));

        Keymap { tables }
    }

    /// Looks up the action for a key event: global bindings first, then the context table.
    pub fn lookup(&self, context: Context, key: KeyEvent) -> Option<Action> {
        self.lookup_in(Context::Global, key)
            .or_else(|| self.lookup_in(context, key))
    }

    fn lookup_in(&self, context: Context, key: KeyEvent) -> Option<Action> {
        let map = self.tables.get(&context)?;
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return map.get(&k2).copied();
        }
        None
    }
}

fn bind(keys: &[String], action: Action, map: &mut HashMap<Key, Action>, skip_text: bool) {
    for k in keys {
        let Some(key) = parse_key(k) else {
            tracing::warn!(key = %k, ?action, "ignoring unparsable key binding");
            continue;
        };
        if skip_text && is_text_key(&key) {
            continue;
        }
        map.entry(key).or_insert(action);
    }
}

fn is_text_key(key: &Key) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is the key itself, not a separator.
    if input == "+" || input == "-" {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "enter" | "return" => code = Some(KeyCode::Enter),
            "esc" | "escape" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}
