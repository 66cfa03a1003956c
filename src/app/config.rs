use gtk::gdk;
use gtk4 as gtk;
use log::warn;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_CAPTURE_SETTLE: Duration = Duration::from_millis(200);
pub const DEFAULT_PRIVACY_TEST: Duration = Duration::from_millis(1000);

/// Tunables read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Pause between tearing down the overlay and grabbing the screen
    pub capture_settle: Duration,
    /// How long the privacy test flip lasts
    pub privacy_test: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture_settle: DEFAULT_CAPTURE_SETTLE,
            privacy_test: DEFAULT_PRIVACY_TEST,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str, default: Duration| match lookup(key) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", key, raw, e);
                    default
                }
            },
            None => default,
        };

        Self {
            capture_settle: millis("HELPER_CAPTURE_SETTLE_MS", DEFAULT_CAPTURE_SETTLE),
            privacy_test: millis("HELPER_PRIVACY_TEST_MS", DEFAULT_PRIVACY_TEST),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Capture,
    Send,
    TogglePrivacy,
    TestPrivacy,
    ShowShortcuts,
    Quit,
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::Capture => "Capture Screen Region",
            Action::Send => "Send to LLM",
            Action::TogglePrivacy => "Toggle Privacy Mode",
            Action::TestPrivacy => "Test Privacy Mode",
            Action::ShowShortcuts => "Keyboard Shortcuts",
            Action::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: gdk::Key,
    pub modifiers: gdk::ModifierType,
}

#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    bindings: HashMap<Action, Shortcut>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let ctrl = gdk::ModifierType::CONTROL_MASK;
        let ctrl_shift = gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK;

        let mut bindings = HashMap::new();
        bindings.insert(
            Action::Capture,
            Shortcut {
                key: gdk::Key::S,
                modifiers: ctrl_shift,
            },
        );
        bindings.insert(
            Action::Send,
            Shortcut {
                key: gdk::Key::Return,
                modifiers: ctrl,
            },
        );
        bindings.insert(
            Action::TogglePrivacy,
            Shortcut {
                key: gdk::Key::H,
                modifiers: ctrl_shift,
            },
        );
        bindings.insert(
            Action::TestPrivacy,
            Shortcut {
                key: gdk::Key::T,
                modifiers: ctrl_shift,
            },
        );
        bindings.insert(
            Action::ShowShortcuts,
            Shortcut {
                key: gdk::Key::question,
                modifiers: ctrl_shift,
            },
        );
        bindings.insert(
            Action::Quit,
            Shortcut {
                key: gdk::Key::q,
                modifiers: ctrl,
            },
        );

        Self { bindings }
    }
}

impl ShortcutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_action(&self, key: gdk::Key, modifiers: gdk::ModifierType) -> Option<Action> {
        // Filter out irrelevant modifiers like NumLock/CapsLock/ScrollLock
        let mask = gdk::ModifierType::CONTROL_MASK
            | gdk::ModifierType::SHIFT_MASK
            | gdk::ModifierType::ALT_MASK
            | gdk::ModifierType::SUPER_MASK
            | gdk::ModifierType::META_MASK;

        let clean_mods = modifiers & mask;
        let key = key.to_upper();

        for (action, shortcut) in &self.bindings {
            if shortcut.key.to_upper() == key && shortcut.modifiers == clean_mods {
                return Some(*action);
            }

            // Keypad Enter sends too
            if *action == Action::Send
                && key == gdk::Key::KP_Enter
                && shortcut.modifiers == clean_mods
            {
                return Some(*action);
            }
        }
        None
    }

    pub fn get_shortcut_label(&self, action: Action) -> String {
        if let Some(sc) = self.bindings.get(&action) {
            return gtk::accelerator_name(sc.key, sc.modifiers).to_string();
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_resolve_with_lock_modifiers_masked() {
        let config = ShortcutConfig::new();
        let ctrl_shift = gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK;

        assert_eq!(
            config.get_action(gdk::Key::S, ctrl_shift | gdk::ModifierType::LOCK_MASK),
            Some(Action::Capture)
        );
        assert_eq!(
            config.get_action(gdk::Key::h, ctrl_shift),
            Some(Action::TogglePrivacy)
        );
        assert_eq!(config.get_action(gdk::Key::S, gdk::ModifierType::empty()), None);
    }

    #[test]
    fn keypad_enter_sends() {
        let config = ShortcutConfig::new();
        let ctrl = gdk::ModifierType::CONTROL_MASK;
        assert_eq!(config.get_action(gdk::Key::Return, ctrl), Some(Action::Send));
        assert_eq!(config.get_action(gdk::Key::KP_Enter, ctrl), Some(Action::Send));
        assert_eq!(
            config.get_action(gdk::Key::Return, gdk::ModifierType::empty()),
            None
        );
    }

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.capture_settle, Duration::from_millis(200));
        assert_eq!(config.privacy_test, Duration::from_secs(1));
    }

    #[test]
    fn app_config_overrides_and_bad_values() {
        let config = AppConfig::from_lookup(|key| match key {
            "HELPER_CAPTURE_SETTLE_MS" => Some("50".to_string()),
            "HELPER_PRIVACY_TEST_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.capture_settle, Duration::from_millis(50));
        assert_eq!(config.privacy_test, DEFAULT_PRIVACY_TEST);
    }
}
