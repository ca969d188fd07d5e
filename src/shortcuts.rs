//! Keyboard shortcuts for the board screen.
//!
//! Board elements are only ever activated through the pointer, so the
//! shortcuts here cover application chrome: quitting, the configuration
//! panel and board editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Shortcut context for the plain board.
pub const MAIN: &str = "main";
/// Shortcut context while edit mode is on.
pub const EDIT: &str = "edit";

/// Every action reachable from a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the application
    Quit,
    /// Open the configuration panel
    OpenConfig,
    /// Enter or leave edit mode
    ToggleEditMode,
    /// Open the add-word prompt
    AddWord,
    /// Switch between word and icon tiles
    ToggleIcons,
    /// Delete the tile under the pointer
    RemoveHoveredTile,
    /// Change the word of the tile under the pointer
    RenameHoveredTile,
    /// Dismiss the current message or mode
    Cancel,
}

impl Action {
    /// Short label used in the status bar hints.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::OpenConfig => "Config",
            Self::ToggleEditMode => "Edit",
            Self::AddWord => "Add word",
            Self::ToggleIcons => "Icons",
            Self::RemoveHoveredTile => "Remove hovered",
            Self::RenameHoveredTile => "Rename hovered",
            Self::Cancel => "Done",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a `KeyEvent`.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable key name.
    #[must_use]
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else {
            key
        }
    }
}

/// Maps key events to actions per context.
pub struct ShortcutRegistry {
    bindings: HashMap<(String, KeyBinding), Action>,
    order: Vec<(&'static str, KeyBinding, Action)>,
}

impl ShortcutRegistry {
    /// Create a registry with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        };

        registry.register_main_shortcuts();
        registry.register_edit_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        self.register(MAIN, K::Char('q'), M::NONE, Action::Quit);
        self.register(MAIN, K::Char('c'), M::CONTROL, Action::Quit);
        self.register(MAIN, K::Char('c'), M::NONE, Action::OpenConfig);
        self.register(MAIN, K::Char('e'), M::NONE, Action::ToggleEditMode);
        self.register(MAIN, K::Esc, M::NONE, Action::Cancel);
    }

    fn register_edit_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        self.register(EDIT, K::Char('a'), M::NONE, Action::AddWord);
        self.register(EDIT, K::Char('i'), M::NONE, Action::ToggleIcons);
        self.register(EDIT, K::Char('x'), M::NONE, Action::RemoveHoveredTile);
        self.register(EDIT, K::Char('r'), M::NONE, Action::RenameHoveredTile);
        self.register(EDIT, K::Char('e'), M::NONE, Action::ToggleEditMode);
        self.register(EDIT, K::Esc, M::NONE, Action::ToggleEditMode);
        self.register(EDIT, K::Char('c'), M::NONE, Action::OpenConfig);
        self.register(EDIT, K::Char('q'), M::NONE, Action::Quit);
        self.register(EDIT, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register(
        &mut self,
        context: &'static str,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: Action,
    ) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
        self.order.push((context, binding, action));
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Key/label pairs for the status bar, in registration order.
    ///
    /// Only the first key bound to each action is listed.
    #[must_use]
    pub fn hints(&self, context: &str) -> Vec<(String, &'static str)> {
        let mut seen: Vec<Action> = Vec::new();
        let mut hints = Vec::new();
        for (ctx, binding, action) in &self.order {
            if *ctx != context || seen.contains(action) {
                continue;
            }
            if binding.modifiers.contains(KeyModifiers::CONTROL) {
                continue;
            }
            seen.push(*action);
            hints.push((binding.display(), action.hint()));
        }
        hints
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
