//! On-screen QWERTY keyboard for typing free phrases.

use super::{BoardAction, KeyInput};
use crate::activation::ElementId;

const LETTER_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// One key of the on-screen keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCap {
    /// Element identity
    pub id: ElementId,
    /// Text drawn on the key
    pub label: String,
    /// Effect of pressing the key
    pub action: BoardAction,
}

/// Letter rows plus a control row (space, backspace, clear, speak).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnScreenKeyboard {
    rows: Vec<Vec<KeyCap>>,
}

impl OnScreenKeyboard {
    /// Builds the keyboard, taking element ids from `next_id`.
    pub fn new(mut next_id: impl FnMut() -> ElementId) -> Self {
        let mut rows: Vec<Vec<KeyCap>> = LETTER_ROWS
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| KeyCap {
                        id: next_id(),
                        label: c.to_string(),
                        action: BoardAction::TypeKey(KeyInput::Char(c.to_ascii_lowercase())),
                    })
                    .collect()
            })
            .collect();

        let controls = [
            ("Space", BoardAction::TypeKey(KeyInput::Space)),
            ("⌫", BoardAction::TypeKey(KeyInput::Backspace)),
            ("Clear", BoardAction::ClearTyped),
            ("Speak", BoardAction::SpeakTyped),
        ];
        rows.push(
            controls
                .into_iter()
                .map(|(label, action)| KeyCap {
                    id: next_id(),
                    label: label.to_string(),
                    action,
                })
                .collect(),
        );

        Self { rows }
    }

    /// Keys grouped by row, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<KeyCap>] {
        &self.rows
    }

    /// All keys in reading order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyCap> {
        self.rows.iter().flatten()
    }

    /// Returns `true` if `id` is one of this keyboard's keys.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.keys().any(|key| key.id == id)
    }

    /// Finds the key with the given label.
    #[must_use]
    pub fn key_labeled(&self, label: &str) -> Option<&KeyCap> {
        self.keys().find(|key| key.label == label)
    }
}

/// Applies a key press to the typed phrase.
pub fn apply_key(typed: &mut String, key: KeyInput) {
    match key {
        KeyInput::Char(c) => typed.push(c),
        KeyInput::Space => typed.push(' '),
        KeyInput::Backspace => {
            typed.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> OnScreenKeyboard {
        let mut n = 0;
        OnScreenKeyboard::new(|| {
            n += 1;
            ElementId(n)
        })
    }

    #[test]
    fn test_layout_has_letter_and_control_rows() {
        let kb = keyboard();
        assert_eq!(kb.rows().len(), 4);
        assert_eq!(kb.rows()[0].len(), 10);
        assert_eq!(kb.rows()[1].len(), 9);
        assert_eq!(kb.rows()[2].len(), 7);
        assert_eq!(kb.keys().count(), 30);
    }

    #[test]
    fn test_ids_are_unique() {
        let kb = keyboard();
        let mut ids: Vec<ElementId> = kb.keys().map(|k| k.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_letter_keys_type_lowercase() {
        let kb = keyboard();
        let q = kb.key_labeled("Q").unwrap();
        assert_eq!(q.action, BoardAction::TypeKey(KeyInput::Char('q')));
    }

    #[test]
    fn test_apply_key_edits_phrase() {
        let mut typed = String::new();
        apply_key(&mut typed, KeyInput::Char('h'));
        apply_key(&mut typed, KeyInput::Char('i'));
        apply_key(&mut typed, KeyInput::Space);
        assert_eq!(typed, "hi ");
        apply_key(&mut typed, KeyInput::Backspace);
        apply_key(&mut typed, KeyInput::Backspace);
        assert_eq!(typed, "h");
        apply_key(&mut typed, KeyInput::Backspace);
        apply_key(&mut typed, KeyInput::Backspace);
        assert_eq!(typed, "");
    }
}
