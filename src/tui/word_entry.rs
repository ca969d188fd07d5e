//! Text prompt for adding a word tile or renaming one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{Component, Theme};
use crate::activation::ElementId;

/// Longest word accepted by the prompt.
const MAX_WORD_LEN: usize = 40;

/// What the entered text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordEntryPurpose {
    /// New tile on the active tab
    Add,
    /// New word for an existing tile
    Rename(ElementId),
}

/// Events emitted by the word prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordEntryEvent {
    /// User confirmed non-blank text
    Submitted {
        /// What the text is for
        purpose: WordEntryPurpose,
        /// Trimmed text
        word: String,
    },
    /// User closed the prompt
    Cancelled,
}

/// Single-line text prompt.
#[derive(Debug, Clone)]
pub struct WordEntry {
    purpose: WordEntryPurpose,
    input: String,
}

impl WordEntry {
    /// Empty prompt for a new tile.
    #[must_use]
    pub const fn add() -> Self {
        Self {
            purpose: WordEntryPurpose::Add,
            input: String::new(),
        }
    }

    /// Prompt prefilled with a tile's current word.
    #[must_use]
    pub fn rename(tile: ElementId, current: &str) -> Self {
        Self {
            purpose: WordEntryPurpose::Rename(tile),
            input: current.to_string(),
        }
    }

    /// Current text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// What the prompt is for.
    #[must_use]
    pub const fn purpose(&self) -> WordEntryPurpose {
        self.purpose
    }
}

impl Component for WordEntry {
    type Event = WordEntryEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => Some(WordEntryEvent::Cancelled),
            KeyCode::Enter => {
                let word = self.input.trim();
                if word.is_empty() {
                    return None;
                }
                Some(WordEntryEvent::Submitted {
                    purpose: self.purpose,
                    word: word.to_string(),
                })
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.input.chars().count() < MAX_WORD_LEN {
                    self.input.push(c);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let title = match self.purpose {
            WordEntryPurpose::Add => " Add Word ",
            WordEntryPurpose::Rename(_) => " Rename Tile ",
        };

        f.render_widget(Clear, area);
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let [input_area, _, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.input.clone(), Style::default().fg(theme.text)),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Word ")
                .border_style(Style::default().fg(theme.text_muted)),
        );
        f.render_widget(input, input_area);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(": Confirm  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(": Cancel"),
        ]))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted));
        f.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(entry: &mut WordEntry, text: &str) {
        for c in text.chars() {
            assert!(entry.handle_input(key(KeyCode::Char(c))).is_none());
        }
    }

    #[test]
    fn test_submit_trims_input() {
        let mut entry = WordEntry::add();
        type_text(&mut entry, " Park ");
        assert_eq!(
            entry.handle_input(key(KeyCode::Enter)),
            Some(WordEntryEvent::Submitted {
                purpose: WordEntryPurpose::Add,
                word: "Park".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_input_not_submitted() {
        let mut entry = WordEntry::add();
        type_text(&mut entry, "   ");
        assert_eq!(entry.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(
            entry.handle_input(key(KeyCode::Esc)),
            Some(WordEntryEvent::Cancelled)
        );
    }

    #[test]
    fn test_rename_prefills_and_edits() {
        let mut entry = WordEntry::rename(ElementId(4), "Red");
        assert_eq!(entry.input(), "Red");
        for _ in 0..3 {
            entry.handle_input(key(KeyCode::Backspace));
        }
        type_text(&mut entry, "Blue");
        assert_eq!(
            entry.handle_input(key(KeyCode::Enter)),
            Some(WordEntryEvent::Submitted {
                purpose: WordEntryPurpose::Rename(ElementId(4)),
                word: "Blue".to_string(),
            })
        );
    }

    #[test]
    fn test_input_length_capped() {
        let mut entry = WordEntry::add();
        type_text(&mut entry, &"a".repeat(MAX_WORD_LEN + 5));
        assert_eq!(entry.input().chars().count(), MAX_WORD_LEN);
    }
}
