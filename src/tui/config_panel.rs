//! Configuration panel: activation mode, dwell time, voice choice and a voice test.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{Component, Theme};
use crate::activation::{ActivationConfig, ActivationMode};
use crate::constants::{DWELL_PRESETS_MS, DWELL_STEP_MS, MIN_DWELL_MS};

/// Upper bound for fine dwell adjustment.
const MAX_DWELL_MS: u32 = 10_000;

/// Row of the configuration panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    /// Activation mode selector
    Mode,
    /// Dwell time selector
    DwellTime,
    /// Speech voice selector
    Voice,
    /// Voice test button
    TestVoice,
}

impl ConfigField {
    const ALL: [Self; 4] = [Self::Mode, Self::DwellTime, Self::Voice, Self::TestVoice];

    const fn next(self) -> Self {
        match self {
            Self::Mode => Self::DwellTime,
            Self::DwellTime => Self::Voice,
            Self::Voice => Self::TestVoice,
            Self::TestVoice => Self::Mode,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Mode => Self::TestVoice,
            Self::DwellTime => Self::Mode,
            Self::Voice => Self::DwellTime,
            Self::TestVoice => Self::Voice,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Mode => "Activation",
            Self::DwellTime => "Dwell time",
            Self::Voice => "Voice",
            Self::TestVoice => "Test",
        }
    }
}

/// Events emitted by the configuration panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPanelEvent {
    /// Mode or dwell time changed
    ActivationChanged(ActivationConfig),
    /// Another voice was picked; `None` is the engine default
    VoiceChanged(Option<String>),
    /// Speak the voice test phrase
    TestVoice,
    /// Panel dismissed
    Closed,
}

/// Configuration panel component.
#[derive(Debug, Clone)]
pub struct ConfigPanel {
    activation: ActivationConfig,
    voices: Vec<String>,
    voice: Option<String>,
    selected: ConfigField,
}

impl ConfigPanel {
    /// Opens the panel on the current activation settings.
    #[must_use]
    pub const fn new(activation: ActivationConfig) -> Self {
        Self {
            activation,
            voices: Vec::new(),
            voice: None,
            selected: ConfigField::Mode,
        }
    }

    /// Offers `voices` for selection, starting from `voice`.
    ///
    /// A configured voice the engine did not list stays selectable.
    #[must_use]
    pub fn with_voices(mut self, mut voices: Vec<String>, voice: Option<String>) -> Self {
        if let Some(current) = &voice {
            if !voices.contains(current) {
                voices.insert(0, current.clone());
            }
        }
        self.voices = voices;
        self.voice = voice;
        self
    }

    /// Voice as currently shown.
    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Settings as currently shown.
    #[must_use]
    pub const fn activation(&self) -> ActivationConfig {
        self.activation
    }

    /// Highlighted row.
    #[must_use]
    pub const fn selected(&self) -> ConfigField {
        self.selected
    }

    fn set_mode(&mut self, mode: ActivationMode) -> Option<ConfigPanelEvent> {
        if mode == self.activation.mode() {
            return None;
        }
        self.activation = self.activation.with_mode(mode);
        Some(ConfigPanelEvent::ActivationChanged(self.activation))
    }

    fn set_dwell(&mut self, dwell_ms: u32) -> Option<ConfigPanelEvent> {
        let dwell_ms = dwell_ms.clamp(MIN_DWELL_MS, MAX_DWELL_MS);
        if dwell_ms == self.activation.dwell_ms() {
            return None;
        }
        self.activation = self.activation.with_dwell_ms(dwell_ms).ok()?;
        Some(ConfigPanelEvent::ActivationChanged(self.activation))
    }

    /// Steps through the engine default followed by the listed voices.
    fn cycle_voice(&mut self, forward: bool) -> Option<ConfigPanelEvent> {
        if self.voices.is_empty() {
            return None;
        }
        let choices = self.voices.len() + 1;
        let current = self
            .voice
            .as_ref()
            .and_then(|voice| self.voices.iter().position(|v| v == voice))
            .map_or(0, |index| index + 1);
        let next = if forward {
            (current + 1) % choices
        } else {
            (current + choices - 1) % choices
        };
        self.voice = next
            .checked_sub(1)
            .and_then(|index| self.voices.get(index).cloned());
        Some(ConfigPanelEvent::VoiceChanged(self.voice.clone()))
    }

    fn next_preset(&self) -> Option<u32> {
        let current = self.activation.dwell_ms();
        DWELL_PRESETS_MS.iter().copied().find(|&ms| ms > current)
    }

    fn previous_preset(&self) -> Option<u32> {
        let current = self.activation.dwell_ms();
        DWELL_PRESETS_MS.iter().rev().copied().find(|&ms| ms < current)
    }

    fn adjust(&mut self, forward: bool) -> Option<ConfigPanelEvent> {
        match self.selected {
            ConfigField::Mode => self.set_mode(self.activation.mode().toggled()),
            ConfigField::DwellTime => {
                let preset = if forward {
                    self.next_preset()
                } else {
                    self.previous_preset()
                };
                preset.and_then(|ms| self.set_dwell(ms))
            }
            ConfigField::Voice => self.cycle_voice(forward),
            ConfigField::TestVoice => None,
        }
    }
}

impl Component for ConfigPanel {
    type Event = ConfigPanelEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'c') => Some(ConfigPanelEvent::Closed),
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = self.selected.previous();
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selected = self.selected.next();
                None
            }
            KeyCode::Left => self.adjust(false),
            KeyCode::Right => self.adjust(true),
            KeyCode::Char('+' | '=') => {
                self.set_dwell(self.activation.dwell_ms().saturating_add(DWELL_STEP_MS))
            }
            KeyCode::Char('-') => {
                self.set_dwell(self.activation.dwell_ms().saturating_sub(DWELL_STEP_MS))
            }
            KeyCode::Char('d') => self.set_mode(ActivationMode::Dwell),
            KeyCode::Char('i') => self.set_mode(ActivationMode::Immediate),
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected {
                ConfigField::Mode | ConfigField::Voice => self.adjust(true),
                ConfigField::DwellTime => None,
                ConfigField::TestVoice => Some(ConfigPanelEvent::TestVoice),
            },
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" Configuration ")
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let [rows_area, presets_area, _, help_area] = Layout::vertical([
            Constraint::Length(ConfigField::ALL.len() as u16),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(inner);

        let rows: Vec<Line> = ConfigField::ALL
            .iter()
            .map(|&field| self.field_line(field, theme))
            .collect();
        f.render_widget(Paragraph::new(rows), rows_area);

        let mut preset_spans = vec![Span::styled(
            "Presets: ",
            Style::default().fg(theme.text_secondary),
        )];
        for ms in DWELL_PRESETS_MS {
            let style = if ms == self.activation.dwell_ms() {
                Style::default().fg(theme.selected).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            preset_spans.push(Span::styled(format!("{ms} "), style));
        }
        f.render_widget(
            Paragraph::new(vec![Line::from(""), Line::from(preset_spans)]),
            presets_area,
        );

        let help = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("↑↓", Style::default().fg(theme.accent)),
                Span::raw(" Select  "),
                Span::styled("←→", Style::default().fg(theme.accent)),
                Span::raw(" Change  "),
                Span::styled("+/-", Style::default().fg(theme.accent)),
                Span::raw(format!(" ±{DWELL_STEP_MS} ms")),
            ]),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" Toggle/Test  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" Close"),
            ]),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted));
        f.render_widget(help, help_area);
    }
}

impl ConfigPanel {
    fn field_line(&self, field: ConfigField, theme: &Theme) -> Line<'static> {
        let selected = field == self.selected;
        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let value = match field {
            ConfigField::Mode => format!("◀ {} ▶", self.activation.mode().label()),
            ConfigField::DwellTime => {
                if self.activation.mode() == ActivationMode::Dwell {
                    format!("◀ {} ms ▶", self.activation.dwell_ms())
                } else {
                    format!("{} ms (unused in click mode)", self.activation.dwell_ms())
                }
            }
            ConfigField::Voice => match (&self.voice, self.voices.is_empty()) {
                (Some(voice), _) => format!("◀ {voice} ▶"),
                (None, false) => "◀ Engine default ▶".to_string(),
                (None, true) => "Engine default (no voices listed)".to_string(),
            },
            ConfigField::TestVoice => "[ Test voice ]".to_string(),
        };

        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value, Style::default().fg(theme.text_secondary)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel() -> ConfigPanel {
        ConfigPanel::new(ActivationConfig::default())
    }

    #[test]
    fn test_mode_toggle_emits_change() {
        let mut panel = panel();
        let event = panel.handle_input(key(KeyCode::Right));
        assert_eq!(panel.activation().mode(), ActivationMode::Immediate);
        assert_eq!(
            event,
            Some(ConfigPanelEvent::ActivationChanged(panel.activation()))
        );

        // Selecting the current mode again is not a change
        assert_eq!(panel.handle_input(key(KeyCode::Char('i'))), None);
        assert!(panel.handle_input(key(KeyCode::Char('d'))).is_some());
        assert_eq!(panel.activation().mode(), ActivationMode::Dwell);
    }

    #[test]
    fn test_dwell_presets_step() {
        let mut panel = panel();
        panel.handle_input(key(KeyCode::Down));
        assert_eq!(panel.selected(), ConfigField::DwellTime);

        panel.handle_input(key(KeyCode::Right));
        assert_eq!(panel.activation().dwell_ms(), 1500);
        panel.handle_input(key(KeyCode::Left));
        panel.handle_input(key(KeyCode::Left));
        assert_eq!(panel.activation().dwell_ms(), 500);
        assert_eq!(panel.handle_input(key(KeyCode::Left)), None);
        assert_eq!(panel.activation().dwell_ms(), 500);
    }

    #[test]
    fn test_fine_adjust_respects_minimum() {
        let mut panel = ConfigPanel::new(ActivationConfig::new(ActivationMode::Dwell, 200).unwrap());
        panel.handle_input(key(KeyCode::Char('-')));
        assert_eq!(panel.activation().dwell_ms(), MIN_DWELL_MS);
        assert_eq!(panel.handle_input(key(KeyCode::Char('-'))), None);

        panel.handle_input(key(KeyCode::Char('+')));
        assert_eq!(panel.activation().dwell_ms(), MIN_DWELL_MS + DWELL_STEP_MS);
    }

    #[test]
    fn test_off_preset_value_moves_to_neighbour() {
        let mut panel = ConfigPanel::new(ActivationConfig::new(ActivationMode::Dwell, 1200).unwrap());
        panel.handle_input(key(KeyCode::Down));
        panel.handle_input(key(KeyCode::Left));
        assert_eq!(panel.activation().dwell_ms(), 1000);
    }

    fn voices() -> Vec<String> {
        vec!["en-gb".to_string(), "en-us".to_string()]
    }

    #[test]
    fn test_voice_cycles_through_listed_voices() {
        let mut panel = panel().with_voices(voices(), None);
        panel.handle_input(key(KeyCode::Down));
        panel.handle_input(key(KeyCode::Down));
        assert_eq!(panel.selected(), ConfigField::Voice);

        assert_eq!(
            panel.handle_input(key(KeyCode::Right)),
            Some(ConfigPanelEvent::VoiceChanged(Some("en-gb".to_string())))
        );
        panel.handle_input(key(KeyCode::Right));
        assert_eq!(panel.voice(), Some("en-us"));
        // Wraps back to the engine default
        assert_eq!(
            panel.handle_input(key(KeyCode::Right)),
            Some(ConfigPanelEvent::VoiceChanged(None))
        );
        panel.handle_input(key(KeyCode::Left));
        assert_eq!(panel.voice(), Some("en-us"));
    }

    #[test]
    fn test_unlisted_configured_voice_stays_selectable() {
        let mut panel = panel().with_voices(voices(), Some("custom".to_string()));
        panel.handle_input(key(KeyCode::Up));
        panel.handle_input(key(KeyCode::Up));
        assert_eq!(panel.selected(), ConfigField::Voice);

        panel.handle_input(key(KeyCode::Left));
        assert_eq!(panel.voice(), None);
        panel.handle_input(key(KeyCode::Right));
        assert_eq!(panel.voice(), Some("custom"));
    }

    #[test]
    fn test_voice_without_listing_does_nothing() {
        let mut panel = panel();
        panel.handle_input(key(KeyCode::Down));
        panel.handle_input(key(KeyCode::Down));
        assert_eq!(panel.handle_input(key(KeyCode::Right)), None);
        assert_eq!(panel.voice(), None);
    }

    #[test]
    fn test_voice_test_and_close() {
        let mut panel = panel();
        panel.handle_input(key(KeyCode::Up));
        assert_eq!(panel.selected(), ConfigField::TestVoice);
        assert_eq!(
            panel.handle_input(key(KeyCode::Enter)),
            Some(ConfigPanelEvent::TestVoice)
        );
        assert_eq!(
            panel.handle_input(key(KeyCode::Esc)),
            Some(ConfigPanelEvent::Closed)
        );
    }
}
