//! Status bar widget: activation settings, last phrase, messages and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::activation::ActivationMode;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let lines = vec![
            Self::settings_line(state, theme),
            Self::message_line(state, theme),
            Self::hints_line(state, theme),
        ];

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn settings_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let activation = state.context.get();
        let mode = match activation.mode() {
            ActivationMode::Dwell => format!("{} {} ms", activation.mode().label(), activation.dwell_ms()),
            ActivationMode::Immediate => activation.mode().label().to_string(),
        };

        let mut spans = vec![
            Span::styled("Mode: ", Style::default().fg(theme.primary)),
            Span::styled(mode, Style::default().fg(theme.text)),
        ];
        if state.edit_mode {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "[EDIT]",
                Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
            ));
        }
        if state.board.icon_mode() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("[ICONS]", Style::default().fg(theme.accent)));
        }
        if let Some(phrase) = state.speech.history().last() {
            spans.push(Span::styled("  Last: ", Style::default().fg(theme.primary)));
            spans.push(Span::styled(
                phrase.text.clone(),
                Style::default().fg(theme.success),
            ));
            spans.push(Span::styled(
                format!(" ({})", phrase.at.format("%H:%M:%S")),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }

    fn message_line(state: &AppState, theme: &Theme) -> Line<'static> {
        if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.text_secondary),
            ))
        }
    }

    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        if state.active_component.is_some() {
            return Line::from(Span::styled(
                "Board paused while a panel is open",
                Style::default().fg(theme.text_muted),
            ));
        }

        let hints = state.shortcuts.hints(state.shortcut_context());

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, label)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}
