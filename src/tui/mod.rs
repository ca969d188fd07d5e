//! Terminal user interface: board state, event loop and rendering.
//!
//! The loop is poll-driven. Each iteration fires expired dwell deadlines,
//! lays the board out, draws it, then waits for input no longer than the
//! next deadline.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]

pub mod board_view;
pub mod component;
pub mod config_panel;
pub mod hit_area;
pub mod status_bar;
pub mod theme;
pub mod word_entry;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::activation::{
    ActivationConfig, ActivationContext, ActivationDispatcher, ElementHost, ElementId,
};
use crate::board::{Board, BoardAction};
use crate::config::Config;
use crate::constants::{APP_NAME, VOICE_TEST_PHRASE};
use crate::shortcuts::{self, Action, ShortcutRegistry};
use crate::speech::SpeechService;

pub use board_view::{BoardView, ElementSlot, ScreenLayout, SlotKind};
pub use component::Component;
pub use config_panel::{ConfigPanel, ConfigPanelEvent};
pub use hit_area::{HitArea, HitAreaRegistry, HoverChange};
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use word_entry::{WordEntry, WordEntryEvent, WordEntryPurpose};

/// Longest time the loop waits for input before checking deadlines again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Popup currently covering the board.
#[derive(Debug, Clone)]
pub enum ActiveComponent {
    /// Activation and voice settings
    Config(ConfigPanel),
    /// Add or rename prompt
    WordEntry(WordEntry),
}

/// Panel settings not yet written to the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsavedChanges {
    /// Activation mode or dwell time
    pub activation: bool,
    /// Speech voice
    pub voice: bool,
}

impl UnsavedChanges {
    /// Whether nothing needs saving.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.activation && !self.voice
    }
}

/// Board elements that also have a slot in the current layout.
struct OnScreen<'a> {
    board: &'a Board,
    layout: &'a ScreenLayout,
}

impl ElementHost for OnScreen<'_> {
    fn is_attached(&self, element: ElementId) -> bool {
        self.board.is_attached(element) && self.layout.slot(element).is_some()
    }
}

/// Application state - single source of truth
///
/// Rendering reads this state immutably. Only event handlers modify it.
pub struct AppState {
    // Core data
    /// The communication board
    pub board: Board,
    /// Shared activation settings read by the dispatcher
    pub context: ActivationContext,
    /// Activation bindings of every visible element
    pub dispatcher: ActivationDispatcher<BoardAction>,
    /// Speech engine and history
    pub speech: SpeechService,
    /// Effective configuration, session overrides included
    pub config: Config,
    /// Where configuration changes are saved, if anywhere
    pub config_path: Option<PathBuf>,
    /// Panel changes waiting to be saved
    pub unsaved: UnsavedChanges,
    /// Voices offered by the engine, listed when the config panel first opens
    pub voices: Option<Vec<String>>,

    // Screen state
    /// Last known terminal area
    pub screen_area: Rect,
    /// Element placement for the current frame
    pub layout: ScreenLayout,
    /// Element regions and hover tracking
    pub hit_areas: HitAreaRegistry,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Keyboard shortcuts
    pub shortcuts: ShortcutRegistry,
    /// Currently open popup (if any)
    pub active_component: Option<ActiveComponent>,
    /// Whether board editing shortcuts are enabled
    pub edit_mode: bool,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state for a fresh board.
    ///
    /// Elements are bound by the first [`relayout`](Self::relayout).
    /// `config_path` is where panel changes are written; `None` keeps them in memory.
    #[must_use]
    pub fn new(config: Config, speech: SpeechService, config_path: Option<PathBuf>) -> Self {
        let context = ActivationContext::new(config.activation);
        let dispatcher = ActivationDispatcher::new(context.clone());
        let theme = Theme::from_mode(config.ui.theme_mode);

        let mut state = Self {
            board: Board::with_default_tabs(),
            context,
            dispatcher,
            speech,
            config,
            config_path,
            unsaved: UnsavedChanges::default(),
            voices: None,
            screen_area: Rect::default(),
            layout: ScreenLayout::default(),
            hit_areas: HitAreaRegistry::new(),
            theme,
            shortcuts: ShortcutRegistry::new(),
            active_component: None,
            edit_mode: false,
            status_message: String::new(),
            error_message: None,
            should_quit: false,
        };
        state.set_status(format!("{APP_NAME} ready"));
        state
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Rebinds every element placed on screen under the current activation settings.
    pub fn rebind_all(&mut self) {
        let elements = self.board.elements();
        let host = OnScreen {
            board: &self.board,
            layout: &self.layout,
        };
        self.dispatcher.rebind_all(&host, &elements);
    }

    /// Re-lays out and rebinds after the board's visible elements changed.
    fn board_changed(&mut self) {
        self.relayout(self.screen_area);
        self.rebind_all();
    }

    /// Writes new activation settings and rebinds.
    pub fn set_activation(&mut self, activation: ActivationConfig) {
        if activation == self.context.get() {
            return;
        }
        self.context.set(activation);
        self.config.activation = activation;
        self.unsaved.activation = true;
        self.rebind_all();
        info!(
            mode = %activation.mode(),
            dwell_ms = activation.dwell_ms(),
            "activation settings changed"
        );
    }

    /// Switches the speech voice for this session and marks it for saving.
    pub fn set_voice(&mut self, voice: Option<String>) {
        if voice == self.config.speech.voice {
            return;
        }
        self.config.speech.voice.clone_from(&voice);
        self.unsaved.voice = true;
        self.speech.set_voice(voice);
    }

    /// Lays the board out in `area` and refreshes hit areas.
    ///
    /// A hovered element that is no longer on screen gets a pointer leave.
    /// Bindings follow the layout: when the set of placed elements changes,
    /// everything is rebound.
    pub fn relayout(&mut self, area: Rect) {
        self.screen_area = area;
        let layout = ScreenLayout::compute(area, &self.board);
        let placed_changed = !layout
            .slots
            .iter()
            .map(|slot| slot.element)
            .eq(self.layout.slots.iter().map(|slot| slot.element));
        self.layout = layout;

        if let Some(left) = self.hit_areas.replace(self.layout.hit_areas()) {
            self.dispatcher.pointer_leave(left);
        }
        if placed_changed {
            debug!(
                placed = self.layout.slots.len(),
                hidden = self.layout.hidden,
                "placed elements changed"
            );
            self.rebind_all();
        }
    }

    /// Shortcut context for the current mode.
    #[must_use]
    pub const fn shortcut_context(&self) -> &'static str {
        if self.edit_mode {
            shortcuts::EDIT
        } else {
            shortcuts::MAIN
        }
    }

    /// Element under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<ElementId> {
        self.hit_areas.hovered()
    }

    /// Routes a mouse event to the board. Ignored while a popup or error is shown.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.active_component.is_some() || self.error_message.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.move_pointer(mouse.column, mouse.row, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.move_pointer(mouse.column, mouse.row, now);
                if let Some(element) = self.hit_areas.hit_test(mouse.column, mouse.row) {
                    if let Some(action) = self.dispatcher.click(element) {
                        self.perform(action);
                    }
                }
            }
            _ => {}
        }
    }

    fn move_pointer(&mut self, column: u16, row: u16, now: Instant) {
        let change = self.hit_areas.update_hover(column, row);
        if let Some(left) = change.left {
            self.dispatcher.pointer_leave(left);
        }
        if let Some(entered) = change.entered {
            self.dispatcher.pointer_enter(entered, now);
        }
    }

    /// Treats the pointer as gone from the board.
    fn pointer_away(&mut self) {
        if let Some(left) = self.hit_areas.clear_hover() {
            self.dispatcher.pointer_leave(left);
        }
    }

    /// Fires expired dwells and reaps finished speech.
    pub fn tick(&mut self, now: Instant) {
        for action in self.dispatcher.tick(now) {
            self.perform(action);
        }
        self.speech.reap();
    }

    /// How long the loop may wait for input.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.dispatcher
            .next_deadline()
            .map_or(POLL_INTERVAL, |deadline| {
                deadline.saturating_duration_since(now).min(POLL_INTERVAL)
            })
    }

    /// Runs the effect of an activated element.
    pub fn perform(&mut self, action: BoardAction) {
        debug!(?action, "performing");
        match action {
            BoardAction::Speak(text) => {
                self.speech.say(&text);
                self.set_status(format!("Said \"{text}\""));
            }
            BoardAction::SwitchTab(index) => {
                if self.board.switch_tab(index) {
                    self.board_changed();
                }
            }
            BoardAction::TypeKey(key) => self.board.type_key(key),
            BoardAction::SpeakTyped => {
                let phrase = self.board.typed().trim().to_string();
                if phrase.is_empty() {
                    self.set_status("Nothing typed yet");
                } else {
                    self.speech.say(&phrase);
                    self.set_status(format!("Said \"{phrase}\""));
                }
            }
            BoardAction::ClearTyped => self.board.clear_typed(),
        }
    }

    /// Handles a key press.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // If error overlay is shown, allow dismissing with Enter or Esc
        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.clear_error();
            }
            return;
        }

        if let Some(ActiveComponent::Config(panel)) = &mut self.active_component {
            if let Some(event) = panel.handle_input(key) {
                self.handle_config_event(event);
            }
            return;
        }
        if let Some(ActiveComponent::WordEntry(entry)) = &mut self.active_component {
            if let Some(event) = entry.handle_input(key) {
                self.handle_word_entry_event(event);
            }
            return;
        }

        if let Some(action) = self.shortcuts.lookup(self.shortcut_context(), key) {
            self.dispatch_shortcut(action);
        }
    }

    fn dispatch_shortcut(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::OpenConfig => self.open_config_panel(),
            Action::ToggleEditMode => {
                self.edit_mode = !self.edit_mode;
                self.set_status(if self.edit_mode {
                    "Edit mode on"
                } else {
                    "Edit mode off"
                });
            }
            Action::AddWord => {
                if self.board.active_tab().is_some_and(crate::board::Tab::is_keyboard) {
                    self.set_status("Words can only be added to word tabs");
                } else {
                    self.open_component(ActiveComponent::WordEntry(WordEntry::add()));
                }
            }
            Action::ToggleIcons => {
                let icons = self.board.toggle_icon_mode();
                self.board_changed();
                self.set_status(if icons { "Showing icons" } else { "Showing words" });
            }
            Action::RemoveHoveredTile => match self.hovered_tile() {
                Some((id, word)) => {
                    self.board.remove_tile(id);
                    self.board_changed();
                    self.set_status(format!("Removed \"{word}\""));
                }
                None => self.set_status("Point at a tile to remove it"),
            },
            Action::RenameHoveredTile => match self.hovered_tile() {
                Some((id, word)) => {
                    self.open_component(ActiveComponent::WordEntry(WordEntry::rename(id, &word)));
                }
                None => self.set_status("Point at a tile to rename it"),
            },
            Action::Cancel => self.status_message.clear(),
        }
    }

    fn hovered_tile(&self) -> Option<(ElementId, String)> {
        let id = self.hovered()?;
        self.board.tile(id).map(|tile| (id, tile.word.clone()))
    }

    /// Opens a popup. The board stops receiving pointer input until it closes.
    pub fn open_component(&mut self, component: ActiveComponent) {
        self.pointer_away();
        self.active_component = Some(component);
    }

    /// Opens the configuration panel on the current settings.
    pub fn open_config_panel(&mut self) {
        let voices = self
            .voices
            .get_or_insert_with(|| self.speech.voices())
            .clone();
        let panel = ConfigPanel::new(self.context.get())
            .with_voices(voices, self.config.speech.voice.clone());
        self.open_component(ActiveComponent::Config(panel));
    }

    /// Closes the open popup.
    pub fn close_component(&mut self) {
        self.active_component = None;
    }

    fn handle_config_event(&mut self, event: ConfigPanelEvent) {
        match event {
            ConfigPanelEvent::ActivationChanged(activation) => {
                self.set_activation(activation);
                self.set_status(format!(
                    "{} mode, {} ms",
                    activation.mode().label(),
                    activation.dwell_ms()
                ));
            }
            ConfigPanelEvent::VoiceChanged(voice) => {
                self.set_status(format!(
                    "Voice: {}",
                    voice.as_deref().unwrap_or("engine default")
                ));
                self.set_voice(voice);
            }
            ConfigPanelEvent::TestVoice => self.speech.say(VOICE_TEST_PHRASE),
            ConfigPanelEvent::Closed => {
                self.close_component();
                if !self.unsaved.is_empty() {
                    self.save_config();
                }
            }
        }
    }

    fn handle_word_entry_event(&mut self, event: WordEntryEvent) {
        self.close_component();
        let WordEntryEvent::Submitted { purpose, word } = event else {
            return;
        };

        match purpose {
            WordEntryPurpose::Add => {
                if self.board.add_word(&word).is_some() {
                    self.board_changed();
                    self.set_status(format!("Added \"{word}\""));
                } else {
                    self.set_status("Words can only be added to word tabs");
                }
            }
            WordEntryPurpose::Rename(id) => {
                if self.board.rename_tile(id, &word) {
                    self.board_changed();
                    self.set_status(format!("Renamed to \"{word}\""));
                } else {
                    self.set_status("Tile no longer exists");
                }
            }
        }
    }

    /// Writes panel changes to `config_path`. Failures go to the error overlay.
    ///
    /// The file is re-read and only the changed settings are replaced, so
    /// launch-time overrides never reach it.
    pub fn save_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.unsaved = UnsavedChanges::default();
            return;
        };
        let unsaved = self.unsaved;
        let session = &self.config;
        let result = Config::load_from(&path).and_then(|mut stored| {
            if unsaved.activation {
                stored.activation = session.activation;
            }
            if unsaved.voice {
                stored.speech.voice.clone_from(&session.speech.voice);
            }
            stored.save_to(&path)
        });
        match result {
            Ok(()) => {
                self.unsaved = UnsavedChanges::default();
                info!(path = %path.display(), "configuration saved");
                self.set_status("Configuration saved");
            }
            Err(e) => self.set_error(format!("Failed to save configuration: {e:#}")),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.tick(Instant::now());

        let size = terminal.size().context("Failed to query terminal size")?;
        state.relayout(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| render(f, state))?;

        if event::poll(state.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => state.handle_key_event(key),
                Event::Mouse(mouse) => state.handle_mouse(mouse, Instant::now()),
                // Resize is picked up by the next relayout
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
pub fn render(f: &mut Frame, state: &AppState) {
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    render_title_bar(f, state.layout.title, state);
    BoardView::render(f, state, Instant::now());
    StatusBar::render(f, state.layout.status, state, &state.theme);

    match &state.active_component {
        Some(ActiveComponent::Config(panel)) => {
            panel.render(f, centered_rect(60, 50, f.area()), &state.theme);
        }
        Some(ActiveComponent::WordEntry(entry)) => {
            entry.render(f, centered_rect(50, 30, f.area()), &state.theme);
        }
        None => {}
    }

    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        format!(" {APP_NAME} "),
        Style::default()
            .fg(state.theme.primary)
            .add_modifier(Modifier::BOLD),
    )];
    if state.edit_mode {
        spans.push(Span::styled(
            "| Edit mode",
            Style::default().fg(state.theme.warning),
        ));
    }

    let title_widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(state.theme.background)),
    );

    f.render_widget(title_widget, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ])])
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::Speaker;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    struct Silent;

    impl Speaker for Silent {
        fn speak(&self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn state() -> AppState {
        let mut config = Config::default();
        config.ui.theme_mode = crate::config::ThemeMode::Dark;
        let mut state = AppState::new(config, SpeechService::new(Box::new(Silent)), None);
        state.relayout(Rect::new(0, 0, 120, 40));
        state
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_board() {
        let state = state();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(APP_NAME));
        assert!(text.contains("General"));
        assert!(text.contains("Hello"));
        assert!(text.contains("Mode:"));
    }

    #[test]
    fn test_render_config_panel() {
        let mut state = state();
        state.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Configuration"));
        assert!(text.contains("Test voice"));
    }

    #[test]
    fn test_status_hints_follow_edit_mode() {
        let mut state = state();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();
        assert!(!buffer_text(&terminal).contains("Add word"));

        state.handle_key_event(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        assert_eq!(state.shortcut_context(), shortcuts::EDIT);
        terminal.draw(|f| render(f, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("Add word"));
    }

    #[test]
    fn test_nothing_bound_before_first_layout() {
        let state = AppState::new(Config::default(), SpeechService::new(Box::new(Silent)), None);
        assert_eq!(state.dispatcher.binding_count(), 0);
    }

    #[test]
    fn test_render_error_overlay() {
        let mut state = state();
        state.set_error("disk full");
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        assert!(buffer_text(&terminal).contains("disk full"));

        state.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_poll_timeout_bounded_by_deadline() {
        let mut state = state();
        let now = Instant::now();
        assert_eq!(state.poll_timeout(now), POLL_INTERVAL);

        let slot = state
            .layout
            .slots
            .iter()
            .find(|s| s.kind == SlotKind::Tile)
            .unwrap()
            .clone();
        state.dispatcher.pointer_enter(slot.element, now);
        let deadline = now + Duration::from_millis(1000);
        let timeout = state.poll_timeout(deadline - Duration::from_millis(30));
        assert_eq!(timeout, Duration::from_millis(30));
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, parent);
        assert!(rect.width <= 60);
        assert!(rect.x >= 20);
        assert!(rect.y >= 15);
    }
}
