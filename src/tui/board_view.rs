//! Board layout and rendering: tab bar, word tile grid and on-screen keyboard.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hit_area::HitArea;
use super::{AppState, Theme};
use crate::activation::ElementId;
use crate::board::{Board, TabContent};
use crate::constants::TILES_PER_ROW;

/// Height of one tile or key row, borders included. Rows shrink when short of space.
const TILE_HEIGHT: u16 = 3;

/// What kind of control occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Button in the tab bar
    TabButton {
        /// Whether this is the visible tab
        active: bool,
    },
    /// Word tile
    Tile,
    /// On-screen keyboard key
    Key,
}

/// An element placed on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSlot {
    /// Element drawn here
    pub element: ElementId,
    /// Screen rectangle
    pub rect: Rect,
    /// Text drawn in the slot
    pub label: String,
    /// Control kind
    pub kind: SlotKind,
}

/// Screen regions for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar
    pub title: Rect,
    /// Tab bar
    pub tab_bar: Rect,
    /// Tile grid or keyboard area
    pub content: Rect,
    /// Status bar
    pub status: Rect,
    /// Typed phrase box, on the keyboard tab only
    pub typed: Option<Rect>,
    /// Every visible element
    pub slots: Vec<ElementSlot>,
    /// Elements of the active tab that did not fit
    pub hidden: usize,
}

impl ScreenLayout {
    /// Places the board into `area`.
    ///
    /// Rows shrink down to one line each before any are left out. Elements
    /// that still do not fit are counted in `hidden` and get no slot.
    #[must_use]
    pub fn compute(area: Rect, board: &Board) -> Self {
        let [title, tab_bar, content, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(5),
        ])
        .areas(area);

        let mut layout = Self {
            title,
            tab_bar,
            content,
            status,
            typed: None,
            slots: Vec::new(),
            hidden: 0,
        };

        let tab_count = board.tabs().len().max(1) as u32;
        let tab_rects = Layout::horizontal(
            board
                .tabs()
                .iter()
                .map(|_| Constraint::Ratio(1, tab_count)),
        )
        .split(tab_bar);
        for ((index, tab), rect) in board.tabs().iter().enumerate().zip(tab_rects.iter()) {
            layout.slots.push(ElementSlot {
                element: tab.button,
                rect: *rect,
                label: tab.name.clone(),
                kind: SlotKind::TabButton {
                    active: index == board.active_index(),
                },
            });
        }

        let inner = Block::default().borders(Borders::ALL).inner(content);
        match board.active_tab().map(|tab| &tab.content) {
            Some(TabContent::Words(tiles)) => {
                let rows: Vec<Vec<(ElementId, String)>> = tiles
                    .chunks(TILES_PER_ROW)
                    .map(|row| {
                        row.iter()
                            .map(|tile| (tile.id, board.display_label(&tile.word)))
                            .collect()
                    })
                    .collect();
                layout.place_rows(inner, &rows, TILES_PER_ROW, SlotKind::Tile);
            }
            Some(TabContent::Keyboard(keyboard)) => {
                // The phrase box gives up its borders before key rows shrink
                let key_rows = keyboard.rows().len() as u16;
                let typed_height = if inner.height >= TILE_HEIGHT + key_rows {
                    TILE_HEIGHT
                } else {
                    inner.height.min(1)
                };
                let typed = Rect {
                    height: typed_height,
                    ..inner
                };
                layout.typed = Some(typed);
                let keys_area = Rect {
                    y: inner.y + typed.height,
                    height: inner.height - typed.height,
                    ..inner
                };
                let rows: Vec<Vec<(ElementId, String)>> = keyboard
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(|key| (key.id, key.label.clone())).collect())
                    .collect();
                layout.place_rows(keys_area, &rows, 0, SlotKind::Key);
            }
            None => {}
        }

        layout
    }

    /// Lays rows of elements top to bottom. With `columns == 0` each row is
    /// split evenly among its own elements.
    fn place_rows(
        &mut self,
        area: Rect,
        rows: &[Vec<(ElementId, String)>],
        columns: usize,
        kind: SlotKind,
    ) {
        if rows.is_empty() || area.height == 0 {
            self.hidden += rows.iter().map(Vec::len).sum::<usize>();
            return;
        }
        let row_height = (area.height / rows.len() as u16).clamp(1, TILE_HEIGHT);
        let visible_rows = (area.height / row_height) as usize;
        self.hidden += rows.iter().skip(visible_rows).map(Vec::len).sum::<usize>();

        for (row_index, row) in rows.iter().enumerate().take(visible_rows) {
            let row_rect = Rect {
                y: area.y + row_index as u16 * row_height,
                height: row_height,
                ..area
            };
            let cells = if columns == 0 { row.len() } else { columns }.max(1) as u32;
            let rects = Layout::horizontal((0..cells).map(|_| Constraint::Ratio(1, cells)))
                .split(row_rect);
            for ((element, label), rect) in row.iter().zip(rects.iter()) {
                self.slots.push(ElementSlot {
                    element: *element,
                    rect: *rect,
                    label: label.clone(),
                    kind,
                });
            }
        }
    }

    /// Hit areas for every visible element.
    pub fn hit_areas(&self) -> impl Iterator<Item = HitArea> + '_ {
        self.slots.iter().map(|slot| HitArea {
            rect: slot.rect,
            element: slot.element,
        })
    }

    /// Slot of `element`, if visible.
    #[must_use]
    pub fn slot(&self, element: ElementId) -> Option<&ElementSlot> {
        self.slots.iter().find(|slot| slot.element == element)
    }
}

/// Renders the tab bar and the active tab.
pub struct BoardView;

impl BoardView {
    /// Draws every slot of the current layout, plus the typed phrase on the keyboard tab.
    pub fn render(f: &mut Frame, state: &AppState, now: Instant) {
        let theme = &state.theme;
        let layout = &state.layout;

        let title = match (state.board.active_tab(), layout.hidden) {
            (Some(tab), 0) => format!(" {} ", tab.name),
            (Some(tab), hidden) => format!(" {} ({hidden} more, enlarge the window) ", tab.name),
            (None, _) => String::new(),
        };
        let content_block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        f.render_widget(content_block, layout.content);

        if let Some(typed_area) = layout.typed {
            Self::render_typed(f, typed_area, state.board.typed(), theme);
        }

        let hovered = state.hit_areas.hovered();
        for slot in &layout.slots {
            let progress = state.dispatcher.dwell_progress(slot.element, now);
            Self::render_slot(f, slot, hovered == Some(slot.element), progress, theme);
        }
    }

    fn render_slot(
        f: &mut Frame,
        slot: &ElementSlot,
        hovered: bool,
        progress: Option<f32>,
        theme: &Theme,
    ) {
        let (fg, border) = match slot.kind {
            SlotKind::TabButton { active: true } => (theme.selected, theme.selected),
            SlotKind::TabButton { active: false } => (theme.text_secondary, theme.tab_idle),
            SlotKind::Tile | SlotKind::Key => (theme.text, theme.primary),
        };
        let bg = if hovered {
            theme.tile_hover
        } else {
            theme.tile
        };

        let block = Block::default()
            .borders(slot_borders(slot.rect.height))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(bg));
        let inner = block.inner(slot.rect);
        f.render_widget(block, slot.rect);

        // Dwell progress fills the tile from the left
        if let Some(progress) = progress {
            let fill = (f32::from(inner.width) * progress).round() as u16;
            if fill > 0 {
                let bar = Rect {
                    width: fill.min(inner.width),
                    ..inner
                };
                f.render_widget(Block::default().style(Style::default().bg(theme.dwell_fill)), bar);
            }
        }

        let mut style = Style::default().fg(fg);
        if hovered || matches!(slot.kind, SlotKind::TabButton { active: true }) {
            style = style.add_modifier(Modifier::BOLD);
        }
        let label = Paragraph::new(slot.label.as_str())
            .alignment(Alignment::Center)
            .style(style);
        f.render_widget(label, inner);
    }

    fn render_typed(f: &mut Frame, area: Rect, typed: &str, theme: &Theme) {
        let mut spans = vec![
            Span::styled(typed.to_string(), Style::default().fg(theme.text)),
            Span::styled("_", Style::default().fg(theme.accent)),
        ];
        let block = if area.height >= TILE_HEIGHT {
            Block::default()
                .borders(Borders::ALL)
                .title(" Phrase ")
                .border_style(Style::default().fg(theme.text_muted))
        } else {
            spans.insert(0, Span::styled("Phrase: ", Style::default().fg(theme.text_muted)));
            Block::default()
        };
        let paragraph = Paragraph::new(Line::from(spans))
            .block(block.style(Style::default().bg(theme.background)));
        f.render_widget(paragraph, area);
    }
}

/// Full borders for normal rows, a top and left edge for two-line rows, none below that.
fn slot_borders(height: u16) -> Borders {
    match height {
        0 | 1 => Borders::NONE,
        2 => Borders::TOP | Borders::LEFT,
        _ => Borders::ALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_places_tabs_and_tiles() {
        let board = Board::with_default_tabs();
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40), &board);

        let tabs = layout
            .slots
            .iter()
            .filter(|s| matches!(s.kind, SlotKind::TabButton { .. }))
            .count();
        assert_eq!(tabs, board.tabs().len());

        let tiles: Vec<&ElementSlot> = layout
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Tile)
            .collect();
        assert_eq!(tiles.len(), 10);
        assert!(tiles.iter().all(|s| layout.content.contains(s.rect.as_position())));
        assert!(layout.typed.is_none());
    }

    #[test]
    fn test_tiles_wrap_after_ten_per_row() {
        let mut board = Board::with_default_tabs();
        board.switch_tab(1);
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40), &board);

        let tiles: Vec<&ElementSlot> = layout
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Tile)
            .collect();
        assert!(tiles.len() > TILES_PER_ROW);
        assert_eq!(tiles[0].rect.y, tiles[TILES_PER_ROW - 1].rect.y);
        assert_eq!(tiles[TILES_PER_ROW].rect.y, tiles[0].rect.y + TILE_HEIGHT);
        assert_eq!(tiles[TILES_PER_ROW].rect.x, tiles[0].rect.x);
    }

    #[test]
    fn test_keyboard_tab_layout() {
        let mut board = Board::with_default_tabs();
        board.switch_tab(board.tabs().len() - 1);
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40), &board);

        assert!(layout.typed.is_some());
        let keys = layout.slots.iter().filter(|s| s.kind == SlotKind::Key).count();
        assert_eq!(keys, 30);
    }

    fn assert_no_overlap(layout: &ScreenLayout) {
        for (i, a) in layout.slots.iter().enumerate() {
            for b in &layout.slots[i + 1..] {
                assert!(!a.rect.intersects(b.rect), "{} overlaps {}", a.label, b.label);
            }
        }
    }

    #[test]
    fn test_short_terminal_shrinks_rows() {
        let mut board = Board::with_default_tabs();
        board.switch_tab(1);
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 17), &board);

        let tiles: Vec<&ElementSlot> = layout
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Tile)
            .collect();
        assert_eq!(tiles.len(), 14);
        assert_eq!(layout.hidden, 0);
        assert!(tiles.iter().all(|s| s.rect.height == 2));
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_keyboard_fits_standard_terminal() {
        let mut board = Board::with_default_tabs();
        board.switch_tab(board.tabs().len() - 1);
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 24), &board);

        let keys: Vec<&ElementSlot> = layout
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Key)
            .collect();
        assert_eq!(keys.len(), 30);
        assert_eq!(layout.hidden, 0);
        assert!(keys.iter().any(|s| s.label == "Speak"));

        let inner = Block::default().borders(Borders::ALL).inner(layout.content);
        for key in &keys {
            assert!(key.rect.height >= 1);
            assert!(inner.contains(key.rect.as_position()));
            assert!(key.rect.bottom() <= inner.bottom(), "{} below the board", key.label);
        }
        let typed = layout.typed.unwrap();
        assert!(keys.iter().all(|k| !k.rect.intersects(typed)));
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_rows_beyond_one_line_each_are_counted() {
        let mut board = Board::with_default_tabs();
        for n in 0..115 {
            board.add_word(&format!("word{n}")).unwrap();
        }
        // 125 tiles make 13 rows; 11 lines are available at 80x24
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 24), &board);

        let tiles = layout.slots.iter().filter(|s| s.kind == SlotKind::Tile).count();
        assert_eq!(tiles, 110);
        assert_eq!(layout.hidden, 15);
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_slot_borders_follow_height() {
        assert_eq!(slot_borders(3), Borders::ALL);
        assert_eq!(slot_borders(2), Borders::TOP | Borders::LEFT);
        assert_eq!(slot_borders(1), Borders::NONE);
    }
}
