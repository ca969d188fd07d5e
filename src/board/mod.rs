//! Communication board model: themed tabs of word tiles and a typing tab.
//!
//! The board knows nothing about input handling. It lists the elements that
//! are currently visible ([`Board::elements`]) and answers whether an element
//! is attached; the activation dispatcher does the rest.

pub mod keyboard;

use tracing::debug;

use crate::activation::{ActivatableElement, ElementHost, ElementId};
pub use keyboard::{KeyCap, OnScreenKeyboard};

/// Word tabs present on a fresh board.
const DEFAULT_WORD_TABS: &[(&str, &[&str])] = &[
    (
        "General",
        &["Yes", "No", "Hello", "Goodbye", "Stop", "Go", "Help", "Love", "Please", "Thank you"],
    ),
    (
        "Food & Drink",
        &[
            "Eat", "Drink", "Water", "Milk", "Juice", "Apple", "Banana", "Bread", "Pizza",
            "Snack", "Breakfast", "Lunch", "Dinner", "Ice cream",
        ],
    ),
    (
        "Feelings",
        &["Happy", "Sad", "Angry", "Tired", "Scared", "Excited", "Bored", "Sick"],
    ),
    (
        "Activities",
        &["Play", "Read", "Write", "Draw", "Sing", "Dance", "Run", "Walk", "Swim", "Bathroom"],
    ),
    (
        "People & Places",
        &["Home", "School", "Friend", "Family", "Teacher", "Mom", "Dad", "Sister", "Brother"],
    ),
    (
        "Colours",
        &["Red", "Blue", "Green", "Yellow", "Orange", "Purple", "Pink", "Black", "White"],
    ),
];

/// Name of the typing tab.
pub const KEYBOARD_TAB_NAME: &str = "Keyboard";

/// Effect of activating a board element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// Say the text
    Speak(String),
    /// Show the tab at this index
    SwitchTab(usize),
    /// Edit the typed phrase
    TypeKey(KeyInput),
    /// Say the typed phrase
    SpeakTyped,
    /// Empty the typed phrase
    ClearTyped,
}

/// Input produced by an on-screen keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Append a character
    Char(char),
    /// Append a space
    Space,
    /// Delete the last character
    Backspace,
}

/// A word tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Element identity
    pub id: ElementId,
    /// Word or phrase spoken by the tile
    pub word: String,
}

/// What a tab shows below the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabContent {
    /// Grid of word tiles
    Words(Vec<Tile>),
    /// Typed phrase and on-screen keyboard
    Keyboard(OnScreenKeyboard),
}

/// A themed page of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Element identity of the tab's button in the tab bar
    pub button: ElementId,
    /// Tab title
    pub name: String,
    /// Tab body
    pub content: TabContent,
}

impl Tab {
    /// Returns `true` for the typing tab.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self.content, TabContent::Keyboard(_))
    }

    fn contains(&self, id: ElementId) -> bool {
        match &self.content {
            TabContent::Words(tiles) => tiles.iter().any(|t| t.id == id),
            TabContent::Keyboard(keyboard) => keyboard.contains(id),
        }
    }
}

/// The whole communication board.
#[derive(Debug, Clone)]
pub struct Board {
    tabs: Vec<Tab>,
    active: usize,
    icon_mode: bool,
    typed: String,
    next_id: u64,
}

impl Board {
    const fn empty() -> Self {
        Self {
            tabs: Vec::new(),
            active: 0,
            icon_mode: false,
            typed: String::new(),
            next_id: 1,
        }
    }

    /// Creates the standard board: themed word tabs followed by the keyboard tab.
    #[must_use]
    pub fn with_default_tabs() -> Self {
        let mut board = Self::empty();
        for (name, words) in DEFAULT_WORD_TABS {
            board.push_word_tab(name, words);
        }
        board.push_keyboard_tab();
        board
    }

    fn push_word_tab(&mut self, name: &str, words: &[&str]) {
        let button = self.allocate_id();
        let tiles = words
            .iter()
            .map(|word| Tile {
                id: self.allocate_id(),
                word: (*word).to_string(),
            })
            .collect();
        self.tabs.push(Tab {
            button,
            name: name.to_string(),
            content: TabContent::Words(tiles),
        });
    }

    fn push_keyboard_tab(&mut self) {
        let button = self.allocate_id();
        let keyboard = OnScreenKeyboard::new(|| self.allocate_id());
        self.tabs.push(Tab {
            button,
            name: KEYBOARD_TAB_NAME.to_string(),
            content: TabContent::Keyboard(keyboard),
        });
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// All tabs in tab-bar order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Index of the visible tab.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The visible tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    /// Shows another tab. Out-of-range indices are ignored.
    pub fn switch_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        debug!(tab = %self.tabs[index].name, "switched tab");
        true
    }

    /// Whether tiles show a single glyph instead of their word.
    #[must_use]
    pub const fn icon_mode(&self) -> bool {
        self.icon_mode
    }

    /// Flips icon display. Speech labels are unaffected.
    pub fn toggle_icon_mode(&mut self) -> bool {
        self.icon_mode = !self.icon_mode;
        self.icon_mode
    }

    /// Text drawn on a tile for `word` in the current display mode.
    #[must_use]
    pub fn display_label(&self, word: &str) -> String {
        if self.icon_mode {
            icon_for(word)
        } else {
            word.to_string()
        }
    }

    /// Adds a word tile to the active tab.
    ///
    /// Blank input and the keyboard tab are rejected.
    pub fn add_word(&mut self, word: &str) -> Option<ElementId> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        let id = ElementId(self.next_id);
        let tab = self.tabs.get_mut(self.active)?;
        let TabContent::Words(tiles) = &mut tab.content else {
            return None;
        };
        tiles.push(Tile {
            id,
            word: word.to_string(),
        });
        self.next_id += 1;
        debug!(%id, word, "added tile");
        Some(id)
    }

    /// Removes a word tile from whichever tab holds it.
    pub fn remove_tile(&mut self, id: ElementId) -> bool {
        for tab in &mut self.tabs {
            if let TabContent::Words(tiles) = &mut tab.content {
                if let Some(pos) = tiles.iter().position(|t| t.id == id) {
                    let tile = tiles.remove(pos);
                    debug!(%id, word = %tile.word, "removed tile");
                    return true;
                }
            }
        }
        false
    }

    /// Changes the word of a tile. Blank words are rejected.
    pub fn rename_tile(&mut self, id: ElementId, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        match self.tile_mut(id) {
            Some(tile) => {
                tile.word = word.to_string();
                true
            }
            None => false,
        }
    }

    /// Looks up a tile anywhere on the board.
    #[must_use]
    pub fn tile(&self, id: ElementId) -> Option<&Tile> {
        self.tabs.iter().find_map(|tab| match &tab.content {
            TabContent::Words(tiles) => tiles.iter().find(|t| t.id == id),
            TabContent::Keyboard(_) => None,
        })
    }

    fn tile_mut(&mut self, id: ElementId) -> Option<&mut Tile> {
        self.tabs.iter_mut().find_map(|tab| match &mut tab.content {
            TabContent::Words(tiles) => tiles.iter_mut().find(|t| t.id == id),
            TabContent::Keyboard(_) => None,
        })
    }

    /// Phrase typed on the on-screen keyboard.
    #[must_use]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Applies an on-screen key press.
    pub fn type_key(&mut self, key: KeyInput) {
        keyboard::apply_key(&mut self.typed, key);
    }

    /// Empties the typed phrase.
    pub fn clear_typed(&mut self) {
        self.typed.clear();
    }

    /// Every element currently visible: tab buttons, then the active tab's body.
    #[must_use]
    pub fn elements(&self) -> Vec<ActivatableElement<BoardAction>> {
        let mut elements: Vec<ActivatableElement<BoardAction>> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                ActivatableElement::new(tab.button, tab.name.as_str(), BoardAction::SwitchTab(index))
            })
            .collect();

        match self.active_tab().map(|tab| &tab.content) {
            Some(TabContent::Words(tiles)) => {
                elements.extend(tiles.iter().map(|tile| {
                    ActivatableElement::new(
                        tile.id,
                        self.display_label(&tile.word),
                        BoardAction::Speak(tile.word.clone()),
                    )
                    .with_speech_label(tile.word.as_str())
                }));
            }
            Some(TabContent::Keyboard(keyboard)) => {
                elements.extend(keyboard.keys().map(|key| {
                    ActivatableElement::new(key.id, key.label.as_str(), key.action.clone())
                }));
            }
            None => {}
        }

        elements
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_default_tabs()
    }
}

impl ElementHost for Board {
    fn is_attached(&self, id: ElementId) -> bool {
        self.tabs.iter().any(|tab| tab.button == id)
            || self.active_tab().is_some_and(|tab| tab.contains(id))
    }
}

/// Single-glyph stand-in for a word when tiles are shown as icons.
fn icon_for(word: &str) -> String {
    word.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
