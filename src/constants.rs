//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and activation defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "AAC Board";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "aacboard";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "AacBoard";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "AACBOARD_CONFIG_DIR";

/// Log file name inside the config directory.
pub const LOG_FILE_NAME: &str = "aacboard.log";

/// Default dwell time in milliseconds.
pub const DEFAULT_DWELL_MS: u32 = 1000;

/// Dwell times offered by the configuration panel.
pub const DWELL_PRESETS_MS: [u32; 5] = [500, 1000, 1500, 2000, 3000];

/// Step used for fine dwell adjustment in the configuration panel.
pub const DWELL_STEP_MS: u32 = 100;

/// Smallest dwell time the configuration panel will set.
pub const MIN_DWELL_MS: u32 = 100;

/// Maximum number of word tiles per grid row.
pub const TILES_PER_ROW: usize = 10;

/// Number of spoken phrases kept in the history.
pub const HISTORY_LEN: usize = 10;

/// Phrase spoken by the "test voice" control.
pub const VOICE_TEST_PHRASE: &str = "I am your selected voice";
