//! AAC Board Library
//!
//! A terminal communication board: word tiles that speak when activated by
//! hovering (dwell) or clicking. The activation dispatcher in [`activation`]
//! keeps exactly one behavior bound per visible element whatever the board
//! or the settings do.

// Module declarations
pub mod activation;
pub mod board;
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod shortcuts;
pub mod speech;
pub mod tui;
