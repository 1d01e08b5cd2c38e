//! View rendering functions for the UI components.
//!
//! This module is organized into submodules by concern:
//! - `shell`: Tab shell, tab bar and the player overlay
//! - `browse`: Category rows on the Home tab
//! - `song_list`: Songs of one category
//! - `panel`: Collapsed bar and expanded player sheet
//! - `placeholder`: Tabs without content yet

mod browse;
pub mod helpers;
mod panel;
mod placeholder;
mod shell;
mod song_list;

pub use shell::shell;
