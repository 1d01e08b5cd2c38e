//! Text glyphs for player controls.
//!
//! Plain text in the default font, so no icon font ships with the binary.

/// Play - shown while paused
pub const PLAY: &str = "|>";

/// Pause - shown while playing
pub const PAUSE: &str = "||";

pub const PREVIOUS: &str = "|<";
pub const NEXT: &str = ">|";

/// Artwork placeholder
pub const NOTE: &str = "♪";

/// Back navigation
pub const BACK: &str = "<  Back";

/// Glyph for the play/pause button. Mirrors `is_playing` exactly.
pub fn play_pause(is_playing: bool) -> &'static str {
    if is_playing { PAUSE } else { PLAY }
}
