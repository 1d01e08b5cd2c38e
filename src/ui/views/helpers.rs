//! Helper functions shared across view components.

use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};

use crate::ui::icons;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, radius};

/// Square artwork for `url`, or a placeholder while it is missing.
pub fn artwork<'a>(s: &AppState, url: &str, size: f32) -> Element<'a, Message> {
    match s.artwork.handle(url) {
        Some(handle) => image(handle)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(ContentFit::Cover)
            .into(),
        None => artwork_placeholder(size),
    }
}

/// Rounded square with a note glyph.
pub fn artwork_placeholder<'a>(size: f32) -> Element<'a, Message> {
    let corner = if size > 100.0 { radius::LG } else { radius::SM };
    container(
        text(icons::NOTE)
            .size(size * 0.4)
            .color(color::TEXT_MUTED),
    )
    .center(Length::Fixed(size))
    .style(move |_| theme::rounded_style(color::SURFACE_HOVER, corner))
    .into()
}

/// "1 song" / "N songs"
pub fn song_count(n: usize) -> String {
    if n == 1 {
        "1 song".to_string()
    } else {
        format!("{n} songs")
    }
}
