//! Player panel: the collapsed bar and the expanded sheet.
//!
//! Both are backed by the average colour of the song's artwork and wrapped in
//! a `mouse_area` that reports raw pointer input for gesture recognition.
//! Every button in the panel is enabled and the slider captures its own
//! presses, so no control click falls through to toggle the panel.

use iced::alignment::Horizontal;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{Space, button, column, container, mouse_area, row, scrollable, slider, text};
use iced::{Alignment, Element, Length, mouse};

use crate::model::Song;
use crate::ui::icons;
use crate::ui::messages::Message;
use crate::ui::panel::PanelMode;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, layout, radius, spacing, typography};

use super::helpers::artwork;

/// The panel overlay for a shell of `height` pixels, if a song is selected.
pub fn player_panel(s: &AppState, height: f32) -> Option<Element<'_, Message>> {
    let song = s.media.current_song()?;
    let panel = match s.panel.mode(&s.media) {
        PanelMode::Hidden => return None,
        PanelMode::Collapsed => collapsed(s, song),
        PanelMode::Expanded | PanelMode::Dragging => expanded(s, song, height),
    };
    Some(panel)
}

/// Forward pointer input over `content` to the gesture recogniser.
///
/// `height` is the height of the area itself; drag limits are fractions of it.
fn gesture_area<'a>(content: impl Into<Element<'a, Message>>, height: f32) -> Element<'a, Message> {
    mouse_area(content)
        .on_move(move |point| Message::PanelPointerMoved { y: point.y, height })
        .on_press(Message::PanelPressed)
        .on_release(Message::PanelReleased)
        .on_exit(Message::PanelPointerLeft)
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn play_pause_button<'a>(s: &AppState, size: f32) -> Element<'a, Message> {
    let glyph = icons::play_pause(s.controller.is_playing());
    // Always enabled so presses never fall through to the panel
    button(container(text(glyph).size(size * 0.4)).center(Length::Fixed(size)))
        .padding(0)
        .style(theme::button_transport)
        .on_press(Message::PlayerToggle)
        .into()
}

// ============================================================================
// Collapsed
// ============================================================================

fn collapsed<'a>(s: &'a AppState, song: &'a Song) -> Element<'a, Message> {
    let tint = s.artwork.tint(&song.image_large_url);
    let info = column![
        text(&song.title)
            .size(typography::SIZE_BODY)
            .color(color::TEXT_PRIMARY),
        text(&song.display_name)
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
    ]
    .spacing(2)
    .width(Length::Fill);

    let bar = container(
        row![
            artwork(s, &song.image_large_url, layout::BAR_THUMB),
            info,
            play_pause_button(s, layout::BAR_THUMB),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center),
    )
    .padding([0, spacing::MD])
    .height(Length::Fixed(layout::PLAYER_BAR_HEIGHT))
    .width(Length::Fill)
    .align_y(iced::alignment::Vertical::Center)
    .style(move |_| theme::player_bar_style(tint));

    // Anchored above the tab bar; the space above passes input through
    column![
        Space::with_height(Length::Fill),
        container(gesture_area(bar, layout::PLAYER_BAR_HEIGHT)).padding([0.0, layout::BAR_INSET]),
        Space::with_height(Length::Fixed(layout::TAB_BAR_HEIGHT + layout::BAR_INSET)),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

// ============================================================================
// Expanded
// ============================================================================

/// Height of the expanded sheet inside a shell of `height` pixels.
fn sheet_height(height: f32) -> f32 {
    (height - layout::SHEET_TOP_INSET).max(0.0)
}

fn expanded<'a>(s: &'a AppState, song: &'a Song, height: f32) -> Element<'a, Message> {
    let sheet_height = sheet_height(height);
    let tint = s.artwork.tint(&song.image_large_url);
    let offset = s.panel.drag_offset().max(0.0);

    let handle = container(Space::new(
        Length::Fixed(layout::HANDLE_WIDTH),
        Length::Fixed(layout::HANDLE_HEIGHT),
    ))
    .style(|_| theme::rounded_style(color::TEXT_MUTED, radius::PILL));

    let titles = column![
        text(&song.title)
            .size(typography::SIZE_HEADING)
            .color(color::TEXT_PRIMARY),
        text(&song.display_name)
            .size(typography::SIZE_BODY)
            .color(color::TEXT_SECONDARY),
    ]
    .spacing(spacing::XS)
    .align_x(Alignment::Center);

    let sheet = container(
        column![
            handle,
            Space::with_height(spacing::LG),
            artwork(s, &song.image_large_url, layout::ARTWORK_LARGE),
            titles,
            progress(s),
            controls(s),
        ]
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sheet_height))
    .align_x(Horizontal::Center)
    .style(move |_| theme::sheet_style(tint));

    // The scrollable lays its content out unbounded, so the sheet keeps its
    // size and slides down by `offset` instead of being squeezed.
    let track = scrollable(column![Space::with_height(Length::Fixed(offset)), sheet])
        .direction(Direction::Vertical(Scrollbar::new().width(0).scroller_width(0)))
        .width(Length::Fill)
        .height(Length::Fill);

    column![
        Space::with_height(Length::Fixed(layout::SHEET_TOP_INSET)),
        gesture_area(track, sheet_height),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Slider with elapsed and total time, or a status line while it can't be used.
fn progress<'a>(s: &AppState) -> Element<'a, Message> {
    let status = s.controller.status();

    if s.controller.cannot_play() {
        return status_line("Can't play this song", color::ERROR);
    }
    if !status.has_duration() {
        return status_line("Loading...", color::TEXT_SECONDARY);
    }

    let value = s.panel.display_time(&status).clamp(0.0, status.duration);
    let seek = slider(0.0..=status.duration, value, Message::PlayerSeekChanged)
        .on_release(Message::PlayerSeekReleased)
        .step(1.0)
        .style(theme::slider_style);

    let times = row![
        text(crate::player::time_string(value))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
        Space::with_width(Length::Fill),
        text(status.duration_str())
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
    ];

    column![seek, times]
        .spacing(spacing::XS)
        .width(Length::Fill)
        .into()
}

fn status_line<'a>(label: &'a str, tint: iced::Color) -> Element<'a, Message> {
    container(text(label).size(typography::SIZE_BODY).color(tint))
        .center_x(Length::Fill)
        .height(Length::Fixed(36.0))
        .into()
}

/// Previous / play-pause / next. Skipping has no queue to act on yet, but the
/// buttons stay enabled so a press never reaches the gesture area.
fn controls<'a>(s: &AppState) -> Element<'a, Message> {
    let skip = |glyph: &'static str, message: Message| {
        button(text(glyph).size(typography::SIZE_HEADING))
            .padding(spacing::MD)
            .style(theme::button_bare)
            .on_press(message)
    };

    row![
        skip(icons::PREVIOUS, Message::PlayerPrevious),
        play_pause_button(s, 64.0),
        skip(icons::NEXT, Message::PlayerNext),
    ]
    .spacing(spacing::XL)
    .align_y(Alignment::Center)
    .into()
}
