//! Tabs that only show their title.

use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::Tab;
use crate::ui::theme::{color, spacing, typography};

pub fn placeholder<'a>(tab: Tab) -> Element<'a, Message> {
    container(
        column![
            text(tab.title())
                .size(typography::SIZE_TITLE)
                .color(color::TEXT_PRIMARY),
            text("Nothing here yet")
                .size(typography::SIZE_BODY)
                .color(color::TEXT_MUTED),
        ]
        .spacing(spacing::SM)
        .align_x(Alignment::Center),
    )
    .center(Length::Fill)
    .into()
}
