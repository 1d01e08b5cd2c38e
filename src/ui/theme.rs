//! Palette, metrics and widget styles.
//!
//! Dark grays with a purple accent. Category tiles bring their own colour
//! ([`SongType::tint`](crate::model::SongType::tint)) and the player panel
//! picks up the average colour of the current artwork.

use iced::border::Radius;
use iced::gradient::Linear;
use iced::theme::Palette;
use iced::widget::{button, container, slider};
use iced::{Background, Border, Color, Gradient, Radians, Theme};

/// `0xRRGGBB` as an opaque colour.
const fn hex(rgb: u32) -> Color {
    Color::from_rgb(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

pub mod color {
    use super::hex;
    use iced::Color;

    pub const BASE: Color = hex(0x121215);
    /// Tab bar and collapsed player
    pub const SURFACE: Color = hex(0x1a1a1f);
    /// Expanded player sheet
    pub const SURFACE_ELEVATED: Color = hex(0x232328);
    /// Hover states and artwork placeholders
    pub const SURFACE_HOVER: Color = hex(0x2a2a30);

    pub const TEXT_PRIMARY: Color = hex(0xf4f4f5);
    pub const TEXT_SECONDARY: Color = hex(0xa1a1aa);
    pub const TEXT_MUTED: Color = hex(0x71717a);

    pub const PRIMARY: Color = hex(0xa855f7);
    pub const PRIMARY_HOVER: Color = hex(0xc084fc);
    pub const PRIMARY_PRESSED: Color = hex(0x9333ea);

    /// "Can't play this song"
    pub const ERROR: Color = hex(0xef4444);

    pub const fn with_alpha(color: Color, alpha: f32) -> Color {
        Color { a: alpha, ..color }
    }

    /// Blend `amount` of `tint` into `base`.
    pub fn mix(base: Color, tint: [u8; 3], amount: f32) -> Color {
        let t = amount.clamp(0.0, 1.0);
        let [r, g, b] = tint.map(|c| f32::from(c) / 255.0);
        Color::from_rgb(
            base.r + (r - base.r) * t,
            base.g + (g - base.g) * t,
            base.b + (b - base.b) * t,
        )
    }
}

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

/// Fixed sizes in logical pixels.
pub mod layout {
    pub const TILE_SIZE: f32 = 150.0;
    pub const PLAYER_BAR_HEIGHT: f32 = 60.0;
    pub const BAR_THUMB: f32 = 40.0;
    pub const ROW_THUMB: f32 = 48.0;
    pub const ARTWORK_LARGE: f32 = 250.0;
    pub const TAB_BAR_HEIGHT: f32 = 56.0;
    /// Gap between the collapsed bar and the window edges
    pub const BAR_INSET: f32 = 5.0;
    /// Window area left visible above the expanded sheet
    pub const SHEET_TOP_INSET: f32 = 60.0;
    pub const HANDLE_WIDTH: f32 = 40.0;
    pub const HANDLE_HEIGHT: f32 = 5.0;
}

pub mod typography {
    pub const SIZE_TITLE: u16 = 24;
    pub const SIZE_HEADING: u16 = 18;
    pub const SIZE_BODY: u16 = 14;
    pub const SIZE_SMALL: u16 = 12;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const TILE: f32 = 20.0;
    pub const PILL: f32 = 9999.0;
}

/// Share of the artwork colour in the panel backgrounds.
const BAR_TINT: f32 = 0.35;
const SHEET_TINT: f32 = 0.55;

pub fn app_theme() -> Theme {
    Theme::custom(
        "Pocket".to_string(),
        Palette {
            background: color::BASE,
            text: color::TEXT_PRIMARY,
            primary: color::PRIMARY,
            success: hex(0x22c55e),
            danger: color::ERROR,
        },
    )
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

pub fn container_style(bg: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

pub fn rounded_style(bg: Color, corner: f32) -> container::Style {
    container::Style {
        border: Border {
            radius: corner.into(),
            ..Default::default()
        },
        ..container_style(bg)
    }
}

/// Collapsed player, washed with the artwork colour when there is one.
pub fn player_bar_style(tint: Option<[u8; 3]>) -> container::Style {
    let bg = tint.map_or(color::SURFACE, |t| color::mix(color::SURFACE, t, BAR_TINT));
    container::Style {
        border: Border {
            color: color::SURFACE_HOVER,
            width: 1.0,
            radius: radius::LG.into(),
        },
        ..container_style(bg)
    }
}

/// Expanded sheet: artwork colour at the top fading into the surface.
pub fn sheet_style(tint: Option<[u8; 3]>) -> container::Style {
    let background = match tint {
        Some(t) => Background::Gradient(Gradient::Linear(
            Linear::new(Radians(std::f32::consts::PI))
                .add_stop(0.0, color::mix(color::SURFACE_ELEVATED, t, SHEET_TINT))
                .add_stop(0.7, color::SURFACE_ELEVATED),
        )),
        None => Background::Color(color::SURFACE_ELEVATED),
    };
    container::Style {
        background: Some(background),
        border: Border {
            radius: Radius::default().top(radius::LG),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn tile_style(rgb: [f32; 3]) -> container::Style {
    let [r, g, b] = rgb;
    container::Style {
        text_color: Some(color::TEXT_PRIMARY),
        ..rounded_style(Color::from_rgb(r, g, b), radius::TILE)
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// No chrome; the content draws itself.
pub fn button_bare(_theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Disabled => color::TEXT_MUTED,
            _ => color::TEXT_PRIMARY,
        },
        ..Default::default()
    }
}

/// Rows and back navigation.
pub fn button_ghost(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => color::SURFACE_HOVER,
        button::Status::Pressed => color::SURFACE_ELEVATED,
        button::Status::Active | button::Status::Disabled => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: match status {
            button::Status::Disabled => color::TEXT_MUTED,
            _ => color::TEXT_PRIMARY,
        },
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Round play/pause button.
pub fn button_transport(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active => color::PRIMARY,
        button::Status::Hovered => color::PRIMARY_HOVER,
        button::Status::Pressed => color::PRIMARY_PRESSED,
        button::Status::Disabled => color::SURFACE_HOVER,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: color::TEXT_PRIMARY,
        border: Border {
            radius: radius::PILL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn button_tab(_theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered | button::Status::Pressed => color::TEXT_SECONDARY,
            _ => color::TEXT_MUTED,
        },
        ..Default::default()
    }
}

pub fn button_tab_active(_theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Pressed => color::PRIMARY_PRESSED,
            _ => color::PRIMARY,
        },
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

pub fn slider_style(_theme: &Theme, status: slider::Status) -> slider::Style {
    let fill = match status {
        slider::Status::Active => color::PRIMARY,
        slider::Status::Hovered => color::PRIMARY_HOVER,
        slider::Status::Dragged => color::PRIMARY_PRESSED,
    };
    slider::Style {
        rail: slider::Rail {
            backgrounds: (
                Background::Color(fill),
                Background::Color(color::SURFACE_HOVER),
            ),
            width: 4.0,
            border: Border {
                radius: 2.0.into(),
                ..Default::default()
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle { radius: 7.0 },
            background: Background::Color(color::TEXT_PRIMARY),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
