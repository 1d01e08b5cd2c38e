//! Pocket Player - a small music player with a swipeable now-playing panel.
//!
//! Browse songs by category, pick one, and control playback from a bar that
//! expands into a full player. It can be run as a GUI application or used via
//! CLI commands to inspect the catalog.

// Hide console window on Windows when running as GUI
// CLI commands will attach to the parent console or allocate one
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod artwork;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod player;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use iced::{Size, application, window};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use catalog::Catalog;
use ui::PocketPlayer;

/// Window icon edge in pixels
const ICON_SIZE: u32 = 32;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // If running CLI commands on Windows, attach to console for output
    #[cfg(target_os = "windows")]
    if args.command.is_some() {
        attach_console();
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("pocket_player=info".parse()?))
        .init();

    let config = config::load();

    // Try to run a CLI command
    if cli::run_command(&args, &config)? {
        // A command was executed, exit normally
        return Ok(());
    }

    let catalog = Catalog::resolve(args.catalog_path(&config).as_deref())?;
    tracing::info!("Loaded catalog with {} songs", catalog.len());

    let window_size = Size::new(config.window.width, config.window.height);

    // No command specified, launch the GUI
    application("Pocket Player", PocketPlayer::update, PocketPlayer::view)
        .subscription(PocketPlayer::subscription)
        .theme(PocketPlayer::theme)
        .window(window::Settings {
            size: window_size,
            icon: app_icon(),
            ..Default::default()
        })
        .run_with(move || PocketPlayer::new(config, catalog))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// Purple disc with a lighter center, drawn at startup
fn app_icon() -> Option<window::Icon> {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let image = image::RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let d = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
        if d > center {
            image::Rgba([0, 0, 0, 0])
        } else if d < center / 3.0 {
            image::Rgba([0xf4, 0xf4, 0xf5, 0xff])
        } else {
            image::Rgba([0xa8, 0x55, 0xf7, 0xff])
        }
    });
    window::icon::from_rgba(image.into_raw(), ICON_SIZE, ICON_SIZE).ok()
}

/// Attach to parent console on Windows for CLI output.
/// This is needed because windows_subsystem = "windows" detaches from console.
#[cfg(target_os = "windows")]
fn attach_console() {
    use windows_sys::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
    unsafe {
        // Try to attach to parent console (e.g., PowerShell, cmd)
        // If that fails, we just won't have console output (acceptable for GUI launch)
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
