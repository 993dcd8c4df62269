//! # Isovox Desktop
//!
//! Native desktop host for the isometric sculpture editor using
//! winit + wgpu.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p isovox-desktop
//! ```
//!
//! ## With the AI collaborator enabled:
//!
//! ```bash
//! ISOVOX_API_KEY=... cargo run -p isovox-desktop
//! ```
//!
//! ## Controls
//!
//! - Left click: apply the active tool at the hovered face
//! - `a` / `r` / `p`: Add, Remove, Paint tool
//! - `[` / `]`: cycle the palette
//! - `u`: undo, `x`: clear
//! - `c`: request a critique, `m`: request a remix
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesktopConfig` - Window size, title, and collaborator settings
//! - `SculptApp` - Main application implementing `ApplicationHandler`
//! - Uses `isovox-renderer::WgpuBackend` for presentation

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;

pub use app::{CollabEvent, SculptApp};

use clap::Parser;

/// Command-line arguments for isovox-desktop.
#[derive(Debug, Clone, Parser)]
#[command(name = "isovox-desktop")]
#[command(about = "Isovox native desktop sculpture editor")]
#[command(version)]
pub struct CliArgs {
    /// API key for the AI collaborator
    #[arg(long, env = "ISOVOX_API_KEY")]
    pub api_key: Option<String>,

    /// Collaborator endpoint override (e.g., a local proxy)
    #[arg(long, env = "ISOVOX_COLLAB_URL")]
    pub collab_url: Option<String>,

    /// Window width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Start with an empty grid instead of the seed block
    #[arg(long)]
    pub empty: bool,
}

/// Desktop application configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// API key for the AI collaborator, if configured.
    pub api_key: Option<String>,
    /// Collaborator endpoint override.
    pub collab_url: Option<String>,
    /// Whether to seed the sculpture with one starting block.
    pub seed: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopConfig {
    /// Create a new desktop configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Isovox".to_string(),
            api_key: None,
            collab_url: None,
            seed: true,
        }
    }
}

impl From<CliArgs> for DesktopConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            title: "Isovox".to_string(),
            api_key: args.api_key,
            collab_url: args.collab_url,
            seed: !args.empty,
        }
    }
}
