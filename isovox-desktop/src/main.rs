//! # Isovox Desktop
//!
//! Native desktop entry point for the sculpture editor.

use clap::Parser;
use isovox_desktop::{CliArgs, CollabEvent, DesktopConfig, SculptApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::event_loop::EventLoop;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "isovox_desktop=debug,isovox_renderer=debug,wgpu=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Isovox Desktop");

    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = DesktopConfig::from(args);

    tracing::info!(
        "Window config: {}x{} \"{}\"",
        config.width,
        config.height,
        config.title
    );

    // Create and run event loop; collaborator responses arrive as user events
    tracing::debug!("Creating event loop");
    let event_loop = EventLoop::<CollabEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    tracing::debug!("Creating SculptApp");
    let mut app = SculptApp::new(config, proxy)?;

    tracing::debug!("Event loop created, starting run_app");
    let result = event_loop.run_app(&mut app);
    tracing::debug!("run_app returned: {:?}", result);
    result?;

    tracing::info!("Isovox Desktop exited");
    Ok(())
}
