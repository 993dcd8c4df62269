//! Desktop application using winit 0.30 `ApplicationHandler`.

use std::sync::Arc;

use anyhow::Result;
use isovox_core::{EditorSession, ToolMode, PALETTE};
use isovox_collab::{CollabClient, CollabResult, RemixBlueprint, SculptureAnalysis};
use isovox_renderer::backend::wgpu::WgpuBackend;
use isovox_renderer::{build_frame, RenderBackend};
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::Key,
    window::{Window, WindowAttributes, WindowId},
};

use crate::DesktopConfig;

/// Collaborator responses delivered back to the event loop.
#[derive(Debug)]
pub enum CollabEvent {
    /// Result of a critique request.
    Critique(CollabResult<SculptureAnalysis>),
    /// Result of a remix request.
    Remix(CollabResult<RemixBlueprint>),
}

/// Desktop sculpture editor application.
///
/// Manages the winit window and wgpu renderer lifecycle using the
/// `ApplicationHandler` trait introduced in winit 0.30, and dispatches
/// collaborator requests onto a tokio runtime.
pub struct SculptApp {
    config: DesktopConfig,
    session: EditorSession,
    palette_index: usize,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuBackend>,
    collab: Option<CollabClient>,
    runtime: Runtime,
    proxy: EventLoopProxy<CollabEvent>,
}

impl SculptApp {
    /// Create a new desktop application with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator client or the tokio runtime
    /// fails to build.
    #[allow(clippy::cast_precision_loss)] // Window dimensions fit in f32
    pub fn new(config: DesktopConfig, proxy: EventLoopProxy<CollabEvent>) -> Result<Self> {
        let mut session = EditorSession::new(config.width as f32, config.height as f32);
        if config.seed {
            session = session.with_seed_block();
        }

        let collab = match config.api_key.as_deref() {
            Some(key) => {
                let client = match config.collab_url.as_deref() {
                    Some(url) => CollabClient::with_endpoint(url, key)?,
                    None => CollabClient::new(key)?,
                };
                tracing::info!("collaborator enabled");
                Some(client)
            }
            None => {
                tracing::info!("no API key configured, collaborator disabled");
                None
            }
        };

        Ok(Self {
            config,
            session,
            palette_index: 0,
            window: None,
            renderer: None,
            collab,
            runtime: Runtime::new()?,
            proxy,
        })
    }

    /// Initialize the renderer with the current window.
    fn init_renderer(&mut self, window: Arc<Window>) -> Result<()> {
        let backend = WgpuBackend::from_window(window.clone())?;

        self.renderer = Some(backend);
        self.window = Some(window);

        tracing::info!("Renderer initialized successfully");

        Ok(())
    }

    /// Handle window resize.
    #[allow(clippy::cast_precision_loss)]
    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.session.set_viewport(size.width as f32, size.height as f32);
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.resize(size.width, size.height) {
                tracing::error!("Failed to resize renderer: {e}");
            }
        }
    }

    /// Render the current session state.
    fn render(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            let frame = build_frame(&self.session);
            if let Err(e) = renderer.render(&frame) {
                tracing::error!("Render error: {e}");
            }
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_key(&mut self, key: &str) {
        match key {
            "a" => self.session.set_tool(ToolMode::Add),
            "r" => self.session.set_tool(ToolMode::Remove),
            "p" => self.session.set_tool(ToolMode::Paint),
            "[" => self.cycle_palette(PALETTE.len() - 1),
            "]" => self.cycle_palette(1),
            "u" => {
                if !self.session.undo() {
                    tracing::debug!("nothing to undo");
                }
            }
            "x" => {
                self.session.clear();
            }
            "c" => self.request_critique(),
            "m" => self.request_remix(),
            _ => return,
        }
        self.request_redraw();
    }

    fn cycle_palette(&mut self, step: usize) {
        self.palette_index = (self.palette_index + step) % PALETTE.len();
        self.session.set_active_color(PALETTE[self.palette_index]);
    }

    fn request_critique(&self) {
        let Some(client) = self.collab.clone() else {
            tracing::warn!("critique requested but no API key is configured");
            return;
        };
        if self.session.store().is_empty() {
            tracing::warn!("critique requested for an empty sculpture");
            return;
        }

        let blocks = self.session.store().blocks();
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let result = client.critique(&blocks).await;
            if proxy.send_event(CollabEvent::Critique(result)).is_err() {
                tracing::warn!("event loop closed before the critique arrived");
            }
        });
    }

    fn request_remix(&self) {
        let Some(client) = self.collab.clone() else {
            tracing::warn!("remix requested but no API key is configured");
            return;
        };
        if self.session.store().is_empty() {
            tracing::warn!("remix requested for an empty sculpture");
            return;
        }

        let blocks = self.session.store().blocks();
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let result = client.remix(&blocks).await;
            if proxy.send_event(CollabEvent::Remix(result)).is_err() {
                tracing::warn!("event loop closed before the remix arrived");
            }
        });
    }

    fn handle_critique(&self, result: CollabResult<SculptureAnalysis>) {
        match result {
            Ok(analysis) => {
                tracing::info!(
                    title = %analysis.title,
                    style = %analysis.style,
                    integrity = analysis.integrity(),
                    "critique: {}",
                    analysis.description
                );
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} - {}", analysis.title, self.config.title));
                }
            }
            Err(e) => tracing::warn!("critique failed: {e}"),
        }
    }

    fn handle_remix(&mut self, result: CollabResult<RemixBlueprint>) {
        match result {
            Ok(blueprint) => {
                tracing::info!(name = %blueprint.name, "remix: {}", blueprint.description);
                match self.session.apply_remix(blueprint.blocks) {
                    Ok(()) => self.request_redraw(),
                    // The sculpture changed while the request was in
                    // flight, so the proposal no longer matches it.
                    Err(e) => tracing::warn!("remix discarded: {e}"),
                }
            }
            Err(e) => tracing::warn!("remix failed: {e}"),
        }
    }
}

impl ApplicationHandler<CollabEvent> for SculptApp {
    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        tracing::info!("App suspended - dropping surface to free resources");
        if let Some(renderer) = &mut self.renderer {
            renderer.drop_surface();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        tracing::debug!("ApplicationHandler::resumed called");

        // If we have a window but the renderer lost its surface, recreate it
        if let Some(window) = &self.window {
            if let Some(renderer) = &self.renderer {
                if !renderer.has_surface() {
                    tracing::info!("Recreating renderer after resume");
                    let window = Arc::clone(window);
                    self.renderer = None;
                    if let Err(e) = self.init_renderer(window) {
                        tracing::error!("Failed to recreate renderer: {e}");
                        event_loop.exit();
                        return;
                    }
                    self.request_redraw();
                    return;
                }
            }
        }

        // Only create the window if we don't have one
        if self.window.is_some() {
            tracing::debug!("Window already exists, skipping creation");
            return;
        }

        tracing::debug!(
            "Creating window with size {}x{}",
            self.config.width,
            self.config.height
        );

        let attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                tracing::debug!("Window created successfully");
                let window = Arc::new(window);
                if let Err(e) = self.init_renderer(window) {
                    tracing::error!("Failed to initialize renderer: {e}");
                    event_loop.exit();
                } else {
                    tracing::debug!("Renderer initialization complete");
                    self.request_redraw();
                }
            }
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                tracing::debug!("Window resized to {}x{}", size.width, size.height);
                self.handle_resize(size);
                self.request_redraw();
            }
            #[allow(clippy::cast_possible_truncation)]
            WindowEvent::CursorMoved { position, .. } => {
                self.session
                    .pointer_moved(position.x as f32, position.y as f32);
                self.request_redraw();
            }
            WindowEvent::CursorLeft { .. } => {
                self.session.pointer_left();
                self.request_redraw();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.session.pointer_down().is_applied() {
                    self.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Key::Character(c) = &event.logical_key {
                        self.handle_key(c.as_str());
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!("Scale factor changed to {scale_factor}");
                let new_size = self.window.as_ref().map(|w| w.inner_size());
                if let Some(size) = new_size {
                    self.handle_resize(size);
                }
                self.request_redraw();
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: CollabEvent) {
        match event {
            CollabEvent::Critique(result) => self.handle_critique(result),
            CollabEvent::Remix(result) => self.handle_remix(result),
        }
    }
}
