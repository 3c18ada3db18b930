//! # Window Module
//!
//! The `window` module uses [`winit`] to create the OS window and [`glutin`] to attach an OpenGL
//! context and surface to it. [`raw_window_handle`] supplies the native window handle the context
//! is created against, and [`glow`] loads the GL functions once the context is current.

use std::num::NonZeroU32;

use glutin::{
    config::{Config as GlutinConfig, ConfigTemplateBuilder, GlConfig},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::NotCurrentGlContext,
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::{HandleError, HasWindowHandle};
use thiserror::Error;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window as WinitWindow,
};

use crate::config::Config;
use crate::render_loop::Present;

/// Custom error types for window, context and surface creation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WindowError {
    /// winit or the GL display could not produce a window with a usable config.
    #[error("failed to create window: {0}")]
    Create(String),

    /// The display picked a config but returned no window for it.
    #[error("display returned no window")]
    Missing,

    /// raw-window-handle failed to retrieve the window handle.
    #[error(transparent)]
    BadHandle(#[from] HandleError),

    /// glutin failed to create or bind the context or surface.
    #[error(transparent)]
    Context(#[from] glutin::error::Error),
}

/// An OS window with a current OpenGL context and its presentable surface.
///
/// Fields drop in declaration order: context, surface, then the window they were created for.
pub struct Window {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    inner: WinitWindow,
}

impl Window {
    /// Creates a fixed-size window, a core-profile context of the configured version and a window
    /// surface, makes the context current and loads GL functions through it.
    ///
    /// # Errors
    ///
    /// - [`WindowError::Create`]
    /// - [`WindowError::Missing`]
    /// - [`WindowError::BadHandle`]
    /// - [`WindowError::Context`]
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &Config,
    ) -> Result<(Self, glow::Context), WindowError> {
        let attributes = WinitWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| WindowError::Create(e.to_string()))?;
        let window = window.ok_or(WindowError::Missing)?;

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(window.window_handle()?.as_raw()));

        let display = gl_config.display();

        // SAFETY: the raw window handle passed to the context and surface belongs to `window`,
        // which is stored alongside them and outlives both.
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes)? };
        let surface_attributes =
            window.build_surface_attributes(SurfaceAttributesBuilder::default())?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        // SAFETY: the context was made current on this thread just above.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };

        let size = window.inner_size();
        log::info!(
            "window has been created successfully ({}x{}, OpenGL {major}.{minor} core)",
            size.width,
            size.height
        );

        Ok((
            Self {
                context,
                surface,
                inner: window,
            },
            gl,
        ))
    }

    /// Physical size of the drawable area in pixels.
    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.inner.inner_size()
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Swaps the back buffer to the screen.
    ///
    /// # Errors
    ///
    /// - [`WindowError::Context`]
    pub fn present(&self) -> Result<(), WindowError> {
        Ok(self.surface.swap_buffers(&self.context)?)
    }
}

impl Present for Window {
    type Error = WindowError;

    fn present(&self) -> Result<(), WindowError> {
        Window::present(self)
    }
}

/// Picks a single-sampled config when the display offers one, matching a default framebuffer with
/// no multisampling.
fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig {
    fewest_samples(configs, |config| config.num_samples())
        // glutin only calls the picker after finding at least one matching config.
        .expect("display offered no GL configs")
}

/// First config with the lowest sample count.
fn fewest_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.min_by_key(|config| samples(config))
}
