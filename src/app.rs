//! # App Module
//!
//! [`App`] is the [`winit`] application handler. It performs the one-time setup when the event
//! loop resumes and forwards redraw and close events to the [`RenderLoop`]. A fatal setup error is
//! stored and the event loop asked to exit; `main` picks it up afterwards.

use std::time::Instant;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::config::Config;
use crate::geometry::TRIANGLE;
use crate::render::Renderer;
use crate::render_loop::{LoopEvent, RenderLoop};
use crate::shader;
use crate::window::Window;

/// Everything that exists between setup and close. Fields drop in order, so the GPU objects are
/// released while the window's context is still alive.
struct Running {
    render_loop: RenderLoop<glow::Context>,
    window: Window,
}

pub struct App {
    config: Config,
    started: Instant,
    running: Option<Running>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started: Instant::now(),
            running: None,
            error: None,
        }
    }

    /// Takes the error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let (window, gl) =
            Window::create(event_loop, &self.config).context("failed to create window")?;

        let program = shader::load_program(
            &gl,
            &self.config.vertex_shader,
            &self.config.fragment_shader,
        )
        .context("failed to build shader program")?;

        let size = window.inner_size();
        let renderer = Renderer::new(
            gl,
            program,
            &TRIANGLE,
            (size.width as i32, size.height as i32),
            self.config.clear_color,
        )
        .context("failed to upload triangle")?;

        renderer.clear();
        if let Err(e) = window.present() {
            log::error!("failed to present first frame: {e}");
        }

        Ok(Running {
            render_loop: RenderLoop::new(renderer, self.started.elapsed()),
            window,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.running = None;
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                running
                    .render_loop
                    .handle(LoopEvent::CloseRequested, &running.window);
                self.running = None;
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let elapsed = self.started.elapsed();
                running
                    .render_loop
                    .handle(LoopEvent::Redraw { elapsed }, &running.window);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            if !running.render_loop.is_closed() {
                running.window.request_redraw();
            }
        }
    }
}
