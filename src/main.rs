//! # Hello Triangle
//!
//! This binary uses [`winit`] for the window and event loop, [`glutin`] for the OpenGL context
//! and [`glow`] for GL calls. It compiles a vertex/fragment shader pair from `shaders/`, uploads a
//! single triangle and redraws it every frame while logging the frame rate once per second.

mod app;
mod config;
mod fps;
mod geometry;
mod gl;
mod logging;
mod render;
mod render_loop;
mod shader;
mod window;

use std::process::ExitCode;

use anyhow::{Context, Result};
use app::App;
use config::Config;
use winit::event_loop::{ControlFlow, EventLoop};

/// Exit status for a fatal setup error: `-1` as a POSIX shell observes it.
const FAILURE: u8 = 255;

fn main() -> ExitCode {
    logging::init();

    match run(Config::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(FAILURE)
        }
    }
}

fn run(config: Config) -> Result<()> {
    let mut app = App::new(config);
    let event_loop = EventLoop::new().context("failed to create event loop")?;

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
