//! Per-frame state machine: one `Rendering` state, left only by a close request.

use std::fmt::Display;
use std::time::Duration;

use crate::fps::FpsCounter;
use crate::gl::Gl;
use crate::render::Renderer;

/// Input to one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Render a frame. `elapsed` is the time since the loop started.
    Redraw { elapsed: Duration },

    /// The windowing system asked to close the window.
    CloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A frame was drawn and presented. `fps` carries the frame count when a one-second report
    /// fired on this frame.
    Rendering { fps: Option<u32> },

    /// Terminal. GPU objects have been released.
    Closed,
}

/// Something a finished frame can be shown on.
pub trait Present {
    type Error: Display;

    fn present(&self) -> Result<(), Self::Error>;
}

/// Owns the renderer and the frame counter for the lifetime of the loop.
pub struct RenderLoop<G: Gl> {
    renderer: Option<Renderer<G>>,
    fps: FpsCounter,
}

impl<G: Gl> RenderLoop<G> {
    pub fn new(renderer: Renderer<G>, start: Duration) -> Self {
        Self {
            renderer: Some(renderer),
            fps: FpsCounter::new(start),
        }
    }

    /// Runs one iteration.
    ///
    /// A redraw ticks the frame counter, logging a report once per second, then clears, draws and
    /// presents to `target`. A failed present is logged and the loop keeps rendering. A close
    /// request releases the renderer. Every event after close is ignored.
    pub fn handle<P: Present>(&mut self, event: LoopEvent, target: &P) -> LoopState {
        match event {
            LoopEvent::Redraw { elapsed } => {
                let Some(renderer) = &self.renderer else {
                    return LoopState::Closed;
                };

                let fps = self.fps.tick(elapsed);
                if let Some(frames) = fps {
                    log::info!("Fps: {frames}");
                }

                renderer.draw();
                if let Err(e) = target.present() {
                    log::error!("failed to present frame: {e}");
                }

                LoopState::Rendering { fps }
            }
            LoopEvent::CloseRequested => {
                if self.renderer.take().is_some() {
                    log::info!("close requested; render loop stopped");
                }
                LoopState::Closed
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.renderer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::render::tests::renderer;

    /// Counts presents; fails every one when `broken` is set.
    #[derive(Default)]
    struct Screen {
        presented: Cell<u32>,
        broken: bool,
    }

    impl Present for Screen {
        type Error = &'static str;

        fn present(&self) -> Result<(), Self::Error> {
            self.presented.set(self.presented.get() + 1);
            if self.broken { Err("surface lost") } else { Ok(()) }
        }
    }

    fn redraw(ms: u64) -> LoopEvent {
        LoopEvent::Redraw {
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn each_redraw_draws_and_presents_once() {
        let (renderer, gl) = renderer();
        let screen = Screen::default();
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        for ms in [16, 33, 50] {
            assert_eq!(
                render_loop.handle(redraw(ms), &screen),
                LoopState::Rendering { fps: None }
            );
        }

        assert_eq!(gl.state().draws.len(), 3);
        assert_eq!(gl.state().clears.len(), 3);
        assert_eq!(screen.presented.get(), 3);
    }

    #[test]
    fn reports_frame_rate_once_per_simulated_second() {
        const RATE: u64 = 50;
        const SECONDS: u64 = 4;
        let (renderer, _gl) = renderer();
        let screen = Screen::default();
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        let reports: Vec<u32> = (1..=RATE * SECONDS)
            .filter_map(|i| match render_loop.handle(redraw(i * 1000 / RATE), &screen) {
                LoopState::Rendering { fps } => fps,
                LoopState::Closed => panic!("loop closed without a close request"),
            })
            .collect();

        assert_eq!(reports.len() as u64, SECONDS);
        assert_eq!(reports.iter().map(|&n| n as u64).sum::<u64>(), RATE * SECONDS);
    }

    #[test]
    fn failed_present_keeps_rendering() {
        let (renderer, gl) = renderer();
        let screen = Screen {
            broken: true,
            ..Screen::default()
        };
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        for ms in [16, 33] {
            assert!(matches!(
                render_loop.handle(redraw(ms), &screen),
                LoopState::Rendering { .. }
            ));
        }

        assert!(!render_loop.is_closed());
        assert_eq!(gl.state().draws.len(), 2);
        assert_eq!(screen.presented.get(), 2);
    }

    #[test]
    fn close_stops_within_one_iteration_and_releases_once() {
        let (renderer, gl) = renderer();
        let screen = Screen::default();
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        render_loop.handle(redraw(16), &screen);
        assert_eq!(
            render_loop.handle(LoopEvent::CloseRequested, &screen),
            LoopState::Closed
        );
        assert!(render_loop.is_closed());

        let state = gl.state();
        assert_eq!(state.released_programs.len(), 1);
        assert_eq!(state.released_vertex_arrays.len(), 1);
        assert_eq!(state.released_buffers.len(), 1);
    }

    #[test]
    fn events_after_close_do_nothing() {
        let (renderer, gl) = renderer();
        let screen = Screen::default();
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        render_loop.handle(LoopEvent::CloseRequested, &screen);
        assert_eq!(render_loop.handle(redraw(16), &screen), LoopState::Closed);
        assert_eq!(
            render_loop.handle(LoopEvent::CloseRequested, &screen),
            LoopState::Closed
        );

        drop(render_loop);

        let state = gl.state();
        assert!(state.draws.is_empty());
        assert_eq!(screen.presented.get(), 0);
        assert_eq!(state.released_programs.len(), 1);
        assert_eq!(state.released_vertex_arrays.len(), 1);
        assert_eq!(state.released_buffers.len(), 1);
    }

    #[test]
    fn dropping_an_open_loop_releases_once() {
        let (renderer, gl) = renderer();
        let mut render_loop = RenderLoop::new(renderer, Duration::ZERO);

        render_loop.handle(redraw(16), &Screen::default());
        drop(render_loop);

        assert_eq!(gl.state().released_programs.len(), 1);
    }
}
