//! # Render Module
//!
//! [`Renderer`] owns the GL handle together with the three long-lived GPU objects: the linked
//! program, the vertex array and the vertex buffer. They are created once in [`Renderer::new`],
//! never modified, and released exactly once when the renderer is dropped.

use thiserror::Error;

use crate::geometry::{COMPONENTS_PER_VERTEX, POSITION_LOCATION};
use crate::gl::Gl;

/// Errors produced while creating the renderer.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
    /// The vertex array or vertex buffer could not be created.
    #[error("failed to allocate vertex storage: {0}")]
    Allocation(String),
}

pub struct Renderer<G: Gl> {
    gl: G,
    program: G::Program,
    vertex_array: G::VertexArray,
    buffer: G::Buffer,
    vertex_count: i32,
    clear_color: [f32; 4],
}

impl<G: Gl> Renderer<G> {
    /// Uploads `positions` and takes ownership of `gl` and `program`. The viewport is set here
    /// once and never updated.
    ///
    /// On error `program` is released before returning.
    ///
    /// # Errors
    ///
    /// - [`RenderError::Allocation`]
    pub fn new(
        gl: G,
        program: G::Program,
        positions: &[f32],
        viewport: (i32, i32),
        clear_color: [f32; 4],
    ) -> Result<Self, RenderError> {
        let (vertex_array, buffer) =
            match gl.upload_positions(positions, COMPONENTS_PER_VERTEX, POSITION_LOCATION) {
                Ok(handles) => handles,
                Err(e) => {
                    gl.release_program(program);
                    return Err(RenderError::Allocation(e));
                }
            };

        gl.set_viewport(viewport.0, viewport.1);

        Ok(Self {
            gl,
            program,
            vertex_array,
            buffer,
            vertex_count: (positions.len() / COMPONENTS_PER_VERTEX) as i32,
            clear_color,
        })
    }

    /// Clears the color buffer to the background color.
    pub fn clear(&self) {
        self.gl.clear_to(self.clear_color);
    }

    /// Clears, then draws the triangle with the linked program.
    pub fn draw(&self) {
        self.clear();
        self.gl
            .draw_triangles(self.program, self.vertex_array, self.vertex_count);
    }
}

impl<G: Gl> Drop for Renderer<G> {
    fn drop(&mut self) {
        self.gl.release_vertex_array(self.vertex_array);
        self.gl.release_buffer(self.buffer);
        self.gl.release_program(self.program);
        log::debug!("released program, vertex array and buffer");
    }
}
