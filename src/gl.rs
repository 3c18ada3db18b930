//! # GL Module
//!
//! [`Gl`] lists the handful of OpenGL operations this program performs. The real implementation
//! forwards to [`glow::Context`]; tests use a recording mock so shader loading and the render
//! loop can run without a GPU.

use std::fmt::Debug;

use glow::HasContext;

use crate::shader::ShaderStage;

/// The OpenGL operations used by the shader loader and the renderer.
///
/// Every method assumes the implementing context is current on the calling thread.
pub trait Gl {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;

    /// Creates a shader object for `stage`, submits `source` and compiles it.
    ///
    /// Only failure to allocate the object is an error; compile status is queried separately.
    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    fn stage_compiled(&self, shader: Self::Shader) -> bool;

    fn stage_log(&self, shader: Self::Shader) -> String;

    fn release_stage(&self, shader: Self::Shader);

    /// Creates a program, attaches `stages` and links it. Stages are detached afterwards.
    fn link_stages(&self, stages: &[Self::Shader]) -> Result<Self::Program, String>;

    fn program_linked(&self, program: Self::Program) -> bool;

    fn program_log(&self, program: Self::Program) -> String;

    fn release_program(&self, program: Self::Program);

    /// Uploads tightly packed `f32` positions into a new buffer and records the attribute layout
    /// for `location` in a new vertex array.
    fn upload_positions(
        &self,
        positions: &[f32],
        components: usize,
        location: u32,
    ) -> Result<(Self::VertexArray, Self::Buffer), String>;

    fn release_vertex_array(&self, vertex_array: Self::VertexArray);

    fn release_buffer(&self, buffer: Self::Buffer);

    fn set_viewport(&self, width: i32, height: i32);

    fn clear_to(&self, color: [f32; 4]);

    /// Draws `vertex_count` non-indexed vertices as triangles.
    fn draw_triangles(
        &self,
        program: Self::Program,
        vertex_array: Self::VertexArray,
        vertex_count: i32,
    );
}

// SAFETY (all blocks below): the `glow::Context` is only created by `Window::create`, which makes
// its GL context current on the event loop thread before loading functions, and it is only used
// from that thread while the window is alive.
impl Gl for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;
    type Buffer = glow::NativeBuffer;
    type VertexArray = glow::NativeVertexArray;

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<glow::NativeShader, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };

        unsafe {
            let shader = self.create_shader(kind)?;
            self.shader_source(shader, source);
            self.compile_shader(shader);
            Ok(shader)
        }
    }

    fn stage_compiled(&self, shader: glow::NativeShader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn stage_log(&self, shader: glow::NativeShader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn release_stage(&self, shader: glow::NativeShader) {
        unsafe { self.delete_shader(shader) }
    }

    fn link_stages(&self, stages: &[glow::NativeShader]) -> Result<glow::NativeProgram, String> {
        unsafe {
            let program = self.create_program()?;
            for &shader in stages {
                self.attach_shader(program, shader);
            }
            self.link_program(program);
            for &shader in stages {
                self.detach_shader(program, shader);
            }
            Ok(program)
        }
    }

    fn program_linked(&self, program: glow::NativeProgram) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_log(&self, program: glow::NativeProgram) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn release_program(&self, program: glow::NativeProgram) {
        unsafe { self.delete_program(program) }
    }

    fn upload_positions(
        &self,
        positions: &[f32],
        components: usize,
        location: u32,
    ) -> Result<(glow::NativeVertexArray, glow::NativeBuffer), String> {
        let stride = (components * size_of::<f32>()) as i32;

        unsafe {
            let vertex_array = self.create_vertex_array()?;
            let buffer = match self.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    self.delete_vertex_array(vertex_array);
                    return Err(e);
                }
            };

            self.bind_vertex_array(Some(vertex_array));
            self.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(positions),
                glow::STATIC_DRAW,
            );
            self.vertex_attrib_pointer_f32(
                location,
                components as i32,
                glow::FLOAT,
                false,
                stride,
                0,
            );
            self.enable_vertex_attrib_array(location);

            self.bind_buffer(glow::ARRAY_BUFFER, None);
            self.bind_vertex_array(None);

            Ok((vertex_array, buffer))
        }
    }

    fn release_vertex_array(&self, vertex_array: glow::NativeVertexArray) {
        unsafe { self.delete_vertex_array(vertex_array) }
    }

    fn release_buffer(&self, buffer: glow::NativeBuffer) {
        unsafe { self.delete_buffer(buffer) }
    }

    fn set_viewport(&self, width: i32, height: i32) {
        unsafe { self.viewport(0, 0, width, height) }
    }

    fn clear_to(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            self.clear_color(r, g, b, a);
            self.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_triangles(
        &self,
        program: glow::NativeProgram,
        vertex_array: glow::NativeVertexArray,
        vertex_count: i32,
    ) {
        unsafe {
            self.use_program(Some(program));
            self.bind_vertex_array(Some(vertex_array));
            self.draw_arrays(glow::TRIANGLES, 0, vertex_count);
        }
    }
}
