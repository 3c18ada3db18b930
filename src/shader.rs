//! # Shader Module
//!
//! Reads a vertex and a fragment GLSL source from disk, compiles both stages and links them into
//! one program. A link failure is returned as [`ShaderError::Link`] carrying the driver log, and
//! the failed program object is released before returning.

use std::{fmt, fs, path::Path};

use thiserror::Error;

use crate::gl::Gl;

/// Programmable pipeline stage a shader source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors produced while building a shader program.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The driver could not allocate a shader or program object.
    #[error("failed to allocate {what}: {reason}")]
    Allocation { what: &'static str, reason: String },

    /// The program failed to link. `log` is the driver's program info log.
    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}

/// Reads a whole shader source file as text.
///
/// An unreadable file is logged and yields an empty string; the resulting compile failure is
/// caught when the program's link status is checked.
pub fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            log::error!("could not read shader file {}: {e}", path.display());
            String::new()
        }
    }
}

/// Compiles the two shader files and links them into a program.
///
/// The transient stage objects are released whether or not linking succeeds.
///
/// # Errors
///
/// - [`ShaderError::Allocation`]
/// - [`ShaderError::Link`]
pub fn load_program<G: Gl>(
    gl: &G,
    vertex_path: &Path,
    fragment_path: &Path,
) -> Result<G::Program, ShaderError> {
    let vertex = compile(gl, ShaderStage::Vertex, vertex_path)?;
    let fragment = match compile(gl, ShaderStage::Fragment, fragment_path) {
        Ok(fragment) => fragment,
        Err(e) => {
            gl.release_stage(vertex);
            return Err(e);
        }
    };

    let linked = gl.link_stages(&[vertex, fragment]);

    gl.release_stage(vertex);
    gl.release_stage(fragment);

    let program = linked.map_err(|reason| ShaderError::Allocation {
        what: "shader program",
        reason,
    })?;

    if !gl.program_linked(program) {
        let log = gl.program_log(program);
        gl.release_program(program);
        log::error!("failed to link shader program {program:?}:\n{log}");
        return Err(ShaderError::Link { log });
    }

    log::info!("program {program:?} has been successfully linked");
    Ok(program)
}

fn compile<G: Gl>(gl: &G, stage: ShaderStage, path: &Path) -> Result<G::Shader, ShaderError> {
    let source = read_source(path);

    let shader = gl
        .compile_stage(stage, &source)
        .map_err(|reason| ShaderError::Allocation {
            what: "shader stage",
            reason,
        })?;

    if !gl.stage_compiled(shader) {
        log::warn!(
            "{stage} shader {} failed to compile:\n{}",
            path.display(),
            gl.stage_log(shader)
        );
    }

    Ok(shader)
}
