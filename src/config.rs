//! # Config Module
//!
//! Fixed settings for the window, the GL context and the shader sources. There is no file or
//! command-line layer; [`Config::default`] is what the binary runs with.

use std::path::PathBuf;

/// Startup configuration for the window, context and triangle pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Window title.
    pub title: String,

    /// Logical window width. The viewport is derived from it once and never updated.
    pub width: u32,

    /// Logical window height.
    pub height: u32,

    /// Path to the vertex shader GLSL source, relative to the working directory.
    pub vertex_shader: PathBuf,

    /// Path to the fragment shader GLSL source, relative to the working directory.
    pub fragment_shader: PathBuf,

    /// Background color as linear RGBA.
    pub clear_color: [f32; 4],

    /// Requested OpenGL core profile version as `(major, minor)`.
    pub gl_version: (u8, u8),

    /// Wait for vertical sync when presenting.
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello Triangle by @Pieceofsoil".to_string(),
            width: 800,
            height: 800,
            vertex_shader: PathBuf::from("shaders/basic.vert.glsl"),
            fragment_shader: PathBuf::from("shaders/basic.frag.glsl"),
            clear_color: [0.015, 0.172, 0.384, 1.0],
            gl_version: (3, 3),
            vsync: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_square_800() {
        let config = Config::default();

        assert_eq!((config.width, config.height), (800, 800));
        assert_eq!(config.title, "Hello Triangle by @Pieceofsoil");
    }

    #[test]
    fn default_requests_gl_33_without_vsync() {
        let config = Config::default();

        assert_eq!(config.gl_version, (3, 3));
        assert!(!config.vsync);
    }

    #[test]
    fn default_shader_paths_point_at_bundled_sources() {
        let config = Config::default();
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

        assert!(root.join(&config.vertex_shader).is_file());
        assert!(root.join(&config.fragment_shader).is_file());
    }
}
