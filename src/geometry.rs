//! Triangle vertex data in normalized device coordinates.

/// Number of `f32` components per vertex position.
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// Shader attribute location the positions are bound to (`layout (location = 0)`).
pub const POSITION_LOCATION: u32 = 0;

/// Bottom-left, bottom-right, top-center.
pub const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];
