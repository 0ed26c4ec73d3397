/// Full-screen quad in normalized device coordinates, drawn as a triangle strip.
pub const QUAD_VERTICES: [f32; 8] = [
    -1.0, 1.0, //
    1.0, 1.0, //
    -1.0, -1.0, //
    1.0, -1.0,
];

/// Components per vertex in [`QUAD_VERTICES`].
pub const COMPONENTS_PER_VERTEX: i32 = 2;

/// Vertices in [`QUAD_VERTICES`].
pub const QUAD_VERTEX_COUNT: i32 = (QUAD_VERTICES.len() / 2) as i32;
