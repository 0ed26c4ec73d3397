/// Vertex/fragment source pair handed to the pipeline builder verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// Names the sources bind to. They must agree with the shader text.
pub const POSITION_ATTRIBUTE: &str = "aVertexPosition";
pub const RESOLUTION_UNIFORM: &str = "iResolution";
pub const TIME_UNIFORM: &str = "iTime";

pub const QUAD_VERTEX: &str = include_str!("shaders/quad.vert");
pub const COSINE_FRAGMENT: &str = include_str!("shaders/cosine.frag");

impl Default for ShaderSources<'static> {
    fn default() -> Self {
        Self {
            vertex: QUAD_VERTEX,
            fragment: COSINE_FRAGMENT,
        }
    }
}
