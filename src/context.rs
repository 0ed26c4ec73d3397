use crate::config::Config;
use crate::error::SetupError;
use crate::gl::{DrawingSurface, GraphicsApi};

/// Resizes the surface to a 1:1 pixel mapping of its layout size and returns
/// the new pixel dimensions.
pub fn match_layout_size<S: DrawingSurface>(surface: &S) -> (u32, u32) {
    let (width, height) = surface.layout_size();
    surface.set_pixel_size(width, height);
    (width, height)
}

/// Acquires a context from `surface`, sets the viewport to the full drawing
/// buffer and clears it once.
///
/// Context identifiers are tried in `config` order. Failure is terminal.
pub fn acquire_context<S: DrawingSurface>(
    surface: &S,
    config: &Config,
) -> Result<S::Gl, SetupError> {
    match_layout_size(surface);

    let gl = config
        .context_ids
        .iter()
        .find_map(|id| surface.request_context(id))
        .ok_or(SetupError::ContextUnavailable)?;

    let (width, height) = gl.drawing_buffer_size();
    gl.viewport(0, 0, width, height);
    gl.clear_color(config.clear_color);
    gl.clear_color_buffer();
    log::debug!("context acquired, drawing buffer {width}x{height}");

    Ok(gl)
}
