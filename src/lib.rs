//! Full-screen fragment shader demo for a browser canvas.
//!
//! The core is generic over [`gl::GraphicsApi`] and [`gl::DrawingSurface`] so
//! it builds and tests on the host; browser bindings live behind
//! `target_arch = "wasm32"`.

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod gl;
mod guard;
pub mod pipeline;
pub mod preview;
pub mod renderer;
pub mod shaders;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{SetupError, ShaderStage};
pub use renderer::{launch, FrameState, Renderer};
pub use shaders::ShaderSources;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    pub(crate) mod render;
    pub(crate) mod webgl;

    pub use render::{register_teardown, run_frames, FrameLoop, SharedRenderer};
    pub use webgl::PerformanceClock;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let config = crate::Config::default();
        // A second init (e.g. from tests) keeps the first logger.
        console_log::init_with_level(config.log_level).ok();

        render::start_when_ready(config)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{register_teardown, run_frames, FrameLoop, PerformanceClock, SharedRenderer};
