use crate::clock::{Clock, TimeSource};
use crate::config::Config;
use crate::context::acquire_context;
use crate::error::SetupError;
use crate::geometry::QUAD_VERTEX_COUNT;
use crate::gl::{DrawingSurface, GraphicsApi};
use crate::pipeline::{build_pipeline, Pipeline, ProgramInfo};
use crate::shaders::ShaderSources;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Stopped,
}

/// Sole owner of the context and every GPU object the demo creates.
pub struct Renderer<G: GraphicsApi> {
    gl: G,
    program: Option<G::Program>,
    buffer: Option<G::Buffer>,
    info: Option<ProgramInfo<G::UniformLocation>>,
    clock: Clock,
    resolution: (u32, u32),
}

impl<G: GraphicsApi> Renderer<G> {
    /// Acquires a context from `surface` and builds the pipeline. The clock
    /// starts only once everything else has succeeded.
    ///
    /// The surface is resized once, during context acquisition; a failed
    /// build leaves it showing the initial clear.
    pub fn setup<S, T>(
        surface: &S,
        sources: ShaderSources<'_>,
        config: &Config,
        time: &T,
    ) -> Result<Self, SetupError>
    where
        S: DrawingSurface<Gl = G>,
        T: TimeSource + ?Sized,
    {
        let gl = acquire_context(surface, config)?;
        let resolution = surface.pixel_size();
        let Pipeline {
            program,
            info,
            buffer,
        } = build_pipeline(&gl, sources, resolution)?;

        Ok(Self {
            gl,
            program: Some(program),
            buffer: Some(buffer),
            info: Some(info),
            clock: Clock::start(time),
            resolution,
        })
    }

    /// Uploads elapsed time and draws the quad.
    ///
    /// After [`Renderer::cleanup`] nothing is issued and `Stopped` is returned.
    pub fn render_frame(&self, now_ms: f64) -> FrameState {
        let Some(info) = &self.info else {
            return FrameState::Stopped;
        };

        let elapsed = self.clock.elapsed_secs(now_ms);
        if let Some(location) = &info.elapsed_time {
            self.gl.uniform1f(location, elapsed);
        }
        self.gl.draw_triangle_strip(0, QUAD_VERTEX_COUNT);
        log::trace!("frame at {elapsed:.3}s");

        FrameState::Running
    }

    /// Unbinds and releases the program and buffer. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        self.info = None;
        self.gl.use_program(None);
        if let Some(buffer) = self.buffer.take() {
            self.gl.delete_buffer(&buffer);
        }
        if let Some(program) = self.program.take() {
            self.gl.delete_program(&program);
            log::info!("render session torn down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.info.is_some()
    }

    pub const fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub const fn clock(&self) -> Clock {
        self.clock
    }

    pub const fn gl(&self) -> &G {
        &self.gl
    }
}

/// Runs setup and reports a failure as one diagnostic. `None` means no frame
/// may ever be scheduled.
pub fn launch<S, T>(
    surface: &S,
    sources: ShaderSources<'_>,
    config: &Config,
    time: &T,
) -> Option<Renderer<S::Gl>>
where
    S: DrawingSurface,
    T: TimeSource + ?Sized,
{
    match Renderer::setup(surface, sources, config, time) {
        Ok(renderer) => {
            let (width, height) = renderer.resolution();
            log::info!("render session started at {width}x{height}");
            Some(renderer)
        }
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}
