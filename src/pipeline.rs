//! Compiles the shader pair, links it and binds the quad geometry.
//!
//! Every GPU object created here sits behind a [`Guarded`] until the whole
//! pipeline is ready, so a failure at any step releases only what this call
//! allocated.

use crate::error::{SetupError, ShaderStage};
use crate::geometry::{COMPONENTS_PER_VERTEX, QUAD_VERTICES};
use crate::gl::GraphicsApi;
use crate::guard::{self, Guarded};
use crate::shaders::{ShaderSources, POSITION_ATTRIBUTE, RESOLUTION_UNIFORM, TIME_UNIFORM};

/// Locations resolved once after linking. Valid only while the program that
/// produced them is alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo<U> {
    pub vertex_position: Option<u32>,
    pub resolution: Option<U>,
    pub elapsed_time: Option<U>,
}

/// A linked, bound program together with the uploaded quad.
pub struct Pipeline<G: GraphicsApi> {
    pub program: G::Program,
    pub info: ProgramInfo<G::UniformLocation>,
    pub buffer: G::Buffer,
}

/// Builds the pipeline and uploads `resolution` (pixels) once.
///
/// On return the program is active and the position attribute streams from
/// the quad buffer.
pub fn build_pipeline<G: GraphicsApi>(
    gl: &G,
    sources: ShaderSources<'_>,
    resolution: (u32, u32),
) -> Result<Pipeline<G>, SetupError> {
    let vertex = compile(gl, ShaderStage::Vertex, sources.vertex)?;
    let fragment = compile(gl, ShaderStage::Fragment, sources.fragment)?;

    let program = link(gl, vertex, fragment)?;
    let info = resolve_locations(gl, program.get());

    let buffer = upload_quad(gl, info.vertex_position)?;

    gl.use_program(Some(program.get()));
    match &info.resolution {
        Some(location) => gl.uniform2f(location, resolution.0 as f32, resolution.1 as f32),
        None => log::warn!("`{RESOLUTION_UNIFORM}` is unused by the fragment shader"),
    }
    log::debug!("pipeline ready at {}x{}", resolution.0, resolution.1);

    Ok(Pipeline {
        program: program.commit(),
        info,
        buffer: buffer.commit(),
    })
}

fn compile<'gl, G: GraphicsApi>(
    gl: &'gl G,
    stage: ShaderStage,
    source: &str,
) -> Result<Guarded<'gl, G, G::Shader>, SetupError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(SetupError::Allocation { resource: "shader" })?;
    let shader = guard::shader(gl, shader);

    gl.shader_source(shader.get(), source);
    gl.compile_shader(shader.get());
    if !gl.shader_compiled(shader.get()) {
        return Err(SetupError::ShaderCompile {
            stage,
            log: gl.shader_info_log(shader.get()),
        });
    }
    log::debug!("{stage} shader compiled");
    Ok(shader)
}

/// Stage objects are detached and released whatever the link outcome.
fn link<'gl, G: GraphicsApi>(
    gl: &'gl G,
    vertex: Guarded<'gl, G, G::Shader>,
    fragment: Guarded<'gl, G, G::Shader>,
) -> Result<Guarded<'gl, G, G::Program>, SetupError> {
    let program = gl
        .create_program()
        .ok_or(SetupError::Allocation { resource: "program" })?;
    let program = guard::program(gl, program);

    gl.attach_shader(program.get(), vertex.get());
    gl.attach_shader(program.get(), fragment.get());
    gl.link_program(program.get());
    gl.detach_shader(program.get(), vertex.get());
    gl.detach_shader(program.get(), fragment.get());
    drop(vertex);
    drop(fragment);

    if !gl.program_linked(program.get()) {
        return Err(SetupError::Link {
            log: gl.program_info_log(program.get()),
        });
    }
    Ok(program)
}

fn resolve_locations<G: GraphicsApi>(
    gl: &G,
    program: &G::Program,
) -> ProgramInfo<G::UniformLocation> {
    ProgramInfo {
        vertex_position: gl.attrib_location(program, POSITION_ATTRIBUTE),
        resolution: gl.uniform_location(program, RESOLUTION_UNIFORM),
        elapsed_time: gl.uniform_location(program, TIME_UNIFORM),
    }
}

fn upload_quad<G: GraphicsApi>(
    gl: &G,
    position: Option<u32>,
) -> Result<Guarded<'_, G, G::Buffer>, SetupError> {
    let buffer = gl
        .create_buffer()
        .ok_or(SetupError::Allocation { resource: "vertex buffer" })?;
    let buffer = guard::buffer(gl, buffer);

    gl.bind_array_buffer(Some(buffer.get()));
    gl.array_buffer_data(&QUAD_VERTICES);

    match position {
        Some(index) => {
            gl.vertex_attrib_pointer_f32(index, COMPONENTS_PER_VERTEX, 0, 0);
            gl.enable_vertex_attrib_array(index);
        }
        None => log::warn!("`{POSITION_ATTRIBUTE}` is unused by the vertex shader"),
    }
    Ok(buffer)
}
