//! The slice of the graphics API this demo uses, plus the surface it draws on.
//!
//! Both traits take `&self` everywhere, mirroring how browser contexts are
//! exposed. Handles are owned by the caller and released explicitly.

use crate::error::ShaderStage;

pub trait GraphicsApi {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn drawing_buffer_size(&self) -> (i32, i32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_color_buffer(&self);

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compiled(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> String;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_linked(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> String;
    fn use_program(&self, program: Option<&Self::Program>);
    fn delete_program(&self, program: &Self::Program);

    /// `None` when the attribute is absent or optimised out.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);
    /// Uploads to the bound array buffer with static usage.
    fn array_buffer_data(&self, data: &[f32]);
    fn delete_buffer(&self, buffer: &Self::Buffer);
    /// Float attribute, not normalised.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, index: u32);

    fn uniform2f(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform1f(&self, location: &Self::UniformLocation, value: f32);

    fn draw_triangle_strip(&self, first: i32, count: i32);
}

/// An on-screen element that can hand out a graphics context.
pub trait DrawingSurface {
    type Gl: GraphicsApi;

    /// Displayed size in CSS pixels.
    fn layout_size(&self) -> (u32, u32);
    /// Size of the backing pixel buffer.
    fn pixel_size(&self) -> (u32, u32);
    fn set_pixel_size(&self, width: u32, height: u32);
    fn request_context(&self, id: &str) -> Option<Self::Gl>;
}
