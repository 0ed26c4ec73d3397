use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, Performance, WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL,
    WebGlShader, WebGlUniformLocation,
};

use crate::clock::TimeSource;
use crate::error::ShaderStage;
use crate::gl::{DrawingSurface, GraphicsApi};

impl GraphicsApi for GL {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type UniformLocation = WebGlUniformLocation;

    fn drawing_buffer_size(&self) -> (i32, i32) {
        (self.drawing_buffer_width(), self.drawing_buffer_height())
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        GL::viewport(self, x, y, width, height);
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        GL::clear_color(self, r, g, b, a);
    }

    fn clear_color_buffer(&self) {
        self.clear(GL::COLOR_BUFFER_BIT);
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        GL::create_shader(self, kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        GL::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        GL::compile_shader(self, shader);
    }

    fn shader_compiled(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> String {
        self.get_shader_info_log(shader).unwrap_or_default()
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        GL::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        GL::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        GL::attach_shader(self, program, shader);
    }

    fn detach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        GL::detach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        GL::link_program(self, program);
    }

    fn program_linked(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> String {
        self.get_program_info_log(program).unwrap_or_default()
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        GL::use_program(self, program);
    }

    fn delete_program(&self, program: &WebGlProgram) {
        GL::delete_program(self, Some(program));
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        // -1 marks an inactive attribute.
        u32::try_from(self.get_attrib_location(program, name)).ok()
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        GL::create_buffer(self)
    }

    fn bind_array_buffer(&self, buffer: Option<&WebGlBuffer>) {
        self.bind_buffer(GL::ARRAY_BUFFER, buffer);
    }

    fn array_buffer_data(&self, data: &[f32]) {
        let array = js_sys::Float32Array::from(data);
        self.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    }

    fn delete_buffer(&self, buffer: &WebGlBuffer) {
        GL::delete_buffer(self, Some(buffer));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.vertex_attrib_pointer_with_i32(index, components, GL::FLOAT, false, stride, offset);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        GL::enable_vertex_attrib_array(self, index);
    }

    fn uniform2f(&self, location: &WebGlUniformLocation, x: f32, y: f32) {
        GL::uniform2f(self, Some(location), x, y);
    }

    fn uniform1f(&self, location: &WebGlUniformLocation, value: f32) {
        GL::uniform1f(self, Some(location), value);
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.draw_arrays(GL::TRIANGLE_STRIP, first, count);
    }
}

impl DrawingSurface for HtmlCanvasElement {
    type Gl = GL;

    fn layout_size(&self) -> (u32, u32) {
        (
            u32::try_from(self.client_width()).unwrap_or(0),
            u32::try_from(self.client_height()).unwrap_or(0),
        )
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn set_pixel_size(&self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    fn request_context(&self, id: &str) -> Option<GL> {
        match self.get_context(id) {
            Ok(Some(context)) => context.dyn_into::<GL>().ok(),
            Ok(None) => None,
            Err(err) => {
                log::debug!("context `{id}` threw: {err:?}");
                None
            }
        }
    }
}

/// `performance.now()`, or `Date.now()` where the Performance API is absent.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}
