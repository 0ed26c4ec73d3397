//! Recording doubles for the graphics API and drawing surface.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Once;

use crate::error::ShaderStage;
use crate::gl::{DrawingSurface, GraphicsApi};
use crate::shaders::POSITION_ATTRIBUTE;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData(Vec<f32>),
    DeleteBuffer(u32),
    VertexAttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttrib(u32),
    Uniform2f(String, f32, f32),
    Uniform1f(String, f32),
    DrawTriangleStrip(i32, i32),
}

/// Failure modes injected into a [`RecordingGl`].
#[derive(Debug, Clone, Default)]
pub struct GlFaults {
    compile: Option<ShaderStage>,
    link: bool,
    missing: Vec<&'static str>,
    no_buffers: bool,
}

impl GlFaults {
    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.compile = Some(stage);
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.link = true;
        self
    }
}

/// Records every state-changing call; queries are answered but not recorded.
#[derive(Debug)]
pub struct RecordingGl {
    buffer_size: (i32, i32),
    faults: GlFaults,
    calls: Rc<RefCell<Vec<Call>>>,
    next_id: Cell<u32>,
    created_shaders: RefCell<Vec<ShaderStage>>,
    shaders: RefCell<HashMap<u32, ShaderStage>>,
    programs: RefCell<HashSet<u32>>,
    buffers: RefCell<HashSet<u32>>,
}

impl RecordingGl {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_faults(width, height, GlFaults::default())
    }

    pub fn with_faults(width: i32, height: i32, faults: GlFaults) -> Self {
        Self::recording_into(width, height, faults, Rc::default())
    }

    /// Appends calls to `calls`, so they stay inspectable after the context
    /// itself is dropped.
    fn recording_into(
        width: i32,
        height: i32,
        faults: GlFaults,
        calls: Rc<RefCell<Vec<Call>>>,
    ) -> Self {
        Self {
            buffer_size: (width, height),
            faults,
            calls,
            next_id: Cell::new(1),
            created_shaders: RefCell::default(),
            shaders: RefCell::default(),
            programs: RefCell::default(),
            buffers: RefCell::default(),
        }
    }

    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.faults.compile = Some(stage);
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.faults.link = true;
        self
    }

    pub fn without_location(mut self, name: &'static str) -> Self {
        self.faults.missing.push(name);
        self
    }

    pub fn without_buffers(mut self) -> Self {
        self.faults.no_buffers = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn draw_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::DrawTriangleStrip(..)))
            .cloned()
            .collect()
    }

    pub fn created_shaders(&self) -> Vec<ShaderStage> {
        self.created_shaders.borrow().clone()
    }

    pub fn live_shaders(&self) -> Vec<u32> {
        self.shaders.borrow().keys().copied().collect()
    }

    pub fn live_programs(&self) -> Vec<u32> {
        self.programs.borrow().iter().copied().collect()
    }

    pub fn live_buffers(&self) -> Vec<u32> {
        self.buffers.borrow().iter().copied().collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn is_missing(&self, name: &str) -> bool {
        self.faults.missing.iter().any(|m| *m == name)
    }
}

impl GraphicsApi for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn drawing_buffer_size(&self) -> (i32, i32) {
        self.buffer_size
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let id = self.allocate();
        self.created_shaders.borrow_mut().push(stage);
        self.shaders.borrow_mut().insert(id, stage);
        self.record(Call::CreateShader(stage, id));
        Some(id)
    }

    fn shader_source(&self, shader: &u32, _source: &str) {
        self.record(Call::ShaderSource(*shader));
    }

    fn compile_shader(&self, shader: &u32) {
        self.record(Call::CompileShader(*shader));
    }

    fn shader_compiled(&self, shader: &u32) -> bool {
        let stage = self.shaders.borrow().get(shader).copied();
        stage.is_some() && stage != self.faults.compile
    }

    fn shader_info_log(&self, shader: &u32) -> String {
        format!("ERROR: 0:1: shader {shader} rejected")
    }

    fn delete_shader(&self, shader: &u32) {
        assert!(
            self.shaders.borrow_mut().remove(shader).is_some(),
            "shader {shader} released twice"
        );
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.allocate();
        self.programs.borrow_mut().insert(id);
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::AttachShader(*program, *shader));
    }

    fn detach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::DetachShader(*program, *shader));
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn program_linked(&self, program: &u32) -> bool {
        self.programs.borrow().contains(program) && !self.faults.link
    }

    fn program_info_log(&self, _program: &u32) -> String {
        "ERROR: varying mismatch".to_owned()
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: &u32) {
        assert!(
            self.programs.borrow_mut().remove(program),
            "program {program} released twice"
        );
        self.record(Call::DeleteProgram(*program));
    }

    fn attrib_location(&self, _program: &u32, name: &str) -> Option<u32> {
        (name == POSITION_ATTRIBUTE && !self.is_missing(name)).then_some(0)
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<String> {
        (!self.is_missing(name)).then(|| name.to_owned())
    }

    fn create_buffer(&self) -> Option<u32> {
        if self.faults.no_buffers {
            return None;
        }
        let id = self.allocate();
        self.buffers.borrow_mut().insert(id);
        self.record(Call::CreateBuffer(id));
        Some(id)
    }

    fn bind_array_buffer(&self, buffer: Option<&u32>) {
        self.record(Call::BindArrayBuffer(buffer.copied()));
    }

    fn array_buffer_data(&self, data: &[f32]) {
        self.record(Call::BufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: &u32) {
        assert!(
            self.buffers.borrow_mut().remove(buffer),
            "buffer {buffer} released twice"
        );
        self.record(Call::DeleteBuffer(*buffer));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttrib(index));
    }

    fn uniform2f(&self, location: &String, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.clone(), x, y));
    }

    fn uniform1f(&self, location: &String, value: f32) {
        self.record(Call::Uniform1f(location.clone(), value));
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangleStrip(first, count));
    }
}

/// A canvas whose backing store starts at the browser default of 300x150.
#[derive(Debug)]
pub struct FakeCanvas {
    layout: (u32, u32),
    pixels: Cell<(u32, u32)>,
    accepted: Vec<String>,
    requested: RefCell<Vec<String>>,
    resizes: Cell<u32>,
    faults: GlFaults,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layout: (width, height),
            pixels: Cell::new((300, 150)),
            accepted: vec!["webgl".to_owned()],
            requested: RefCell::default(),
            resizes: Cell::new(0),
            faults: GlFaults::default(),
            calls: Rc::default(),
        }
    }

    pub fn accepting(mut self, ids: &[&str]) -> Self {
        self.accepted = ids.iter().map(|id| (*id).to_owned()).collect();
        self
    }

    pub fn with_faults(mut self, faults: GlFaults) -> Self {
        self.faults = faults;
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }

    /// Number of `set_pixel_size` calls so far.
    pub fn resizes(&self) -> u32 {
        self.resizes.get()
    }

    /// Every call made on contexts handed out by this canvas.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl DrawingSurface for FakeCanvas {
    type Gl = RecordingGl;

    fn layout_size(&self) -> (u32, u32) {
        self.layout
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.pixels.get()
    }

    fn set_pixel_size(&self, width: u32, height: u32) {
        self.resizes.set(self.resizes.get() + 1);
        self.pixels.set((width, height));
    }

    fn request_context(&self, id: &str) -> Option<RecordingGl> {
        self.requested.borrow_mut().push(id.to_owned());
        if !self.accepted.iter().any(|a| a == id) {
            return None;
        }
        let (width, height) = self.pixels.get();
        Some(RecordingGl::recording_into(
            width as i32,
            height as i32,
            self.faults.clone(),
            Rc::clone(&self.calls),
        ))
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Runs `f` and returns the records it logged on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).ok();
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|c| c.borrow_mut().drain(..).collect());
    (result, records)
}

/// Fixed clock for deterministic frame timing.
#[derive(Debug)]
pub struct ManualClock(pub Cell<f64>);

impl ManualClock {
    pub fn at(ms: f64) -> Self {
        Self(Cell::new(ms))
    }
}

impl crate::clock::TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}
