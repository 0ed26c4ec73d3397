use crate::gl::GraphicsApi;

/// Owns a GPU handle and releases it on drop unless committed.
///
/// Setup acquires each resource behind one of these so that an early return
/// releases exactly what was allocated so far.
pub(crate) struct Guarded<'gl, G: GraphicsApi, T> {
    gl: &'gl G,
    handle: Option<T>,
    release: fn(&G, &T),
}

impl<'gl, G: GraphicsApi, T> Guarded<'gl, G, T> {
    pub fn new(gl: &'gl G, handle: T, release: fn(&G, &T)) -> Self {
        Self {
            gl,
            handle: Some(handle),
            release,
        }
    }

    pub fn get(&self) -> &T {
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("guard is only emptied by commit or drop"),
        }
    }

    /// Keeps the handle alive past the guard.
    pub fn commit(mut self) -> T {
        match self.handle.take() {
            Some(handle) => handle,
            None => unreachable!("guard is only emptied by commit or drop"),
        }
    }
}

impl<G: GraphicsApi, T> Drop for Guarded<'_, G, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            (self.release)(self.gl, &handle);
        }
    }
}

pub(crate) fn shader<G: GraphicsApi>(gl: &G, shader: G::Shader) -> Guarded<'_, G, G::Shader> {
    Guarded::new(gl, shader, G::delete_shader)
}

pub(crate) fn program<G: GraphicsApi>(gl: &G, program: G::Program) -> Guarded<'_, G, G::Program> {
    Guarded::new(gl, program, G::delete_program)
}

pub(crate) fn buffer<G: GraphicsApi>(gl: &G, buffer: G::Buffer) -> Guarded<'_, G, G::Buffer> {
    Guarded::new(gl, buffer, G::delete_buffer)
}
