use std::fmt;

use thiserror::Error;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Terminal failures during session setup. None of them is retried.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no drawing surface matches `{selector}`")]
    SurfaceNotFound { selector: String },
    #[error("failed to get WebGL context")]
    ContextUnavailable,
    #[error("an error occurred compiling the {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program did not link successfully: {log}")]
    Link { log: String },
    #[error("failed to allocate {resource}")]
    Allocation { resource: &'static str },
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}
