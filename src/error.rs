use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::shader::ShaderStage;

/// Reasons the animated backdrop could not be set up.
///
/// None of these reach the page: the backdrop logs them and stays inactive.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {0}")]
    Link(String),
    #[error("could not allocate {0}")]
    Allocation(&'static str),
    #[error("attribute `{0}` missing from linked program")]
    MissingAttribute(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for BackdropError {
    fn from(value: JsValue) -> Self {
        BackdropError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
