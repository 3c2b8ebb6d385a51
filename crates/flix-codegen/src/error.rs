//! Code generation errors.

use thiserror::Error;

/// Codegen result type.
pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("Unsupported language: {0} (expected javascript or typescript)")]
    UnsupportedLanguage(String),

    #[error("Template render error: {0}")]
    Render(String),

    #[error("Invalid path {path}: {reason}")]
    Path { path: String, reason: String },
}

impl From<handlebars::RenderError> for CodegenError {
    fn from(e: handlebars::RenderError) -> Self {
        CodegenError::Render(e.to_string())
    }
}

impl From<handlebars::TemplateError> for CodegenError {
    fn from(e: handlebars::TemplateError) -> Self {
        CodegenError::Render(e.to_string())
    }
}
