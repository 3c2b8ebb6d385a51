//! flix-codegen - FCL binding generator.
//!
//! Renders one JavaScript or TypeScript module per interaction template,
//! exporting an async function that calls `fcl.mutate` or `fcl.query` with
//! the template's arguments in declared order.

pub mod error;
pub mod generator;
pub mod js_types;
pub mod language;
pub mod templates;

pub use error::{CodegenError, Result};
pub use generator::{binding_file_name, fcl_version_for, is_url, relative_template_path, BindingGenerator};
pub use language::Language;
