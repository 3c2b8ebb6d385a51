//! Binding file generator.

use flix_types::{OperationKind, TemplateDescriptor};
use handlebars::Handlebars;
use pathdiff::diff_paths;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::{CodegenError, Result};
use crate::js_types::{fcl_type, js_type};
use crate::language::Language;
use crate::templates::{BINDING, BINDING_TEMPLATE};

/// FCL release that first understands the given FLIX version.
pub fn fcl_version_for(flix_version: &str) -> &'static str {
    match flix_version {
        "1.0.0" => "1.3.0",
        "1.1.0" => "1.9.0",
        _ => "1.9.0",
    }
}

/// Absolute URL with scheme and host.
pub fn is_url(location: &str) -> bool {
    url::Url::parse(location)
        .map(|u| u.has_host())
        .unwrap_or(false)
}

/// Output file name for the binding of `template_path`.
///
/// `transfer.template.json` becomes `transfer.template.js` (or `.ts`).
pub fn binding_file_name(template_path: &Path, language: Language) -> Result<String> {
    let file_name = template_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CodegenError::Path {
            path: template_path.display().to_string(),
            reason: "no file name".to_string(),
        })?;
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    Ok(format!("{}.{}", stem, language.extension()))
}

/// Path of `template` as seen from the directory of `binding_file`.
///
/// Always uses `/` separators and starts with `.`.
pub fn relative_template_path(template: &Path, binding_file: &Path) -> Result<String> {
    let base_dir = binding_file.parent().unwrap_or_else(|| Path::new(""));
    let template_abs = absolute(template)?;
    let base_abs = absolute(base_dir)?;

    let relative = diff_paths(&template_abs, &base_abs).ok_or_else(|| CodegenError::Path {
        path: template.display().to_string(),
        reason: format!("not reachable from {}", base_dir.display()),
    })?;

    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if relative.starts_with('.') {
        Ok(relative)
    } else {
        Ok(format!("./{}", relative))
    }
}

/// `path` joined to the working directory, with `..` folded so the diff
/// never walks back through a parent reference.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| CodegenError::Path {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .join(path)
    };

    let mut clean = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other.as_os_str()),
        }
    }
    Ok(clean)
}

#[derive(Serialize)]
struct ParamContext {
    name: String,
    description: String,
    cadence_type: String,
    js_type: String,
    doc_type: String,
    fcl_type: String,
}

#[derive(Serialize)]
struct BindingContext {
    version: String,
    fcl_version: &'static str,
    is_local: bool,
    location: String,
    interface_name: Option<String>,
    description: String,
    params: Vec<ParamContext>,
    returns_doc: String,
    function_name: String,
    signature: String,
    return_annotation: String,
    result_var: &'static str,
    fcl_call: &'static str,
}

/// Renders FCL binding files for templates.
pub struct BindingGenerator {
    handlebars: Handlebars<'static>,
    language: Language,
}

impl BindingGenerator {
    /// Create a generator for `language`.
    pub fn new(language: Language) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(BINDING, BINDING_TEMPLATE)?;

        Ok(Self { handlebars, language })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Render the binding for `template`.
    ///
    /// `location` is either a URL, which is embedded as is, or the template's
    /// path relative to the binding file, which is imported.
    pub fn generate(&self, template: &TemplateDescriptor, location: &str) -> Result<String> {
        let context = self.context(template, location);
        debug!(
            "Rendering {} binding {} for template v{}",
            self.language, context.function_name, context.version
        );
        Ok(self.handlebars.render(BINDING, &context)?)
    }

    fn context(&self, template: &TemplateDescriptor, location: &str) -> BindingContext {
        let typescript = self.language.is_typescript();

        let params: Vec<ParamContext> = template
            .parameters
            .iter()
            .map(|p| {
                let js = js_type(&p.ty);
                ParamContext {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    cadence_type: p.ty.to_string(),
                    doc_type: format!("{{{}}}", js),
                    js_type: js,
                    fcl_type: fcl_type(&p.ty),
                }
            })
            .collect();

        let interface_name = (typescript && !params.is_empty()).then(|| format!("{}Params", template.type_prefix()));

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        let signature = match (&interface_name, names.is_empty()) {
            (_, true) => String::new(),
            (Some(interface), false) => format!("{{{}}}: {}", names.join(", "), interface),
            (None, false) => format!("{{{}}}", names.join(", ")),
        };

        let (result_type, returns_doc, result_var, fcl_call) = match template.kind {
            OperationKind::Mutation => (
                "string".to_string(),
                "{Promise<string>} - returns a promise which resolves to the transaction id".to_string(),
                "transactionId",
                "mutate",
            ),
            OperationKind::Query => {
                let output = template.output.as_ref().map_or_else(|| "any".to_string(), js_type);
                (
                    output.clone(),
                    format!("{{Promise<{}>}} - returns a promise which resolves to the query result", output),
                    "info",
                    "query",
                )
            }
        };

        let description = if template.description.is_empty() {
            template.title.clone()
        } else {
            template.description.clone()
        };

        BindingContext {
            version: template.version.clone(),
            fcl_version: fcl_version_for(&template.version),
            is_local: !is_url(location),
            location: location.to_string(),
            interface_name,
            description,
            params,
            returns_doc,
            function_name: template.function_name(),
            signature,
            return_annotation: if typescript {
                format!(": Promise<{}>", result_type)
            } else {
                String::new()
            },
            result_var,
            fcl_call,
        }
    }
}
