//! Handlebars sources for generated bindings.
//!
//! Block helpers never sit alone on a line, so output whitespace does not
//! depend on standalone-tag trimming.

/// Registered name of the binding template.
pub const BINDING: &str = "binding";

pub const BINDING_TEMPLATE: &str = r#"/**
    This binding file was auto generated based on FLIX template v{{version}}.
    Changes to this file might get overwritten.
    Note fcl version {{fcl_version}} or higher is required to use templates.
**/

import * as fcl from "@onflow/fcl"
{{#if is_local}}import flixTemplate from "{{location}}"{{else}}const flixTemplate = "{{location}}"{{/if}}

{{#if interface_name}}interface {{interface_name}} { {{~#each params}}
  {{name}}: {{js_type}}; // {{description}}{{/each}}
}

{{/if}}/**
* {{description}}
{{#if params}}* @param {Object} Parameters - parameters for the cadence
{{#each params}}* @param {{doc_type}} Parameters.{{name}} - {{description}}: {{cadence_type}}
{{/each}}{{else}}* No parameters needed.
{{/if}}* @returns {{returns_doc}}
*/
export async function {{function_name}}({{signature}}){{return_annotation}} {
  const {{result_var}} = await fcl.{{fcl_call}}({
    template: flixTemplate,{{#if params}}
    args: (arg, t) => [{{#each params}}{{#unless @first}}, {{/unless}}arg({{name}}, {{fcl_type}}){{/each}}]{{/if}}
  });

  return {{result_var}}
}
"#;
