//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use colored::Colorize;
use flix_sdk::TemplateLocation;
use flix_types::TemplateDescriptor;
use tabled::{Table, Tabled};

/// Shorten long ids for display.
pub fn format_id_short(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 8..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        id.to_string()
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

#[derive(Tabled)]
struct ParameterRow {
    #[tabled(rename = "#")]
    index: usize,
    name: String,
    #[tabled(rename = "type")]
    ty: String,
    description: String,
}

fn parameter_rows(template: &TemplateDescriptor) -> Vec<ParameterRow> {
    template
        .parameters
        .iter()
        .enumerate()
        .map(|(index, p)| ParameterRow {
            index,
            name: p.name.clone(),
            ty: p.ty.to_string(),
            description: p.description.clone(),
        })
        .collect()
}

/// Print template details.
pub fn print_template(template: &TemplateDescriptor, location: &TemplateLocation) {
    println!("{}", template.title.bold());
    println!("{}", "=".repeat(50));
    if !template.description.is_empty() {
        println!("{}", template.description);
    }
    if !template.id.is_empty() {
        println!("ID:        {}", format_id_short(&template.id).bright_cyan());
    }
    if let Some(check) = id_check(template) {
        println!("ID check:  {}", check);
    }
    println!("Version:   {}", template.version.bright_green());
    println!("Kind:      {}", template.kind.to_string().bright_yellow());
    println!("Function:  {}", template.function_name().bright_magenta());
    println!("Source:    {}", location);
    if let Some(output) = &template.output {
        println!("Returns:   {}", output);
    }

    if template.parameters.is_empty() {
        println!("\nNo parameters.");
    } else {
        println!("\n{}", Table::new(parameter_rows(template)));
    }

    if !template.dependencies.is_empty() {
        println!("\n{}", "Dependencies".bold());
        for dep in &template.dependencies {
            let networks: Vec<&str> = dep.networks.keys().map(String::as_str).collect();
            println!("  {} ({})", dep.contract.bright_cyan(), networks.join(", "));
        }
    }
}

/// Whether the published id matches the content, when it can be computed.
fn id_check(template: &TemplateDescriptor) -> Option<String> {
    let computed = template.computed_id.as_deref()?;
    Some(match template.id_matches() {
        Some(true) => "verified".green().to_string(),
        _ => format!("mismatch (computed {})", format_id_short(computed)).red().to_string(),
    })
}

/// Print a query result as pretty JSON.
pub fn print_value(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flix_types::{OperationKind, Parameter, SemanticType};

    #[test]
    fn test_format_id_short() {
        let id = "290b6b6222b2a77b16db896a80ddf29ebd1fa3038c9e6625a933fa213fce51fa";
        assert_eq!(format_id_short(id), "290b6b6222...3fce51fa");
        assert_eq!(format_id_short("abc"), "abc");
        assert_eq!(format_id_short(&"é".repeat(24)), format!("{}...{}", "é".repeat(10), "é".repeat(8)));
    }

    #[test]
    fn test_id_check() {
        colored::control::set_override(false);
        let mut template = TemplateDescriptor::new(OperationKind::Query, vec![]).unwrap();
        assert_eq!(id_check(&template), None);

        template.id = "a".repeat(64);
        template.computed_id = Some("a".repeat(64));
        assert_eq!(id_check(&template).as_deref(), Some("verified"));

        template.computed_id = Some("b".repeat(64));
        assert_eq!(
            id_check(&template).as_deref(),
            Some("mismatch (computed bbbbbbbbbb...bbbbbbbb)")
        );
    }

    #[test]
    fn test_parameter_rows_keep_order() {
        let template = TemplateDescriptor::new(
            OperationKind::Mutation,
            vec![
                Parameter::new("amount", SemanticType::named("UFix64")),
                Parameter::new("to", SemanticType::named("Address")),
            ],
        )
        .unwrap();
        let rows = parameter_rows(&template);
        assert_eq!(rows[0].name, "amount");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].ty, "Address");

        let table = Table::new(rows).to_string();
        assert!(table.contains("UFix64"));
    }
}
