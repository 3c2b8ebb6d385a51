//! CLI command implementations.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use flix_codegen::{binding_file_name, relative_template_path, BindingGenerator, Language};
use flix_sdk::{
    Binding, ExtraArgumentPolicy, GatewayClient, InvocationResult, TemplateLocation, TemplateSource,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::args::parse_request;
use crate::config::CliConfig;
use crate::output::*;

/// Main CLI.
#[derive(Parser)]
#[command(name = "flixkit")]
#[command(about = "Interaction template toolkit: FCL bindings, import resolution and invocation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Template registry URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate FCL binding files
    Generate {
        /// Template paths, ids, URLs or names
        #[arg(required = true)]
        queries: Vec<String>,
        /// Output language (js or ts)
        #[arg(short, long)]
        lang: Option<String>,
        /// Output directory (defaults to each template's directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Invoke a template through the gateway
    Invoke {
        /// Template path, id, URL or name
        query: String,
        /// Argument as name=value (repeatable)
        #[arg(short, long = "arg")]
        args: Vec<String>,
        /// Network to resolve imports for
        #[arg(short, long)]
        network: Option<String>,
        /// Gateway endpoint
        #[arg(short, long)]
        gateway: Option<String>,
        /// Reject arguments the template does not declare
        #[arg(long)]
        strict: bool,
    },

    /// Print Cadence with imports resolved for a network
    Imports {
        /// Template path, id, URL or name
        query: String,
        /// Network to resolve imports for
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Show template details
    Inspect {
        /// Template path, id, URL or name
        query: String,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set the gateway endpoint
    SetGateway { url: String },
    /// Set the default network
    SetNetwork { network: String },
    /// Set the template registry
    SetServer { url: String },
    /// Set the default binding language
    SetLanguage { language: String },
    /// Reset to defaults
    Reset,
}

/// Execute a CLI command.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load()?;
    let source = TemplateSource::new(cli.server.unwrap_or_else(|| config.flix_server_url.clone()));

    match cli.command {
        Commands::Generate { queries, lang, out_dir } => {
            let language: Language = lang.as_deref().unwrap_or(&config.language).parse()?;
            let written = generate(&source, &queries, language, out_dir.as_deref()).await?;
            for path in written {
                print_success(&format!("Generated {}", path.display()));
            }
        }

        Commands::Invoke {
            query,
            args,
            network,
            gateway,
            strict,
        } => {
            let gateway = GatewayClient::new(
                gateway.unwrap_or_else(|| config.gateway_url.clone()),
                network.unwrap_or_else(|| config.network.clone()),
            );
            execute_invoke(&source, gateway, &query, &args, strict).await?;
        }

        Commands::Imports { query, network } => {
            let network = network.unwrap_or_else(|| config.network.clone());
            let (template, _) = source.load(&query).await?;
            let cadence = template
                .resolve_imports(&network)
                .with_context(|| format!("Could not resolve imports for {}", network))?;
            println!("{}", cadence);
        }

        Commands::Inspect { query } => {
            let (template, location) = source.load(&query).await?;
            print_template(&template, &location);
        }

        Commands::Config(cmd) => execute_config(cmd, config)?,
    }

    Ok(())
}

/// Generate one binding per query and return the written paths.
///
/// Output names derive from template file names, so two templates never
/// share an output file.
pub async fn generate(
    source: &TemplateSource,
    queries: &[String],
    language: Language,
    out_dir: Option<&Path>,
) -> anyhow::Result<Vec<PathBuf>> {
    let generator = BindingGenerator::new(language)?;
    let mut written = Vec::with_capacity(queries.len());
    let mut seen = HashSet::new();

    for query in queries {
        let (template, location) = source.load(query).await?;

        let (binding_path, reference) = match &location {
            TemplateLocation::File(path) => {
                let dir = out_dir
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| path.parent().map(Path::to_path_buf).unwrap_or_default());
                let binding_path = dir.join(binding_file_name(path, language)?);
                let reference = relative_template_path(path, &binding_path)?;
                (binding_path, reference)
            }
            TemplateLocation::Remote(url) => {
                let dir = out_dir.map(Path::to_path_buf).unwrap_or_default();
                let file_name = format!("{}.{}", template.function_name(), language.extension());
                (dir.join(file_name), url.clone())
            }
            TemplateLocation::Inline => {
                bail!("Inline template '{}' has no location to reference; save it to a file first", template.title)
            }
        };

        if !seen.insert(binding_path.clone()) {
            bail!("Two templates map to the same output file {}", binding_path.display());
        }

        let code = generator.generate(&template, &reference)?;
        if let Some(parent) = binding_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&binding_path, code)
            .with_context(|| format!("Could not write {}", binding_path.display()))?;

        info!("Wrote {} binding for '{}' to {}", language, template.title, binding_path.display());
        written.push(binding_path);
    }

    Ok(written)
}

async fn execute_invoke(
    source: &TemplateSource,
    gateway: GatewayClient,
    query: &str,
    raw_args: &[String],
    strict: bool,
) -> anyhow::Result<()> {
    let (template, _) = source.load(query).await?;
    let request = parse_request(raw_args)?;
    let policy = if strict {
        ExtraArgumentPolicy::Reject
    } else {
        ExtraArgumentPolicy::Ignore
    };

    print_info(&format!(
        "Invoking {} '{}' on {} via {}",
        template.kind,
        template.title,
        gateway.network(),
        gateway.url()
    ));

    let binding = Binding::new(template, Arc::new(gateway)).with_policy(policy);
    match binding.call(&request).await? {
        InvocationResult::TransactionId(id) => {
            print_success(&format!("Transaction submitted: {}", id.bright_cyan()));
        }
        InvocationResult::Value(value) => print_value(&value),
    }

    Ok(())
}

/// Execute config commands.
fn execute_config(cmd: ConfigCommands, mut config: CliConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            println!("Gateway:      {}", config.gateway_url.bright_cyan());
            println!("Network:      {}", config.network.bright_green());
            println!("FLIX Server:  {}", config.flix_server_url.bright_yellow());
            println!("Language:     {}", config.language.bright_magenta());
            println!("File:         {}", CliConfig::config_path()?.display());
            return Ok(());
        }
        ConfigCommands::SetGateway { url } => config.gateway_url = url,
        ConfigCommands::SetNetwork { network } => config.network = network,
        ConfigCommands::SetServer { url } => config.flix_server_url = url,
        ConfigCommands::SetLanguage { language } => {
            config.language = language.parse::<Language>()?.to_string();
        }
        ConfigCommands::Reset => {
            CliConfig::default().save()?;
            print_success("Configuration reset to defaults");
            return Ok(());
        }
    }

    config.save()?;
    print_success("Configuration updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_TOKENS: &str = include_str!("../../../fixtures/transfer-tokens.template.json");
    const MULTIPLY: &str = include_str!("../../../fixtures/multiply.template.json");

    #[test]
    fn test_parse_invoke() {
        let cli = Cli::try_parse_from([
            "flixkit", "invoke", "multiply", "--arg", "x=3", "-a", "y=4", "--network", "testnet", "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Invoke {
                query,
                args,
                network,
                strict,
                ..
            } => {
                assert_eq!(query, "multiply");
                assert_eq!(args, vec!["x=3", "y=4"]);
                assert_eq!(network.as_deref(), Some("testnet"));
                assert!(strict);
            }
            _ => panic!("expected invoke"),
        }
    }

    #[test]
    fn test_parse_generate_requires_query() {
        assert!(Cli::try_parse_from(["flixkit", "generate"]).is_err());
        let cli = Cli::try_parse_from(["flixkit", "-v", "generate", "a.json", "b.json", "--lang", "ts"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Generate { ref queries, .. } if queries.len() == 2));
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["flixkit", "config", "set-network", "mainnet"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::SetNetwork { ref network }) if network == "mainnet"
        ));
    }

    #[tokio::test]
    async fn test_generate_next_to_templates() {
        let dir = tempfile::tempdir().unwrap();
        let transfer = dir.path().join("transfer-tokens.template.json");
        let multiply = dir.path().join("multiply.template.json");
        std::fs::write(&transfer, TRANSFER_TOKENS).unwrap();
        std::fs::write(&multiply, MULTIPLY).unwrap();

        let queries = vec![
            transfer.to_string_lossy().into_owned(),
            multiply.to_string_lossy().into_owned(),
        ];
        let written = generate(&TemplateSource::default(), &queries, Language::JavaScript, None)
            .await
            .unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("transfer-tokens.template.js"),
                dir.path().join("multiply.template.js"),
            ]
        );
        let code = std::fs::read_to_string(&written[0]).unwrap();
        assert!(code.contains("import flixTemplate from \"./transfer-tokens.template.json\""));
        assert!(code.contains("args: (arg, t) => [arg(amount, t.UFix64), arg(to, t.Address)]"));
    }

    #[tokio::test]
    async fn test_generate_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("multiply.template.json");
        std::fs::write(&template, MULTIPLY).unwrap();
        let out_dir = dir.path().join("bindings");

        let written = generate(
            &TemplateSource::default(),
            &[template.to_string_lossy().into_owned()],
            Language::TypeScript,
            Some(&out_dir),
        )
        .await
        .unwrap();

        assert_eq!(written, vec![out_dir.join("multiply.template.ts")]);
        let code = std::fs::read_to_string(&written[0]).unwrap();
        assert!(code.contains("import flixTemplate from \"../multiply.template.json\""));
        assert!(code.contains("interface MultiplyTwoIntegersParams"));
    }

    #[tokio::test]
    async fn test_generate_same_template_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("multiply.template.json");
        std::fs::write(&template, MULTIPLY).unwrap();
        let query = template.to_string_lossy().into_owned();

        let result = generate(
            &TemplateSource::default(),
            &[query.clone(), query],
            Language::JavaScript,
            None,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_inline_fails() {
        let result = generate(
            &TemplateSource::default(),
            &[MULTIPLY.to_string()],
            Language::JavaScript,
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
