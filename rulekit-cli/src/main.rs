//! rulekit CLI - list, fetch and install Cursor rule sets

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rulekit::installer::InstallProgress;
use rulekit::mcp::McpServer;
use rulekit::{Config, InstallReport, Installer, Purpose, RuleStore, TemplateStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rulekit")]
#[command(author, version, about = "rulekit - Cursor rule distribution")]
#[command(propagate_version = true)]
struct Cli {
    /// Rule store directory (default: ~/.local/share/rulekit/rules)
    #[arg(long, short = 'r', env = "RULEKIT_RULES_DIR", global = true)]
    rules_dir: Option<PathBuf>,

    /// Template directory (default: ~/.local/share/rulekit/templates)
    #[arg(long, env = "RULEKIT_TEMPLATES_DIR", global = true)]
    templates_dir: Option<PathBuf>,

    /// Config file (YAML)
    #[arg(long, short = 'c', env = "RULEKIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List rule files, for one purpose or all default purposes
    List {
        /// Purpose to list (core, backend, docs, testing, ci-cd, frontend, deployment, api)
        purpose: Option<Purpose>,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print a rule file
    Get {
        /// Purpose the rule belongs to
        purpose: String,

        /// Rule name, with or without the .mdc extension
        name: String,
    },

    /// Install purposes into a project's rule directory
    Enable {
        /// Purposes to install
        #[arg(required = true)]
        purposes: Vec<String>,

        /// Project directory (default: current directory)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage project templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Register the rulekit MCP server in a project's .cursor/mcp.json
    Init {
        /// Project directory (default: current directory)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,

        /// Command the IDE runs to start the MCP server
        #[arg(long, default_value = "rulekit-mcp")]
        command: String,
    },

    /// Start MCP server (stdio transport)
    Serve,
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List available templates
    List {
        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Copy a template into a project directory
    Apply {
        /// Template name
        name: String,

        /// Project directory (default: current directory)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rule text and JSON on stdout stay clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.rules_dir, cli.templates_dir);

    match cli.command {
        Commands::List { purpose, format } => cmd_list(&config, purpose, format),
        Commands::Get { purpose, name } => cmd_get(&config, &purpose, &name),
        Commands::Enable {
            purposes,
            project,
            format,
        } => cmd_enable(&config, &purposes, project.as_deref(), format),
        Commands::Templates { action } => cmd_templates(&config, action),
        Commands::Init { project, command } => cmd_init(project.as_deref(), &command),
        Commands::Serve => cmd_serve(&config).await,
    }
}

fn cmd_list(config: &Config, purpose: Option<Purpose>, format: OutputFormat) -> Result<()> {
    let store = RuleStore::new(&config.rules_dir);
    let listings = store.list(purpose)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No rules found in {}", store.root().display());
        return Ok(());
    }

    for listing in listings {
        println!("{} ({} rules)", listing.purpose, listing.files.len());

        let width = listing
            .files
            .iter()
            .map(|f| f.name.len())
            .max()
            .unwrap_or(0);
        for file in listing.files {
            println!("  {:<width$}  {}", file.name, file.description, width = width);
        }
    }

    Ok(())
}

fn cmd_get(config: &Config, purpose: &str, name: &str) -> Result<()> {
    let store = RuleStore::new(&config.rules_dir);
    let text = store.get(Some(purpose), Some(name))?;
    print!("{}", text);
    Ok(())
}

fn cmd_enable(
    config: &Config,
    purposes: &[String],
    project: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let store = RuleStore::new(&config.rules_dir);
    let installer = Installer::new(&store).with_rules_subdir(&config.rules_subdir);
    tracing::info!("Enabling {} from {}", purposes.join(", "), store.root().display());

    let reports = if format == OutputFormat::Json {
        let reports = installer.enable(purposes, project)?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        reports
    } else {
        let mut printer = ReportPrinter {
            out: std::io::stdout(),
        };
        installer.enable_with_progress(purposes, project, &mut printer)?
    };

    let failed = reports.iter().filter(|r| !r.is_enabled()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} purpose(s) were not enabled", failed, reports.len());
    }
    Ok(())
}

/// Prints each install report as soon as its purpose is processed
struct ReportPrinter<W: Write> {
    out: W,
}

impl<W: Write> InstallProgress for ReportPrinter<W> {
    fn on_purpose(&mut self, report: &InstallReport) {
        if let Err(e) = writeln!(self.out, "{}", format_report(report)) {
            tracing::warn!("Failed to print report for {}: {}", report.purpose, e);
        }
    }
}

/// One line per install report
fn format_report(report: &InstallReport) -> String {
    match (&report.path, &report.error) {
        (Some(path), _) => format!("{:<12} {}  {}", report.purpose, report.status, path.display()),
        (None, Some(error)) => format!("{:<12} {}  {}", report.purpose, report.status, error),
        (None, None) => format!("{:<12} {}", report.purpose, report.status),
    }
}

fn cmd_templates(config: &Config, action: TemplateAction) -> Result<()> {
    let templates = TemplateStore::new(&config.templates_dir);

    match action {
        TemplateAction::List { format } => {
            let list = templates.list()?;
            tracing::debug!("Found {} templates", list.len());

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.is_empty() {
                println!("No templates found in {}", config.templates_dir.display());
            } else {
                println!("Templates:\n");
                for template in list {
                    println!(
                        "  {} ({} files, {} bytes)",
                        template.name, template.files, template.size
                    );
                }
            }
        }
        TemplateAction::Apply { name, project } => {
            let dest = resolve_project(project.as_deref())?;
            tracing::info!("Applying template {} to {}", name, dest.display());
            let dest = templates.apply(&name, &dest)?;
            println!("Applied template '{}' to {}", name, dest.display());
        }
    }

    Ok(())
}

fn cmd_init(project: Option<&Path>, command: &str) -> Result<()> {
    let project = resolve_project(project)?;
    tracing::info!("Registering {} in {}", command, project.display());
    let path = rulekit::setup::write_mcp_config(&project, command)?;
    println!("Registered rulekit MCP server in {}", path.display());
    Ok(())
}

async fn cmd_serve(config: &Config) -> Result<()> {
    let server = McpServer::from_config(config);
    server.run().await?;
    Ok(())
}

fn resolve_project(project: Option<&Path>) -> Result<PathBuf> {
    match project {
        Some(p) => Ok(p.to_path_buf()),
        None => std::env::current_dir().context("Failed to resolve current directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulekit::InstallStatus;

    #[test]
    fn test_parse_list_purpose() {
        let cli = Cli::try_parse_from(["rulekit", "list", "ci-cd", "-o", "json"]).unwrap();
        match cli.command {
            Commands::List { purpose, format } => {
                assert_eq!(purpose, Some(Purpose::CiCd));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_list_rejects_unknown_purpose() {
        assert!(Cli::try_parse_from(["rulekit", "list", "bogus"]).is_err());
    }

    #[test]
    fn test_enable_requires_purpose() {
        assert!(Cli::try_parse_from(["rulekit", "enable"]).is_err());
        assert!(Cli::try_parse_from(["rulekit", "enable", "core", "docs"]).is_ok());
    }

    #[test]
    fn test_format_report() {
        let report = InstallReport {
            purpose: "core".to_string(),
            status: InstallStatus::Enabled,
            path: Some(PathBuf::from("/tmp/proj/.cursor/rules/core")),
            error: None,
        };
        assert_eq!(
            format_report(&report),
            "core         enabled  /tmp/proj/.cursor/rules/core"
        );

        let report = InstallReport {
            purpose: "api".to_string(),
            status: InstallStatus::NotFound,
            path: None,
            error: None,
        };
        assert_eq!(format_report(&report), "api          not_found");
    }

    #[test]
    fn test_report_printer_writes_each_report() {
        let mut printer = ReportPrinter { out: Vec::new() };
        for (purpose, status) in [("core", InstallStatus::NotFound), ("docs", InstallStatus::NotFound)] {
            printer.on_purpose(&InstallReport {
                purpose: purpose.to_string(),
                status,
                path: None,
                error: None,
            });
        }

        let text = String::from_utf8(printer.out).unwrap();
        assert_eq!(text, "core         not_found\ndocs         not_found\n");
    }
}
