//! nextflow-devtools CLI entry point
//!
//! Usage:
//!   nextflow-devtools mcp              Start MCP server over stdio
//!   nextflow-devtools targets          List make targets
//!   nextflow-devtools run <target>     Run a make target
//!   nextflow-devtools build            Build from source
//!   nextflow-devtools test <path>      Run a single Gradle test
//!   nextflow-devtools version          Show the built launcher version
//!   nextflow-devtools config           Show configuration

use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use nextflow_devtools::cli::{
    commands::TargetsArgs, load_cli_config, run_mcp_server, Cli, Commands, LogFormat,
    OutputFormat,
};
use nextflow_devtools::config::{find_config_files, Config};
use nextflow_devtools::error::{ToolError, ToolResult};
use nextflow_devtools::DevTools;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing on stderr; stdout belongs to the MCP transport and command output
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Commands::Mcp) {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match cli.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_cli_config(cli.config.as_deref(), cli.dir.as_deref())?;

    match cli.command {
        Commands::Mcp => run_mcp_server(config).await?,
        Commands::Targets(args) => list_targets(args, DevTools::new(config)).await?,
        Commands::Run(args) => {
            let tools = DevTools::new(config);
            let message = format!("make {}", args.target);
            report(&message, tools.run_make_command(&args.target)).await?;
        }
        Commands::Build => {
            let tools = DevTools::new(config);
            report("Building Nextflow", tools.build()).await?;
        }
        Commands::Test(args) => {
            let tools = DevTools::new(config);
            let message = format!("Running {}", args.test_path);
            report(&message, tools.run_specific_test(&args.test_path)).await?;
        }
        Commands::Version => {
            let tools = DevTools::new(config);
            report("Querying version", tools.get_version()).await?;
        }
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// List make targets in the requested format
async fn list_targets(args: TargetsArgs, tools: DevTools) -> Result<()> {
    match args.format {
        OutputFormat::Json => {
            let targets = tools.discover_targets().await.map_err(failure)?;
            println!("{}", serde_json::to_string_pretty(&targets.names())?);
        }
        OutputFormat::Plain => {
            let targets = tools.discover_targets().await.map_err(failure)?;
            for name in targets.iter() {
                println!("{}", name);
            }
        }
        OutputFormat::Table => {
            let dir = tools.project().get().await;
            println!("{}: {}", "Directory".cyan(), dir.display());
            println!();
            print_result(tools.list_targets().await)?;
        }
    }

    Ok(())
}

/// Run one tool operation behind a spinner and print its report
async fn report<F>(message: &str, operation: F) -> Result<()>
where
    F: Future<Output = ToolResult>,
{
    let spinner = spinner(message);
    let result = operation.await;
    spinner.finish_and_clear();

    print_result(result)
}

/// Print a report to stdout, or return the failure with a hint on stderr
fn print_result(result: ToolResult) -> Result<()> {
    match result {
        Ok(report) if report.is_warning() => {
            println!("{}", report.text.yellow());
            Ok(())
        }
        Ok(report) => {
            println!("{}", report.text);
            Ok(())
        }
        Err(e) => {
            if let Some(suggestion) = e.suggestion() {
                eprintln!("{}: {}", "hint".cyan().bold(), suggestion);
            }
            Err(failure(e))
        }
    }
}

fn failure(e: ToolError) -> anyhow::Error {
    let kind = e.kind();
    anyhow::Error::new(e).context(format!("{} failure", kind))
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Show resolved configuration and tool locations
fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered.trim_end());
    println!();

    println!("{}:", "Config Files".cyan());
    let files = find_config_files();
    if files.is_empty() {
        println!("  None (using defaults)");
    } else {
        for file in &files {
            println!("  - {}", file.display());
        }
    }

    println!();
    println!(
        "{}: {}",
        "Project Directory".cyan(),
        config.project_dir().display()
    );

    match which::which(&config.commands.make) {
        Ok(path) => println!("{}: {}", "make".cyan(), path.display()),
        Err(_) => println!(
            "{}: {}",
            "make".cyan(),
            format!("'{}' not found in PATH", config.commands.make).yellow()
        ),
    }

    Ok(())
}
