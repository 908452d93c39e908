// crates/pledge-registry-cli/src/main.rs
// ============================================================================
// Module: Pledge Registry CLI Entry Point
// Description: Command dispatcher for serving and inspecting the registry.
// Purpose: Run the HTTP server and offer offline config and pledge tooling.
// Dependencies: clap, pledge-registry-config, pledge-registry-server, tokio.
// ============================================================================

//! ## Overview
//! The `pledge-registry` binary starts the HTTP server, validates or prints
//! configuration, and reads the pledge table directly for operators. All
//! output goes through explicit stdout/stderr writers and every failure ends
//! in a non-zero exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use pledge_registry_config::PledgeRegistryConfig;
use pledge_registry_config::config_toml_example;
use pledge_registry_core::Pledge;
use pledge_registry_core::PledgeStore;
use pledge_registry_server::PledgeServer;
use pledge_registry_server::ServerError;
use pledge_registry_store_sqlite::SqlitePledgeStore;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "pledge-registry", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the pledge HTTP server.
    Serve(ConfigArgs),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Pledge table inspection.
    Pledges {
        /// Selected pledges subcommand.
        #[command(subcommand)]
        command: PledgesCommand,
    },
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to pledge-registry.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a config file.
    Validate(ConfigArgs),
    /// Print an example config file.
    Example,
}

/// Pledges subcommands.
#[derive(Subcommand, Debug)]
enum PledgesCommand {
    /// Print the number of stored pledges.
    Count(ConfigArgs),
    /// Print every pledge as a JSON line, newest first.
    List(ConfigArgs),
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a printable message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => command_serve(args).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Pledges {
            command,
        } => command_pledges(command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(args: ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(&args)?;
    let bind = config.server.bind.clone();
    let server = tokio::task::spawn_blocking(move || PledgeServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    write_stderr_line(&format!("pledge-registry listening on {bind}"))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server
        .serve()
        .await
        .map_err(|err: ServerError| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(args) => {
            let _config = load_config(&args)?;
            write_stdout_line("Config valid")
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Pledge Commands
// ============================================================================

/// One pledge rendered for `pledges list`.
#[derive(Debug, Serialize)]
struct PledgeLine<'a> {
    /// Store identifier.
    id: i64,
    /// Company name as stored.
    company_name: &'a str,
    /// Contact name as stored.
    contact_name: &'a str,
    /// Normalized email.
    email: &'a str,
    /// Title as stored.
    title: &'a str,
    /// Website as stored.
    website: &'a str,
    /// Recorded client address.
    ip_address: &'a str,
    /// Creation time in RFC 3339.
    created_at: String,
}

impl<'a> From<&'a Pledge> for PledgeLine<'a> {
    fn from(pledge: &'a Pledge) -> Self {
        Self {
            id: pledge.id.get(),
            company_name: &pledge.company_name,
            contact_name: &pledge.contact_name,
            email: &pledge.email,
            title: &pledge.title,
            website: &pledge.website,
            ip_address: &pledge.ip_address,
            created_at: pledge.created_at.to_rfc3339(),
        }
    }
}

/// Dispatches pledge subcommands.
fn command_pledges(command: PledgesCommand) -> CliResult<ExitCode> {
    match command {
        PledgesCommand::Count(args) => {
            let store = open_store(&load_config(&args)?)?;
            let total =
                store.count().map_err(|err| CliError::new(format!("count failed: {err}")))?;
            close_store(&store)?;
            write_stdout_line(&total.to_string())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        PledgesCommand::List(args) => {
            let store = open_store(&load_config(&args)?)?;
            let pledges = store
                .list_newest_first()
                .map_err(|err| CliError::new(format!("list failed: {err}")))?;
            close_store(&store)?;
            for line in render_pledge_lines(&pledges)? {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Serializes pledges as one JSON object per line, preserving order.
fn render_pledge_lines(pledges: &[Pledge]) -> CliResult<Vec<String>> {
    pledges
        .iter()
        .map(|pledge| {
            serde_json::to_string(&PledgeLine::from(pledge))
                .map_err(|err| CliError::new(format!("failed to encode pledge: {err}")))
        })
        .collect()
}

/// Opens the configured `SQLite` pledge store.
fn open_store(config: &PledgeRegistryConfig) -> CliResult<SqlitePledgeStore> {
    SqlitePledgeStore::new(config.store.sqlite_config())
        .map_err(|err| CliError::new(format!("failed to open store: {err}")))
}

/// Closes the pledge store, surfacing close failures.
fn close_store(store: &SqlitePledgeStore) -> CliResult<()> {
    store.close().map_err(|err| CliError::new(format!("failed to close store: {err}")))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration for a command.
fn load_config(args: &ConfigArgs) -> CliResult<PledgeRegistryConfig> {
    PledgeRegistryConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(format!("Failed to load config: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
