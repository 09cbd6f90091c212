use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use v8_args_core::{CheckError, Command as _, Invocation};
use v8_args_designer::DesignerCommand;
use v8_args_wait::{CancellationToken, Poller, WaitConfig};

#[derive(Debug, Parser)]
#[command(name = "v8-args")]
#[command(about = "Render, check and await 1C:Enterprise designer invocations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a command document (JSON or YAML) into an invocation line.
    Render(RenderArgs),
    /// Check a command document and report every violation.
    Check(CheckArgs),
    /// List command document tags, or print the fields of one command.
    Schema(SchemaArgs),
    /// Wait until an address accepts TCP connections.
    Wait(WaitArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Command document; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    file: PathBuf,
    /// Connection token placed before the rendered values (repeatable), e.g. "/F ./ib".
    #[arg(long)]
    connection: Vec<String>,
    /// Print the invocation as JSON instead of a single line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Command document; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    file: PathBuf,
    /// Print violations as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Document tag (e.g. repository_create). Lists all tags when omitted.
    command: Option<String>,
}

#[derive(Debug, Args)]
struct WaitArgs {
    /// Target as host:port.
    #[arg(long)]
    address: String,
    /// Overall deadline in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Delay between probe attempts in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,
    /// YAML file with timeout_ms / interval_ms; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render(args) => run_render(args),
        Command::Check(args) => run_check(args),
        Command::Schema(args) => run_schema(args),
        Command::Wait(args) => run_wait(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let command = load_document(&args.file)?;
    let invocation = match Invocation::new(&command) {
        Ok(invocation) => invocation.with_connection(args.connection),
        Err(err) => return Err(report_violations(command.name(), &err)),
    };

    if args.json {
        let raw = serde_json::to_string_pretty(&invocation)
            .map_err(|err| format!("Failed to serialize invocation: {err}"))?;
        println!("{raw}");
    } else {
        println!("{invocation}");
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let command = load_document(&args.file)?;
    let Err(err) = command.check() else {
        println!("{}: ok", command.name());
        return Ok(());
    };

    if args.json {
        let raw = serde_json::to_string_pretty(err.violations())
            .map_err(|err| format!("Failed to serialize violations: {err}"))?;
        println!("{raw}");
    }
    Err(report_violations(command.name(), &err))
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let Some(name) = args.command else {
        for name in DesignerCommand::NAMES {
            println!("{name}");
        }
        return Ok(());
    };

    let descriptors = DesignerCommand::descriptors(&name).ok_or_else(|| {
        format!(
            "Unknown command '{name}' (expected one of: {})",
            DesignerCommand::NAMES.join(", ")
        )
    })?;
    let raw = serde_json::to_string_pretty(&descriptors)
        .map_err(|err| format!("Failed to serialize descriptors: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_wait(args: WaitArgs) -> Result<(), String> {
    let config = wait_config(&args)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to start async runtime: {err}"))?;

    runtime
        .block_on(async {
            let token = CancellationToken::new();
            let on_interrupt = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            Poller::new(args.address.as_str())
                .with_config(&config)
                .wait_ready(&token)
                .await
        })
        .map_err(|err| err.to_string())?;

    println!("{} is ready", args.address);
    Ok(())
}

/// Config file values, overridden by explicit flags.
fn wait_config(args: &WaitArgs) -> Result<WaitConfig, String> {
    let mut config = match &args.config {
        Some(path) => WaitConfig::load(path)
            .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?,
        None => WaitConfig::default(),
    };
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.interval_ms = interval_ms;
    }
    Ok(config)
}

fn load_document(path: &Path) -> Result<DesignerCommand, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let command = parse_document(path, &raw)
        .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;
    debug!(command = command.name(), path = %path.display(), "loaded command document");
    Ok(command)
}

fn parse_document(path: &Path, raw: &str) -> Result<DesignerCommand, String> {
    if is_yaml(path) {
        serde_yaml::from_str(raw).map_err(|err| err.to_string())
    } else {
        serde_json::from_str(raw).map_err(|err| err.to_string())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Prints every violation to stderr and returns the summary error.
fn report_violations(name: &str, err: &CheckError) -> String {
    eprintln!("{name}:");
    for violation in err.violations() {
        eprintln!("  - {violation}");
        for (key, value) in &violation.context {
            eprintln!("      {key}: {value}");
        }
    }
    format!("{name}: {} check(s) failed", err.len())
}
