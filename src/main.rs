use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use session_guard::config::ConfigError;
use session_guard::router::Dispatch;
use session_guard::{
    GuardConfig, GuardOutcome, HttpTransport, LifecyclePhase, NavigationGuard, RecordingRouter, SessionStore, Transport,
    TransportError,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read session snapshot {path}: {source}")]
    ReadSession { path: PathBuf, source: std::io::Error },
    #[error("invalid session snapshot: {0}")]
    InvalidSession(serde_json::Error),
    #[error("failed to serialize report: {0}")]
    Output(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Parser, Debug)]
#[command(name = "session-guard", about = "Check server/session routing decisions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one guard invocation and print what it would do.
    Decide(DecideArgs),
    /// Sync a transport from the snapshot and GET `/` on the current server.
    Ping(PingArgs),
}

#[derive(Args, Debug)]
struct DecideArgs {
    #[arg(long, env = "SESSION_GUARD_SESSION")]
    session: PathBuf,

    /// Committed route path.
    #[arg(long, default_value = "/")]
    path: String,

    /// In-flight route path.
    #[arg(long, default_value = "")]
    pending: String,

    /// Treat this as the first navigation after startup.
    #[arg(long)]
    booting: bool,
}

#[derive(Args, Debug)]
struct PingArgs {
    #[arg(long, env = "SESSION_GUARD_SESSION")]
    session: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Decide(args) => run_decide(args),
        Command::Ping(args) => run_ping(args).await,
    }
}

fn run_decide(args: DecideArgs) -> Result<(), CliError> {
    let store = load_session(&args.session)?;
    let phase = if args.booting { LifecyclePhase::Booting } else { LifecyclePhase::Running };
    let mut guard = NavigationGuard::with_phase(GuardConfig::from_env()?, phase);

    let report = decide_report(&mut guard, &store, args.path, args.pending);
    println!("{}", serde_json::to_string_pretty(&report).map_err(CliError::Output)?);
    Ok(())
}

/// Run one guard invocation and describe it as JSON.
///
/// Fields: `outcome`, `destination` (route path, null when staying),
/// `dispatched` (`"redirect"`, `"push"`, or null), `base_url`, and
/// `sync_error` (null when the transport synced cleanly).
fn decide_report(guard: &mut NavigationGuard, store: &SessionStore, path: String, pending: String) -> Value {
    let mut router = RecordingRouter::at(path);
    router.pending = pending;
    let mut transport = HttpTransport::new();

    let report = guard.on_navigate(&mut transport, store, &mut router);
    let (outcome, destination) = match &report.outcome {
        GuardOutcome::Stayed => ("stayed", None),
        GuardOutcome::Suppressed { destination } => ("suppressed", Some(destination.path(guard.routes()).to_owned())),
        GuardOutcome::Redirected { path, .. } => ("redirected", Some(path.clone())),
    };
    let dispatched = router.last().map(|(dispatch, _)| match dispatch {
        Dispatch::Redirect => "redirect",
        Dispatch::Push => "push",
    });

    json!({
        "outcome": outcome,
        "destination": destination,
        "dispatched": dispatched,
        "base_url": transport.base_url(),
        "sync_error": report.sync.err().map(|e| e.to_string()),
    })
}

async fn run_ping(args: PingArgs) -> Result<(), CliError> {
    let store = load_session(&args.session)?;
    let mut transport = HttpTransport::new();
    session_guard::sync::sync(&mut transport, &store)?;

    let response = transport
        .request(reqwest::Method::GET, "/")?
        .send()
        .await
        .map_err(TransportError::from)?;
    let status = response.status();
    tracing::info!(base_url = transport.base_url(), %status, "ping");
    println!("{} {}", transport.base_url(), status.as_u16());
    Ok(())
}

fn load_session(path: &Path) -> Result<SessionStore, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadSession { path: path.to_owned(), source })?;
    serde_json::from_str(&raw).map_err(CliError::InvalidSession)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
