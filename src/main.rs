//! MinKeyboard - virtual keyboard engine command line
//!
//! Inspects keyboard configurations (resolved keys, projected layouts) and
//! runs key sequences through the editing engine without a host UI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minkeyboard::cli::{EditArgs, ExitCode, KeysArgs, LayoutArgs};
use minkeyboard::constants::APP_NAME;

/// MinKeyboard - virtual keyboard engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the keys a configuration resolves to
    Keys(KeysArgs),
    /// Print the projected layout of a configuration
    Layout(LayoutArgs),
    /// Apply key presses to a text value
    Edit(EditArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new(filter)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into())
    };
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Keys(args) => args.execute(),
        Commands::Layout(args) => args.execute(),
        Commands::Edit(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
    std::process::exit(ExitCode::Success.code());
}
