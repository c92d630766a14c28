//! Catchguide CLI - fish identification and regulation lookup.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Identify {
            image,
            lat,
            lon,
            document,
            llm,
        } => commands::identify::run(&cli.settings, image, lat, lon, document, llm, cli.verbose),

        Commands::Tip { tips, seed } => commands::tip::run(&cli.settings, tips, seed),

        Commands::Serve {
            port,
            no_open,
            document,
            tips,
            llm,
        } => commands::serve::run(&cli.settings, port, no_open, document, tips, llm),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "catchguide=debug,catchguide_cli=debug"
    } else {
        "catchguide=warn,catchguide_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
