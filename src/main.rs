use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries only the secret.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run(&cli) {
        Ok(recovery) => println!("{}", recovery.secret),
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    }
}
