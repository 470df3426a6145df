mod cli;
mod config;
mod generator;
mod linker;
mod loader;
mod mapper;
mod model;
mod tracker;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Progress goes to stdout; diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
