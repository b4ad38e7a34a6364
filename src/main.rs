//! cdr-fetch CLI
//!
//! Downloads CarrierX call detail records to a CSV or JSON file.

use cdr_fetch::cli::{Cli, Runner};
use cdr_fetch::config::RunConfig;
use clap::Parser;
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli).await {
        println!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> cdr_fetch::Result<()> {
    let config = RunConfig::from_cli(cli)?;
    Runner::new(config).run().await?;
    Ok(())
}
