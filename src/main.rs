use anyhow::Result;
use clap::Parser;
use xpense::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    xpense::logging::init_tracing(cli.verbose);
    cli.run().await
}
