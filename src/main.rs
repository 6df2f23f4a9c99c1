use clap::Parser;
use stencilcut::{init_logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    cli.execute()
}
