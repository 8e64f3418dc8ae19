use clap::Parser;
use outage_viewer::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_cli_logging()?;
    let cli = Cli::parse();
    println!("{}", run(&cli)?);
    Ok(())
}
