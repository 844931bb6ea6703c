use anyhow::Result;
use clap::Parser;
use keymint::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    keymint::run(cli)
}
