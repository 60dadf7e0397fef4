use anyhow::Result;
use clap::Parser;

mod app;

use app::cli::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    app::run(args)
}
