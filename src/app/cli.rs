use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten a project tree into a single annotated text file"
)]
pub struct Cli {
    /// Project root to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,
}
