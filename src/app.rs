// Declare modules
pub mod cli;
pub mod config;
pub mod filter;
pub mod gitignore;
pub mod models;
pub mod prompt;
pub mod scanner;
pub mod utils;
pub mod writer;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use self::cli::Cli;
use self::config::Config;
use self::filter::FilterPolicy;
use self::gitignore::IgnoreRules;
use self::scanner::Scanner;
use self::writer::{OutputWriter, OUTPUT_DIR_NAME};

/// Initializes components and orchestrates data flow.
pub fn run(args: Cli) -> Result<()> {
    // 1. Resolve Project Root
    let root = resolve_root(&args)?;

    // 2. Load Configuration & Ignore Rules
    let config = Config::load(&root);
    let ignore_rules = IgnoreRules::load(&root);

    if config.include_extensions.is_empty() {
        log::warn!("💡 Tip: includeExtensions is empty, no file contents will be collected.");
    }

    // 3. Dry Traversal (count eligible files)
    let filter = FilterPolicy::new(&root, &config, ignore_rules);
    let scanner = Scanner::new(&root, &config, &filter);
    let eligible = scanner.count_eligible()?;

    // 4. Confirm Above Threshold
    if !prompt::confirm(eligible, config.max_files_warning)? {
        println!("Aborted by user");
        return Ok(());
    }

    // 5. Allocate Output & Write
    let mut writer = OutputWriter::create(&root.join(OUTPUT_DIR_NAME))?;
    scanner.run(&mut writer)?;

    // 6. Report Artifact
    let path = writer.finish()?;
    println!("Output written to {}", path.display());

    Ok(())
}

fn resolve_root(args: &Cli) -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let root = utils::resolve_path(&current_dir, &args.root);
    if !root.is_dir() {
        anyhow::bail!("Root directory {} does not exist", root.display());
    }
    Ok(root)
}
