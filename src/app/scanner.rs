use crate::app::config::Config;
use crate::app::filter::FilterPolicy;
use crate::app::models::FsEntry;
use crate::app::utils::resolve_path;
use crate::app::writer::OutputWriter;
use anyhow::{Context, Result};
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Walks the configured include directories, filtering as it goes.
///
/// One recursion drives both passes of a run: the silent counting pass
/// the confirmation prompt is based on, and the writing pass that prints
/// the tree and hands eligible files to the writer. Both consult the
/// same `FilterPolicy`, so the count predicts the written output.
pub struct Scanner<'a> {
    root: PathBuf,
    include_dirs: Vec<String>,
    filter: &'a FilterPolicy,
}

enum Mode<'w> {
    Count,
    Write(&'w mut OutputWriter),
}

impl<'a> Scanner<'a> {
    pub fn new(root: &Path, config: &Config, filter: &'a FilterPolicy) -> Self {
        Self {
            root: root.to_path_buf(),
            include_dirs: config.include_dirs.clone(),
            filter,
        }
    }

    /// Counts the files the writing pass would emit, without output.
    pub fn count_eligible(&self) -> Result<u64> {
        let mut mode = Mode::Count;
        let mut total = 0;
        for dir in &self.include_dirs {
            let full = resolve_path(&self.root, dir);
            if !full.exists() {
                continue;
            }
            total += self.walk_dir(&full, 1, &mut mode)?;
        }
        Ok(total)
    }

    /// Walks every include directory in configured order, printing the
    /// tree and forwarding eligible files to the writer.
    pub fn run(&self, writer: &mut OutputWriter) -> Result<()> {
        println!("Collecting files:");
        let mut mode = Mode::Write(writer);
        for dir in &self.include_dirs {
            let full = resolve_path(&self.root, dir);
            if !full.exists() {
                println!("Directory {} does not exist, skipping", dir);
                continue;
            }
            println!("{}/", self.display_relative(&full));
            self.walk_dir(&full, 1, &mut mode)?;
        }
        Ok(())
    }

    fn walk_dir(&self, dir: &Path, depth: usize, mode: &mut Mode) -> Result<u64> {
        let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("Failed to list {}", dir.display()))?;
        // Sorted by name so repeated runs emit identical output
        entries.sort_by_key(|entry| entry.file_name());

        let mut eligible = 0;
        for dir_entry in entries {
            let path = dir_entry.path();
            let file_type = dir_entry
                .file_type()
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            let entry = FsEntry {
                relative_path: diff_paths(&path, &self.root).unwrap_or_else(|| path.clone()),
                is_dir: file_type.is_dir(),
                path,
            };

            if self.filter.should_skip(&entry) {
                continue;
            }

            let name = dir_entry.file_name();
            if entry.is_dir {
                if let Mode::Write(_) = mode {
                    println!("{}{}/", "  ".repeat(depth), name.to_string_lossy());
                }
                eligible += self.walk_dir(&entry.path, depth + 1, mode)?;
            } else if self.filter.is_eligible_file(&entry.path) {
                eligible += 1;
                if let Mode::Write(writer) = mode {
                    println!("{}{}", "  ".repeat(depth), name.to_string_lossy());
                    let content = fs::read_to_string(&entry.path)
                        .with_context(|| format!("Failed to read {}", entry.path.display()))?;
                    writer.emit(&entry.relative_path, &content)?;
                }
            }
        }
        Ok(eligible)
    }

    fn display_relative(&self, path: &Path) -> String {
        match diff_paths(path, &self.root) {
            Some(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
            _ => ".".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gitignore::IgnoreRules;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> Result<()> {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn the_count_matches_what_the_writing_pass_emits() -> Result<()> {
        let dir = TempDir::new()?;
        create_test_file(&dir, "src/index.ts", "index content")?;
        create_test_file(&dir, "src/utils/helper.ts", "helper content")?;
        create_test_file(&dir, "src/readme.md", "skipped")?;
        let mut config = Config::default();
        config.include_dirs = vec!["src".to_string()];
        let filter = FilterPolicy::new(dir.path(), &config, IgnoreRules::empty());
        let scanner = Scanner::new(dir.path(), &config, &filter);

        assert_eq!(scanner.count_eligible()?, 2);

        let mut writer = OutputWriter::create(&dir.path().join("textify"))?;
        scanner.run(&mut writer)?;
        let output = fs::read_to_string(writer.finish()?)?;
        assert!(output.contains("// src/index.ts\nindex content\n\n"));
        assert!(output.contains("// src/utils/helper.ts\nhelper content\n\n"));
        assert!(!output.contains("readme.md"));
        Ok(())
    }

    #[test]
    fn excluded_directories_are_never_entered() -> Result<()> {
        let dir = TempDir::new()?;
        create_test_file(&dir, "src/index.ts", "one")?;
        create_test_file(&dir, "src/utils/helper.ts", "two")?;
        create_test_file(&dir, "src/api/x.ts", "three")?;
        let mut config = Config::default();
        config.include_dirs = vec!["src".to_string()];
        config.exclude_dirs = vec!["src/api".to_string()];
        let filter = FilterPolicy::new(dir.path(), &config, IgnoreRules::empty());
        let scanner = Scanner::new(dir.path(), &config, &filter);

        assert_eq!(scanner.count_eligible()?, 2);

        let mut writer = OutputWriter::create(&dir.path().join("textify"))?;
        scanner.run(&mut writer)?;
        let output = fs::read_to_string(writer.finish()?)?;
        assert!(output.contains("// src/index.ts"));
        assert!(output.contains("// src/utils/helper.ts"));
        assert!(!output.contains("src/api"));
        Ok(())
    }

    #[test]
    fn a_missing_include_directory_is_not_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        create_test_file(&dir, "src/index.ts", "content")?;
        let mut config = Config::default();
        config.include_dirs = vec!["missing".to_string(), "src".to_string()];
        let filter = FilterPolicy::new(dir.path(), &config, IgnoreRules::empty());
        let scanner = Scanner::new(dir.path(), &config, &filter);
        assert_eq!(scanner.count_eligible()?, 1);
        Ok(())
    }

    #[test]
    fn a_gitignored_subtree_is_pruned() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(".gitignore"), "generated/\n")?;
        create_test_file(&dir, "src/main.ts", "main")?;
        create_test_file(&dir, "generated/out.ts", "generated")?;
        let config = Config::default();
        let filter = FilterPolicy::new(dir.path(), &config, IgnoreRules::load(dir.path()));
        let scanner = Scanner::new(dir.path(), &config, &filter);
        assert_eq!(scanner.count_eligible()?, 1);
        Ok(())
    }

    #[test]
    fn unreadable_content_aborts_the_writing_pass() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("bad.ts"), vec![0xffu8, 0xfe, 0x01])?;
        let config = Config::default();
        let filter = FilterPolicy::new(dir.path(), &config, IgnoreRules::empty());
        let scanner = Scanner::new(dir.path(), &config, &filter);

        // Counting does not read contents, so it still succeeds
        assert_eq!(scanner.count_eligible()?, 1);

        let mut writer = OutputWriter::create(&dir.path().join("textify"))?;
        assert!(scanner.run(&mut writer).is_err());
        Ok(())
    }
}
