use crate::app::config::Config;
use crate::app::gitignore::IgnoreRules;
use crate::app::models::FsEntry;
use crate::app::utils::resolve_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Combines the extension sets, the directory lists and the gitignore
/// rules into one skip/emit decision. Built once per run; the directory
/// lists are resolved against the root at construction.
pub struct FilterPolicy {
    ignore_rules: IgnoreRules,
    include_extensions: HashSet<String>,
    exclude_extensions: HashSet<String>,
    include_dirs: Vec<PathBuf>,
    exclude_dirs: Vec<PathBuf>,
}

impl FilterPolicy {
    pub fn new(root: &Path, config: &Config, ignore_rules: IgnoreRules) -> Self {
        Self {
            ignore_rules,
            include_extensions: config.include_extensions.iter().cloned().collect(),
            exclude_extensions: config.exclude_extensions.iter().cloned().collect(),
            include_dirs: config
                .include_dirs
                .iter()
                .map(|dir| resolve_path(root, dir))
                .collect(),
            exclude_dirs: config
                .exclude_dirs
                .iter()
                .map(|dir| resolve_path(root, dir))
                .collect(),
        }
    }

    /// Decides whether an entry is dropped from the walk entirely.
    /// The checks run in a fixed order and the first hit wins.
    pub fn should_skip(&self, entry: &FsEntry) -> bool {
        // 1. Gitignore match on the root-relative path
        if self
            .ignore_rules
            .matches(&entry.relative_path, entry.is_dir)
        {
            return true;
        }

        // 2. Explicitly denied extension
        let extension = dotted_extension(&entry.path);
        if let Some(ext) = &extension {
            if self.exclude_extensions.contains(ext) {
                return true;
            }
        }

        // 3. Files need an allowed extension; directories are exempt so
        //    the walk can descend into them
        let allowed = extension
            .as_ref()
            .map_or(false, |ext| self.include_extensions.contains(ext));
        if !allowed && !entry.is_dir {
            return true;
        }

        // 4. Inside a denied directory (checked before step 5, so a
        //    denial nested in an allowed directory wins)
        if self
            .exclude_dirs
            .iter()
            .any(|dir| entry.path.starts_with(dir))
        {
            return true;
        }

        // 5. Outside every allowed directory
        !self
            .include_dirs
            .iter()
            .any(|dir| entry.path.starts_with(dir))
    }

    /// Final gate for leaf files: an allowed extension that is not also
    /// denied. Directories never reach this test.
    pub fn is_eligible_file(&self, path: &Path) -> bool {
        match dotted_extension(path) {
            Some(ext) => {
                self.include_extensions.contains(&ext) && !self.exclude_extensions.contains(&ext)
            }
            None => false,
        }
    }
}

/// Extension with its leading dot, `None` when the path has none.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}
