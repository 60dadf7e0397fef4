use ignore::gitignore::Gitignore;
use std::path::Path;

const IGNORE_FILE_NAME: &str = ".gitignore";

/// Ignore rules loaded from the project root. The only question it
/// answers is whether a root-relative path matches a rule.
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Reads `<root>/.gitignore` if present; absence yields an empty set.
    pub fn load(root: &Path) -> Self {
        let path = root.join(IGNORE_FILE_NAME);
        if !path.exists() {
            log::info!("No .gitignore found, proceeding with config only");
            return Self::empty();
        }
        let (matcher, err) = Gitignore::new(&path);
        if let Some(err) = err {
            log::warn!("Problem reading {}: {}", path.display(), err);
        }
        Self { matcher }
    }

    /// A rule set that matches nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// True when the root-relative path matches an ignore rule. The
    /// directory flag lets directory-only patterns like `dist/` apply.
    pub fn matches(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(relative_path, is_dir).is_ignore()
    }
}
