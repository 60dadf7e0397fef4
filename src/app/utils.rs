use std::path::{Component, Path, PathBuf};

/// Joins `raw` onto `root` and collapses `.` and `..` components
/// lexically. The filesystem is not consulted and symlinks are kept
/// as they are.
pub fn resolve_path(root: &Path, raw: impl AsRef<Path>) -> PathBuf {
    let joined = root.join(raw.as_ref());
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            _ => resolved.push(component.as_os_str()),
        }
    }
    resolved
}
