use std::path::PathBuf;

/// Represents a single entry observed during traversal.
#[derive(Debug)]
pub struct FsEntry {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub is_dir: bool, // Taken from the directory listing; symlinks are not followed
}
