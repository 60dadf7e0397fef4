use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Directory the output artifact lands in, relative to the project root.
pub const OUTPUT_DIR_NAME: &str = "textify";

/// Name tried first; collisions rotate to `output.NNN.txt`.
pub const OUTPUT_FILE_BASE: &str = "output.txt";

/// Serializes eligible files into one annotated text artifact.
pub struct OutputWriter {
    out: BufWriter<File>,
    path: PathBuf,
}

impl OutputWriter {
    /// Creates the output directory if it is absent, picks an unused
    /// filename and opens it for writing.
    pub fn create(output_dir: &Path) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir(output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        }
        let path = output_dir.join(next_output_name(output_dir, OUTPUT_FILE_BASE));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    /// Appends one record: the path marker line, the content verbatim,
    /// then a blank separator line.
    pub fn emit(&mut self, relative_path: &Path, content: &str) -> Result<()> {
        write!(self.out, "// {}\n{}\n\n", relative_path.display(), content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Flushes and returns the path of the written artifact.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.out
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(self.path)
    }
}

/// First unused output name in `dir`: the base name itself, then
/// `<stem>.001.txt`, `<stem>.002.txt` and so on. Never reuses a name,
/// so prior output is never overwritten.
pub fn next_output_name(dir: &Path, base: &str) -> String {
    let stem = base.strip_suffix(".txt").unwrap_or(base);
    let mut candidate = base.to_string();
    let mut counter = 0;
    while dir.join(&candidate).exists() {
        counter += 1;
        candidate = format!("{}.{:03}.txt", stem, counter);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn the_base_name_is_used_when_free() -> Result<()> {
        let dir = TempDir::new()?;
        assert_eq!(next_output_name(dir.path(), OUTPUT_FILE_BASE), "output.txt");
        Ok(())
    }

    #[test]
    fn the_rotation_counter_skips_existing_names() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("output.txt"), "")?;
        assert_eq!(
            next_output_name(dir.path(), OUTPUT_FILE_BASE),
            "output.001.txt"
        );
        fs::write(dir.path().join("output.001.txt"), "")?;
        assert_eq!(
            next_output_name(dir.path(), OUTPUT_FILE_BASE),
            "output.002.txt"
        );
        Ok(())
    }

    #[test]
    fn create_makes_the_output_directory() -> Result<()> {
        let dir = TempDir::new()?;
        let out_dir = dir.path().join("textify");
        let writer = OutputWriter::create(&out_dir)?;
        assert!(out_dir.is_dir());
        let path = writer.finish()?;
        assert!(path.ends_with("textify/output.txt"));
        Ok(())
    }

    #[test]
    fn records_keep_content_verbatim() -> Result<()> {
        let dir = TempDir::new()?;
        let mut writer = OutputWriter::create(&dir.path().join("out"))?;
        writer.emit(Path::new("src/index.ts"), "line one\nline two")?;
        writer.emit(Path::new("src/empty.ts"), "")?;
        let path = writer.finish()?;
        let written = fs::read_to_string(path)?;
        assert_eq!(
            written,
            "// src/index.ts\nline one\nline two\n\n// src/empty.ts\n\n\n"
        );
        Ok(())
    }
}
