//! Persists assistant answers next to nothing else: one `<name>.json` per input

use ledgerscan_domain::SourceFile;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes assistant answers into an output directory
#[derive(Debug, Clone)]
pub struct ResultWriter {
    dir: PathBuf,
}

impl ResultWriter {
    /// Create a writer for `dir`; the directory is not touched until
    /// [`ResultWriter::ensure_dir`] or [`ResultWriter::write`]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Path the answer for `source` is written to: `<dir>/<file name>.json`
    pub fn output_path(&self, source: &SourceFile) -> PathBuf {
        self.dir.join(format!("{}.json", source.file_name()))
    }

    /// Write `text` verbatim and return the path written
    pub fn write(&self, source: &SourceFile, text: &str) -> io::Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.output_path(source);
        fs::write(&path, text.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_base_name() {
        let writer = ResultWriter::new("/out");
        let source = SourceFile::new("/in/nested/BG18-jan.csv");
        assert_eq!(writer.output_path(&source), PathBuf::from("/out/BG18-jan.csv.json"));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path());
        let source = SourceFile::new("stmt.csv");

        let text = "{\"rows\":[]}";
        let path = writer.write(&source, text).unwrap();

        assert_eq!(path, dir.path().join("stmt.csv.json"));
        assert_eq!(fs::read(&path).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bank_output").join("2024");
        let writer = ResultWriter::new(&out);

        writer.write(&SourceFile::new("a.html"), "{}").unwrap();
        assert!(out.join("a.html.json").exists());
    }

    #[test]
    fn test_write_overwrites_previous_answer() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path());
        let source = SourceFile::new("a.csv");

        writer.write(&source, "first, longer answer").unwrap();
        let path = writer.write(&source, "second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }
}
