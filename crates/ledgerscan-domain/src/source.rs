//! Source files discovered on disk and their detected kind

use std::path::{Path, PathBuf};

/// Kind of a statement file, decided by its extension
///
/// - Csv: comma separated export (`.csv`)
/// - Html: HTML table export (`.html`, `.htm`)
/// - Xls: legacy spreadsheet (`.xls`), not supported by the assistant
/// - Unknown: anything else; still sent, labelled `unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// CSV export
    Csv,

    /// HTML table export
    Html,

    /// Legacy Excel workbook, skipped
    Xls,

    /// Unrecognised extension
    Unknown,
}

impl FileKind {
    /// Classify a path by its (case-insensitive) extension
    ///
    /// # Examples
    ///
    /// ```
    /// use ledgerscan_domain::FileKind;
    ///
    /// assert_eq!(FileKind::from_path("BG18-jan.CSV"), FileKind::Csv);
    /// assert_eq!(FileKind::from_path("report.htm"), FileKind::Html);
    /// assert_eq!(FileKind::from_path("old.xls"), FileKind::Xls);
    /// assert_eq!(FileKind::from_path("notes"), FileKind::Unknown);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => FileKind::Csv,
            Some("html") | Some("htm") => FileKind::Html,
            Some("xls") => FileKind::Xls,
            _ => FileKind::Unknown,
        }
    }

    /// Label embedded in the instruction sent to the assistant
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Csv => "CSV",
            FileKind::Html => "HTML",
            FileKind::Xls => "XLS",
            FileKind::Unknown => "unknown",
        }
    }

    /// Whether files of this kind are uploaded at all
    pub fn is_supported(&self) -> bool {
        !matches!(self, FileKind::Xls)
    }
}

/// A file picked up by the directory walk
///
/// Created once at walk time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk
    pub path: PathBuf,

    /// Detected kind
    pub kind: FileKind,
}

impl SourceFile {
    /// Create a source file, classifying it from its path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = FileKind::from_path(&path);
        Self { path, kind }
    }

    /// Base name of the file (`dir/BG18-jan.csv` → `BG18-jan.csv`)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(FileKind::from_path("a/b/BG18-jan.csv"), FileKind::Csv);
        assert_eq!(FileKind::from_path("BG29-feb.html"), FileKind::Html);
        assert_eq!(FileKind::from_path("BG29-feb.HTM"), FileKind::Html);
        assert_eq!(FileKind::from_path("report.xls"), FileKind::Xls);
        assert_eq!(FileKind::from_path("report.xlsx"), FileKind::Unknown);
        assert_eq!(FileKind::from_path("README"), FileKind::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FileKind::Csv.label(), "CSV");
        assert_eq!(FileKind::Html.label(), "HTML");
        assert_eq!(FileKind::Unknown.label(), "unknown");
    }

    #[test]
    fn test_only_xls_is_unsupported() {
        assert!(FileKind::Csv.is_supported());
        assert!(FileKind::Html.is_supported());
        assert!(FileKind::Unknown.is_supported());
        assert!(!FileKind::Xls.is_supported());
    }

    #[test]
    fn test_source_file_name() {
        let source = SourceFile::new("/data/statements/BG18-jan.csv");
        assert_eq!(source.file_name(), "BG18-jan.csv");
        assert_eq!(source.kind, FileKind::Csv);
    }
}
