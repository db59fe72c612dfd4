//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::{BatchReport, FileOutcome, FileReport};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a batch report.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(self.format_report_quiet(report)),
        }
    }

    /// Format the result of a single file.
    pub fn format_file(&self, file: &FileReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(file)?),
            _ => self.format_report(&BatchReport {
                files: vec![file.clone()],
            }),
        }
    }

    /// Format a batch report as JSON.
    fn format_report_json(&self, report: &BatchReport) -> Result<String> {
        let value = serde_json::json!({
            "processed": report.processed(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "files": report.files,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format a batch report as a table followed by a summary line.
    fn format_report_table(&self, report: &BatchReport) -> String {
        if report.files.is_empty() {
            return self.warning("No statement files found.");
        }

        let mut builder = Builder::default();
        builder.push_record(["File", "Type", "Status", "Detail"]);

        for file in &report.files {
            let (status, detail) = match &file.outcome {
                FileOutcome::Processed { output, .. } => (
                    self.colorize("processed", "green"),
                    output
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "answer not saved".to_string()),
                ),
                FileOutcome::Skipped { reason } => {
                    (self.colorize("skipped", "yellow"), reason.clone())
                }
                FileOutcome::Failed { stage, error } => (
                    self.colorize("failed", "red"),
                    format!("{}: {}", stage, first_line(error)),
                ),
            };
            builder.push_record([
                file.path.display().to_string(),
                file.kind.to_string(),
                status,
                detail,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.summary(report))
    }

    /// Format a batch report in quiet mode (written output paths only).
    fn format_report_quiet(&self, report: &BatchReport) -> String {
        let paths: Vec<String> = report
            .files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Processed {
                    output: Some(path), ..
                } => Some(path.display().to_string()),
                _ => None,
            })
            .collect();
        paths.join("\n")
    }

    /// One-line batch summary.
    pub fn summary(&self, report: &BatchReport) -> String {
        let msg = format!(
            "{} processed, {} skipped, {} failed",
            report.processed(),
            report.skipped(),
            report.failed()
        );
        if report.failed() > 0 {
            self.warning(&msg)
        } else {
            self.success(&msg)
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

// Status bodies are pretty-printed JSON; keep table cells to one line.
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;
    use std::path::PathBuf;

    fn create_test_report() -> BatchReport {
        BatchReport {
            files: vec![
                FileReport {
                    path: PathBuf::from("in/BG18-jan.csv"),
                    kind: "CSV",
                    outcome: FileOutcome::Processed {
                        output: Some(PathBuf::from("out/BG18-jan.csv.json")),
                        poll_attempts: 3,
                    },
                },
                FileReport {
                    path: PathBuf::from("in/report.xls"),
                    kind: "XLS",
                    outcome: FileOutcome::Skipped {
                        reason: "XLS files are not supported".to_string(),
                    },
                },
                FileReport {
                    path: PathBuf::from("in/BG29-feb.html"),
                    kind: "HTML",
                    outcome: FileOutcome::Failed {
                        stage: Stage::Upload,
                        error: "API error: upload failed [401]: {\n  \"error\": {}\n}".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["processed"], 1);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["files"][0]["output"], "out/BG18-jan.csv.json");
        assert_eq!(value["files"][2]["stage"], "upload");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();

        assert!(output.contains("BG18-jan.csv"));
        assert!(output.contains("skipped"));
        assert!(output.contains("upload: API error: upload failed [401]: {"));
        assert!(output.contains("1 processed, 1 skipped, 1 failed"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert_eq!(output, "out/BG18-jan.csv.json");
    }

    #[test]
    fn test_empty_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&BatchReport::default()).unwrap();
        assert!(output.contains("No statement files found"));
    }

    #[test]
    fn test_single_file_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let report = create_test_report();
        let output = formatter.format_file(&report.files[1]).unwrap();
        assert!(output.contains("\"status\": \"skipped\""));
    }

    #[test]
    fn test_no_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
