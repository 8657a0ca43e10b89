//! Output formatting.

use crate::cli::OutputFormat;
use crate::runner::FileOutcome;
use remap_core::ReplacementRecord;
use serde::Serialize;

/// Summary of a whole run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Per-file results, in job order.
    pub files: Vec<FileSummary>,
    /// Total replacements across all files.
    pub replacement_count: usize,
    /// Number of files that failed.
    pub failed_count: usize,
}

/// Result for one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// The generated file.
    pub file: String,
    /// Its source map.
    pub map_file: String,
    /// Replacements made, empty on failure.
    pub replacements: Vec<ReplacementRecord>,
    /// Mappings in the rewritten map.
    pub mappings: usize,
    /// Why the file failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunSummary {
    /// Builds a summary from file outcomes.
    pub fn new(outcomes: &[FileOutcome]) -> Self {
        let files: Vec<FileSummary> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => FileSummary {
                    file: outcome.job.file.clone(),
                    map_file: outcome.job.map_file.clone(),
                    replacements: report.records.clone(),
                    mappings: report.mapping_count,
                    error: None,
                },
                Err(e) => FileSummary {
                    file: outcome.job.file.clone(),
                    map_file: outcome.job.map_file.clone(),
                    replacements: Vec::new(),
                    mappings: 0,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        Self {
            replacement_count: files.iter().map(|f| f.replacements.len()).sum(),
            failed_count: files.iter().filter(|f| f.error.is_some()).count(),
            files,
        }
    }
}

/// Formats run summaries for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a run summary.
    pub fn format(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    fn format_human(summary: &RunSummary) -> String {
        let mut output = String::new();
        for file in &summary.files {
            match &file.error {
                None => output.push_str(&format!(
                    "{}: {} replacements, {} mappings\n",
                    file.file,
                    file.replacements.len(),
                    file.mappings
                )),
                Some(error) => output.push_str(&format!("{}: error: {}\n", file.file, error)),
            }
        }
        output.push_str(&format!(
            "{} files, {} replacements, {} failed\n",
            summary.files.len(),
            summary.replacement_count,
            summary.failed_count
        ));
        output
    }

    fn format_json(summary: &RunSummary) -> String {
        let mut json = serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Job;
    use crate::runner::{FileReport, RunError};
    use camino::Utf8PathBuf;

    fn outcomes() -> Vec<FileOutcome> {
        vec![
            FileOutcome {
                job: Job::new("main.js", None),
                result: Ok(FileReport {
                    records: vec![ReplacementRecord::new(1, 3, -2)],
                    mapping_count: 12,
                }),
            },
            FileOutcome {
                job: Job::new("chunk.js", None),
                result: Err(RunError::Read {
                    path: Utf8PathBuf::from("dist/chunk.js.map"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
            },
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::new(&outcomes());
        assert_eq!(summary.replacement_count, 1);
        assert_eq!(summary.failed_count, 1);
    }

    #[test]
    fn test_human_output() {
        let summary = RunSummary::new(&outcomes());
        let output = Formatter::new(OutputFormat::Human).format(&summary);
        insta::assert_snapshot!(output, @r"
        main.js: 1 replacements, 12 mappings
        chunk.js: error: failed to read dist/chunk.js.map: not found
        2 files, 1 replacements, 1 failed
        ");
    }

    #[test]
    fn test_json_output() {
        let summary = RunSummary::new(&outcomes());
        let output = Formatter::new(OutputFormat::Json).format(&summary);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["replacementCount"], 1);
        assert_eq!(value["files"][0]["mapFile"], "main.js.map");
        assert_eq!(value["files"][0]["replacements"][0]["column"], 3);
        assert_eq!(value["files"][0]["replacements"][0]["diff"], -2);
        assert!(value["files"][0].get("error").is_none());
        assert!(value["files"][1]["error"]
            .as_str()
            .unwrap()
            .contains("chunk.js.map"));
    }
}
