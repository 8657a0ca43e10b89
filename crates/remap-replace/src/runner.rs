//! Reading, rewriting and writing generated files with their source maps.

use crate::config::{Job, RunConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use remap_core::{replace_with_map, Pattern, RemapError, ReplaceError, ReplacementRecord};
use std::fs;
use std::time::Instant;
use thiserror::Error;

/// Errors for a single file.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that could not be written.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Replacing or remapping failed.
    #[error(transparent)]
    Remap(#[from] RemapError),
}

/// What happened to one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// The job that was run.
    pub job: Job,
    /// The replacements made and mapping count, or why the file was skipped.
    pub result: Result<FileReport, RunError>,
}

/// A successfully rewritten file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// One record per substitution.
    pub records: Vec<ReplacementRecord>,
    /// Number of mappings in the rewritten map.
    pub mapping_count: usize,
}

/// Runs every job in `config`, in parallel.
///
/// Jobs are independent: a failing file does not stop the others. Outcomes are returned in job
/// order. Fails up front only if the pattern cannot be built.
pub fn run_all(config: &RunConfig) -> Result<Vec<FileOutcome>, ReplaceError> {
    let pattern = config.build_pattern()?;
    let start = Instant::now();

    let outcomes: Vec<FileOutcome> = config
        .jobs
        .par_iter()
        .map(|job| FileOutcome {
            job: job.clone(),
            result: run_job(config, &pattern, job),
        })
        .collect();

    tracing::debug!(
        files = outcomes.len(),
        elapsed = ?start.elapsed(),
        "finished all files"
    );
    Ok(outcomes)
}

/// Rewrites one generated file and its source map.
///
/// Both outputs are computed before anything is written, so a failure leaves the output
/// directory untouched for this file.
pub fn run_job(config: &RunConfig, pattern: &Pattern, job: &Job) -> Result<FileReport, RunError> {
    let source_path = config.src_dir.join(&job.file);
    let map_path = config.src_dir.join(&job.map_file);
    let source = read(&source_path)?;
    let map = read(&map_path)?;

    let mut replacer = config.build_replacer();
    let remapped = replace_with_map(&source, &map, pattern, &mut replacer, &job.file)?;

    write(&config.out_dir.join(&job.file), &remapped.code)?;
    write(&config.out_dir.join(&job.map_file), &remapped.map)?;

    tracing::info!(
        file = %job.file,
        replacements = remapped.records.len(),
        mappings = remapped.mapping_count,
        "rewrote file"
    );

    Ok(FileReport {
        records: remapped.records,
        mapping_count: remapped.mapping_count,
    })
}

fn read(path: &Utf8Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Utf8Path, contents: &str) -> Result<(), RunError> {
    let to_err = |source| RunError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, contents).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use source_map::{decode, encode, DecodedMap, GeneratedPosition, MappingEntry, OriginalPosition};

    fn setup(dir: &Utf8Path) -> RunConfig {
        let src_dir = dir.join("dist");
        fs::create_dir_all(&src_dir).unwrap();
        fs::write(src_dir.join("main.js"), "let x = OLD;\nOLD();").unwrap();

        let seed = DecodedMap {
            sources: vec!["main.ts".to_string()],
            sources_content: vec![None],
            ..Default::default()
        };
        let mappings = vec![
            MappingEntry::new(
                GeneratedPosition::new(1, 0),
                OriginalPosition::new(1, 0),
                "main.ts",
            ),
            MappingEntry::new(
                GeneratedPosition::new(1, 11),
                OriginalPosition::new(1, 11),
                "main.ts",
            ),
            MappingEntry::new(
                GeneratedPosition::new(2, 3),
                OriginalPosition::new(2, 3),
                "main.ts",
            ),
        ];
        fs::write(
            src_dir.join("main.js.map"),
            encode("main.js", &seed, &mappings).unwrap(),
        )
        .unwrap();

        RunConfig {
            src_dir,
            out_dir: dir.join("out"),
            jobs: vec![Job::new("main.js", None)],
            pattern: "OLD".to_string(),
            regex: false,
            all: false,
            replacement: "renamed".to_string(),
            template: false,
        }
    }

    #[test]
    fn test_run_job_writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let config = setup(dir);

        let outcomes = run_all(&config).unwrap();
        assert_eq!(outcomes.len(), 1);
        let report = outcomes[0].result.as_ref().unwrap();
        assert_eq!(
            report.records,
            vec![
                ReplacementRecord::new(1, 8, 4),
                ReplacementRecord::new(2, 0, 4)
            ]
        );
        assert_eq!(report.mapping_count, 3);

        let code = fs::read_to_string(config.out_dir.join("main.js")).unwrap();
        assert_eq!(code, "let x = renamed;\nrenamed();");

        let map = decode(&fs::read_to_string(config.out_dir.join("main.js.map")).unwrap()).unwrap();
        let generated: Vec<_> = map.mappings().map(|m| m.generated).collect();
        assert_eq!(
            generated,
            vec![
                GeneratedPosition::new(1, 0),
                GeneratedPosition::new(1, 15),
                GeneratedPosition::new(2, 7),
            ]
        );
    }

    #[test]
    fn test_missing_map_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let config = setup(dir);
        fs::remove_file(config.src_dir.join("main.js.map")).unwrap();

        let outcomes = run_all(&config).unwrap();
        assert!(matches!(
            outcomes[0].result,
            Err(RunError::Read { ref path, .. }) if path.as_str().ends_with("main.js.map")
        ));
        assert!(!config.out_dir.join("main.js").exists());
    }

    #[test]
    fn test_bad_pattern_fails_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let config = RunConfig {
            pattern: "(".to_string(),
            regex: true,
            ..setup(dir)
        };
        assert!(matches!(run_all(&config), Err(ReplaceError::InvalidRegex(_))));
    }
}
