//! remap-replace: find/replace over generated code that keeps its source map valid.

mod cli;
mod config;
mod logging;
mod output;
mod runner;

use camino::Utf8PathBuf;
use clap::Parser;
use cli::Args;
use config::{FileConfig, RunConfig};
use miette::{IntoDiagnostic, Result};
use output::{Formatter, RunSummary};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::load(path).into_diagnostic()?),
        None => {
            let cwd = std::env::current_dir()
                .ok()
                .and_then(|p| Utf8PathBuf::try_from(p).ok())
                .unwrap_or_else(|| Utf8PathBuf::from("."));
            FileConfig::find(&cwd).into_diagnostic()?
        }
    };
    let config = RunConfig::resolve(&args, file_config).into_diagnostic()?;

    let outcomes = runner::run_all(&config).into_diagnostic()?;
    let summary = RunSummary::new(&outcomes);
    print!("{}", Formatter::new(args.output).format(&summary));

    if summary.failed_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
