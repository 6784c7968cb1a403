use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::keys::identity;
use crate::keys::paths::resolve_paths;
use crate::keys::run::{self, RunOutcome};
use crate::logging::Transcript;

/// Repairs crypto key container filenames that still embed a pre-sysprep
/// machine identifier. Stale files are copied under the current identifier;
/// originals are never touched.
#[derive(Debug, Parser)]
#[command(name = "keyfix", version, about)]
pub struct Cli {
    /// Directory for the run transcript; defaults to the current directory.
    pub log_dir: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_dir = match cli.log_dir {
        Some(dir) => dir,
        None => env::current_dir().context("current directory could not be resolved")?,
    };

    let mut transcript = Transcript::create(&log_dir)?;
    transcript.info(format!("transcript: {}", transcript.path().display()));

    let paths = resolve_paths();
    let result = identity::read_machine_id(&paths)
        .and_then(|current| run::execute(&paths, &current, &mut transcript));

    // The transcript is closed on every exit path before control returns to
    // main.
    match result {
        Ok(RunOutcome::NothingToFix) => {
            transcript.info("no key files to fix");
            transcript.close()
        }
        Ok(RunOutcome::Repaired { copied, failed }) => {
            transcript.info(format!("done: {copied} copied, {failed} failed"));
            transcript.close()
        }
        Err(err) => {
            transcript.warn(format!("run aborted: {err:#}"));
            transcript.close()?;
            Err(err)
        }
    }
}
