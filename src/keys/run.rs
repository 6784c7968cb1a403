use crate::keys::identity::MachineId;
use crate::keys::inventory::{self, KeyFileEntry};
use crate::keys::paths::KeyfixPaths;
use crate::keys::reproject;
use crate::logging::Transcript;
use anyhow::Result;

/// Outcome of one reconciliation run, returned up the call chain so the
/// top-level orchestrator decides how to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every key file already embeds the current identifier. Benign.
    NothingToFix,
    /// At least one stale entry was processed. Per-entry failures are
    /// counted, never fatal.
    Repaired { copied: usize, failed: usize },
}

/// Keeps exactly the entries whose embedded identifier differs from the
/// current machine identifier, case-insensitively.
pub fn mismatched(entries: Vec<KeyFileEntry>, current: &MachineId) -> Vec<KeyFileEntry> {
    entries
        .into_iter()
        .filter(|entry| !current.matches(&entry.name.identifier))
        .collect()
}

pub fn execute(
    paths: &KeyfixPaths,
    current: &MachineId,
    transcript: &mut Transcript,
) -> Result<RunOutcome> {
    transcript.info(format!("current machine identifier: {current}"));
    transcript.info(format!("scanning {}", paths.keys_dir.display()));

    let entries = inventory::scan(&paths.keys_dir)?;
    let stale = mismatched(entries, current);
    if stale.is_empty() {
        return Ok(RunOutcome::NothingToFix);
    }

    transcript.info(format!(
        "found {} key file(s) with a stale identifier",
        stale.len()
    ));

    let mut copied = 0usize;
    let mut failed = 0usize;
    for entry in &stale {
        match reproject::copy_reprojected(entry, current) {
            Ok(copy) => {
                copied += 1;
                transcript.info(format!(
                    "copied {} -> {}",
                    copy.source.display(),
                    copy.destination.display()
                ));
            }
            Err(err) => {
                failed += 1;
                transcript.warn(format!("skipping {}: {err:#}", entry.file_name));
            }
        }
    }

    Ok(RunOutcome::Repaired { copied, failed })
}
