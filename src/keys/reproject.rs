use crate::keys::identity::MachineId;
use crate::keys::inventory::{KeyFileEntry, KeyFileName};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

/// `{container}_{current}` with the original suffix appended only when it
/// carries content, so a suffix-less name never grows a trailing underscore.
pub fn reprojected_name(name: &KeyFileName, current: &MachineId) -> String {
    let mut out = format!("{}_{}", name.container, current.as_str());
    if !name.suffix.trim().is_empty() {
        out.push('_');
        out.push_str(&name.suffix);
    }
    out
}

#[derive(Debug, Clone)]
pub struct ReprojectedCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Duplicates one key file under its reprojected name in the same directory.
/// The original is never renamed or deleted. An already-existing destination
/// is an error; the caller treats it as a per-entry warning.
pub fn copy_reprojected(entry: &KeyFileEntry, current: &MachineId) -> Result<ReprojectedCopy> {
    let new_name = reprojected_name(&entry.name, current);
    let destination = entry.dir.join(&new_name);
    if destination.exists() {
        bail!(
            "destination {} already exists; refusing to overwrite",
            destination.display()
        );
    }

    fs::copy(&entry.path, &destination).with_context(|| {
        format!(
            "failed to copy {} to {}",
            entry.path.display(),
            destination.display()
        )
    })?;

    Ok(ReprojectedCopy {
        source: entry.path.clone(),
        destination,
    })
}
