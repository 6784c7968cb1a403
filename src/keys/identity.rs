use crate::error::KeyfixError;
use crate::keys::paths::KeyfixPaths;
use anyhow::Result;
use std::env;
use std::fmt;

/// The current machine's unique identifier, read once per run and threaded
/// through the pipeline as a value. Comparison against filename fields is
/// case-insensitive; the string is otherwise opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineId(String);

impl MachineId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, identifier: &str) -> bool {
        self.0.to_lowercase() == identifier.to_lowercase()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn env_machine_id() -> Option<MachineId> {
    match env::var("KEYFIX_MACHINE_ID") {
        Ok(v) if !v.trim().is_empty() => Some(MachineId::new(v.trim())),
        _ => None,
    }
}

fn first_line_id(raw: &str) -> Result<MachineId> {
    let trimmed = raw.lines().next().unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(KeyfixError::MachineIdUnavailable("identifier value is empty".to_string()).into());
    }
    Ok(MachineId::new(trimmed))
}

#[cfg(windows)]
fn system_machine_id(_paths: &KeyfixPaths) -> Result<MachineId> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm
        .open_subkey(r"SOFTWARE\Microsoft\Cryptography")
        .map_err(|err| {
            KeyfixError::MachineIdUnavailable(format!(
                "cannot open HKLM\\SOFTWARE\\Microsoft\\Cryptography: {err}"
            ))
        })?;
    let guid: String = key.get_value("MachineGuid").map_err(|err| {
        KeyfixError::MachineIdUnavailable(format!("cannot read MachineGuid: {err}"))
    })?;
    first_line_id(&guid)
}

#[cfg(not(windows))]
fn system_machine_id(paths: &KeyfixPaths) -> Result<MachineId> {
    let raw = std::fs::read_to_string(&paths.machine_id_file).map_err(|err| {
        KeyfixError::MachineIdUnavailable(format!(
            "cannot read {}: {err}",
            paths.machine_id_file.display()
        ))
    })?;
    first_line_id(&raw)
}

/// Fetches the current machine identifier, or fails fatally. There is no
/// fallback value and no retry.
pub fn read_machine_id(paths: &KeyfixPaths) -> Result<MachineId> {
    if let Some(id) = env_machine_id() {
        return Ok(id);
    }
    system_machine_id(paths)
}
