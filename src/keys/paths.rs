use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct KeyfixPaths {
    /// Directory holding the key container files. Fixed per-machine location,
    /// overridable for tests via `KEYFIX_KEYS_DIR`.
    pub keys_dir: PathBuf,
    /// Machine identifier source on non-Windows hosts; Windows reads the
    /// registry instead.
    pub machine_id_file: PathBuf,
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

#[cfg(windows)]
fn machine_data_root() -> PathBuf {
    env::var("ProgramData")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(r"C:\ProgramData"))
}

#[cfg(not(windows))]
fn machine_data_root() -> PathBuf {
    PathBuf::from("/var/lib")
}

fn default_keys_dir() -> PathBuf {
    machine_data_root()
        .join("Microsoft")
        .join("Crypto")
        .join("Keys")
}

pub fn resolve_paths() -> KeyfixPaths {
    let keys_dir = env_or_default_path("KEYFIX_KEYS_DIR", default_keys_dir());
    let machine_id_file =
        env_or_default_path("KEYFIX_MACHINE_ID_FILE", PathBuf::from("/etc/machine-id"));

    KeyfixPaths {
        keys_dir,
        machine_id_file,
    }
}

#[cfg(test)]
mod tests {
    use super::default_keys_dir;
    use std::path::Path;

    #[test]
    fn default_keys_dir_ends_with_well_known_subpath() {
        let dir = default_keys_dir();
        assert!(dir.ends_with(Path::new("Microsoft/Crypto/Keys")));
    }
}
