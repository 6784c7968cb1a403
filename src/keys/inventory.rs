use crate::error::KeyfixError;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Decomposition of a key container file name into its underscore-delimited
/// schema: `container_identifier[_suffix]`. Only `identifier` carries
/// meaning; `container` and `suffix` are opaque pass-through tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFileName {
    pub container: String,
    pub identifier: String,
    pub suffix: String,
}

impl KeyFileName {
    /// Returns `None` for names with fewer than two fields; those are not
    /// key files and are left untouched. Everything after the second
    /// underscore is the suffix, carried through unchanged.
    pub fn parse(file_name: &str) -> Option<Self> {
        let mut fields = file_name.splitn(3, '_');
        let container = fields.next()?.to_string();
        let identifier = fields.next()?.to_string();
        let suffix = fields.next().unwrap_or("").to_string();
        Some(Self {
            container,
            identifier,
            suffix,
        })
    }
}

/// A key file on disk. Read-only: entries are never deleted or mutated in
/// place, only copied to a new path.
#[derive(Debug, Clone)]
pub struct KeyFileEntry {
    pub name: KeyFileName,
    pub file_name: String,
    pub dir: PathBuf,
    pub path: PathBuf,
}

/// Non-recursive listing of key files directly under `dir`. A missing or
/// unreadable directory is fatal; nothing is retried.
pub fn scan(dir: &Path) -> Result<Vec<KeyFileEntry>> {
    if !dir.exists() {
        return Err(KeyfixError::KeysDirMissing(dir.to_path_buf()).into());
    }

    let read_dir = fs::read_dir(dir).map_err(|source| KeyfixError::KeysDirUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| KeyfixError::KeysDirUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(name) = KeyFileName::parse(file_name) else {
            continue;
        };
        entries.push(KeyFileEntry {
            name,
            file_name: file_name.to_string(),
            dir: dir.to_path_buf(),
            path,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{KeyFileName, scan};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_splits_three_fields() {
        let name = KeyFileName::parse("MY_OLD-GUID_S-1-5-21").expect("key file name");
        assert_eq!(name.container, "MY");
        assert_eq!(name.identifier, "OLD-GUID");
        assert_eq!(name.suffix, "S-1-5-21");
    }

    #[test]
    fn parse_leaves_suffix_empty_for_two_fields() {
        let name = KeyFileName::parse("MY_OLD-GUID").expect("key file name");
        assert_eq!(name.suffix, "");
    }

    #[test]
    fn parse_rejects_names_without_enough_fields() {
        assert_eq!(KeyFileName::parse("README"), None);
        assert_eq!(KeyFileName::parse(""), None);
    }

    #[test]
    fn parse_keeps_extra_underscores_inside_the_suffix() {
        let name = KeyFileName::parse("MY_OLD-GUID_S_1_5_21").expect("key file name");
        assert_eq!(name.suffix, "S_1_5_21");
    }

    #[test]
    fn scan_skips_non_key_names_and_subdirectories() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("MY_OLD-GUID_S-1-5-21"), b"k").expect("write key file");
        fs::write(tmp.path().join("README"), b"docs").expect("write plain file");
        fs::create_dir(tmp.path().join("sub_dir")).expect("mkdir");

        let entries = scan(tmp.path()).expect("scan");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "MY_OLD-GUID_S-1-5-21");
        assert_eq!(entries[0].dir, tmp.path());
    }

    #[test]
    fn scan_fails_for_missing_directory() {
        let tmp = tempdir().expect("tempdir");
        let missing = tmp.path().join("absent");
        let err = scan(&missing).expect_err("missing dir must be fatal");
        assert!(err.to_string().contains("missing"));
    }
}
