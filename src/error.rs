use std::path::PathBuf;
use thiserror::Error;

/// Fatal, run-aborting conditions. Per-file copy failures are not in here;
/// they are reported as warnings and never abort the batch.
#[derive(Debug, Error)]
pub enum KeyfixError {
    #[error("machine identifier unavailable: {0}")]
    MachineIdUnavailable(String),
    #[error(
        "key container directory missing: {} (verify the Microsoft/Crypto/Keys layout exists)",
        .0.display()
    )]
    KeysDirMissing(PathBuf),
    #[error("key container directory not readable: {}", .path.display())]
    KeysDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
