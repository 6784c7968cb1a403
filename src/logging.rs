use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Plain-text transcript of one run. Every operator-facing line goes to
/// stdout (warnings to stderr) and to a timestamped log file.
///
/// The sink must be released on every exit path; callers close it explicitly
/// via [`Transcript::close`] rather than relying on drop order.
pub struct Transcript {
    out: BufWriter<File>,
    path: PathBuf,
}

impl Transcript {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("keyfix-{stamp}.log"));
        let file = File::create(&path)
            .with_context(|| format!("failed to create transcript {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&mut self, level: &str, msg: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        // A transcript write failure must not abort the run it is narrating.
        let _ = writeln!(self.out, "{stamp} {level} {msg}");
    }

    pub fn info(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        println!("{msg}");
        self.record("INFO", msg);
    }

    pub fn warn(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        eprintln!("warning: {msg}");
        self.record("WARN", msg);
    }

    pub fn close(mut self) -> Result<()> {
        self.out.flush().context("failed to flush transcript")
    }
}

#[cfg(test)]
mod tests {
    use super::Transcript;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn transcript_records_info_and_warn_lines() {
        let tmp = tempdir().expect("tempdir");
        let mut transcript = Transcript::create(tmp.path()).expect("create transcript");
        let path = transcript.path().to_path_buf();

        transcript.info("scanning started");
        transcript.warn("one file skipped");
        transcript.close().expect("close transcript");

        let raw = fs::read_to_string(path).expect("read transcript");
        assert!(raw.contains("INFO scanning started"));
        assert!(raw.contains("WARN one file skipped"));
    }

    #[test]
    fn transcript_creates_missing_log_directory() {
        let tmp = tempdir().expect("tempdir");
        let nested = tmp.path().join("logs/keyfix");
        let transcript = Transcript::create(&nested).expect("create transcript");
        assert!(transcript.path().starts_with(&nested));
        transcript.close().expect("close transcript");
    }
}
