//! Size-rotated line writer for the span export file.
//!
//! Before each write, [`RotatingFile`] checks whether the line would push the
//! file past its size limit. If so, the file is shifted to `<name>.1`, earlier
//! backups move up by one (`.1` → `.2`, ...) and the oldest beyond the
//! retention count is deleted. Disk usage is therefore bounded by roughly
//! `max_bytes * (backups + 1)`.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the span file rotates (8 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 8 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const DEFAULT_BACKUPS: usize = 3;

/// Thread-safe, append-only line writer with size-based rotation.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if it would not fit.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be created, renamed or written, or when the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("span file lock poisoned: {e}")))?;

        let incoming = u64::try_from(line.len() + 1).unwrap_or(u64::MAX);
        let current = fs::metadata(&self.path).map_or(0, |meta| meta.len());
        if current > 0 && current.saturating_add(incoming) > self.max_bytes {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::other("span file unavailable"));
        };

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    /// Path of the `n`-th backup: `<path>.<n>`.
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn appends_lines_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("nested/spans.jsonl"));

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(lines(writer.path()), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("spans.jsonl"), 20, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}-0123456")).unwrap();
        }

        assert_eq!(lines(writer.path()), vec!["line-4-0123456"]);
        assert_eq!(lines(&writer.backup_path(1)), vec!["line-3-0123456"]);
        assert_eq!(lines(&writer.backup_path(2)), vec!["line-2-0123456"]);
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn zero_backups_truncates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("spans.jsonl"), 10, 0);

        writer.write_line("first-line").unwrap();
        writer.write_line("second-line").unwrap();

        assert_eq!(lines(writer.path()), vec!["second-line"]);
        assert!(!writer.backup_path(1).exists());
    }

    #[test]
    fn oversized_line_is_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("spans.jsonl"), 4, 1);

        writer.write_line("much longer than four bytes").unwrap();
        assert_eq!(lines(writer.path()).len(), 1);
    }
}
