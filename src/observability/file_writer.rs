//! Rotating file writer with size-based rotation and backup retention.
//!
//! Trace output is append-only JSON lines. When the active file grows past
//! its size limit it is renamed with a UTC timestamp suffix and a fresh file
//! is started. Only the newest backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Sortable, filename-safe backup suffix.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

/// Thread-safe rotating file writer.
///
/// Backups are named `<file name>.<timestamp>`, for example
/// `medsimplifier-otlp.json.20260301T101500.123456Z`. The timestamp sorts
/// lexicographically in creation order, which is what retention relies on.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on first write.
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB limit and 3 backups.
    ///
    /// The file is not opened until the first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with explicit rotation limits.
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file is over its limit.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening, writing or flushing fails, or
    /// if the internal lock is poisoned.
    pub fn write_line(&self, json: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            *writer = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }

        if let Some(file) = writer.as_mut() {
            writeln!(file, "{json}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };

        if metadata.len() > self.max_bytes {
            *writer = None;
            self.rotate_files()?;
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let suffix = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let mut backup_name = self.file_path.as_os_str().to_os_string();
        backup_name.push(format!(".{suffix}"));

        fs::rename(&self.file_path, PathBuf::from(backup_name))?;
        self.cleanup_old_backups()
    }

    /// Deletes all but the newest `max_backups` backups. Individual removal
    /// failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));
        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("readable dir")
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with("traces.json."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn appends_lines_to_a_new_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("traces.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line(r#"{"a":1}"#).expect("write");
        writer.write_line(r#"{"b":2}"#).expect("write");

        let contents = fs::read_to_string(&path).expect("readable");
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert!(backups(dir.path()).is_empty());
    }

    #[test]
    fn rotates_when_over_limit() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("traces.json");
        let writer = FileWriter::with_limits(path.clone(), 8, 3);

        writer.write_line("0123456789").expect("write");
        writer.write_line("next").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("readable"), "next\n");
        let rotated = backups(dir.path());
        assert_eq!(rotated.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join(&rotated[0])).expect("readable"),
            "0123456789\n"
        );
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("traces.json");
        for stale in ["traces.json.20200101T000000.000000Z", "traces.json.20200102T000000.000000Z"] {
            fs::write(dir.path().join(stale), "old\n").expect("seed backup");
        }
        fs::write(dir.path().join("unrelated.json.20200101T000000.000000Z"), "x\n").expect("seed");

        let writer = FileWriter::with_limits(path, 4, 2);
        writer.write_line("too long").expect("write");
        writer.write_line("fresh").expect("write");

        let kept = backups(dir.path());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], "traces.json.20200102T000000.000000Z");
        assert!(dir.path().join("unrelated.json.20200101T000000.000000Z").exists());
    }
}
