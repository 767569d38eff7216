//! Rotating file appender with size-triggered rotation
//!
//! The file is opened lazily on the first write. When a write would push it
//! past `max_size`, the current file is renamed to a timestamped backup
//! (`app-2026-10-15T09-30-45.123.log`) and a fresh file is started. After
//! every rotation, backups beyond `max_backups` or older than
//! `max_age_days` are removed and the remaining ones are gzipped when
//! `compress` is set. All of this happens on the writing thread.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use chrono::{Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name used when none is configured
pub const DEFAULT_LOG_FILENAME: &str = "server.log";

/// Default rotation threshold: 100 MB
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// Where to write and when to rotate.
///
/// # Examples
///
/// ```
/// use rust_log_facade::RotatingFileConfig;
///
/// let config = RotatingFileConfig::new("logs/server.log")
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age_days(30)
///     .with_compression(true);
///
/// let errors = config.error_file();
/// assert_eq!(errors.filename.to_str(), Some("logs/server-error.log"));
/// assert_eq!(errors.max_backups, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatingFileConfig {
    /// Path of the active log file
    pub filename: PathBuf,
    /// Rotation threshold in bytes; 0 means [`DEFAULT_MAX_SIZE`]
    pub max_size: u64,
    /// Remove backups older than this many days; 0 keeps them regardless of age
    pub max_age_days: u32,
    /// Keep at most this many backups; 0 keeps them all
    pub max_backups: usize,
    /// Gzip backups after rotation
    pub compress: bool,
    /// Stamp backup names with local time instead of UTC
    pub local_time: bool,
}

impl Default for RotatingFileConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_LOG_FILENAME),
            max_size: DEFAULT_MAX_SIZE,
            max_age_days: 0,
            max_backups: 0,
            compress: false,
            local_time: false,
        }
    }
}

impl RotatingFileConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, enabled: bool) -> Self {
        self.local_time = enabled;
        self
    }

    /// Effective rotation threshold in bytes
    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        if self.max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            self.max_size
        }
    }

    pub fn has_filename(&self) -> bool {
        !self.filename.as_os_str().is_empty()
    }

    /// The policy for the error-only file: same limits, `-error` file name.
    #[must_use]
    pub fn error_file(&self) -> Self {
        Self {
            filename: PathBuf::from(derive_error_filename(&self.filename.to_string_lossy())),
            ..self.clone()
        }
    }
}

/// Insert `-error` before the extension of the file name.
///
/// The split happens at the last `.` of the final path component, so dots
/// in directory names are left alone. Without an extension the suffix is
/// appended.
///
/// ```
/// use rust_log_facade::derive_error_filename;
///
/// assert_eq!(derive_error_filename("server.log"), "server-error.log");
/// assert_eq!(derive_error_filename("server"), "server-error");
/// assert_eq!(derive_error_filename("a.b.log"), "a.b-error.log");
/// assert_eq!(derive_error_filename("./logs.d/app"), "./logs.d/app-error");
/// ```
pub fn derive_error_filename(file: &str) -> String {
    let name_start = file.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    match file[name_start..].rfind('.') {
        Some(dot) => {
            let idx = name_start + dot;
            format!("{}-error{}", &file[..idx], &file[idx..])
        }
        None => format!("{}-error", file),
    }
}

/// A backup found on disk
#[derive(Debug, Clone)]
struct Backup {
    path: PathBuf,
    timestamp: NaiveDateTime,
    compressed: bool,
}

/// Size-rotating file destination
///
/// # Examples
///
/// ```no_run
/// use rust_log_facade::{Appender, RotatingFileAppender, RotatingFileConfig};
///
/// let mut appender = RotatingFileAppender::new(
///     RotatingFileConfig::new("/var/log/app.log").with_max_backups(3),
/// );
/// appender.append(b"{\"msg\":\"hello\"}\n").unwrap();
/// appender.flush().unwrap();
/// ```
pub struct RotatingFileAppender {
    config: RotatingFileConfig,
    file: Option<File>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Create the appender. Nothing touches the disk until the first write.
    pub fn new(config: RotatingFileConfig) -> Self {
        Self {
            config,
            file: None,
            current_size: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.filename
    }

    #[must_use]
    pub fn config(&self) -> &RotatingFileConfig {
        &self.config
    }

    /// Bytes in the active file, as far as this appender knows
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    fn path_string(&self) -> String {
        self.config.filename.display().to_string()
    }

    fn now(&self) -> NaiveDateTime {
        if self.config.local_time {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        }
    }

    /// `(stem + "-", ".ext")` of the configured file name
    fn prefix_and_ext(&self) -> (String, String) {
        let name = self
            .config
            .filename
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_LOG_FILENAME.to_string());
        match name.rfind('.') {
            Some(idx) => (format!("{}-", &name[..idx]), name[idx..].to_string()),
            None => (format!("{}-", name), String::new()),
        }
    }

    fn dir(&self) -> PathBuf {
        match self.config.filename.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn backup_path(&self, timestamp: NaiveDateTime) -> PathBuf {
        let (prefix, ext) = self.prefix_and_ext();
        self.dir().join(format!(
            "{}{}{}",
            prefix,
            timestamp.format(BACKUP_TIME_FORMAT),
            ext
        ))
    }

    /// Open the existing file for appending, rotating first if `incoming`
    /// bytes would not fit.
    fn open_existing_or_new(&mut self, incoming: u64) -> Result<()> {
        let path = self.config.filename.clone();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => return self.open_new(),
        };

        if metadata.len() + incoming > self.config.max_size_bytes() {
            return self.rotate();
        }

        match OpenOptions::new().append(true).open(&path) {
            Ok(file) => {
                self.file = Some(file);
                self.current_size = metadata.len();
                Ok(())
            }
            // Fall back to starting over if the existing file is unusable
            Err(_) => self.open_new(),
        }
    }

    /// Move any existing file aside and start an empty one
    fn open_new(&mut self) -> Result<()> {
        let dir = self.dir();
        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let path = self.config.filename.clone();
        if path.exists() {
            let backup = self.backup_path(self.now());
            fs::rename(&path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path_string(),
                    format!("Failed to move log file to '{}': {}", backup.display(), e),
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_appender(self.path_string(), format!("Failed to open: {}", e))
            })?;

        self.file = Some(file);
        self.current_size = 0;
        Ok(())
    }

    /// Close the active file, start a new one and clean up old backups.
    ///
    /// # Errors
    ///
    /// Returns an error if the active file cannot be moved aside or the new
    /// file cannot be created. Cleanup failures are reported on stderr and
    /// do not fail the rotation.
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.sync_data() {
                eprintln!(
                    "[WARN] Failed to sync {} before rotation: {}",
                    self.path_string(),
                    e
                );
            }
        }

        self.open_new()?;

        if let Err(e) = self.mill() {
            eprintln!("[WARN] Log backup cleanup failed: {}", e);
        }
        Ok(())
    }

    /// Backups of this file currently on disk, newest first
    fn old_log_files(&self) -> Result<Vec<Backup>> {
        let dir = self.dir();
        let entries = fs::read_dir(&dir).map_err(|e| {
            LoggerError::io_operation(
                "list log directory",
                format!("Cannot read directory '{}'", dir.display()),
                e,
            )
        })?;

        let (prefix, ext) = self.prefix_and_ext();
        let compressed_ext = format!("{}{}", ext, COMPRESS_SUFFIX);

        let mut backups: Vec<Backup> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(timestamp) = time_from_name(&name, &prefix, &ext) {
                    return Some(Backup {
                        path: entry.path(),
                        timestamp,
                        compressed: false,
                    });
                }
                time_from_name(&name, &prefix, &compressed_ext).map(|timestamp| Backup {
                    path: entry.path(),
                    timestamp,
                    compressed: true,
                })
            })
            .collect();

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    /// Apply backup count, age and compression rules
    fn mill(&self) -> Result<()> {
        if self.config.max_backups == 0 && self.config.max_age_days == 0 && !self.config.compress {
            return Ok(());
        }

        let mut files = self.old_log_files()?;
        let mut remove = Vec::new();

        if self.config.max_backups > 0 && files.len() > self.config.max_backups {
            // A backup and its compressed twin count once
            let mut preserved = HashSet::new();
            let mut kept = Vec::with_capacity(files.len());
            for backup in files {
                let key = backup
                    .path
                    .to_string_lossy()
                    .trim_end_matches(COMPRESS_SUFFIX)
                    .to_string();
                preserved.insert(key);
                if preserved.len() > self.config.max_backups {
                    remove.push(backup);
                } else {
                    kept.push(backup);
                }
            }
            files = kept;
        }

        if self.config.max_age_days > 0 {
            let cutoff = self.now() - chrono::Duration::days(i64::from(self.config.max_age_days));
            let (expired, kept): (Vec<_>, Vec<_>) =
                files.into_iter().partition(|b| b.timestamp < cutoff);
            remove.extend(expired);
            files = kept;
        }

        let mut errors = Vec::new();
        for backup in &remove {
            if let Err(e) = fs::remove_file(&backup.path) {
                errors.push(LoggerError::io_operation(
                    "remove old log backup",
                    format!("Failed to remove '{}'", backup.path.display()),
                    e,
                ));
            }
        }

        if self.config.compress {
            for backup in files.iter().filter(|b| !b.compressed) {
                if let Err(e) = compress_file(&backup.path) {
                    errors.push(e);
                }
            }
        }

        LoggerError::combine(errors)
    }
}

/// Parse the timestamp out of `prefix<timestamp>ext`
fn time_from_name(name: &str, prefix: &str, ext: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(prefix)?.strip_suffix(ext)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()
}

/// Gzip `path` into `path.gz`, removing the original only after the
/// compressed copy is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = PathBuf::from(format!("{}{}", path.display(), COMPRESS_SUFFIX));
    let temp_gz_path = PathBuf::from(format!("{}{}.tmp", path.display(), COMPRESS_SUFFIX));

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let finished = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut writer| writer.flush());
    if let Err(e) = finished {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress '{}'", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, line: &[u8]) -> Result<()> {
        let length = line.len() as u64;
        let max_size = self.config.max_size_bytes();
        if length > max_size {
            return Err(LoggerError::WriteTooLarge {
                path: self.path_string(),
                length,
                max_size,
            });
        }

        if self.file.is_none() {
            self.open_existing_or_new(length)?;
        } else if self.current_size + length > max_size {
            self.rotate()?;
        }

        let written = match self.file.as_mut() {
            Some(file) => file.write_all(line),
            None => return Err(LoggerError::file_appender(self.path_string(), "file not open")),
        };
        written.map_err(|e| {
            LoggerError::file_appender(self.path_string(), format!("Failed to write log entry: {}", e))
        })?;
        self.current_size += length;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref file) = self.file {
            file.sync_data().map_err(|e| {
                LoggerError::file_appender(self.path_string(), format!("Failed to flush: {}", e))
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_data();
        }
    }
}
