//! Append-only CSV store of completed submissions.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::error::{AppError, Result};
use crate::domain::submission::SubmissionRecord;

/// File name of the store inside the configured data directory.
pub const FORMS_FILE: &str = "forms.csv";

pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the data directory and writes the header row the first time.
    /// No-op if the file already exists; the header is never rewritten or
    /// re-checked against the current topic catalog.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if self.path.exists() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(SubmissionRecord::header())
            .map_err(|e| AppError::StoreWrite(format!("write header: {}", e)))?;
        writer
            .flush()
            .map_err(|e| AppError::StoreWrite(format!("flush header: {}", e)))?;
        Ok(())
    }

    /// Appends one row at the end of the file. Appends are serialized by an
    /// internal lock so concurrent submissions never interleave rows.
    pub fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let file = OpenOptions::new().append(true).open(&self.path).map_err(|e| {
            AppError::StoreWrite(format!("open {}: {}", self.path.display(), e))
        })?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(record.to_row())
            .map_err(|e| AppError::StoreWrite(format!("write row: {}", e)))?;
        writer
            .flush()
            .map_err(|e| AppError::StoreWrite(format!("flush row: {}", e)))?;
        Ok(())
    }
}
