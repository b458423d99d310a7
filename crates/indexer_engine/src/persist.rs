use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atomically replace a file by writing a sibling temp file then renaming it.
pub struct AtomicFileWriter {
    target: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }

    /// Write `content` to the target, creating its parent directory if needed.
    pub fn write(&self, content: &str) -> Result<PathBuf, PersistError> {
        let dir = self.parent_dir()?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(self.target.clone())
    }

    fn parent_dir(&self) -> Result<PathBuf, PersistError> {
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|e| PersistError::OutputDir(format!("{}: {e}", dir.display())))?;
        Ok(dir)
    }
}

/// Overwrite the failure file with one URL per line.
///
/// With no failures the previous run's file is removed, so the file only
/// ever lists failures from the most recent run. Returns the path when a
/// file was written.
pub fn write_failure_file<'a>(
    path: &Path,
    failed_urls: impl IntoIterator<Item = &'a str>,
) -> Result<Option<PathBuf>, PersistError> {
    let mut content = String::new();
    for url in failed_urls {
        content.push_str(url);
        content.push('\n');
    }
    if content.is_empty() {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        return Ok(None);
    }
    AtomicFileWriter::new(path.to_path_buf()).write(&content).map(Some)
}
