//! File consumer implementation

use crate::core::{Consumer, Entry, FlogError, Result, TextRenderer};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path used by [`FileConsumer::default_file`]
pub const DEFAULT_LOG_FILE: &str = "output.log";

/// Writes one plain text line per entry to a file.
///
/// The file is locked exclusively for the consumer's lifetime so two
/// consumers never interleave lines into the same file.
pub struct FileConsumer {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    renderer: TextRenderer,
}

impl FileConsumer {
    /// Open `path`, truncating it unless `append` is set.
    pub fn new(path: impl Into<PathBuf>, append: bool) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(false)
            .open(&path)
            .map_err(|e| FlogError::io_operation(format!("opening '{}'", path.display()), e))?;

        file.try_lock_exclusive()
            .map_err(|_| FlogError::file_lock(path.display().to_string()))?;

        // Truncate only once the lock is ours.
        if !append {
            file.set_len(0)
                .map_err(|e| FlogError::io_operation(format!("truncating '{}'", path.display()), e))?;
        }

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            renderer: TextRenderer::plain(),
        })
    }

    /// `output.log` in the working directory, truncated
    pub fn default_file() -> Result<Self> {
        Self::new(DEFAULT_LOG_FILE, false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Consumer for FileConsumer {
    fn consume(&mut self, entry: &Entry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| FlogError::consumer("file", "File writer not initialized"))?;

        let line = self.renderer.render(entry);
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileConsumer {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
            let _ = writer.get_ref().unlock();
        }
    }
}
