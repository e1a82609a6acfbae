//! JSON lines consumer

use crate::core::{Consumer, Entry, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each entry as a single-line JSON object (JSONL) to any writer
pub struct JsonConsumer<W: Write + Send> {
    writer: W,
    pretty: bool,
}

impl<W: Write + Send> JsonConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Multi-line pretty printed objects instead of JSONL
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonConsumer<BufWriter<File>> {
    /// Append JSON lines to a file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> Consumer for JsonConsumer<W> {
    fn consume(&mut self, entry: &Entry) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, entry)?;
        } else {
            serde_json::to_writer(&mut self.writer, entry)?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
