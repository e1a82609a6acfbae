//! Standard output consumer, installed by default

use crate::core::{Consumer, Entry, Result, TextRenderer};
use std::io::Write;

pub struct StdoutConsumer {
    renderer: TextRenderer,
}

impl StdoutConsumer {
    pub fn new() -> Self {
        Self {
            renderer: TextRenderer::colored(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        let renderer = if use_colors {
            TextRenderer::colored()
        } else {
            TextRenderer::plain()
        };
        Self { renderer }
    }
}

impl Default for StdoutConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl Consumer for StdoutConsumer {
    fn consume(&mut self, entry: &Entry) -> Result<()> {
        let line = self.renderer.render(entry);
        writeln!(std::io::stdout().lock(), "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Kind};

    #[test]
    fn test_stdout_consumer() {
        let mut consumer = StdoutConsumer::with_colors(false);
        let entry = Entry::new(Kind::Info, "stdout consumer test", Context::new("test"));
        assert!(consumer.consume(&entry).is_ok());
        assert!(consumer.flush().is_ok());
        assert_eq!(consumer.name(), "stdout");
    }
}
