use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append-only, line-oriented destination for harvested descriptions.
///
/// Lines carry no record of which item produced them.
#[derive(Debug)]
pub struct DescriptionSink<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> DescriptionSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write `description` plus a newline and flush it.
    pub fn append(&mut self, description: &str) -> io::Result<()> {
        self.writer.write_all(description.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }

    /// Lines appended through this sink since it was opened.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Create `output_dir` if needed and open `file_name` inside it for appending.
///
/// Existing content is never truncated, so repeated runs accumulate lines.
pub fn open_output(output_dir: &Path, file_name: &str) -> Result<DescriptionSink<File>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    tracing::info!(path = %path.display(), "Opened output file");
    Ok(DescriptionSink::new(file))
}
