//! Destinations for finished exports.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::{ExportError, Result};

/// Receives a finished export: a named file or a block of text.
pub trait ExportSink {
    /// Delivers a file and returns where it ended up.
    fn deliver_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;

    fn deliver_text(&mut self, text: &str) -> Result<()>;
}

/// Writes files into a directory and text to a writer.
#[derive(Debug)]
pub struct LocalSink<W> {
    dir: PathBuf,
    text_out: W,
}

impl<W: Write> LocalSink<W> {
    pub fn new(dir: impl Into<PathBuf>, text_out: W) -> Self {
        Self {
            dir: dir.into(),
            text_out,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn into_text_out(self) -> W {
        self.text_out
    }
}

impl<W: Write> ExportSink for LocalSink<W> {
    fn deliver_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = Path::new(file_name);
        let plain = matches!(
            name.components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
        if !plain {
            return Err(ExportError::InvalidFileName {
                name: file_name.to_string(),
            });
        }

        fs::create_dir_all(&self.dir).map_err(|e| ExportError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.dir.join(name);
        fs::write(&path, bytes).map_err(|e| ExportError::Io {
            operation: "write",
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote export file");
        Ok(path)
    }

    fn deliver_text(&mut self, text: &str) -> Result<()> {
        self.text_out
            .write_all(text.as_bytes())
            .and_then(|()| self.text_out.write_all(b"\n"))
            .and_then(|()| self.text_out.flush())
            .map_err(ExportError::Text)
    }
}
