//! Host capabilities the engine talks to: clipboard and file export.
//!
//! The engine never touches a platform API directly. Hosts implement these
//! traits; the in-memory implementations here back headless use and tests.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Plain-text clipboard access.
pub trait Clipboard {
    /// Read the clipboard contents.
    ///
    /// Returns [`Error::ClipboardDenied`] when the host refuses access.
    fn read_text(&mut self) -> Result<String>;

    /// Replace the clipboard contents.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Sink for exported text files.
pub trait FileExporter {
    fn export(&mut self, content: &str, filename: &str) -> Result<()>;
}

/// In-process clipboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: String,
    denied: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard pre-filled with `text`.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: text.to_string(),
            denied: false,
        }
    }

    /// Simulate the host granting or refusing clipboard permission.
    pub fn set_denied(&mut self, denied: bool) {
        self.denied = denied;
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String> {
        if self.denied {
            return Err(Error::ClipboardDenied("read permission refused".to_string()));
        }
        Ok(self.contents.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.denied {
            return Err(Error::ClipboardDenied("write permission refused".to_string()));
        }
        self.contents = text.to_string();
        Ok(())
    }
}

/// Writes exported files into a directory.
#[derive(Clone, Debug)]
pub struct DirectoryExporter {
    root: PathBuf,
}

impl DirectoryExporter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileExporter for DirectoryExporter {
    fn export(&mut self, content: &str, filename: &str) -> Result<()> {
        // Only the final path component is honored so a filename cannot
        // escape the export directory.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid export filename: {filename:?}"),
                )
            })?;
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "exported file");
        Ok(())
    }
}

/// Keeps exported files in memory, in export order.
#[derive(Clone, Debug, Default)]
pub struct MemoryExporter {
    files: Vec<(String, String)>,
}

impl MemoryExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exported `(filename, content)` pairs.
    #[must_use]
    pub fn files(&self) -> &[(String, String)] {
        &self.files
    }
}

impl FileExporter for MemoryExporter {
    fn export(&mut self, content: &str, filename: &str) -> Result<()> {
        self.files.push((filename.to_string(), content.to_string()));
        Ok(())
    }
}
