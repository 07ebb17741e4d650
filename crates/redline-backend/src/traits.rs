//! Core trait definitions for revision backends

use std::path::Path;

use redline_core::{Paragraph, Result};

/// Supported input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// `.docx` ZIP container.
    Docx,
    /// Raw WordprocessingML XML (a bare `word/document.xml`).
    Xml,
}

impl InputFormat {
    /// Detect the input kind from a path. A `.docx` extension
    /// (case-insensitive) selects the container backend; anything else is
    /// treated as raw XML.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("docx") => Self::Docx,
            _ => Self::Xml,
        }
    }
}

/// A backend that can parse one input kind into paragraph entry
/// sequences.
pub trait RevisionBackend {
    /// The input kind this backend handles.
    fn format(&self) -> InputFormat;

    /// Parse in-memory input bytes.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Paragraph>>;

    /// Parse a file from disk.
    fn parse_file(&self, path: &Path) -> Result<Vec<Paragraph>> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes)
    }
}
