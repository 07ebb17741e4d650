//! Input dispatch: pick a backend from the input kind.

use std::path::Path;

use log::info;
use redline_core::{Paragraph, Result};

use crate::docx::{DocxBackend, XmlBackend};
use crate::traits::{InputFormat, RevisionBackend};

/// Front door of the parser: detects the input kind and runs the matching
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionExtractor;

impl RevisionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document from disk, detecting the input kind from the file
    /// extension.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Paragraph>> {
        let path = path.as_ref();
        let format = InputFormat::detect(path);
        info!("parsing {} as {format:?}", path.display());
        self.backend(format).parse_file(path)
    }

    /// Parse in-memory input bytes of a known kind.
    pub fn extract_bytes(&self, format: InputFormat, bytes: &[u8]) -> Result<Vec<Paragraph>> {
        self.backend(format).parse_bytes(bytes)
    }

    fn backend(&self, format: InputFormat) -> &'static dyn RevisionBackend {
        match format {
            InputFormat::Docx => &DocxBackend,
            InputFormat::Xml => &XmlBackend,
        }
    }
}
