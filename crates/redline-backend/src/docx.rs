//! DOCX (Microsoft Word) tracked-change parser
//!
//! # Architecture
//!
//! Manual ZIP + XML parsing. DOCX files are ZIP archives; the tracked
//! changes live in `word/document.xml` as WordprocessingML:
//!
//! - `w:p`: paragraph
//! - `w:r`: run of stable text, text carried by descendant `w:t` nodes
//! - `w:ins`: tracked insertion wrapping runs of `w:t` text
//! - `w:del`: tracked deletion wrapping runs of `w:delText` text
//!
//! Only direct children of a body-level paragraph produce entries; any
//! other child (`w:pPr`, bookmarks, hyperlinks, ...) is ignored.
//! Paragraphs inside tables are skipped, matching body-level paragraph
//! selection. Element names are matched byte-wise with their `w:` prefix,
//! without namespace resolution.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use redline_core::{merge_text_entries, Entry, EntryKind, Paragraph, RedlineError, Result};

use crate::traits::{InputFormat, RevisionBackend};

/// Extract an attribute value by key from an element
#[inline]
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(std::result::Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Accumulator for one direct paragraph child of interest (`w:r`,
/// `w:ins` or `w:del`).
struct ChildBuilder {
    kind: EntryKind,
    text: String,
    author: String,
    date: String,
}

impl ChildBuilder {
    fn run() -> Self {
        Self {
            kind: EntryKind::Text,
            text: String::new(),
            author: String::new(),
            date: String::new(),
        }
    }

    fn change(kind: EntryKind, e: &BytesStart) -> Self {
        Self {
            kind,
            text: String::new(),
            author: get_attr(e, b"w:author").unwrap_or_default(),
            date: get_attr(e, b"w:date").unwrap_or_default(),
        }
    }

    /// Finish the child, substituting the single-space placeholder for
    /// empty reconstructed content so adjacent-text merging and context
    /// word counts stay stable.
    fn into_entry(self) -> Entry {
        let content = if self.text.is_empty() {
            " ".to_string()
        } else {
            self.text
        };
        match self.kind {
            EntryKind::Text => Entry::text(content),
            EntryKind::Insertion => Entry::insertion(content, self.author, self.date),
            EntryKind::Deletion => Entry::deletion(content, self.author, self.date),
        }
    }
}

/// State container for walking the document body.
struct WalkState {
    // Location tracking
    saw_body: bool,
    in_body: bool,
    table_depth: usize,
    in_paragraph: bool,
    /// Open element depth below the current `w:p`; a direct paragraph
    /// child sits at depth 1.
    depth: usize,
    in_text: bool,
    in_del_text: bool,

    // Builders for accumulating content
    child: Option<ChildBuilder>,
    entries: Vec<Entry>,

    // Output accumulator
    paragraphs: Vec<Paragraph>,
}

impl WalkState {
    fn new() -> Self {
        Self {
            saw_body: false,
            in_body: false,
            table_depth: 0,
            in_paragraph: false,
            depth: 0,
            in_text: false,
            in_del_text: false,
            child: None,
            entries: Vec::new(),
            paragraphs: Vec::new(),
        }
    }

    fn handle_start_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:body" if !self.in_body => {
                self.in_body = true;
                self.saw_body = true;
            }
            b"w:tbl" if self.in_body && !self.in_paragraph => {
                self.table_depth += 1;
            }
            b"w:p" if self.in_body && self.table_depth == 0 && !self.in_paragraph => {
                self.in_paragraph = true;
                self.depth = 0;
            }
            _ if self.in_paragraph => {
                self.depth += 1;
                if self.depth == 1 {
                    self.handle_child_start(e);
                } else {
                    self.handle_nested_start(e);
                }
            }
            _ => {}
        }
    }

    /// Open a direct paragraph child. Unrecognized children leave `child`
    /// unset and everything below them is ignored.
    fn handle_child_start(&mut self, e: &BytesStart<'_>) {
        self.child = match e.name().as_ref() {
            b"w:r" => Some(ChildBuilder::run()),
            b"w:ins" => Some(ChildBuilder::change(EntryKind::Insertion, e)),
            b"w:del" => Some(ChildBuilder::change(EntryKind::Deletion, e)),
            _ => None,
        };
    }

    /// Track text-bearing leaves below the active child: `w:t` inside
    /// runs and insertions, `w:delText` inside deletions, at any nesting
    /// depth.
    fn handle_nested_start(&mut self, e: &BytesStart<'_>) {
        if let Some(child) = &self.child {
            match (e.name().as_ref(), child.kind) {
                (b"w:t", EntryKind::Text | EntryKind::Insertion) => self.in_text = true,
                (b"w:delText", EntryKind::Deletion) => self.in_del_text = true,
                _ => {}
            }
        }
    }

    fn handle_empty_element(&mut self, e: &BytesStart<'_>) {
        if !self.in_paragraph || self.depth != 0 {
            // Self-closing `w:t`/`w:delText` and friends contribute
            // nothing.
            return;
        }
        // A self-closing direct child reconstructs empty content, which
        // becomes the single-space placeholder.
        match e.name().as_ref() {
            b"w:r" => self.entries.push(Entry::text(" ")),
            b"w:ins" => self
                .entries
                .push(ChildBuilder::change(EntryKind::Insertion, e).into_entry()),
            b"w:del" => self
                .entries
                .push(ChildBuilder::change(EntryKind::Deletion, e).into_entry()),
            _ => {}
        }
    }

    fn handle_text_event(&mut self, text: &str) {
        if self.in_text || self.in_del_text {
            if let Some(child) = &mut self.child {
                child.text.push_str(text);
            }
        }
    }

    fn handle_end_element(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" if self.table_depth > 0 && !self.in_paragraph => {
                self.table_depth -= 1;
            }
            b"w:p" if self.in_paragraph && self.depth == 0 => {
                self.handle_paragraph_end();
            }
            b"w:body" if self.in_body && !self.in_paragraph => {
                self.in_body = false;
            }
            _ if self.in_paragraph => {
                match name {
                    b"w:t" => self.in_text = false,
                    b"w:delText" => self.in_del_text = false,
                    _ => {}
                }
                if self.depth == 1 {
                    if let Some(child) = self.child.take() {
                        self.entries.push(child.into_entry());
                    }
                }
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_paragraph_end(&mut self) {
        self.in_paragraph = false;
        let entries = merge_text_entries(std::mem::take(&mut self.entries));
        self.paragraphs.push(Paragraph { entries });
    }

    fn into_paragraphs(self) -> Result<Vec<Paragraph>> {
        if !self.saw_body {
            return Err(RedlineError::ParseError(
                "document has no w:body element".to_string(),
            ));
        }
        if self.in_body || self.in_paragraph {
            return Err(RedlineError::ParseError(
                "unexpected end of document".to_string(),
            ));
        }
        Ok(self.paragraphs)
    }
}

/// Parse WordprocessingML into per-paragraph entry sequences.
///
/// Fails with [`RedlineError::ParseError`] on unreadable XML or a
/// document without a `w:body`; a malformed document aborts as a whole
/// rather than yielding partial paragraphs.
pub fn parse_document_xml(xml_content: &str) -> Result<Vec<Paragraph>> {
    let mut state = WalkState::new();

    let mut reader = Reader::from_str(xml_content);
    // Don't trim text: DOCX uses xml:space="preserve" to mark significant
    // whitespace inside w:t nodes.
    reader.trim_text(false);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.handle_start_element(&e),
            Ok(Event::Empty(e)) => state.handle_empty_element(&e),
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default();
                state.handle_text_event(&text);
            }
            Ok(Event::End(e)) => state.handle_end_element(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(RedlineError::ParseError(format!(
                    "error parsing document XML: {e:?}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    let paragraphs = state.into_paragraphs()?;
    log::debug!("parsed {} paragraphs", paragraphs.len());
    Ok(paragraphs)
}

/// Backend for `.docx` ZIP containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl RevisionBackend for DocxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Paragraph>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| RedlineError::FormatError(format!("not a valid docx archive: {e}")))?;

        let mut document_xml = archive.by_name("word/document.xml").map_err(|_| {
            RedlineError::FormatError("document.xml not found in the docx file".to_string())
        })?;

        let mut content = String::new();
        document_xml.read_to_string(&mut content)?;
        parse_document_xml(&content)
    }
}

/// Backend for raw WordprocessingML XML files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XmlBackend;

impl RevisionBackend for XmlBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Xml
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Paragraph>> {
        let content = std::str::from_utf8(bytes).map_err(|_| {
            RedlineError::ParseError("document XML is not valid UTF-8".to_string())
        })?;
        parse_document_xml(content)
    }
}
