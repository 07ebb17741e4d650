//! Revision entry model produced by the parser.
//!
//! A paragraph of a tracked-changes document is represented as an ordered
//! list of [`Entry`] values. Entries form a two-way edit script: the
//! text+insertion entries concatenate to the corrected reading of the
//! paragraph, and the text+deletion entries concatenate to the original
//! reading.

use serde::{Deserialize, Serialize};

/// Closed set of entry kinds a paragraph child can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Stable text outside any tracked change.
    Text,
    /// Text added by a tracked insertion.
    Insertion,
    /// Text removed by a tracked deletion.
    Deletion,
}

/// One typed content entry within a paragraph.
///
/// Insertion and deletion entries always carry `author`/`date` (empty
/// strings when the markup omitted the attribute); text entries carry
/// neither. Entries are immutable once created — the only transformation
/// applied afterwards is [`merge_text_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry kind, serialized under the `type` key.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Extracted text content. Never empty: the parser substitutes a
    /// single space for nodes whose reconstructed text is empty, so that
    /// adjacent-text merging and context word counts stay stable.
    pub content: String,

    /// Revision author, present on insertion/deletion entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Revision timestamp as found in the markup, present on
    /// insertion/deletion entries. Kept verbatim, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Entry {
    /// Create a stable text entry.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Text,
            content: content.into(),
            author: None,
            date: None,
        }
    }

    /// Create a tracked insertion entry.
    pub fn insertion(
        content: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntryKind::Insertion,
            content: content.into(),
            author: Some(author.into()),
            date: Some(date.into()),
        }
    }

    /// Create a tracked deletion entry.
    pub fn deletion(
        content: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntryKind::Deletion,
            content: content.into(),
            author: Some(author.into()),
            date: Some(date.into()),
        }
    }

    /// Whether this is a stable text entry.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == EntryKind::Text
    }

    /// Whether this is a tracked change (insertion or deletion).
    #[inline]
    pub fn is_change(&self) -> bool {
        !self.is_text()
    }
}

/// Ordered entries belonging to one document paragraph.
///
/// Serialized as `{"entries": [...]}`; an array of these is the JSON
/// intermediate written by extraction and consumed by the dataset stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub entries: Vec<Entry>,
}

impl Paragraph {
    /// The corrected reading: text + insertion contents, in order.
    pub fn corrected_reading(&self) -> String {
        self.reading(EntryKind::Insertion)
    }

    /// The original reading: text + deletion contents, in order.
    pub fn original_reading(&self) -> String {
        self.reading(EntryKind::Deletion)
    }

    fn reading(&self, change_kind: EntryKind) -> String {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Text || e.kind == change_kind)
            .map(|e| e.content.as_str())
            .collect()
    }
}

/// Merge consecutive text entries into one, preserving order.
///
/// Two adjacent raw text entries are always one logical region of
/// unchanged text, so this runs unconditionally after per-node extraction.
/// Idempotent: merging an already-merged list yields an identical list.
pub fn merge_text_entries(entries: Vec<Entry>) -> Vec<Entry> {
    let mut merged: Vec<Entry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged.last_mut() {
            Some(last) if last.is_text() && entry.is_text() => {
                last.content.push_str(&entry.content);
            }
            _ => merged.push(entry),
        }
    }
    merged
}
