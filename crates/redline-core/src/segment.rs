//! Segment Builder: entry list → ordered text/change segments.

use crate::revision::{Entry, EntryKind};

/// One segment of a paragraph, derived from its merged entry list.
///
/// A text segment holds concatenated stable content; a change segment
/// holds one insertion or deletion entry. Grouping consecutive change
/// segments into a change group happens later, in the dataset walk —
/// adjacent insertions and deletions stay distinct segments here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Change(Entry),
}

impl Segment {
    /// Whether this is a change segment.
    #[inline]
    pub fn is_change(&self) -> bool {
        matches!(self, Segment::Change(_))
    }

    /// The stable text content, or `""` for a change segment.
    pub fn text_content(&self) -> &str {
        match self {
            Segment::Text(content) => content,
            Segment::Change(_) => "",
        }
    }
}

/// Map a paragraph's merged entry list to its segment sequence.
///
/// Order-preserving: text entry → text segment, insertion/deletion entry →
/// change segment, one per entry. Adjacent text content is coalesced and
/// empty text content is dropped, so the output never contains a
/// zero-length text segment that could sit between two change segments.
pub fn build_segments(entries: &[Entry]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.kind {
            EntryKind::Text => {
                if entry.content.is_empty() {
                    continue;
                }
                if let Some(Segment::Text(last)) = segments.last_mut() {
                    last.push_str(&entry.content);
                } else {
                    segments.push(Segment::Text(entry.content.clone()));
                }
            }
            EntryKind::Insertion | EntryKind::Deletion => {
                segments.push(Segment::Change(entry.clone()));
            }
        }
    }
    segments
}
