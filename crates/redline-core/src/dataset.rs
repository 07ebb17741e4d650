//! Dataset Builder: segment sequences → (original, correction) records.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::revision::{EntryKind, Paragraph};
use crate::segment::{build_segments, Segment};

/// Default number of context words taken on each side of a change group.
pub const DEFAULT_CONTEXT_WORDS: usize = 4;

/// One dataset record: a bounded-context snippet pair around a change
/// group.
///
/// `original` and `correction` are always populated here; `error_type`
/// and `explanation` are reserved for the downstream classification step
/// and omitted from serialization while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub original: String,
    pub correction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl CorrectionRecord {
    fn new(original: String, correction: String) -> Self {
        Self {
            original,
            correction,
            error_type: None,
            explanation: None,
        }
    }
}

/// Walks segment sequences and emits [`CorrectionRecord`]s.
///
/// The builder is stateless across paragraphs apart from its counters, so
/// one instance can process a whole document and report totals at the end.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    context_words: usize,
    records_emitted: usize,
    records_skipped: usize,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Create a builder with the default context window.
    pub fn new() -> Self {
        Self::with_context_words(DEFAULT_CONTEXT_WORDS)
    }

    /// Create a builder taking up to `context_words` words of context on
    /// each side of a change group.
    pub fn with_context_words(context_words: usize) -> Self {
        Self {
            context_words,
            records_emitted: 0,
            records_skipped: 0,
        }
    }

    /// Records emitted so far.
    #[inline]
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// Change groups dropped so far because both sides collapsed to empty.
    #[inline]
    pub fn records_skipped(&self) -> usize {
        self.records_skipped
    }

    /// Build the records for one paragraph, in in-paragraph order.
    pub fn paragraph_records(&mut self, paragraph: &Paragraph) -> Vec<CorrectionRecord> {
        self.segment_records(&build_segments(&paragraph.entries))
    }

    /// Build the records for a whole document, preserving paragraph order.
    pub fn document_records(&mut self, paragraphs: &[Paragraph]) -> Vec<CorrectionRecord> {
        paragraphs
            .iter()
            .flat_map(|p| self.paragraph_records(p))
            .collect()
    }

    fn segment_records(&mut self, segments: &[Segment]) -> Vec<CorrectionRecord> {
        let mut records = Vec::new();
        let mut i = 0;

        while i < segments.len() {
            if !segments[i].is_change() {
                i += 1;
                continue;
            }

            // Maximal run of consecutive change segments: one change group,
            // even when it mixes insertions and deletions.
            let start = i;
            while i < segments.len() && segments[i].is_change() {
                i += 1;
            }

            let prev_text = if start > 0 {
                segments[start - 1].text_content()
            } else {
                ""
            };
            let next_text = if i < segments.len() {
                segments[i].text_content()
            } else {
                ""
            };

            let (original_change, correction_change) = reduce_change_group(&segments[start..i]);
            let context_prev = tail_words(prev_text, self.context_words);
            let context_next = head_words(next_text, self.context_words);

            let original = format!("{context_prev}{original_change}{context_next}");
            let correction = format!("{context_prev}{correction_change}{context_next}");

            if original.trim().is_empty() && correction.trim().is_empty() {
                // No-op edit: nothing informative on either side.
                self.records_skipped += 1;
                debug!("dropping change group with both sides empty");
            } else {
                self.records_emitted += 1;
                records.push(CorrectionRecord::new(original, correction));
            }
        }

        records
    }
}

/// Reduce a change group to its two sides: deletions concatenate to the
/// original text, insertions to the corrected text.
fn reduce_change_group(group: &[Segment]) -> (String, String) {
    let mut original_change = String::new();
    let mut correction_change = String::new();
    for entry in group.iter().filter_map(|segment| match segment {
        Segment::Change(entry) => Some(entry),
        Segment::Text(_) => None,
    }) {
        match entry.kind {
            EntryKind::Deletion => original_change.push_str(&entry.content),
            EntryKind::Insertion => correction_change.push_str(&entry.content),
            EntryKind::Text => {}
        }
    }
    (original_change, correction_change)
}

/// Last `count` whitespace-delimited words of `text`, joined by single
/// spaces. Fewer when the text has fewer words.
fn tail_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words[words.len().saturating_sub(count)..].join(" ")
}

/// First `count` whitespace-delimited words of `text`, joined by single
/// spaces. Fewer when the text has fewer words.
fn head_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words[..count.min(words.len())].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::Entry;

    fn paragraph(entries: Vec<Entry>) -> Paragraph {
        Paragraph { entries }
    }

    #[test]
    fn test_deletion_with_context_on_both_sides() {
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::text("a b c d "),
            Entry::deletion("foo", "reviewer", ""),
            Entry::text(" more text here and beyond"),
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original, "a b c dfoomore text here and");
        assert_eq!(records[0].correction, "a b c dmore text here and");
    }

    #[test]
    fn test_context_never_exceeds_window() {
        let mut builder = DatasetBuilder::with_context_words(2);
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::text("one two three four "),
            Entry::insertion("X", "", ""),
            Entry::text(" five six seven"),
        ]));

        assert_eq!(records[0].correction, "three fourXfive six");
        assert_eq!(records[0].original, "three fourfive six");
    }

    #[test]
    fn test_short_context_returns_all_available_words() {
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::text("only "),
            Entry::deletion("gone", "", ""),
            Entry::text(" two words"),
        ]));

        assert_eq!(records[0].original, "onlygonetwo words");
        assert_eq!(records[0].correction, "onlytwo words");
    }

    #[test]
    fn test_mixed_group_is_a_substitution() {
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::text("He "),
            Entry::deletion("go", "", ""),
            Entry::insertion("goes", "", ""),
            Entry::text(" home"),
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original, "Hegohome");
        assert_eq!(records[0].correction, "Hegoeshome");
    }

    #[test]
    fn test_pure_insertion_without_context_still_emits() {
        let mut builder = DatasetBuilder::new();
        let records =
            builder.paragraph_records(&paragraph(vec![Entry::insertion("Z", "", "")]));

        // original collapses to empty, correction carries the insertion.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original, "");
        assert_eq!(records[0].correction, "Z");
        assert_eq!(builder.records_emitted(), 1);
    }

    #[test]
    fn test_noop_substitution_still_emits() {
        // Deletion "x" immediately re-inserted as "x": content is non-empty
        // on both sides, so the record is kept.
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::deletion("x", "", ""),
            Entry::insertion("x", "", ""),
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original, "x");
        assert_eq!(records[0].correction, "x");
        assert_eq!(builder.records_skipped(), 0);
    }

    #[test]
    fn test_both_sides_empty_is_skipped() {
        // A placeholder-space deletion with no surrounding text trims to
        // empty on both sides and is dropped, counted but not an error.
        let mut builder = DatasetBuilder::new();
        let records =
            builder.paragraph_records(&paragraph(vec![Entry::deletion(" ", "", "")]));

        assert!(records.is_empty());
        assert_eq!(builder.records_skipped(), 1);
        assert_eq!(builder.records_emitted(), 0);
    }

    #[test]
    fn test_no_changes_emit_no_records() {
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![Entry::text(
            "nothing was revised in this paragraph",
        )]));

        assert!(records.is_empty());
        assert_eq!(builder.records_skipped(), 0);
    }

    #[test]
    fn test_placeholder_space_between_groups_gives_zero_context() {
        // Two change groups separated only by a single-space placeholder:
        // the placeholder is a text segment, so it splits the groups, but
        // it contributes zero context words. Intended behavior.
        let mut builder = DatasetBuilder::new();
        let records = builder.paragraph_records(&paragraph(vec![
            Entry::deletion("first", "", ""),
            Entry::text(" "),
            Entry::deletion("second", "", ""),
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].original, "first");
        assert_eq!(records[0].correction, "");
        assert_eq!(records[1].original, "second");
        assert_eq!(records[1].correction, "");
    }

    #[test]
    fn test_multiple_groups_emit_in_order() {
        let mut builder = DatasetBuilder::new();
        let records = builder.document_records(&[
            paragraph(vec![
                Entry::text("p1 "),
                Entry::deletion("a", "", ""),
                Entry::text(" end"),
            ]),
            paragraph(vec![
                Entry::text("p2 "),
                Entry::insertion("b", "", ""),
                Entry::text(" end"),
            ]),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].original, "p1aend");
        assert_eq!(records[1].correction, "p2bend");
    }

    #[test]
    fn test_record_serialization_omits_unset_classification() {
        let record = CorrectionRecord::new("orig".to_string(), "corr".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"original":"orig","correction":"corr"}"#);
    }

    #[test]
    fn test_head_and_tail_words() {
        assert_eq!(tail_words("a b c d e", 4), "b c d e");
        assert_eq!(tail_words("  a   b  ", 4), "a b");
        assert_eq!(tail_words("", 4), "");
        assert_eq!(head_words("a b c d e", 4), "a b c d");
        assert_eq!(head_words("one", 4), "one");
        assert_eq!(head_words(" ", 4), "");
    }
}
