//! JSON serialization for the paragraph intermediate and the JSONL
//! dataset.
//!
//! Two persisted shapes exist: the pretty-printed JSON array of paragraphs
//! written by extraction and read back by the dataset stage, and the
//! line-delimited JSON dataset (one record per line, UTF-8, emission
//! order).

use std::io::{Read, Write};

use crate::dataset::CorrectionRecord;
use crate::error::Result;
use crate::revision::Paragraph;

/// Default file name for the paragraph JSON intermediate.
pub const REVISIONS_FILE: &str = "revisions_grouped.json";

/// Default file name for the JSONL dataset.
pub const DATASET_FILE: &str = "dataset.jsonl";

/// Write the paragraph intermediate as a pretty-printed JSON array.
pub fn write_paragraphs_json<W: Write>(paragraphs: &[Paragraph], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, paragraphs)?;
    Ok(())
}

/// Decode a paragraph intermediate.
///
/// Fails with [`RedlineError::DecodeError`](crate::RedlineError) on
/// invalid JSON; the caller aborts the run rather than emitting partial
/// output.
pub fn read_paragraphs_json<R: Read>(reader: R) -> Result<Vec<Paragraph>> {
    let paragraphs = serde_json::from_reader(reader)?;
    Ok(paragraphs)
}

/// Write records as line-delimited JSON, one record per line, preserving
/// order.
pub fn write_records_jsonl<W: Write>(records: &[CorrectionRecord], mut writer: W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
