//! # Redline Core - Revision Pipeline Types and Logic
//!
//! Core data model and pipeline passes for turning tracked-change revisions
//! extracted from Word documents into a correction dataset.
//!
//! The pipeline runs three ordered passes, one paragraph at a time:
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ Revision Parser  │ ──► │ Segment Builder  │ ──► │ Dataset Builder  │
//! │ (redline-backend)│     │ (this crate)     │     │ (this crate)     │
//! │ markup → entries │     │ entries → text/  │     │ change groups →  │
//! │                  │     │ change segments  │     │ record pairs     │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! This crate holds everything downstream of the markup: the [`Entry`] /
//! [`Paragraph`] model produced by the parser, the [`Segment`] sequence
//! derived from it, and the [`DatasetBuilder`] that emits
//! [`CorrectionRecord`]s. All passes are synchronous pure functions over
//! in-memory data; paragraphs are independent and processed in order.
//!
//! ## Quick Start
//!
//! ```
//! use redline_core::{DatasetBuilder, Entry, Paragraph};
//!
//! let paragraph = Paragraph {
//!     entries: vec![
//!         Entry::text("We meet on "),
//!         Entry::deletion("monday", "reviewer", "2024-01-09T10:00:00Z"),
//!         Entry::insertion("Monday", "reviewer", "2024-01-09T10:00:00Z"),
//!         Entry::text(" next week."),
//!     ],
//! };
//!
//! let mut builder = DatasetBuilder::new();
//! let records = builder.paragraph_records(&paragraph);
//! assert_eq!(records[0].original, "We meet onmondaynext week.");
//! assert_eq!(records[0].correction, "We meet onMondaynext week.");
//! ```

pub mod dataset;
pub mod error;
pub mod revision;
pub mod segment;
pub mod serializer;

pub use dataset::{CorrectionRecord, DatasetBuilder, DEFAULT_CONTEXT_WORDS};
pub use error::{RedlineError, Result};
pub use revision::{merge_text_entries, Entry, EntryKind, Paragraph};
pub use segment::{build_segments, Segment};
pub use serializer::{
    read_paragraphs_json, write_paragraphs_json, write_records_jsonl, DATASET_FILE, REVISIONS_FILE,
};
