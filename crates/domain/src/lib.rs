#![allow(clippy::multiple_crate_versions)]

pub mod language;
pub mod model;
pub mod stats;

pub use language::{
    BlockDelimiter, LanguageProfile, PROFILES, StringDelimiter, profile_for, profile_for_path, supported_extensions,
};
pub use model::{BatchResult, BatchTotals, FileOutcome, FileResult, MalformedNote, RemovedComment, Segment, SegmentKind};
pub use stats::LineStats;
