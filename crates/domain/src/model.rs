pub mod batch_result;
pub mod file_result;
pub mod segment;

pub use batch_result::{BatchResult, BatchTotals};
pub use file_result::{FileOutcome, FileResult, MalformedNote, RemovedComment};
pub use segment::{Segment, SegmentKind};
