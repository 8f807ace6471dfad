// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod filesystem;
pub mod persistence;
pub mod scanner;
pub mod stripper;

pub use scanner::{ScanState, Scanner, scan};
pub use stripper::{Layout, StripOutcome, Stripper};
