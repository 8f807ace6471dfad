// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{CommenterError, ErrorContext, ErrorKind, Result};

pub mod error;
