//! Platform-independent chunk logic for splitting binaries into text chunks.
//!
//! All naming, sizing, base64 codec, ordering, and manifest behavior lives
//! here so that the CLI pipelines and their tests share identical byte-level
//! semantics.

pub mod error;
pub mod constants;
pub mod options;
pub mod naming;
pub mod codec;
pub mod plan;
pub mod sequence;
pub mod manifest;
