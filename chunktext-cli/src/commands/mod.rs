//! CLI command implementations (split, merge, scatter, info).

pub mod split;
pub mod merge;
pub mod scatter;
pub mod info;
