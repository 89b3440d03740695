use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_PAD_WIDTH, DEFAULT_PREFIX, DEFAULT_SUFFIX};

/// Settings for one split run.
///
/// Defaults reproduce the stock naming scheme (`part000.txt`, 16 MB chunks,
/// no manifest); callers override individual fields as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Chunk file name prefix.
    pub prefix: String,
    /// Chunk file name suffix, including any leading dot.
    pub suffix: String,
    /// Source bytes per chunk before encoding.
    pub chunk_size: u64,
    /// Minimum zero-padding width for ordinals; widened when the chunk
    /// count needs more digits so names always sort in chunk order.
    pub min_pad_width: usize,
    /// Write a `chunks.manifest.json` alongside the chunk files.
    pub manifest: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_pad_width: DEFAULT_PAD_WIDTH,
            manifest: false,
        }
    }
}
