use serde::{Deserialize, Serialize};

use crate::constants::MANIFEST_VERSION;
use crate::error::{ChunkTextError, Result};

/// One chunk file as recorded at split time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    /// Decoded (pre-base64) byte length of the chunk.
    pub decoded_len: u64,
}

/// Optional sidecar written next to the chunk files, recording the exact
/// chunk order and sizes of a split run.
///
/// Merge prefers this order over lexicographic sorting when the file is
/// present, which makes a chunk directory safe to rename or mix with files
/// from an older naming scheme. There are no checksums here; the manifest
/// answers "which files, in what order", nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitManifest {
    pub version: u32,
    pub source_size: u64,
    pub chunk_size: u64,
    pub prefix: String,
    pub suffix: String,
    pub chunks: Vec<ManifestEntry>,
}

impl SplitManifest {
    pub fn new(source_size: u64, chunk_size: u64, prefix: &str, suffix: &str) -> Self {
        Self {
            version: MANIFEST_VERSION,
            source_size,
            chunk_size,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            chunks: Vec::new(),
        }
    }

    pub fn add_chunk(&mut self, name: String, decoded_len: u64) {
        self.chunks.push(ManifestEntry { name, decoded_len });
    }

    /// Chunk file names in split order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|c| c.name.as_str())
    }

    /// Sum of recorded decoded lengths; equals `source_size` for a manifest
    /// written by a completed split.
    pub fn total_decoded(&self) -> u64 {
        self.chunks.iter().map(|c| c.decoded_len).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChunkTextError::Manifest(format!("serialize: {e}")))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let manifest: SplitManifest = serde_json::from_str(raw)
            .map_err(|e| ChunkTextError::Manifest(format!("parse: {e}")))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ChunkTextError::Manifest(format!(
                "unsupported manifest version {}",
                manifest.version
            )));
        }
        Ok(manifest)
    }
}
