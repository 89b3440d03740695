use base64::prelude::*;

use crate::error::{ChunkTextError, Result};

/// Encodes one chunk of source bytes as standard base64 with padding.
///
/// The output is a single line with no trailing newline, so the encoded
/// file length is exactly `ceil(len / 3) * 4`.
pub fn encode_chunk(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}

/// Decodes one chunk file's content back to source bytes.
///
/// Surrounding ASCII whitespace is tolerated (editors and transfer tools
/// like to append newlines); anything else that is not strict standard
/// base64 is a decode error.
pub fn decode_chunk(raw: &[u8]) -> Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(raw.trim_ascii())
        .map_err(|e| ChunkTextError::Decode(format!("invalid base64: {e}")))
}
