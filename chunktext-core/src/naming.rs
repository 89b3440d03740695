/// Chunk file naming scheme: `{prefix}{zero-padded ordinal}{suffix}`.
///
/// Merge order is plain lexicographic file name order, so the padding width
/// is what makes name order agree with chunk order. `with_width_for_count`
/// widens the padding beyond the minimum whenever the planned chunk count
/// has more digits, which keeps `part999` from sorting after `part1000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkNaming {
    prefix: String,
    suffix: String,
    pad_width: usize,
}

impl ChunkNaming {
    pub fn new(prefix: &str, suffix: &str, pad_width: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pad_width,
        }
    }

    /// Scheme whose padding is wide enough for `chunk_count` ordinals.
    pub fn with_width_for_count(
        prefix: &str,
        suffix: &str,
        min_width: usize,
        chunk_count: u64,
    ) -> Self {
        Self::new(prefix, suffix, width_for_count(min_width, chunk_count))
    }

    pub fn pad_width(&self) -> usize {
        self.pad_width
    }

    /// File name for the chunk at `ordinal` (zero-based).
    pub fn chunk_name(&self, ordinal: u64) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            ordinal,
            self.suffix,
            width = self.pad_width
        )
    }

    /// Parses a file name back to its ordinal.
    ///
    /// Accepts any digit run length, not just the configured width, so that
    /// files written under an older or narrower scheme are still recognized.
    /// Returns `None` for names outside the scheme.
    pub fn parse(&self, name: &str) -> Option<u64> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Human-readable form of the scheme, e.g. `partNNN.txt`.
    pub fn scheme_display(&self) -> String {
        format!("{}{}{}", self.prefix, "N".repeat(self.pad_width), self.suffix)
    }
}

/// Padding width for `chunk_count` ordinals: the larger of `min_width` and
/// the decimal digit count of `chunk_count`.
pub fn width_for_count(min_width: usize, chunk_count: u64) -> usize {
    min_width.max(decimal_digits(chunk_count))
}

fn decimal_digits(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_name_zero_padding() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        assert_eq!(naming.chunk_name(0), "part000.txt");
        assert_eq!(naming.chunk_name(7), "part007.txt");
        assert_eq!(naming.chunk_name(42), "part042.txt");
        assert_eq!(naming.chunk_name(999), "part999.txt");
    }

    #[test]
    fn test_chunk_name_wider_than_padding() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        assert_eq!(naming.chunk_name(1000), "part1000.txt");
    }

    #[test]
    fn test_custom_prefix_suffix() {
        let naming = ChunkNaming::new("blob-", ".b64", 3);
        assert_eq!(naming.chunk_name(5), "blob-005.b64");
    }

    #[test]
    fn test_width_for_count() {
        assert_eq!(width_for_count(3, 1), 3);
        assert_eq!(width_for_count(3, 999), 3);
        assert_eq!(width_for_count(3, 1000), 4);
        assert_eq!(width_for_count(3, 12345), 5);
        assert_eq!(width_for_count(1, 7), 1);
    }

    #[test]
    fn test_parse_round_trip() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        for ordinal in [0, 1, 99, 999, 1000, 123456] {
            assert_eq!(naming.parse(&naming.chunk_name(ordinal)), Some(ordinal));
        }
    }

    #[test]
    fn test_parse_accepts_any_width() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        assert_eq!(naming.parse("part7.txt"), Some(7));
        assert_eq!(naming.parse("part0007.txt"), Some(7));
    }

    #[test]
    fn test_parse_rejects_non_scheme_names() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        assert_eq!(naming.parse("part.txt"), None);
        assert_eq!(naming.parse("part00a.txt"), None);
        assert_eq!(naming.parse("notes.txt"), None);
        assert_eq!(naming.parse("part001.json"), None);
        assert_eq!(naming.parse("chunks.manifest.json"), None);
    }

    #[test]
    fn test_fixed_width_breaks_ordering_past_capacity() {
        // With three digits, name order diverges from chunk order at 1000.
        assert!("part999.txt" > "part1000.txt");
    }

    #[test]
    fn test_computed_width_preserves_ordering() {
        let count = 1005u64;
        let naming = ChunkNaming::with_width_for_count("part", ".txt", 3, count);
        assert_eq!(naming.pad_width(), 4);

        let generated: Vec<String> = (0..count).map(|i| naming.chunk_name(i)).collect();
        let mut sorted = generated.clone();
        sorted.sort();
        assert_eq!(generated, sorted);
    }

    #[test]
    fn test_scheme_display() {
        let naming = ChunkNaming::new("part", ".txt", 3);
        assert_eq!(naming.scheme_display(), "partNNN.txt");
    }
}
