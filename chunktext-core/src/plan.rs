use crate::error::{ChunkTextError, Result};
use crate::naming::ChunkNaming;
use crate::options::SplitOptions;

/// Sizing and naming decisions for one split run, fixed before any I/O.
///
/// The chunk count is `ceil(source_size / chunk_size)`; the naming scheme is
/// widened to fit that count so chunk names sort in chunk order.
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub source_size: u64,
    pub chunk_size: u64,
    pub chunk_count: u64,
    pub naming: ChunkNaming,
}

impl SplitPlan {
    pub fn new(source_size: u64, opts: &SplitOptions) -> Result<Self> {
        if opts.chunk_size == 0 {
            return Err(ChunkTextError::InvalidChunkSize);
        }
        if source_size == 0 {
            return Err(ChunkTextError::EmptySource);
        }

        let chunk_count = source_size.div_ceil(opts.chunk_size);
        let naming = ChunkNaming::with_width_for_count(
            &opts.prefix,
            &opts.suffix,
            opts.min_pad_width,
            chunk_count,
        );

        Ok(Self {
            source_size,
            chunk_size: opts.chunk_size,
            chunk_count,
            naming,
        })
    }

    /// Decoded byte length of the chunk at `ordinal`: `chunk_size` for every
    /// chunk except possibly the last, which holds the remainder.
    pub fn chunk_len(&self, ordinal: u64) -> u64 {
        let start = ordinal.saturating_mul(self.chunk_size);
        if start >= self.source_size {
            0
        } else {
            (self.source_size - start).min(self.chunk_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts_with_chunk_size(chunk_size: u64) -> SplitOptions {
        SplitOptions {
            chunk_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_with_remainder() {
        let plan = SplitPlan::new(40, &opts_with_chunk_size(16)).unwrap();
        assert_eq!(plan.chunk_count, 3);
        assert_eq!(plan.chunk_len(0), 16);
        assert_eq!(plan.chunk_len(1), 16);
        assert_eq!(plan.chunk_len(2), 8);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let plan = SplitPlan::new(32, &opts_with_chunk_size(16)).unwrap();
        assert_eq!(plan.chunk_count, 2);
        assert_eq!(plan.chunk_len(0), 16);
        assert_eq!(plan.chunk_len(1), 16);
    }

    #[test]
    fn test_plan_source_smaller_than_chunk() {
        let plan = SplitPlan::new(5, &opts_with_chunk_size(16)).unwrap();
        assert_eq!(plan.chunk_count, 1);
        assert_eq!(plan.chunk_len(0), 5);
    }

    #[test]
    fn test_plan_rejects_empty_source() {
        let err = SplitPlan::new(0, &opts_with_chunk_size(16)).unwrap_err();
        assert!(matches!(err, ChunkTextError::EmptySource));
    }

    #[test]
    fn test_plan_rejects_zero_chunk_size() {
        let err = SplitPlan::new(40, &opts_with_chunk_size(0)).unwrap_err();
        assert!(matches!(err, ChunkTextError::InvalidChunkSize));
    }

    #[test]
    fn test_plan_widens_naming_for_large_counts() {
        let plan = SplitPlan::new(1005, &opts_with_chunk_size(1)).unwrap();
        assert_eq!(plan.chunk_count, 1005);
        assert_eq!(plan.naming.pad_width(), 4);
        assert_eq!(plan.naming.chunk_name(0), "part0000.txt");
        assert_eq!(plan.naming.chunk_name(1004), "part1004.txt");
    }

    #[test]
    fn test_chunk_len_past_end_is_zero() {
        let plan = SplitPlan::new(40, &opts_with_chunk_size(16)).unwrap();
        assert_eq!(plan.chunk_len(3), 0);
    }
}
