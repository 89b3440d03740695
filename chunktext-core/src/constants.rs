/// Default chunk size: 16 MB of source bytes per chunk.
pub const DEFAULT_CHUNK_SIZE: u64 = 16 * 1_048_576;

/// Default chunk size expressed in whole megabytes, for CLI defaults.
pub const DEFAULT_CHUNK_SIZE_MB: u64 = 16;

/// Default chunk file name prefix.
pub const DEFAULT_PREFIX: &str = "part";

/// Default chunk file name suffix.
pub const DEFAULT_SUFFIX: &str = ".txt";

/// Minimum zero-padding width for chunk ordinals.
pub const DEFAULT_PAD_WIDTH: usize = 3;

/// File name of the optional chunk order manifest.
pub const MANIFEST_FILE_NAME: &str = "chunks.manifest.json";

/// Manifest format version accepted by this build.
pub const MANIFEST_VERSION: u32 = 1;

/// Default number of subdirectories for the scatter command.
pub const DEFAULT_SCATTER_DIRS: u32 = 7;
