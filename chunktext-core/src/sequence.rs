use crate::constants::MANIFEST_FILE_NAME;
use crate::naming::ChunkNaming;

/// A directory entry that matched the chunk naming scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeFile {
    pub ordinal: u64,
    pub name: String,
}

/// Merge order for a directory listing: every regular file except the
/// manifest, sorted by byte-wise name comparison.
///
/// Merge deliberately does not filter on the naming scheme; whatever sorts
/// into place gets decoded, which is also why zero-padded names matter.
pub fn order_for_merge(mut names: Vec<String>) -> Vec<String> {
    names.retain(|n| n != MANIFEST_FILE_NAME);
    names.sort();
    names
}

/// Filters a listing down to names matching `naming`, sorted by ordinal and
/// then by name so duplicate ordinals from mixed padding widths stay stable.
pub fn match_scheme(names: &[String], naming: &ChunkNaming) -> Vec<SchemeFile> {
    let mut files: Vec<SchemeFile> = names
        .iter()
        .filter_map(|name| {
            naming.parse(name).map(|ordinal| SchemeFile {
                ordinal,
                name: name.clone(),
            })
        })
        .collect();
    files.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.name.cmp(&b.name)));
    files
}

/// Ordinals missing from a run that should cover `0..=max`.
///
/// `files` must be sorted by ordinal, as returned by [`match_scheme`].
pub fn find_gaps(files: &[SchemeFile]) -> Vec<u64> {
    let mut gaps = Vec::new();
    let mut expected = 0u64;
    for file in files {
        while expected < file.ordinal {
            gaps.push(expected);
            expected += 1;
        }
        expected = expected.max(file.ordinal.saturating_add(1));
    }
    gaps
}

/// Number of extra files sharing an ordinal with an earlier file, e.g.
/// `part001.txt` next to a stale `part0001.txt`.
///
/// `files` must be sorted by ordinal, as returned by [`match_scheme`].
pub fn duplicate_ordinals(files: &[SchemeFile]) -> usize {
    files
        .windows(2)
        .filter(|pair| pair[0].ordinal == pair[1].ordinal)
        .count()
}
