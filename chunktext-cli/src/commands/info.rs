use std::collections::{HashMap, HashSet};
use std::path::Path;

use tokio::fs;
use tracing::info;

use chunktext_core::constants::{DEFAULT_PAD_WIDTH, MANIFEST_FILE_NAME};
use chunktext_core::error::{ChunkTextError, Result};
use chunktext_core::manifest::SplitManifest;
use chunktext_core::naming::ChunkNaming;
use chunktext_core::sequence::{SchemeFile, duplicate_ordinals, find_gaps, match_scheme};

/// Inspect a chunk directory without modifying it.
///
/// Reports chunk count, ordinal coverage (gaps and duplicates), encoded and
/// estimated decoded sizes, files outside the naming scheme, and manifest
/// consistency. Gaps are reported, never fatal.
pub async fn run_info(input_dir: &str, prefix: &str, suffix: &str) -> Result<()> {
    let input_dir = Path::new(input_dir);
    let naming = ChunkNaming::new(prefix, suffix, DEFAULT_PAD_WIDTH);
    let report = inspect_dir(input_dir, &naming).await?;

    println!("Chunk Directory Info");
    println!("====================");
    println!("  Directory:  {}", input_dir.display());
    println!("  Scheme:     {}", naming.scheme_display());

    println!();
    println!("Chunks:");
    println!("  Files:      {}", report.scheme_files.len());
    if let (Some(first), Some(last)) = (report.scheme_files.first(), report.scheme_files.last())
    {
        println!("  Ordinals:   {} .. {}", first.ordinal, last.ordinal);
    }
    if report.gaps.is_empty() {
        println!("  Missing:    (none)");
    } else {
        println!(
            "  Missing:    {} ordinal(s): {}",
            report.gaps.len(),
            format_gaps(&report.gaps)
        );
    }
    if report.duplicates > 0 {
        println!(
            "  Duplicates: {} ordinal(s) appear more than once",
            report.duplicates
        );
    }
    println!("  Encoded:    {}", format_size(report.scheme_bytes));
    println!(
        "  Decoded:    ~{} (estimate)",
        format_size(report.scheme_bytes / 4 * 3)
    );
    if report.other_files > 0 {
        println!(
            "  Other:      {} file(s) outside the scheme",
            report.other_files
        );
    }

    println!();
    match &report.manifest {
        ManifestState::Absent => println!("Manifest: (none)"),
        ManifestState::Unreadable(e) => println!("Manifest: unreadable ({e})"),
        ManifestState::Present { entries, missing } => {
            if *missing == 0 {
                println!("Manifest: {entries} entries, all present");
            } else {
                println!("Manifest: {entries} entries, {missing} missing from directory");
            }
        }
    }

    info!("Info displayed");
    Ok(())
}

#[derive(Debug)]
pub(crate) struct DirReport {
    pub scheme_files: Vec<SchemeFile>,
    /// Total on-disk (encoded) size of the scheme files.
    pub scheme_bytes: u64,
    pub other_files: usize,
    pub gaps: Vec<u64>,
    pub duplicates: usize,
    pub manifest: ManifestState,
}

#[derive(Debug)]
pub(crate) enum ManifestState {
    Absent,
    Unreadable(String),
    Present { entries: usize, missing: usize },
}

/// Reads a directory listing into a [`DirReport`]. A manifest that fails to
/// parse is reported as unreadable rather than aborting the inspection.
pub(crate) async fn inspect_dir(dir: &Path, naming: &ChunkNaming) -> Result<DirReport> {
    let mut sizes: HashMap<String, u64> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut manifest_present = false;

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?
    {
        let meta = entry
            .metadata()
            .await
            .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?;
        if meta.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name == MANIFEST_FILE_NAME {
            manifest_present = true;
            continue;
        }
        sizes.insert(name.clone(), meta.len());
        names.push(name);
    }

    let scheme_files = match_scheme(&names, naming);
    let scheme_bytes: u64 = scheme_files
        .iter()
        .filter_map(|f| sizes.get(&f.name))
        .copied()
        .sum();
    let other_files = names.len() - scheme_files.len();
    let gaps = find_gaps(&scheme_files);
    let duplicates = duplicate_ordinals(&scheme_files);

    let manifest = if manifest_present {
        match fs::read_to_string(dir.join(MANIFEST_FILE_NAME)).await {
            Ok(raw) => match SplitManifest::from_json(&raw) {
                Ok(m) => {
                    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
                    let missing = m.names().filter(|n| !present.contains(n)).count();
                    ManifestState::Present {
                        entries: m.chunks.len(),
                        missing,
                    }
                }
                Err(e) => ManifestState::Unreadable(e.to_string()),
            },
            Err(e) => ManifestState::Unreadable(e.to_string()),
        }
    } else {
        ManifestState::Absent
    };

    Ok(DirReport {
        scheme_files,
        scheme_bytes,
        other_files,
        gaps,
        duplicates,
        manifest,
    })
}

fn format_gaps(gaps: &[u64]) -> String {
    const SHOW: usize = 8;
    let shown: Vec<String> = gaps.iter().take(SHOW).map(u64::to_string).collect();
    if gaps.len() > SHOW {
        format!("{}, ...", shown.join(", "))
    } else {
        shown.join(", ")
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
