use std::collections::HashSet;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use chunktext_core::codec::decode_chunk;
use chunktext_core::constants::MANIFEST_FILE_NAME;
use chunktext_core::error::{ChunkTextError, Result};
use chunktext_core::manifest::SplitManifest;
use chunktext_core::sequence::order_for_merge;

/// Merge a directory of chunk files back into a single binary file.
///
/// Lists the directory, orders the chunk files (manifest order when a
/// manifest is present, byte-wise name order otherwise), then decodes each
/// file and appends it to the output. The output file is only created once
/// at least one chunk file has been found.
pub async fn run_merge(input_dir: &str, output_file: &str) -> Result<()> {
    merge_dir(Path::new(input_dir), Path::new(output_file)).await
}

/// Core merge pipeline, shared by `run_merge` and the tests.
pub(crate) async fn merge_dir(input_dir: &Path, dest: &Path) -> Result<()> {
    let mut names: Vec<String> = Vec::new();
    let mut has_manifest = false;

    let mut entries = fs::read_dir(input_dir)
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", input_dir.display())))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", input_dir.display())))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", input_dir.display())))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name == MANIFEST_FILE_NAME {
            has_manifest = true;
            continue;
        }
        names.push(name);
    }

    if names.is_empty() {
        return Err(ChunkTextError::EmptyInput(input_dir.display().to_string()));
    }

    let ordered = if has_manifest {
        manifest_order(input_dir, &names).await?
    } else {
        order_for_merge(names)
    };

    info!(
        "Merging {} file(s) from {}",
        ordered.len(),
        input_dir.display()
    );

    let file = File::create(dest)
        .await
        .map_err(|e| ChunkTextError::OutputCreate(format!("{}: {e}", dest.display())))?;
    let mut writer = BufWriter::new(file);

    let pb = ProgressBar::new(ordered.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut total = 0u64;
    for name in &ordered {
        match append_chunk(input_dir, name, &mut writer).await {
            Ok(len) => {
                total += len;
                pb.inc(1);
            }
            Err(e) => {
                // No rollback: bytes from prior chunks stay on disk.
                let _ = writer.flush().await;
                return Err(e);
            }
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| ChunkTextError::Write(format!("{}: {e}", dest.display())))?;
    pb.finish_with_message("All chunks merged");

    info!("Merge complete");
    println!();
    println!("Merge complete:");
    println!("  Chunks:   {}", ordered.len());
    println!("  Output:   {} ({} bytes)", dest.display(), total);

    Ok(())
}

/// Decodes one chunk file and appends it to the output. Returns the decoded
/// length.
async fn append_chunk(
    input_dir: &Path,
    name: &str,
    writer: &mut BufWriter<File>,
) -> Result<u64> {
    let path = input_dir.join(name);
    let raw = fs::read(&path)
        .await
        .map_err(|e| ChunkTextError::Read(format!("{}: {e}", path.display())))?;

    let decoded = match decode_chunk(&raw) {
        Ok(decoded) => decoded,
        Err(ChunkTextError::Decode(msg)) => {
            return Err(ChunkTextError::Decode(format!("{name}: {msg}")));
        }
        Err(other) => return Err(other),
    };

    writer
        .write_all(&decoded)
        .await
        .map_err(|e| ChunkTextError::Write(format!("append {name}: {e}")))?;

    debug!("Merged {name} ({} bytes)", decoded.len());
    Ok(decoded.len() as u64)
}

/// Chunk order from the manifest. Every listed chunk must be present in the
/// directory; directory files the manifest does not list are skipped with a
/// warning.
async fn manifest_order(input_dir: &Path, names: &[String]) -> Result<Vec<String>> {
    let path = input_dir.join(MANIFEST_FILE_NAME);
    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| ChunkTextError::Manifest(format!("read {}: {e}", path.display())))?;
    let manifest = SplitManifest::from_json(&raw)?;

    let available: HashSet<&str> = names.iter().map(String::as_str).collect();
    let mut ordered = Vec::with_capacity(manifest.chunks.len());
    for name in manifest.names() {
        if !available.contains(name) {
            return Err(ChunkTextError::MissingChunk(name.to_string()));
        }
        ordered.push(name.to_string());
    }

    let listed: HashSet<&str> = manifest.names().collect();
    let unlisted = names.iter().filter(|n| !listed.contains(n.as_str())).count();
    if unlisted > 0 {
        warn!("Skipping {unlisted} file(s) not listed in the manifest");
    }

    Ok(ordered)
}
