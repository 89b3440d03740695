use std::collections::HashSet;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use chunktext_core::codec::encode_chunk;
use chunktext_core::constants::{DEFAULT_CHUNK_SIZE_MB, MANIFEST_FILE_NAME};
use chunktext_core::error::{ChunkTextError, Result};
use chunktext_core::manifest::SplitManifest;
use chunktext_core::naming::ChunkNaming;
use chunktext_core::options::SplitOptions;
use chunktext_core::plan::SplitPlan;

/// Split a binary file into base64-encoded chunk files.
///
/// Stats the source, plans chunk count and naming, then streams the file one
/// chunk-sized block at a time: read, encode, write. Stale chunk files left
/// over from an earlier run are pruned afterwards. Returns the number of
/// chunks written.
pub async fn run_split(
    source: &str,
    output_dir: &str,
    prefix: &str,
    suffix: &str,
    chunk_size_mb: Option<&str>,
    manifest: bool,
) -> Result<u64> {
    let chunk_size_mb = parse_chunk_size_mb(chunk_size_mb);

    info!(
        "Splitting {source} into {output_dir} (prefix={prefix}, suffix={suffix}, chunk size {chunk_size_mb} MB)"
    );

    let opts = SplitOptions {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
        chunk_size: chunk_size_mb.saturating_mul(1_048_576),
        manifest,
        ..Default::default()
    };

    split_file(Path::new(source), Path::new(output_dir), &opts).await
}

/// Core split pipeline, shared by `run_split` and the tests.
pub(crate) async fn split_file(
    source: &Path,
    output_dir: &Path,
    opts: &SplitOptions,
) -> Result<u64> {
    let mut file = File::open(source)
        .await
        .map_err(|e| ChunkTextError::Open(format!("{}: {e}", source.display())))?;

    let meta = file
        .metadata()
        .await
        .map_err(|e| ChunkTextError::Metadata(format!("{}: {e}", source.display())))?;
    if meta.is_dir() {
        return Err(ChunkTextError::Open(format!(
            "{}: is a directory",
            source.display()
        )));
    }

    // Fails on an empty source before the output directory is touched.
    let plan = SplitPlan::new(meta.len(), opts)?;
    info!(
        "Source is {} bytes, planning {} chunk(s) of up to {} bytes",
        plan.source_size, plan.chunk_count, plan.chunk_size
    );

    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| ChunkTextError::Directory(format!("{}: {e}", output_dir.display())))?;

    let buf_len =
        usize::try_from(plan.chunk_size).map_err(|_| ChunkTextError::InvalidChunkSize)?;
    let mut buf = vec![0u8; buf_len];

    let pb = ProgressBar::new(plan.chunk_count);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut manifest = opts.manifest.then(|| {
        SplitManifest::new(plan.source_size, plan.chunk_size, &opts.prefix, &opts.suffix)
    });
    let mut written: Vec<String> = Vec::new();

    for ordinal in 0..plan.chunk_count {
        let read = read_block(&mut file, &mut buf).await.map_err(|e| {
            ChunkTextError::Read(format!("chunk {ordinal} of {}: {e}", source.display()))
        })?;
        if read == 0 {
            warn!(
                "Source ended after {ordinal} of {} planned chunk(s)",
                plan.chunk_count
            );
            break;
        }

        let name = plan.naming.chunk_name(ordinal);
        let path = output_dir.join(&name);
        let encoded = encode_chunk(&buf[..read]);
        fs::write(&path, encoded.as_bytes())
            .await
            .map_err(|e| ChunkTextError::Write(format!("{}: {e}", path.display())))?;

        info!(
            "Wrote {name} ({}/{}, {read} bytes before encoding)",
            ordinal + 1,
            plan.chunk_count
        );
        if let Some(m) = manifest.as_mut() {
            m.add_chunk(name.clone(), read as u64);
        }
        written.push(name);
        pb.inc(1);
    }

    pb.finish_with_message("All chunks written");

    let pruned = prune_stale_chunks(output_dir, &plan.naming, &written, opts.manifest).await?;

    if let Some(m) = manifest.as_ref() {
        let path = output_dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, m.to_json()?)
            .await
            .map_err(|e| ChunkTextError::Manifest(format!("write {}: {e}", path.display())))?;
        info!("Wrote manifest with {} entries", m.chunks.len());
    }

    info!("Split complete");
    println!();
    println!("Split complete:");
    println!("  Source:   {} ({} bytes)", source.display(), plan.source_size);
    println!("  Chunks:   {}", written.len());
    if pruned > 0 {
        println!("  Pruned:   {pruned} stale file(s)");
    }
    if opts.manifest {
        println!("  Manifest: {MANIFEST_FILE_NAME}");
    }
    println!("  Output:   {}", output_dir.display());

    Ok(written.len() as u64)
}

/// Reads until `buf` is full or the source is exhausted, so every chunk
/// except the last holds exactly the planned size even across short reads.
async fn read_block(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Removes leftovers from a previous split run: any file matching the naming
/// scheme (at any padding width) that this run did not just write, plus a
/// stale manifest when this run was asked not to write one. Files outside
/// the scheme are never touched.
async fn prune_stale_chunks(
    output_dir: &Path,
    naming: &ChunkNaming,
    written: &[String],
    keep_manifest: bool,
) -> Result<u64> {
    let fresh: HashSet<&str> = written.iter().map(String::as_str).collect();
    let mut pruned = 0u64;

    let mut entries = fs::read_dir(output_dir)
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", output_dir.display())))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", output_dir.display())))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", output_dir.display())))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let stale = if name == MANIFEST_FILE_NAME {
            !keep_manifest
        } else {
            naming.parse(&name).is_some() && !fresh.contains(name.as_str())
        };

        if stale {
            fs::remove_file(entry.path())
                .await
                .map_err(|e| ChunkTextError::Write(format!("remove stale {name}: {e}")))?;
            info!("Pruned stale file {name}");
            pruned += 1;
        }
    }

    Ok(pruned)
}

/// Parses the chunk size argument. Unparseable or zero values fall back to
/// the default with a warning instead of aborting.
fn parse_chunk_size_mb(raw: Option<&str>) -> u64 {
    match raw {
        None => DEFAULT_CHUNK_SIZE_MB,
        Some(s) => match s.parse::<u64>() {
            Ok(mb) if mb > 0 => mb,
            _ => {
                eprintln!("Warning: invalid chunk size '{s}', using {DEFAULT_CHUNK_SIZE_MB} MB");
                DEFAULT_CHUNK_SIZE_MB
            }
        },
    }
}
