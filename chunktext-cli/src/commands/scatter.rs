use std::path::Path;

use tokio::fs;
use tracing::info;

use chunktext_core::constants::DEFAULT_PAD_WIDTH;
use chunktext_core::error::{ChunkTextError, Result};
use chunktext_core::naming::ChunkNaming;
use chunktext_core::sequence::{SchemeFile, match_scheme};

/// Distribute chunk files evenly into numbered subdirectories.
///
/// Files matching the naming scheme are assigned to `dir_01..dir_NN` in
/// chunk order; earlier directories receive one extra file when the count
/// does not divide evenly. Prints the plan and asks for confirmation before
/// moving anything, unless `--yes` was given.
pub async fn run_scatter(
    input_dir: &str,
    num_dirs: u32,
    prefix: &str,
    suffix: &str,
    skip_confirm: bool,
) -> Result<()> {
    if num_dirs == 0 {
        return Err(ChunkTextError::Directory(
            "number of directories must be at least 1".to_string(),
        ));
    }

    let input_dir = Path::new(input_dir);
    let naming = ChunkNaming::new(prefix, suffix, DEFAULT_PAD_WIDTH);

    let names = list_file_names(input_dir).await?;
    let files = match_scheme(&names, &naming);
    if files.is_empty() {
        info!(
            "No files matching {} in {}",
            naming.scheme_display(),
            input_dir.display()
        );
        return Err(ChunkTextError::EmptyInput(input_dir.display().to_string()));
    }

    let counts = scatter_counts(files.len(), num_dirs);

    println!(
        "Scatter plan: {} file(s) into {} directories under {}",
        files.len(),
        num_dirs,
        input_dir.display()
    );

    let mut groups: Vec<(String, &[SchemeFile])> = Vec::with_capacity(counts.len());
    let mut start = 0usize;
    for (index, &count) in counts.iter().enumerate() {
        let dir_name = scatter_dir_name(index as u32, num_dirs);
        let group = &files[start..start + count];
        match group {
            [] => println!("  {dir_name}: (empty)"),
            [only] => println!("  {dir_name}: {} (1 file)", only.name),
            [first, .., last] => {
                println!("  {dir_name}: {} .. {} ({count} files)", first.name, last.name)
            }
        }
        groups.push((dir_name, group));
        start += count;
    }

    if !skip_confirm {
        eprint!(
            "Move {} file(s) into {} directories? [y/N] ",
            files.len(),
            num_dirs
        );
        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .map_err(|e| ChunkTextError::Read(format!("stdin: {e}")))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut moved = 0usize;
    for (dir_name, group) in &groups {
        let target = input_dir.join(dir_name);
        fs::create_dir_all(&target)
            .await
            .map_err(|e| ChunkTextError::Directory(format!("{}: {e}", target.display())))?;

        for file in *group {
            let from = input_dir.join(&file.name);
            let to = target.join(&file.name);
            fs::rename(&from, &to)
                .await
                .map_err(|e| ChunkTextError::Write(format!("move {}: {e}", file.name)))?;
            info!("Moved {} -> {dir_name}/{}", file.name, file.name);
            moved += 1;
        }
    }

    println!();
    println!("Scatter complete:");
    println!("  Moved:    {moved} file(s)");
    println!("  Dirs:     {num_dirs}");
    println!("  Base:     {}", input_dir.display());

    Ok(())
}

async fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ChunkTextError::ReadDir(format!("{}: {e}", dir.display())))?;
        if !file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    Ok(names)
}

/// File counts per directory: `total / num_dirs` each, with the remainder
/// spread one-per-directory from the front.
fn scatter_counts(total: usize, num_dirs: u32) -> Vec<usize> {
    let num_dirs = num_dirs as usize;
    let base = total / num_dirs;
    let extra = total % num_dirs;
    (0..num_dirs).map(|i| base + usize::from(i < extra)).collect()
}

/// Subdirectory name for a zero-based index: `dir_01`, `dir_02`, ...
/// widened past two digits when `num_dirs` needs it.
fn scatter_dir_name(index: u32, num_dirs: u32) -> String {
    let width = num_dirs.to_string().len().max(2);
    format!("dir_{:0width$}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chunktext_core::options::SplitOptions;
    use tempfile::TempDir;

    use crate::commands::split::split_file;

    #[test]
    fn test_scatter_counts() {
        assert_eq!(scatter_counts(10, 3), vec![4, 3, 3]);
        assert_eq!(scatter_counts(9, 3), vec![3, 3, 3]);
        assert_eq!(scatter_counts(2, 7), vec![1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_scatter_dir_names() {
        assert_eq!(scatter_dir_name(0, 7), "dir_01");
        assert_eq!(scatter_dir_name(6, 7), "dir_07");
        assert_eq!(scatter_dir_name(99, 100), "dir_100");
    }

    #[tokio::test]
    async fn test_scatter_moves_files_evenly() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.bin");
        let chunks = tmp.path().join("chunks");
        std::fs::write(&source, vec![1u8; 10]).unwrap();
        let opts = SplitOptions {
            chunk_size: 1,
            ..Default::default()
        };
        split_file(&source, &chunks, &opts).await.unwrap();

        run_scatter(chunks.to_str().unwrap(), 3, "part", ".txt", true)
            .await
            .unwrap();

        // 10 files into 3 dirs: 4/3/3 in chunk order.
        for i in 0..4 {
            assert!(chunks.join(format!("dir_01/part{i:03}.txt")).exists());
        }
        for i in 4..7 {
            assert!(chunks.join(format!("dir_02/part{i:03}.txt")).exists());
        }
        for i in 7..10 {
            assert!(chunks.join(format!("dir_03/part{i:03}.txt")).exists());
        }
        assert!(!chunks.join("part000.txt").exists());
    }

    #[tokio::test]
    async fn test_scatter_creates_trailing_empty_dirs() {
        let tmp = TempDir::new().unwrap();
        let chunks = tmp.path().join("chunks");
        std::fs::create_dir_all(&chunks).unwrap();
        std::fs::write(chunks.join("part000.txt"), "QQ==").unwrap();
        std::fs::write(chunks.join("part001.txt"), "Qg==").unwrap();

        run_scatter(chunks.to_str().unwrap(), 3, "part", ".txt", true)
            .await
            .unwrap();

        assert!(chunks.join("dir_03").is_dir());
        assert_eq!(std::fs::read_dir(chunks.join("dir_03")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_scatter_leaves_foreign_files_in_place() {
        let tmp = TempDir::new().unwrap();
        let chunks = tmp.path().join("chunks");
        std::fs::create_dir_all(&chunks).unwrap();
        std::fs::write(chunks.join("part000.txt"), "QQ==").unwrap();
        std::fs::write(chunks.join("notes.md"), "not a chunk").unwrap();

        run_scatter(chunks.to_str().unwrap(), 2, "part", ".txt", true)
            .await
            .unwrap();

        assert!(chunks.join("notes.md").exists());
        assert!(chunks.join("dir_01/part000.txt").exists());
    }

    #[tokio::test]
    async fn test_scatter_without_matching_files() {
        let tmp = TempDir::new().unwrap();
        let chunks = tmp.path().join("chunks");
        std::fs::create_dir_all(&chunks).unwrap();
        std::fs::write(chunks.join("notes.md"), "not a chunk").unwrap();

        let err = run_scatter(chunks.to_str().unwrap(), 3, "part", ".txt", true)
            .await
            .unwrap_err();
        assert!(matches!(err, ChunkTextError::EmptyInput(_)));
        assert_eq!(
            err.to_string(),
            format!("no chunk files found in {}", chunks.display())
        );
    }

    #[tokio::test]
    async fn test_scatter_rejects_zero_dirs() {
        let tmp = TempDir::new().unwrap();
        let err = run_scatter(tmp.path().to_str().unwrap(), 0, "part", ".txt", true)
            .await
            .unwrap_err();
        assert!(matches!(err, ChunkTextError::Directory(_)));
    }
}
