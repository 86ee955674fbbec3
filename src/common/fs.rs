use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result, bail};
use zip::ZipArchive;

/// Create the directory if it doesn't exist; error if a non-directory exists there.
#[cfg_attr(not(feature = "download"), allow(dead_code))]
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("[fs] Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("[fs] Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Extracts the given `.zip` file to the target directory.
/// If `delete_after` is `true`, removes the `.zip` file after a successful extraction.
#[cfg_attr(not(feature = "download"), allow(dead_code))]
pub(crate) fn extract_zip(zip_path: &Path, dest_dir: &Path, delete_after: bool) -> Result<()> {
    let file = fs::File::open(zip_path)
        .with_context(|| format!("[fs] Failed to open {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("[fs] Failed to read zip archive {}", zip_path.display()))?;

    archive.extract(dest_dir)
        .with_context(|| format!("[fs] Failed to extract {} to {}", zip_path.display(), dest_dir.display()))?;

    if delete_after {
        fs::remove_file(zip_path)
            .with_context(|| format!("[fs] Failed to delete {}", zip_path.display()))?;
    }

    Ok(())
}

/// Find the first file in `dir` (not recursive) with the given extension, in name order.
#[cfg_attr(not(feature = "download"), allow(dead_code))]
pub(crate) fn find_file_with_extension(dir: &Path, extension: &str) -> Result<PathBuf> {
    let mut matches = fs::read_dir(dir)
        .with_context(|| format!("[fs] Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(extension)))
        .collect::<Vec<_>>();
    matches.sort();

    matches.into_iter().next()
        .with_context(|| format!("[fs] No .{extension} file found in {}", dir.display()))
}
