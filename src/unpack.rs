//! `.docx` to folder unpacking.

use crate::detect::open_archive;
use crate::error::{Error, Result, Step};
use crate::stream::copy_tagged;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a successful unpack.
#[derive(Debug, Clone, Serialize)]
pub struct UnpackSummary {
    /// Folder the archive was extracted into
    pub destination: PathBuf,
    /// Number of files written
    pub files: usize,
    /// Sum of bytes written
    pub total_bytes: u64,
}

/// A planned extraction target.
struct Target {
    index: usize,
    relative: PathBuf,
    is_dir: bool,
}

/// Turn an archive entry name into a relative path confined to the root.
///
/// Returns `None` for names that are empty, absolute, carry a drive or UNC
/// prefix, or contain a `..` component. Backslashes count as separators.
pub fn sanitize_entry_name(name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    if normalized.starts_with('/') {
        return None;
    }

    let mut relative = PathBuf::new();
    for part in normalized.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            // Drive letters ("C:") and alternate data streams
            p if p.contains(':') => return None,
            p => relative.push(p),
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// Extract every entry of the ZIP container at `archive_path` into
/// `destination`, creating it if needed.
///
/// The file is checked to be a ZIP and every entry name is checked before
/// anything is written. A failure during extraction leaves already written
/// files in place.
///
/// # Example
///
/// ```no_run
/// use docxpack::unpack;
///
/// let summary = unpack("document.docx", "document")?;
/// println!("{} files", summary.files);
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn unpack(
    archive_path: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<UnpackSummary> {
    let archive_path = archive_path.as_ref();
    let destination = destination.as_ref();

    let mut archive = open_archive(archive_path)?;

    let mut targets = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| Error::zip(Step::ReadEntry, archive_path, e))?;
        if entry.encrypted() {
            return Err(Error::Encrypted);
        }
        let relative = sanitize_entry_name(entry.name()).ok_or_else(|| {
            tracing::warn!(entry = entry.name(), "rejecting unsafe entry path");
            Error::UnsafeEntryPath {
                entry: entry.name().to_string(),
            }
        })?;
        targets.push(Target {
            index,
            relative,
            is_dir: entry.is_dir(),
        });
    }

    fs::create_dir_all(destination).map_err(|e| Error::io(Step::CreateDir, destination, e))?;

    let mut files = 0;
    let mut total_bytes = 0u64;

    for target in targets {
        let path = destination.join(&target.relative);

        if target.is_dir {
            fs::create_dir_all(&path).map_err(|e| Error::io(Step::CreateDir, &path, e))?;
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(Step::CreateDir, parent, e))?;
        }

        let mut entry = archive
            .by_index(target.index)
            .map_err(|e| Error::zip(Step::Decompress, &path, e))?;
        let mut file =
            fs::File::create(&path).map_err(|e| Error::io(Step::WriteEntry, &path, e))?;
        let written =
            copy_tagged(&mut entry, &mut file, Step::Decompress, Step::WriteEntry, &path)?;

        tracing::debug!(entry = %target.relative.display(), bytes = written, "extracted");
        files += 1;
        total_bytes += written;
    }

    tracing::info!(
        destination = %destination.display(),
        files,
        "DOCX unpacked"
    );

    Ok(UnpackSummary {
        destination: destination.to_path_buf(),
        files,
        total_bytes,
    })
}
