//! Folder to `.docx` packing.

use crate::error::{Error, Result, Step};
use crate::options::PackOptions;
use crate::stream::copy_tagged;
use crate::structure::validate_structure;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipWriter;

/// Outcome of a successful pack.
#[derive(Debug, Clone, Serialize)]
pub struct PackSummary {
    /// Where the archive was written
    pub destination: PathBuf,
    /// Entry names in archive order
    pub entries: Vec<String>,
    /// Sum of uncompressed entry sizes
    pub total_bytes: u64,
}

/// Pack every regular file under `source` into a `.docx` at `destination`.
///
/// Uses DEFLATE compression. The folder is not validated; see
/// [`pack_validated`] for the checked variant.
///
/// # Example
///
/// ```no_run
/// use docxpack::pack;
///
/// let summary = pack("unpacked", "out.docx")?;
/// println!("{} entries", summary.entries.len());
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn pack(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<PackSummary> {
    pack_with_options(source, destination, &PackOptions::default())
}

/// Validate `source` against the DOCX skeleton, then pack it.
///
/// Nothing is written when validation fails.
pub fn pack_validated(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &PackOptions,
) -> Result<PackSummary> {
    validate_structure(source.as_ref())?;
    pack_with_options(source, destination, options)
}

/// Pack `source` into `destination` with explicit options.
///
/// The archive is assembled in a temporary file beside `destination` and
/// renamed over it once complete, so a failed pack never disturbs an existing
/// file. Symbolic links are skipped. Siblings are visited in file name order.
pub fn pack_with_options(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &PackOptions,
) -> Result<PackSummary> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !source.is_dir() {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    }
    let root = fs::canonicalize(source).map_err(|e| Error::io(Step::Walk, source, e))?;

    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = destination.file_name().ok_or_else(|| {
        Error::io(
            Step::Replace,
            destination,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
        )
    })?;
    fs::create_dir_all(parent).map_err(|e| Error::io(Step::CreateDir, parent, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".docxpack-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(Step::WriteEntry, parent, e))?;

    // The output may live inside the source tree; never archive it.
    let canonical_parent =
        fs::canonicalize(parent).map_err(|e| Error::io(Step::Walk, parent, e))?;
    let skip = [
        canonical_parent.join(file_name),
        canonical_parent.join(temp.path().file_name().unwrap_or_default()),
    ];

    let temp_path = temp.path().to_path_buf();
    let mut writer = ZipWriter::new(temp.as_file_mut());
    let mut entries = Vec::new();
    let mut total_bytes = 0u64;

    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            Error::io(Step::Walk, path, e.into())
        })?;

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            tracing::debug!(path = %entry.path().display(), "skipping symbolic link");
            continue;
        }
        if !file_type.is_file() || skip.iter().any(|p| p == entry.path()) {
            continue;
        }

        let path = entry.path();
        let name = entry_name(&root, path);
        let len = entry
            .metadata()
            .map_err(|e| Error::io(Step::Walk, path, e.into()))?
            .len();
        let mut file = fs::File::open(path).map_err(|e| Error::io(Step::ReadEntry, path, e))?;

        let file_options = options
            .file_options()
            .large_file(len >= u64::from(u32::MAX));
        writer
            .start_file(name.as_str(), file_options)
            .map_err(|e| Error::zip(Step::WriteEntry, path, e))?;
        let written =
            copy_tagged(&mut file, &mut writer, Step::ReadEntry, Step::WriteEntry, path)?;

        tracing::debug!(entry = %name, bytes = written, "packed");
        total_bytes += written;
        entries.push(name);
    }

    let file = writer
        .finish()
        .map_err(|e| Error::zip(Step::Finalize, &temp_path, e))?;
    file.sync_all()
        .map_err(|e| Error::io(Step::Finalize, &temp_path, e))?;

    temp.persist(destination)
        .map_err(|e| Error::io(Step::Replace, destination, e.error))?;

    tracing::info!(
        destination = %destination.display(),
        entries = entries.len(),
        "DOCX created"
    );

    if let Some(hook) = &options.on_packed {
        if let Err(e) = hook(destination) {
            tracing::warn!(destination = %destination.display(), error = %e, "post-pack hook failed");
        }
    }

    Ok(PackSummary {
        destination: destination.to_path_buf(),
        entries,
        total_bytes,
    })
}

/// Archive name of `path` relative to `root`, always `/`-separated.
fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
