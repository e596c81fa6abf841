//! Format checks and listing for ZIP containers.

use crate::error::{Error, Result, Step};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// End-of-central-directory signature, the first bytes of an empty archive.
const EMPTY_ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// One central-directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Entry name as stored in the archive
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Compressed size in bytes
    pub compressed_size: u64,
    /// Compression method (e.g. "Deflated", "Stored")
    pub compression: String,
    /// Whether the entry is a directory record
    pub is_dir: bool,
}

/// Check if data starts with ZIP magic bytes.
///
/// Accepts a local file header or, for an archive with no entries, the
/// end-of-central-directory record.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && (data[..4] == ZIP_MAGIC || data[..4] == EMPTY_ZIP_MAGIC)
}

fn not_an_archive(path: &Path, reason: impl Into<String>) -> Error {
    Error::NotAnArchive {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Open `path` as a ZIP archive, reading its central directory.
///
/// Any failure to parse is reported as [`Error::NotAnArchive`].
pub(crate) fn open_archive(path: &Path) -> Result<zip::ZipArchive<BufReader<File>>> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let mut file = File::open(path).map_err(|e| Error::io(Step::ReadEntry, path, e))?;

    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) if is_zip_file(&magic) => {}
        Ok(()) => return Err(not_an_archive(path, "missing ZIP signature")),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(not_an_archive(path, "file too short"))
        }
        Err(e) => return Err(Error::io(Step::ReadEntry, path, e)),
    }
    file.rewind()
        .map_err(|e| Error::io(Step::ReadEntry, path, e))?;

    zip::ZipArchive::new(BufReader::new(file)).map_err(|e| not_an_archive(path, e.to_string()))
}

/// Check whether `path` opens as a ZIP archive.
///
/// The `.docx` extension is not consulted.
pub fn is_zip_archive(path: impl AsRef<Path>) -> bool {
    open_archive(path.as_ref()).is_ok()
}

/// List the entries of a ZIP container in central-directory order.
///
/// # Example
///
/// ```no_run
/// use docxpack::list_entries;
///
/// for entry in list_entries("document.docx")? {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn list_entries(path: impl AsRef<Path>) -> Result<Vec<EntryInfo>> {
    let path = path.as_ref();
    let mut archive = open_archive(path)?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let file = archive
            .by_index_raw(index)
            .map_err(|e| Error::zip(Step::ReadEntry, path, e))?;
        entries.push(EntryInfo {
            name: file.name().to_string(),
            size: file.size(),
            compressed_size: file.compressed_size(),
            compression: format!("{:?}", file.compression()),
            is_dir: file.is_dir(),
        });
    }

    Ok(entries)
}
