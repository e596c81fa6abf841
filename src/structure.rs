//! Structural validation of an unpacked DOCX folder.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// The parts a folder must contain to be treated as an unpacked Word document.
///
/// Members are `/`-separated and checked in this order.
pub const REQUIRED_MEMBERS: [&str; 3] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "word/document.xml",
];

/// Join a `/`-separated member onto `folder` component by component.
fn member_path(folder: &Path, member: &str) -> PathBuf {
    member
        .split('/')
        .fold(folder.to_path_buf(), |path, part| path.join(part))
}

/// Return the first required member missing from `folder`.
///
/// A folder that does not exist reports the first member as missing.
pub fn missing_member(folder: impl AsRef<Path>) -> Option<&'static str> {
    let folder = folder.as_ref();
    for member in REQUIRED_MEMBERS {
        if !member_path(folder, member).exists() {
            tracing::debug!(folder = %folder.display(), member, "missing DOCX skeleton member");
            return Some(member);
        }
    }
    None
}

/// Check whether `folder` contains the minimal DOCX skeleton.
///
/// Only presence is checked; a zero-byte `word/document.xml` passes.
///
/// # Example
///
/// ```no_run
/// use docxpack::is_valid_structure;
///
/// if is_valid_structure("unpacked") {
///     println!("ready to pack");
/// }
/// ```
pub fn is_valid_structure(folder: impl AsRef<Path>) -> bool {
    missing_member(folder).is_none()
}

/// Validate `folder`, returning a typed reason on failure.
///
/// Unlike [`is_valid_structure`], a folder that does not exist is reported as
/// [`Error::SourceNotFound`].
pub fn validate_structure(folder: impl AsRef<Path>) -> Result<()> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(Error::SourceNotFound(folder.to_path_buf()));
    }
    match missing_member(folder) {
        Some(missing_member) => Err(Error::ValidationFailed { missing_member }),
        None => Ok(()),
    }
}
