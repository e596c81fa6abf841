//! Error types for the docxpack library.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docxpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The stage of a pack or unpack operation at which an I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Traversing the source folder.
    Walk,
    /// Reading a source file or the input archive.
    ReadEntry,
    /// Writing an entry into the archive or onto disk.
    WriteEntry,
    /// Decompressing an archive entry.
    Decompress,
    /// Creating a destination directory.
    CreateDir,
    /// Finishing the archive (central directory, flush).
    Finalize,
    /// Moving the finished archive over the destination.
    Replace,
}

impl Step {
    /// Short name of the step as shown in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Walk => "walk",
            Step::ReadEntry => "read-entry",
            Step::WriteEntry => "write-entry",
            Step::Decompress => "decompress",
            Step::CreateDir => "create-dir",
            Step::Finalize => "finalize",
            Step::Replace => "replace",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while validating, packing or unpacking.
#[derive(Error, Debug)]
pub enum Error {
    /// The folder lacks one of the DOCX skeleton members.
    #[error("Folder is missing required Word XML part: {missing_member}")]
    ValidationFailed {
        /// The first missing member, as listed in [`crate::REQUIRED_MEMBERS`].
        missing_member: &'static str,
    },

    /// The source folder or file does not exist.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The input could not be read as a ZIP archive.
    #[error("Not a ZIP archive: {} ({reason})", path.display())]
    NotAnArchive {
        /// The offending file.
        path: PathBuf,
        /// Why the ZIP reader rejected it.
        reason: String,
    },

    /// An archive entry would be written outside the destination folder.
    #[error("Unsafe entry path in archive: {entry}")]
    UnsafeEntryPath {
        /// The raw entry name as stored in the archive.
        entry: String,
    },

    /// The archive is encrypted and cannot be processed.
    #[error("Archive is encrypted")]
    Encrypted,

    /// I/O failure during one step of an operation.
    #[error("I/O error during {step} at {}: {source}", path.display())]
    Io {
        /// Which step failed.
        step: Step,
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Build an [`Error::Io`] for the given step and path.
    pub fn io(step: Step, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            step,
            path: path.into(),
            source,
        }
    }

    /// Build an [`Error::Io`] from a ZIP error raised while writing or reading.
    ///
    /// Password errors become [`Error::Encrypted`].
    pub(crate) fn zip(step: Step, path: impl Into<PathBuf>, err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(source) => Error::io(step, path, source),
            zip::result::ZipError::UnsupportedArchive(msg)
                if msg == zip::result::ZipError::PASSWORD_REQUIRED =>
            {
                Error::Encrypted
            }
            other => Error::io(step, path, io::Error::other(other)),
        }
    }

    /// The failing step, for I/O errors.
    pub fn step(&self) -> Option<Step> {
        match self {
            Error::Io { step, .. } => Some(*step),
            _ => None,
        }
    }
}
