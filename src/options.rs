//! Packing options configuration.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// DEFLATE, the usual choice for Word documents
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl From<Compression> for zip::CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Callback invoked with the destination path after a successful pack.
pub type PackedHook = Arc<dyn Fn(&Path) -> io::Result<()> + Send + Sync>;

/// Options for packing a folder.
#[derive(Clone, Default)]
pub struct PackOptions {
    /// Entry compression method
    pub compression: Compression,

    /// Deflate level (0-9), `None` for the library default
    pub level: Option<i64>,

    /// Runs after the archive is in place; failures are logged, not returned
    pub on_packed: Option<PackedHook>,
}

impl PackOptions {
    /// Create default options (deflate, default level, no hook).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the deflate level, clamped to 0-9.
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level.clamp(0, 9));
        self
    }

    /// Install a hook called with the destination path after success.
    ///
    /// Typical use is opening the document with the host's default handler.
    pub fn with_on_packed<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path) -> io::Result<()> + Send + Sync + 'static,
    {
        self.on_packed = Some(Arc::new(hook));
        self
    }

    pub(crate) fn file_options(&self) -> zip::write::SimpleFileOptions {
        let level = match self.compression {
            Compression::Deflated => self.level,
            Compression::Stored => None,
        };
        zip::write::SimpleFileOptions::default()
            .compression_method(self.compression.into())
            .compression_level(level)
    }
}

impl fmt::Debug for PackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackOptions")
            .field("compression", &self.compression)
            .field("level", &self.level)
            .field("on_packed", &self.on_packed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PackOptions::new();
        assert_eq!(opts.compression, Compression::Deflated);
        assert!(opts.level.is_none());
        assert!(opts.on_packed.is_none());
    }

    #[test]
    fn test_builder() {
        let opts = PackOptions::new()
            .with_compression(Compression::Stored)
            .with_level(42)
            .with_on_packed(|_| Ok(()));
        assert_eq!(opts.compression, Compression::Stored);
        assert_eq!(opts.level, Some(9));
        assert!(opts.on_packed.is_some());
        assert!(format!("{:?}", opts).contains("on_packed: true"));
    }

    #[test]
    fn test_compression_method_mapping() {
        assert_eq!(
            zip::CompressionMethod::from(Compression::Deflated),
            zip::CompressionMethod::Deflated
        );
        assert_eq!(
            zip::CompressionMethod::from(Compression::Stored),
            zip::CompressionMethod::Stored
        );
    }
}
