//! # docxpack
//!
//! Pack a folder of Office Open XML parts into a `.docx` container, and
//! unpack a `.docx` back into its XML tree.
//!
//! The library is a stateless core: every operation takes a source path and
//! a destination path and returns a typed result. Front ends (the bundled
//! CLI, a GUI, a script) own all interactive state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxpack::{is_valid_structure, pack, unpack};
//!
//! // Unpack, edit the XML by hand, then pack again
//! unpack("report.docx", "report")?;
//!
//! if is_valid_structure("report") {
//!     let summary = pack("report", "report-edited.docx")?;
//!     println!("Packed {} parts", summary.entries.len());
//! }
//! # Ok::<(), docxpack::Error>(())
//! ```
//!
//! ## Options
//!
//! ```no_run
//! use docxpack::{pack_validated, Compression, PackOptions};
//!
//! let options = PackOptions::new()
//!     .with_compression(Compression::Deflated)
//!     .with_level(9)
//!     .with_on_packed(|path| {
//!         println!("written {}", path.display());
//!         Ok(())
//!     });
//!
//! pack_validated("report", "report.docx", &options)?;
//! # Ok::<(), docxpack::Error>(())
//! ```

pub mod detect;
pub mod error;
pub mod options;
pub mod pack;
mod stream;
pub mod structure;
pub mod unpack;

// Re-exports
pub use detect::{is_zip_archive, is_zip_file, list_entries, EntryInfo};
pub use error::{Error, Result, Step};
pub use options::{Compression, PackOptions, PackedHook};
pub use pack::{pack, pack_validated, pack_with_options, PackSummary};
pub use structure::{is_valid_structure, missing_member, validate_structure, REQUIRED_MEMBERS};
pub use unpack::{sanitize_entry_name, unpack, UnpackSummary};
