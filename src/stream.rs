//! Bounded-buffer copying between archive and filesystem.

use crate::error::{Error, Result, Step};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

const CHUNK: usize = 64 * 1024;

/// Copy `reader` into `writer` in fixed-size chunks, returning bytes copied.
///
/// Read failures are tagged `read_step`, write failures `write_step`, both
/// against `path`. Memory use does not depend on any size claimed by the
/// source.
pub(crate) fn copy_tagged<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    read_step: Step,
    write_step: Step,
    path: &Path,
) -> Result<u64> {
    let mut buf = vec![0u8; CHUNK];
    let mut copied = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(copied),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(read_step, path, e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::io(write_step, path, e))?;
        copied += n as u64;
    }
}
