//! spritemask-io - Image I/O
//!
//! PNG decode and encode of [`Pix`] images. The pipeline itself never
//! touches files; this crate is the boundary where sprites come in and
//! masks go out.

mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use png::{read_png, write_png};

use log::debug;
use spritemask_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a PNG image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened and
/// [`IoError::DecodeError`] if it is not a valid PNG.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    debug!("reading {}", path.display());
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write an image as PNG to a file path.
///
/// The file is created or truncated.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    debug!("writing {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    write_png(pix, &mut writer)?;
    writer.flush()?;
    Ok(())
}
