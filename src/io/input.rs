//! Input stream opening
//!
//! Files are read through a buffered reader. Standard input cannot seek, so
//! it is slurped into memory and wrapped in a cursor.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};

use log::{debug, info};

use crate::carve::errors::{CarveError, CarveResult};
use crate::io::seekable::SeekableReader;

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

/// Open the raw input stream
///
/// # Arguments
/// * `path` - Input file path, or `-` for standard input
///
/// # Returns
/// A boxed seekable reader, or an `InvalidArgument` error if the path cannot be opened
pub fn open_input(path: &str) -> CarveResult<Box<dyn SeekableReader>> {
    if path == STDIN_PATH {
        info!("Reading input from standard input");
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        debug!("Read {} bytes from standard input", data.len());
        return Ok(Box::new(Cursor::new(data)));
    }

    info!("Opening input file {}", path);
    let file = File::open(path)
        .map_err(|e| CarveError::InvalidArgument(format!("cannot open input '{}': {}", path, e)))?;
    Ok(Box::new(BufReader::with_capacity(1024 * 1024, file))) // 1MB buffer
}
