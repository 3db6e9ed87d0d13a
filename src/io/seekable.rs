//! Seekable reader trait and implementations
//!
//! The scanner repositions its read cursor with an absolute seek before
//! every pass, so every input must support both reading and seeking.

use std::io::{Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Total length of a seekable stream in bytes
///
/// The cursor is left at the end of the stream; callers seek explicitly
/// before reading.
pub fn stream_length<R: Seek + ?Sized>(reader: &mut R) -> std::io::Result<u64> {
    reader.seek(SeekFrom::End(0))
}
