use std::fs;
use std::path::Path;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Packs 0xRRGGBB colours as consecutive RGB pixels
pub fn rgb_stream(colors: &[u32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for &color in colors {
        buffer.write_u24::<BigEndian>(color).unwrap();
    }
    buffer
}

/// Packs 0xRRGGBB colours as consecutive BGRX pixels (padding byte zero)
pub fn bgrx_stream(colors: &[u32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for &color in colors {
        buffer.write_u32::<LittleEndian>(color).unwrap(); // BB GG RR 00
    }
    buffer
}

/// Sorted names of the files in a directory
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
