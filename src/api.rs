use std::io::Cursor;
use image::DynamicImage;
use log::info;
use crate::carve::driver::{CombinationReport, ScanConfig, Scanner};
use crate::carve::errors::CarveResult;
use crate::carve::layout::ChannelLayout;
use crate::carve::packer::pack_channels;
use crate::io::input::open_input;
use crate::utils::filter_utils;

/// Main interface to the RawCarve library
pub struct RawCarve {
    config: ScanConfig,
}

impl RawCarve {
    /// Create a new RawCarve instance
    ///
    /// # Arguments
    /// * `config` - Scan configuration applied to every call
    pub fn new(config: ScanConfig) -> Self {
        RawCarve { config }
    }

    /// Scan a file (or `-` for standard input) and write the images found
    ///
    /// # Arguments
    /// * `input_path` - Path to the raw input
    ///
    /// # Returns
    /// One report per (width, mode) combination, or an error
    pub fn scan_file(&self, input_path: &str) -> CarveResult<Vec<CombinationReport>> {
        let scanner = Scanner::new(self.config.clone())?;
        let mut reader = open_input(input_path)?;
        scanner.scan(&mut reader)
    }

    /// Scan an in-memory buffer and write the images found
    pub fn scan_bytes(&self, data: &[u8]) -> CarveResult<Vec<CombinationReport>> {
        let scanner = Scanner::new(self.config.clone())?;
        info!("Scanning in-memory buffer of {} bytes", data.len());
        let mut reader = Cursor::new(data);
        scanner.scan(&mut reader)
    }

    /// Decode a single chunk without writing anything
    ///
    /// # Arguments
    /// * `data` - Raw chunk bytes, zero-padded if short
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `mode` - Channel layout string, e.g. "BGRA"
    ///
    /// # Returns
    /// The decoded image, `None` if it is a single flat colour, or an error
    /// if the mode is invalid
    pub fn decode(data: &[u8], width: u32, height: u32, mode: &str) -> CarveResult<Option<DynamicImage>> {
        let layout = ChannelLayout::parse(mode)?;
        let image = pack_channels(data, width, height, &layout)?;
        if filter_utils::is_degenerate(&image) {
            Ok(None)
        } else {
            Ok(Some(image))
        }
    }
}
