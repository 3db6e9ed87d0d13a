//! Raw image carving pipeline
//!
//! Guesses image geometries, slices the input into candidate chunks,
//! reorders channels into RGB(A) and writes the non-flat results as PNG.

pub mod errors;
pub mod layout;
pub mod geometry;
pub mod packer;
pub mod extractor;
pub mod driver;
#[cfg(test)]
mod tests;

pub use errors::{CarveError, CarveResult};
pub use layout::{Channel, ChannelLayout};
pub use geometry::{auto_height, GeometryPlan, Presets, COMMON_MODES, COMMON_WIDTHS};
pub use packer::pack_channels;
pub use extractor::{ChunkExtractor, ExtractionJob, ExtractionSummary};
pub use driver::{CombinationReport, ScanConfig, Scanner, DEFAULT_OUTPUT_DIR};
