pub mod io;
pub mod carve;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::RawCarve;

pub use carve::{CarveError, CarveResult, ChannelLayout, ExtractionJob, ScanConfig, Scanner};
