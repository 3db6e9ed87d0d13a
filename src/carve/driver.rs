//! Scan driver
//!
//! Runs one extraction job for every (width, layout) combination of the
//! geometry plan, restarting at the configured offset each time.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::carve::errors::{CarveError, CarveResult};
use crate::carve::extractor::{ChunkExtractor, ExtractionJob, ExtractionSummary};
use crate::carve::geometry::{GeometryPlan, Presets};
use crate::carve::layout::ChannelLayout;
use crate::io::seekable::{stream_length, SeekableReader};

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// User-facing scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Fixed width, or `None` to try the preset widths
    pub width: Option<u32>,
    /// Fixed height, or `None` to cover the remaining input
    pub height: Option<u32>,
    /// Fixed mode string, or `None` to try the preset modes
    pub mode: Option<String>,
    /// Directory receiving the PNG files, created if missing
    pub output_dir: PathBuf,
    /// Maximum images per combination
    pub count: Option<u64>,
    /// Byte offset where scanning starts
    pub offset: u64,
    /// Preset width and mode lists
    pub presets: Presets,
    /// Whether to draw progress bars
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            width: None,
            height: None,
            mode: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            count: None,
            offset: 0,
            presets: Presets::default(),
            show_progress: true,
        }
    }
}

/// Result of one (width, layout) combination
#[derive(Debug, Clone)]
pub struct CombinationReport {
    /// The job that was run
    pub job: ExtractionJob,
    /// What it produced
    pub summary: ExtractionSummary,
}

/// Validated scanner ready to run against an input stream
#[derive(Debug)]
pub struct Scanner {
    plan: GeometryPlan,
    output_dir: PathBuf,
    count: Option<u64>,
    offset: u64,
    show_progress: bool,
}

impl Scanner {
    /// Validate the configuration
    ///
    /// Mode validation happens here so an invalid mode aborts before any
    /// input is read or output is created.
    pub fn new(config: ScanConfig) -> CarveResult<Self> {
        let layout = config.mode.as_deref().map(ChannelLayout::parse).transpose()?;

        if config.width == Some(0) {
            warn!("Width is 0, no images will be extracted");
        }
        if config.height == Some(0) {
            warn!("Height is 0, no images will be extracted");
        }

        let plan = GeometryPlan::new(&config.presets, config.width, config.height, layout);

        Ok(Scanner {
            plan,
            output_dir: config.output_dir,
            count: config.count,
            offset: config.offset,
            show_progress: config.show_progress,
        })
    }

    /// The geometry plan this scanner iterates
    pub fn plan(&self) -> &GeometryPlan {
        &self.plan
    }

    /// Scan the input stream
    ///
    /// # Arguments
    /// * `reader` - The input; its cursor is repositioned for every combination
    ///
    /// # Returns
    /// One report per (width, layout) combination, or the first I/O error
    pub fn scan<R: SeekableReader + ?Sized>(&self, reader: &mut R) -> CarveResult<Vec<CombinationReport>> {
        let total = stream_length(reader)?;
        let remaining = total.saturating_sub(self.offset);
        if self.offset > total {
            warn!("Offset {} is past the end of the input ({} bytes)", self.offset, total);
        }
        info!("Scanning {} bytes starting at offset {}", remaining, self.offset);

        fs::create_dir_all(&self.output_dir)?;

        let mut extractor = ChunkExtractor::new(reader, &self.output_dir, self.show_progress);
        let mut reports = Vec::new();

        for (width, layout) in self.plan.combinations() {
            let height = self.plan.height_for(remaining, width, layout);
            let height = u32::try_from(height).map_err(|_| {
                CarveError::InvalidArgument(format!(
                    "computed height {} for width {} does not fit an image",
                    height, width
                ))
            })?;

            let job = ExtractionJob {
                width,
                height,
                layout: layout.clone(),
                offset: self.offset,
                length: remaining,
                count_limit: self.count,
            };

            let summary = extractor.run(&job)?;
            reports.push(CombinationReport { job, summary });
        }

        let written: u64 = reports.iter().map(|r| r.summary.written).sum();
        info!("Done: {} image(s) written to {}", written, self.output_dir.display());
        Ok(reports)
    }
}
