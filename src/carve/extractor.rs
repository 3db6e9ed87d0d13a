//! Chunk extraction
//!
//! One extraction job slices the input, starting at a fixed offset, into
//! consecutive windows of `width * height * bpp` bytes. Each window is
//! packed into an image, flat images are dropped and the rest are saved as
//! PNG files in the output directory.

use std::io::{Read, SeekFrom};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info};

use crate::carve::errors::{CarveError, CarveResult};
use crate::carve::layout::ChannelLayout;
use crate::carve::packer::pack_channels;
use crate::io::seekable::SeekableReader;
use crate::utils::filter_utils;
use crate::utils::progress::ProgressTracker;

/// Parameters of one scan pass over the input
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Channel layout of the raw pixels
    pub layout: ChannelLayout,
    /// Absolute byte offset where the pass starts
    pub offset: u64,
    /// Number of usable bytes from `offset` onwards
    pub length: u64,
    /// Maximum number of chunks to process
    pub count_limit: Option<u64>,
}

impl ExtractionJob {
    /// Size of one chunk in bytes
    ///
    /// Fails with `InvalidArgument` when the geometry overflows a `u64`.
    pub fn chunk_size(&self) -> CarveResult<u64> {
        (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|pixels| pixels.checked_mul(self.layout.bytes_per_pixel() as u64))
            .ok_or_else(|| {
                CarveError::InvalidArgument(format!(
                    "{}x{} {} image is too large",
                    self.width, self.height, self.layout
                ))
            })
    }

    /// Number of chunks this pass reads
    ///
    /// Enough chunks to cover `length`, capped by the count limit. A zero
    /// chunk size makes the pass a no-op.
    pub fn image_count(&self) -> CarveResult<u64> {
        let size = self.chunk_size()?;
        if size == 0 {
            return Ok(0);
        }
        let needed = self.length.div_ceil(size);
        Ok(match self.count_limit {
            Some(limit) => needed.min(limit),
            None => needed,
        })
    }

    /// Output file name of the chunk at `index`
    ///
    /// The index suffix is omitted when the pass yields a single image.
    pub fn file_name(&self, index: u64) -> String {
        let stem = format!("{}-{}x{}", self.layout, self.width, self.height);
        if matches!(self.image_count(), Ok(count) if count > 1) {
            format!("{}-{}.png", stem, index)
        } else {
            format!("{}.png", stem)
        }
    }
}

impl std::fmt::Display for ExtractionJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}x{} @ {}", self.layout, self.width, self.height, self.offset)
    }
}

/// Outcome of one extraction job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Chunks the pass planned to read
    pub expected: u64,
    /// Images written to disk
    pub written: u64,
    /// Flat chunks that were skipped
    pub skipped: u64,
}

/// Runs extraction jobs against a single input stream
pub struct ChunkExtractor<'a, R: SeekableReader + ?Sized> {
    /// Input stream; its cursor is owned by the extractor for the job duration
    reader: &'a mut R,
    /// Directory receiving the PNG files
    output_dir: PathBuf,
    /// Whether to draw a progress bar
    show_progress: bool,
}

impl<'a, R: SeekableReader + ?Sized> ChunkExtractor<'a, R> {
    /// Create an extractor writing into `output_dir`
    pub fn new<P: AsRef<Path>>(reader: &'a mut R, output_dir: P, show_progress: bool) -> Self {
        ChunkExtractor {
            reader,
            output_dir: output_dir.as_ref().to_path_buf(),
            show_progress,
        }
    }

    /// Run one extraction job
    ///
    /// # Arguments
    /// * `job` - The pass to run
    ///
    /// # Returns
    /// A summary of the pass, or the first I/O or encoding error
    pub fn run(&mut self, job: &ExtractionJob) -> CarveResult<ExtractionSummary> {
        let count = job.image_count()?;
        let mut summary = ExtractionSummary {
            expected: count,
            ..Default::default()
        };

        info!(
            "Extracting {} {}-image{} ({}x{})...",
            count,
            job.layout,
            if count == 1 { "" } else { "s" },
            job.width,
            job.height
        );
        if count == 0 {
            return Ok(summary);
        }

        let chunk_size = job.chunk_size()?;
        let size = usize::try_from(chunk_size).map_err(|_| {
            CarveError::InvalidArgument(format!("chunk of {} bytes is too large", chunk_size))
        })?;

        self.reader.seek(SeekFrom::Start(job.offset))?;

        let progress = if self.show_progress {
            ProgressTracker::new(count, &format!("{} {}x{}", job.layout, job.width, job.height))
        } else {
            ProgressTracker::hidden(count)
        };

        let mut chunk = Vec::with_capacity(size);
        for index in 0..count {
            let read = self.read_chunk(&mut chunk, size)?;

            // zero padding must not make a flat tail look informative
            if filter_utils::is_uniform(&chunk[..read]) {
                debug!("Skipping flat chunk {} of {} ({} bytes read)", index, job, read);
                summary.skipped += 1;
                progress.increment(1);
                continue;
            }

            let image = pack_channels(&chunk, job.width, job.height, &job.layout)?;
            if filter_utils::is_degenerate(&image) {
                debug!("Skipping flat chunk {} of {}", index, job);
                summary.skipped += 1;
            } else {
                let path = self.output_dir.join(job.file_name(index));
                image.save_with_format(&path, ImageFormat::Png)?;
                debug!("Wrote {}", path.display());
                summary.written += 1;
            }

            progress.increment(1);
        }
        progress.finish();

        info!(
            "Saved {} of {} {} image(s), {} flat",
            summary.written, summary.expected, job.layout, summary.skipped
        );
        Ok(summary)
    }

    /// Read the next `size` bytes, zero-padding a short read at end of stream
    ///
    /// Returns the number of bytes actually read from the stream.
    fn read_chunk(&mut self, chunk: &mut Vec<u8>, size: usize) -> CarveResult<usize> {
        chunk.clear();
        let read = (&mut *self.reader).take(size as u64).read_to_end(chunk)?;
        if read < size {
            debug!("Short read of {} bytes, padding to {}", read, size);
            chunk.resize(size, 0);
        }
        Ok(read)
    }
}
