//! Candidate geometry enumeration
//!
//! Resolves user overrides and preset lists into the widths and channel
//! layouts to try, and computes the automatic height for a pass.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::carve::errors::{CarveError, CarveResult};
use crate::carve::layout::ChannelLayout;

/// Common display widths tried when no width is given
pub const COMMON_WIDTHS: [u32; 9] = [800, 1024, 1152, 1280, 1366, 1440, 1600, 1920, 2048];

/// Common channel layouts tried when no mode is given
pub const COMMON_MODES: [&str; 3] = ["RGB", "RGBA", "BGRX"];

/// Preset width and mode lists
#[derive(Debug, Clone, PartialEq)]
pub struct Presets {
    /// Widths tried when the user does not fix one
    pub widths: Vec<u32>,
    /// Layouts tried when the user does not fix one
    pub modes: Vec<ChannelLayout>,
}

impl Default for Presets {
    fn default() -> Self {
        Presets {
            widths: COMMON_WIDTHS.to_vec(),
            modes: COMMON_MODES
                .iter()
                .filter_map(|mode| ChannelLayout::parse(mode).ok())
                .collect(),
        }
    }
}

impl Presets {
    /// Load presets from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to a TOML file with optional `widths` and `modes` arrays
    ///
    /// # Returns
    /// The presets, or an error if the file cannot be read or is malformed
    pub fn load<P: AsRef<Path>>(path: P) -> CarveResult<Self> {
        let path = path.as_ref();
        info!("Loading presets from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            CarveError::InvalidPresets(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse presets from TOML text
    ///
    /// Keys that are absent keep their default list. An empty list is an error
    /// since it would make every scan a no-op.
    pub fn from_toml_str(text: &str) -> CarveResult<Self> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| CarveError::InvalidPresets(e.to_string()))?;

        let mut presets = Presets::default();

        if let Some(value) = table.get("widths") {
            let items = value.as_array().ok_or_else(|| {
                CarveError::InvalidPresets("'widths' must be an array of integers".to_string())
            })?;
            presets.widths = items
                .iter()
                .map(|item| {
                    item.as_integer()
                        .and_then(|w| u32::try_from(w).ok())
                        .filter(|&w| w > 0)
                        .ok_or_else(|| {
                            CarveError::InvalidPresets(format!("invalid width: {}", item))
                        })
                })
                .collect::<CarveResult<Vec<u32>>>()?;
        }

        if let Some(value) = table.get("modes") {
            let items = value.as_array().ok_or_else(|| {
                CarveError::InvalidPresets("'modes' must be an array of strings".to_string())
            })?;
            presets.modes = items
                .iter()
                .map(|item| {
                    let mode = item.as_str().ok_or_else(|| {
                        CarveError::InvalidPresets(format!("invalid mode: {}", item))
                    })?;
                    ChannelLayout::parse(mode)
                })
                .collect::<CarveResult<Vec<ChannelLayout>>>()?;
        }

        if presets.widths.is_empty() || presets.modes.is_empty() {
            return Err(CarveError::InvalidPresets(
                "preset widths and modes must not be empty".to_string(),
            ));
        }

        debug!("Presets: {} widths, {} modes", presets.widths.len(), presets.modes.len());
        Ok(presets)
    }
}

/// The widths and layouts a scan iterates over
#[derive(Debug, Clone)]
pub struct GeometryPlan {
    /// Widths to try, in order, without duplicates
    pub widths: Vec<u32>,
    /// Layouts to try, in order, without duplicates
    pub layouts: Vec<ChannelLayout>,
    /// Fixed height, or `None` to compute it per pass
    pub height: Option<u32>,
}

impl GeometryPlan {
    /// Resolve user overrides against the presets
    ///
    /// # Arguments
    /// * `presets` - Preset lists used for unset values
    /// * `width` - User-fixed width, if any
    /// * `height` - User-fixed height, if any
    /// * `layout` - User-fixed layout, if any (already validated)
    pub fn new(
        presets: &Presets,
        width: Option<u32>,
        height: Option<u32>,
        layout: Option<ChannelLayout>,
    ) -> Self {
        let widths = match width {
            Some(w) => vec![w],
            None => dedup(presets.widths.clone()),
        };
        let layouts = match layout {
            Some(l) => vec![l],
            None => dedup(presets.modes.clone()),
        };

        GeometryPlan { widths, layouts, height }
    }

    /// Iterate over every (width, layout) pair, widths outermost
    pub fn combinations(&self) -> impl Iterator<Item = (u32, &ChannelLayout)> + '_ {
        self.widths
            .iter()
            .flat_map(move |&w| self.layouts.iter().map(move |l| (w, l)))
    }

    /// Height for one pass: the fixed height, or the smallest one covering `remaining`
    pub fn height_for(&self, remaining: u64, width: u32, layout: &ChannelLayout) -> u64 {
        match self.height {
            Some(h) => h as u64,
            None => auto_height(remaining, width, layout.bytes_per_pixel()),
        }
    }
}

/// Smallest height whose image holds all `remaining` bytes at this width
///
/// Returns 0 when there is nothing to cover or the row size is zero.
pub fn auto_height(remaining: u64, width: u32, bytes_per_pixel: usize) -> u64 {
    let row = width as u64 * bytes_per_pixel as u64;
    if row == 0 || remaining == 0 {
        return 0;
    }
    remaining.div_ceil(row)
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
