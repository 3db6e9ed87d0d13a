//! Channel layout ("mode") parsing and validation
//!
//! A layout is an ordered list of per-byte channel tags describing how the
//! consecutive bytes of one pixel map onto colour channels. `X` marks a
//! padding byte that is read but discarded.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::carve::errors::{CarveError, CarveResult};

lazy_static! {
    static ref MODE_PATTERN: Regex = Regex::new("^[RGBAX]+$").unwrap();
}

/// A single channel tag within a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    R,
    /// Green
    G,
    /// Blue
    B,
    /// Alpha
    A,
    /// Padding byte, ignored on decode
    X,
}

impl Channel {
    /// Output order of the colour channels in a decoded image
    pub const CANONICAL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];

    /// Parse a single tag character (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Channel::R),
            'G' => Some(Channel::G),
            'B' => Some(Channel::B),
            'A' => Some(Channel::A),
            'X' => Some(Channel::X),
            _ => None,
        }
    }

    /// Tag character used when printing a layout
    pub fn as_char(&self) -> char {
        match self {
            Channel::R => 'R',
            Channel::G => 'G',
            Channel::B => 'B',
            Channel::A => 'A',
            Channel::X => 'X',
        }
    }
}

/// A validated channel layout
///
/// Invariant: R, G and B each occur exactly once, A at most once, X any
/// number of times. The decode plan is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    /// Channel tag of every byte in a pixel, in stream order
    channels: Vec<Channel>,
    /// Source byte index for each output channel, in R,G,B[,A] order
    plan: Vec<usize>,
}

impl ChannelLayout {
    /// Parse and validate a mode string such as `RGB`, `BGRA` or `bgrx`
    ///
    /// # Arguments
    /// * `mode` - The mode string; it is upper-cased before validation
    ///
    /// # Returns
    /// The validated layout, or `CarveError::InvalidMode` describing the problem
    pub fn parse(mode: &str) -> CarveResult<Self> {
        let upper = mode.trim().to_ascii_uppercase();

        if !MODE_PATTERN.is_match(&upper) {
            return Err(CarveError::InvalidMode(format!(
                "'{}': mode can only use R, G, B and A plus optionally X for padding",
                mode
            )));
        }

        let channels: Vec<Channel> = upper.chars().filter_map(Channel::from_char).collect();
        let count = |tag: Channel| channels.iter().filter(|&&c| c == tag).count();

        for tag in [Channel::R, Channel::G, Channel::B] {
            if count(tag) != 1 {
                return Err(CarveError::InvalidMode(format!(
                    "'{}': {} appears {} times, mode must contain R, G and B exactly once",
                    mode, tag.as_char(), count(tag)
                )));
            }
        }
        if count(Channel::A) > 1 {
            return Err(CarveError::InvalidMode(format!(
                "'{}': A appears {} times, mode may contain A at most once",
                mode, count(Channel::A)
            )));
        }

        let plan = Channel::CANONICAL
            .iter()
            .filter_map(|&tag| channels.iter().position(|&c| c == tag))
            .collect();

        Ok(ChannelLayout { channels, plan })
    }

    /// Number of bytes a single pixel occupies in the input stream
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels.len()
    }

    /// Whether the decoded image carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.channels.contains(&Channel::A)
    }

    /// Number of channels in the decoded image (3 or 4)
    pub fn output_channels(&self) -> usize {
        self.plan.len()
    }

    /// Byte position of a channel within a pixel, if the layout has it
    pub fn source_index(&self, channel: Channel) -> Option<usize> {
        self.channels.iter().position(|&c| c == channel)
    }

    /// Source byte positions in canonical R,G,B[,A] output order
    pub fn plan(&self) -> &[usize] {
        &self.plan
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in &self.channels {
            write!(f, "{}", channel.as_char())?;
        }
        Ok(())
    }
}
