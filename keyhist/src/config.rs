//! # Configuration Module - Validation Thresholds
//!
//! This module holds the thresholds deciding whether aggregated timing data is
//! plausible human typing, and whether a histogram has enough characters to say
//! anything about the learner.
//!
//! ## Usage
//!
//! ```rust
//! use keyhist::config::{Configuration, Plausibility};
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.classify(39), Plausibility::TooFast);
//! assert_eq!(config.classify(0), Plausibility::Unknown);
//!
//! // Custom configuration
//! let config = Configuration {
//!     min_time_to_type: 20,
//!     ..Configuration::default()
//! };
//! assert_eq!(config.classify(39), Plausibility::Plausible);
//! ```
//!
//! ## Default Band
//!
//! The default band spans `40..=12000` milliseconds per character, which at five
//! characters per word is 300 WPM down to 1 WPM.

use crate::{AVERAGE_WORD_LENGTH, Millis};

const MILLIS_PER_MINUTE: Millis = 60_000;

/// Fastest plausible time-to-type (300 WPM)
pub const MIN_TIME_TO_TYPE: Millis = MILLIS_PER_MINUTE / (300 * AVERAGE_WORD_LENGTH);

/// Slowest plausible time-to-type (1 WPM)
pub const MAX_TIME_TO_TYPE: Millis = MILLIS_PER_MINUTE / AVERAGE_WORD_LENGTH;

/// Fewest distinct characters a histogram needs to be usable
pub const MIN_COMPLEXITY: usize = 3;

/// Runtime configuration for histogram validation
///
/// Controls which per-character timings are treated as measurement noise and how
/// many distinct characters a histogram must contain to pass validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Lowest accepted non-zero time-to-type in milliseconds (inclusive)
    ///
    /// **Default**: 40 (300 WPM)
    pub min_time_to_type: Millis,

    /// Highest accepted time-to-type in milliseconds (inclusive)
    ///
    /// **Default**: 12000 (1 WPM)
    pub max_time_to_type: Millis,

    /// Minimum number of distinct characters for a histogram to validate
    ///
    /// **Default**: 3
    pub min_complexity: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_time_to_type: MIN_TIME_TO_TYPE,
            max_time_to_type: MAX_TIME_TO_TYPE,
            min_complexity: MIN_COMPLEXITY,
        }
    }
}

/// Verdict on a single time-to-type value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plausibility {
    /// No timing data was collected (time-to-type is zero)
    Unknown,
    /// Within the plausible band
    Plausible,
    /// Faster than any human types
    TooFast,
    /// Slow enough to be a pause rather than typing
    TooSlow,
}

impl Plausibility {
    /// Whether a sample with this verdict is kept
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Unknown | Self::Plausible)
    }
}

impl Configuration {
    /// Classify a time-to-type value against the plausible band
    pub const fn classify(&self, time_to_type: Millis) -> Plausibility {
        if time_to_type == 0 {
            Plausibility::Unknown
        } else if time_to_type < self.min_time_to_type {
            Plausibility::TooFast
        } else if time_to_type > self.max_time_to_type {
            Plausibility::TooSlow
        } else {
            Plausibility::Plausible
        }
    }

    /// Whether a time-to-type value is accepted
    pub const fn accepts(&self, time_to_type: Millis) -> bool {
        self.classify(time_to_type).is_accepted()
    }
}
