use thiserror::Error;

use crate::{CodePoint, Configuration, Millis, Plausibility};

/// Errors constructing a [Sample]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("Sample for code point {code_point} has {miss_count} misses but only {hit_count} hits")]
    MissesExceedHits {
        code_point: CodePoint,
        hit_count: u32,
        miss_count: u32,
    },
}

/// One character's aggregated typing outcome
///
/// Samples are built through [Sample::new], which guarantees `miss_count <= hit_count`.
///
/// ```compile_fail
/// let sample = keyhist::Sample {
///     code_point: 65,
///     hit_count: 1,
///     miss_count: 2,
///     time_to_type: 100,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SampleFields")
)]
pub struct Sample {
    /// The character this sample describes
    code_point: CodePoint,
    /// How many times the character was typed, correctly or not
    hit_count: u32,
    /// How many of those keystrokes were typos
    miss_count: u32,
    /// Average milliseconds to type the character. Zero means no timing data.
    time_to_type: Millis,
}

impl Sample {
    /// Create a sample, rejecting more misses than hits
    pub const fn new(
        code_point: CodePoint,
        hit_count: u32,
        miss_count: u32,
        time_to_type: Millis,
    ) -> Result<Self, SampleError> {
        if miss_count > hit_count {
            return Err(SampleError::MissesExceedHits {
                code_point,
                hit_count,
                miss_count,
            });
        }

        Ok(Self {
            code_point,
            hit_count,
            miss_count,
            time_to_type,
        })
    }

    /// Create a sample from counts the caller already knows to be consistent
    pub(crate) const fn from_counts(
        code_point: CodePoint,
        hit_count: u32,
        miss_count: u32,
        time_to_type: Millis,
    ) -> Self {
        debug_assert!(miss_count <= hit_count);
        Self {
            code_point,
            hit_count,
            miss_count,
            time_to_type,
        }
    }

    /// The character this sample describes
    pub const fn code_point(&self) -> CodePoint {
        self.code_point
    }

    /// How many times the character was typed, correctly or not
    pub const fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// How many of those keystrokes were typos
    pub const fn miss_count(&self) -> u32 {
        self.miss_count
    }

    /// Average milliseconds to type the character. Zero means no timing data.
    pub const fn time_to_type(&self) -> Millis {
        self.time_to_type
    }

    /// The character as a `char`, if the code point is a unicode scalar value
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.code_point)
    }

    /// How many keystrokes for this character were correct
    pub const fn correct_count(&self) -> u32 {
        self.hit_count.saturating_sub(self.miss_count)
    }

    /// Classify this sample's timing
    pub const fn plausibility(&self, config: &Configuration) -> Plausibility {
        config.classify(self.time_to_type)
    }

    /// Whether this sample's timing is accepted by `config`
    pub const fn is_plausible(&self, config: &Configuration) -> bool {
        config.accepts(self.time_to_type)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SampleFields {
    code_point: CodePoint,
    hit_count: u32,
    miss_count: u32,
    time_to_type: Millis,
}

#[cfg(feature = "serde")]
impl TryFrom<SampleFields> for Sample {
    type Error = SampleError;

    fn try_from(fields: SampleFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.code_point,
            fields.hit_count,
            fields.miss_count,
            fields.time_to_type,
        )
    }
}
