use crate::{CodePoint, Millis};

/// A single keystroke event with timing and correctness information
///
/// Steps are produced by whatever captures the learner's input, in the order the
/// keystrokes happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// The character that was expected at this position
    pub code_point: CodePoint,
    /// When the keystroke happened, in milliseconds on a monotonic clock
    pub timestamp: Millis,
    /// Whether the keystroke was incorrect
    #[cfg_attr(feature = "serde", serde(default))]
    pub typo: bool,
}

impl Step {
    pub const fn new(code_point: CodePoint, timestamp: Millis, typo: bool) -> Self {
        Self {
            code_point,
            timestamp,
            typo,
        }
    }

    /// The synthetic step anchoring the first real keystroke of a lesson
    pub(crate) const fn sentinel(started_at: Millis) -> Self {
        Self::new(0, started_at, false)
    }

    /// Milliseconds elapsed since `previous`
    ///
    /// Saturates at zero if the clock went backwards.
    pub const fn elapsed_since(&self, previous: &Self) -> Millis {
        self.timestamp.saturating_sub(previous.timestamp)
    }
}
