//! # keyhist - Per-character keystroke statistics
//!
//! A library for turning the keystrokes of a typing lesson into a per-character
//! histogram: how often each character was typed, how often it was mistyped, and
//! how long it took on average.
//!
//! ## Pipeline
//!
#![doc = simple_mermaid::mermaid!("../diagrams/histogram_pipeline.mmd")]
//!
//! ## Usage
//!
//! ```rust
//! use keyhist::{BuildOptions, Histogram, Step};
//!
//! let steps = [
//!     Step::new('a' as u32, 250, false),
//!     Step::new('b' as u32, 500, false),
//!     Step::new('c' as u32, 700, true),
//!     Step::new('c' as u32, 900, false),
//! ];
//!
//! let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));
//!
//! assert_eq!(histogram.complexity(), 3);
//! assert_eq!(histogram.get('a' as u32).unwrap().time_to_type(), 250);
//! assert!(histogram.validate());
//! ```

pub mod aggregator;
pub mod config;
pub mod digest;
pub mod histogram;
pub mod recorder;
pub mod sample;
pub mod step;

pub use aggregator::{Aggregator, BuildOptions};
pub use config::{Configuration, Plausibility};
pub use digest::{Bigrams, KeyCounts, LessonDigest};
pub use histogram::Histogram;
pub use recorder::StepRecorder;
pub use sample::{Sample, SampleError};
pub use step::Step;

/// Average characters per word, used to translate between WPM and per-character timing
pub const AVERAGE_WORD_LENGTH: u64 = 5;

// Types for more general type-safety

/// Identifies a single character, usually its unicode scalar value
pub type CodePoint = u32;

/// Milliseconds on a monotonic clock
pub type Millis = u64;
