//! # Histogram Module - Immutable Per-Character Statistics
//!
//! A [Histogram] is the frozen result of a typing lesson: one [Sample] per distinct
//! character, ordered by code point. It is built once, either from pre-computed
//! samples or from a stream of [Step]s, and never changes afterwards. When the
//! underlying data changes, a new histogram replaces the old one.
//!
//! ## Key Features
//!
//! - **Sorted iteration**: Samples always come out in ascending code point order
//! - **Keyed lookup**: `has`/`get` by code point, absent keys are a normal outcome
//! - **Validation**: `validate` decides whether the data is usable for adapting lessons
//!
//! ## Usage
//!
//! ```rust
//! use keyhist::{Histogram, Sample};
//!
//! let histogram = Histogram::new([
//!     Sample::new('c' as u32, 3, 0, 210).unwrap(),
//!     Sample::new('a' as u32, 5, 1, 180).unwrap(),
//!     Sample::new('b' as u32, 2, 0, 260).unwrap(),
//! ]);
//!
//! let order: Vec<u32> = histogram.iter().map(|sample| sample.code_point()).collect();
//! assert_eq!(order, vec!['a' as u32, 'b' as u32, 'c' as u32]);
//! assert!(histogram.has('a' as u32));
//! assert!(histogram.get('z' as u32).is_none());
//! assert!(histogram.validate());
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Values;

use crate::{Aggregator, BuildOptions, CodePoint, Configuration, Sample, Step};

static EMPTY: Histogram = Histogram {
    samples: BTreeMap::new(),
};

/// Immutable collection of samples keyed and ordered by code point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Sample>", into = "Vec<Sample>")
)]
pub struct Histogram {
    samples: BTreeMap<CodePoint, Sample>,
}

impl Histogram {
    /// Create a histogram from samples in any order
    ///
    /// Samples sharing a code point collapse into one: the sample appearing later
    /// in `samples` wins.
    pub fn new(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut map = BTreeMap::new();
        for sample in samples {
            map.insert(sample.code_point(), sample);
        }
        Self { samples: map }
    }

    /// The shared empty histogram
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Aggregate a histogram from a sequence of keystrokes
    ///
    /// Samples with implausible timing are dropped, see [Configuration].
    pub fn from_steps<'a>(
        steps: impl IntoIterator<Item = &'a Step>,
        options: BuildOptions,
    ) -> Self {
        let mut aggregator = Aggregator::from_options(options);
        for step in steps {
            aggregator.update(step);
        }
        aggregator.finalize()
    }

    /// Number of distinct characters in the histogram
    pub fn complexity(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn has(&self, code_point: CodePoint) -> bool {
        self.samples.contains_key(&code_point)
    }

    pub fn get(&self, code_point: CodePoint) -> Option<&Sample> {
        self.samples.get(&code_point)
    }

    /// Iterate samples in ascending code point order
    pub fn iter(&self) -> Values<'_, CodePoint, Sample> {
        self.samples.values()
    }

    /// Iterate the code points present in the histogram, ascending
    pub fn code_points(&self) -> impl Iterator<Item = CodePoint> + '_ {
        self.samples.keys().copied()
    }

    /// Whether the histogram is usable, using the default [Configuration]
    pub fn validate(&self) -> bool {
        self.validate_with(&Configuration::default())
    }

    /// Whether the histogram has enough characters and only plausible timings
    pub fn validate_with(&self, config: &Configuration) -> bool {
        self.complexity() >= config.min_complexity
            && self.iter().all(|sample| sample.is_plausible(config))
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = &'a Sample;
    type IntoIter = Values<'a, CodePoint, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Sample> for Histogram {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Sample>> for Histogram {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl From<Histogram> for Vec<Sample> {
    fn from(histogram: Histogram) -> Self {
        histogram.samples.into_values().collect()
    }
}
