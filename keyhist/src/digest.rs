//! # Digest Module - Summary of a Finished Lesson
//!
//! Key-selection logic wants more than the histogram itself: how often each key was
//! hit and missed, and which keys tend to follow each other. A [LessonDigest] is
//! computed once from the lesson's histogram and its raw steps.
//!
//! ```rust
//! use keyhist::{BuildOptions, Histogram, LessonDigest, Step};
//!
//! let steps = [
//!     Step::new('t' as u32, 200, false),
//!     Step::new('h' as u32, 400, false),
//!     Step::new('e' as u32, 600, true),
//! ];
//! let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));
//! let digest = LessonDigest::new(&histogram, &steps);
//!
//! assert_eq!(digest.misses.get('e' as u32), 1);
//! assert_eq!(digest.transitions.get('t' as u32, 'h' as u32), 1);
//! assert_eq!(digest.transitions.get('h' as u32, 't' as u32), 0);
//! ```

use std::collections::BTreeMap;

use crate::{CodePoint, Histogram, Step};

/// Sparse per-key counts. Unknown keys count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCounts {
    counts: BTreeMap<CodePoint, u32>,
}

impl KeyCounts {
    pub fn get(&self, code_point: CodePoint) -> u32 {
        self.counts.get(&code_point).copied().unwrap_or(0)
    }

    pub fn add(&mut self, code_point: CodePoint, count: u32) {
        *self.counts.entry(code_point).or_insert(0) += count;
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Iterate `(code_point, count)` pairs in ascending code point order
    pub fn iter(&self) -> impl Iterator<Item = (CodePoint, u32)> + '_ {
        self.counts.iter().map(|(&code_point, &count)| (code_point, count))
    }
}

/// Sparse counts of ordered key pairs over a fixed alphabet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bigrams {
    alphabet: Vec<CodePoint>,
    counts: BTreeMap<(CodePoint, CodePoint), u32>,
}

impl Bigrams {
    /// Create an empty table. The alphabet is sorted and deduplicated.
    pub fn new(alphabet: impl IntoIterator<Item = CodePoint>) -> Self {
        let mut alphabet: Vec<CodePoint> = alphabet.into_iter().collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        Self {
            alphabet,
            counts: BTreeMap::new(),
        }
    }

    pub fn alphabet(&self) -> &[CodePoint] {
        &self.alphabet
    }

    fn contains(&self, code_point: CodePoint) -> bool {
        self.alphabet.binary_search(&code_point).is_ok()
    }

    /// Add `count` to the pair. Returns false if either key is outside the alphabet.
    pub fn add(&mut self, first: CodePoint, second: CodePoint, count: u32) -> bool {
        if !(self.contains(first) && self.contains(second)) {
            return false;
        }
        *self.counts.entry((first, second)).or_insert(0) += count;
        true
    }

    pub fn get(&self, first: CodePoint, second: CodePoint) -> u32 {
        self.counts.get(&(first, second)).copied().unwrap_or(0)
    }

    /// Iterate the pairs with a non-zero count, ordered by first then second key
    pub fn iter(&self) -> impl Iterator<Item = (CodePoint, CodePoint, u32)> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&(first, second), &count)| (first, second, count))
    }
}

/// Per-key and per-transition counts of one lesson
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDigest {
    /// Hits per key, taken from the histogram
    pub hits: KeyCounts,
    /// Misses per key, taken from the histogram
    pub misses: KeyCounts,
    /// How often each key was directly followed by another
    pub transitions: Bigrams,
}

impl LessonDigest {
    pub fn new(histogram: &Histogram, steps: &[Step]) -> Self {
        let mut hits = KeyCounts::default();
        let mut misses = KeyCounts::default();
        for sample in histogram {
            hits.add(sample.code_point(), sample.hit_count());
            misses.add(sample.code_point(), sample.miss_count());
        }

        let mut transitions = Bigrams::new(steps.iter().map(|step| step.code_point));
        for pair in steps.windows(2) {
            transitions.add(pair[0].code_point, pair[1].code_point, 1);
        }

        Self {
            hits,
            misses,
            transitions,
        }
    }
}
