//! # Aggregator Module - Streaming Keystroke Aggregation
//!
//! Folds a sequence of [Step]s into one [Sample] per character in a single pass.
//!
//! ## Timing
//!
//! Every keystroke is timed against the keystroke immediately before it, or against
//! the lesson start when one is given. Typos count as hits and misses but never add
//! to a character's timing. They still become the anchor for the next keystroke.
//!
//! The accumulated time is divided by the total hit count, typos included, so
//! mistakes on a character dilute its average time-to-type.
//!
//! ```text
//! steps:   A@0      B@100    A@150
//! elapsed: -        100      50
//! result:  A: hits 2, sum 50  -> 25 ms (too fast, dropped)
//!          B: hits 1, sum 100 -> 100 ms
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{CodePoint, Configuration, Histogram, Millis, Sample, Step};

/// Options for aggregating a [Histogram] from steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// When the lesson started. Anchors the timing of the very first keystroke.
    pub started_at: Option<Millis>,
    /// Validation thresholds used to filter implausible samples
    pub config: Configuration,
}

impl BuildOptions {
    /// Options anchoring the first keystroke at `started_at`
    pub fn started_at(started_at: Millis) -> Self {
        Self {
            started_at: Some(started_at),
            ..Self::default()
        }
    }

    pub const fn with_config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }
}

/// Running totals for a single character
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    hit_count: u32,
    miss_count: u32,
    elapsed_sum: Millis,
}

impl Accumulator {
    /// Round-half-up average over all hits
    const fn time_to_type(&self) -> Millis {
        if self.hit_count == 0 {
            return 0;
        }
        let hits = self.hit_count as Millis;
        let sum = self.elapsed_sum;
        sum / hits + ((sum % hits) * 2 >= hits) as Millis
    }
}

/// Accumulates steps into per-character samples
///
/// The aggregator owns its state exclusively. Feed it steps in the order they
/// happened with [Aggregator::update], then call [Aggregator::finalize].
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: Configuration,
    accumulators: HashMap<CodePoint, Accumulator>,
    last: Option<Step>,
    steps: usize,
}

impl Aggregator {
    /// Create an aggregator, optionally anchored at the lesson start
    pub fn new(started_at: Option<Millis>) -> Self {
        Self::from_options(BuildOptions {
            started_at,
            ..BuildOptions::default()
        })
    }

    pub fn from_options(options: BuildOptions) -> Self {
        Self {
            config: options.config,
            accumulators: HashMap::new(),
            last: options.started_at.map(Step::sentinel),
            steps: 0,
        }
    }

    /// Number of steps consumed so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Consume the next step
    pub fn update(&mut self, step: &Step) {
        let accumulator = self.accumulators.entry(step.code_point).or_default();

        accumulator.hit_count = accumulator.hit_count.saturating_add(1);
        if step.typo {
            accumulator.miss_count = accumulator.miss_count.saturating_add(1);
        } else if let Some(last) = &self.last {
            accumulator.elapsed_sum = accumulator
                .elapsed_sum
                .saturating_add(step.elapsed_since(last));
        }

        self.last = Some(*step);
        self.steps += 1;
    }

    /// Turn the accumulated totals into a histogram, dropping implausible samples
    pub fn finalize(self) -> Histogram {
        let Self {
            config,
            accumulators,
            steps,
            ..
        } = self;

        let characters = accumulators.len();
        let histogram: Histogram = accumulators
            .into_iter()
            .map(|(code_point, accumulator)| {
                Sample::from_counts(
                    code_point,
                    accumulator.hit_count,
                    accumulator.miss_count,
                    accumulator.time_to_type(),
                )
            })
            .filter(|sample| {
                let plausibility = sample.plausibility(&config);
                if !plausibility.is_accepted() {
                    debug!(
                        code_point = sample.code_point(),
                        time_to_type = sample.time_to_type(),
                        ?plausibility,
                        "dropping implausible sample"
                    );
                }
                plausibility.is_accepted()
            })
            .collect();

        trace!(
            steps,
            characters,
            kept = histogram.complexity(),
            "aggregated histogram"
        );

        histogram
    }
}

impl Extend<Step> for Aggregator {
    fn extend<T: IntoIterator<Item = Step>>(&mut self, iter: T) {
        for step in iter {
            self.update(&step);
        }
    }
}

impl<'a> Extend<&'a Step> for Aggregator {
    fn extend<T: IntoIterator<Item = &'a Step>>(&mut self, iter: T) {
        for step in iter {
            self.update(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(code_point: CodePoint, timestamp: Millis, typo: bool) -> Step {
        Step::new(code_point, timestamp, typo)
    }

    #[test]
    fn test_empty_stream() {
        let steps: [Step; 0] = [];
        let histogram = Histogram::from_steps(&steps, BuildOptions::default());
        assert_eq!(histogram.complexity(), 0);
        assert!(!histogram.validate());

        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));
        assert!(histogram.is_empty());
    }

    #[test]
    fn test_worked_example_filters_too_fast() {
        let steps = [step(65, 0, false), step(66, 100, false), step(65, 150, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::default());

        // 65 averages round(50 / 2) = 25 ms which is below the plausible band
        assert!(!histogram.has(65));
        assert_eq!(histogram.complexity(), 1);
        assert_eq!(histogram.get(66), Some(&Sample::new(66, 1, 0, 100).unwrap()));
    }

    #[test]
    fn test_worked_example_without_filtering() {
        let steps = [step(65, 0, false), step(66, 100, false), step(65, 150, false)];
        let config = Configuration {
            min_time_to_type: 1,
            ..Configuration::default()
        };
        let histogram = Histogram::from_steps(&steps, BuildOptions::default().with_config(config));

        assert_eq!(histogram.get(65), Some(&Sample::new(65, 2, 0, 25).unwrap()));
        assert_eq!(histogram.get(66), Some(&Sample::new(66, 1, 0, 100).unwrap()));
    }

    #[test]
    fn test_first_step_without_anchor_has_unknown_timing() {
        let histogram = Histogram::from_steps(&[step(65, 5_000, false)], BuildOptions::default());
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(0));
    }

    #[test]
    fn test_started_at_anchors_first_step() {
        let steps = [step(65, 1_300, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(1_000));
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(300));
    }

    #[test]
    fn test_typo_counts_miss_without_timing() {
        let steps = [
            step(65, 200, false),
            step(66, 300, true),
            step(66, 500, false),
        ];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));

        let sample = histogram.get(66).unwrap();
        assert_eq!(sample.hit_count(), 2);
        assert_eq!(sample.miss_count(), 1);
        // Only the correct keystroke contributes: 500 - 300 = 200, divided by both hits
        assert_eq!(sample.time_to_type(), 100);
    }

    #[test]
    fn test_typo_still_anchors_next_step() {
        let steps = [step(65, 0, true), step(66, 400, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::default());

        assert_eq!(histogram.get(65), Some(&Sample::new(65, 1, 1, 0).unwrap()));
        assert_eq!(histogram.get(66).map(|s| s.time_to_type()), Some(400));
    }

    #[test]
    fn test_all_typos() {
        let steps = [step(65, 100, true), step(65, 200, true)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));
        assert_eq!(histogram.get(65), Some(&Sample::new(65, 2, 2, 0).unwrap()));
    }

    #[test]
    fn test_rounding_half_up() {
        // sum 301 over 2 hits = 150.5 -> 151
        let steps = [step(65, 100, false), step(65, 401, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(100));
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(151));

        // sum 299 over 2 hits = 149.5 -> 150
        let steps = [step(65, 100, false), step(65, 399, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(100));
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(150));

        // sum 500 over 3 hits = 166.67 -> 167
        let steps = [
            step(66, 0, false),
            step(65, 200, false),
            step(65, 300, false),
            step(65, 500, false),
        ];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(167));
    }

    #[test]
    fn test_too_slow_sample_dropped() {
        let steps = [step(65, 100, false), step(66, 20_000, false), step(67, 20_200, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));

        assert!(histogram.has(65));
        assert!(!histogram.has(66));
        assert!(histogram.has(67));
    }

    #[test]
    fn test_huge_elapsed_time_does_not_overflow() {
        let config = Configuration {
            max_time_to_type: Millis::MAX,
            ..Configuration::default()
        };
        let options = BuildOptions::started_at(0).with_config(config);

        let histogram = Histogram::from_steps(&[step(65, Millis::MAX, false)], options);
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(Millis::MAX));

        // Sums saturate instead of wrapping
        let steps = [step(65, Millis::MAX, false), step(66, 0, false), step(65, Millis::MAX, false)];
        let histogram = Histogram::from_steps(&steps, options);
        assert_eq!(histogram.get(65).map(|s| s.time_to_type()), Some(Millis::MAX / 2 + 1));

        // Still filtered as too slow by default
        let histogram = Histogram::from_steps(&[step(65, Millis::MAX, false)], BuildOptions::started_at(0));
        assert!(histogram.is_empty());
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let steps = [
            step(99, 200, false),
            step(97, 400, false),
            step(98, 600, false),
            step(96, 800, false),
        ];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));

        let order: Vec<CodePoint> = histogram.iter().map(|s| s.code_point()).collect();
        assert_eq!(order, vec![96, 97, 98, 99]);
        assert!(histogram.validate());
    }

    #[test]
    fn test_timing_depends_on_preceding_step() {
        let forward = [step(65, 100, false), step(66, 300, false), step(67, 1_000, false)];
        let swapped = [step(65, 100, false), step(67, 300, false), step(66, 1_000, false)];

        let forward = Histogram::from_steps(&forward, BuildOptions::started_at(0));
        let swapped = Histogram::from_steps(&swapped, BuildOptions::started_at(0));

        assert_eq!(forward.get(66).map(|s| s.time_to_type()), Some(200));
        assert_eq!(swapped.get(66).map(|s| s.time_to_type()), Some(700));
    }

    #[test]
    fn test_non_monotonic_timestamps_saturate() {
        let steps = [step(65, 500, false), step(66, 200, false)];
        let histogram = Histogram::from_steps(&steps, BuildOptions::started_at(0));

        assert_eq!(histogram.get(66).map(|s| s.time_to_type()), Some(0));
    }

    #[test]
    fn test_streaming_matches_batch() {
        let steps = [
            step(65, 150, false),
            step(66, 320, true),
            step(66, 480, false),
            step(67, 700, false),
        ];

        let mut aggregator = Aggregator::new(Some(0));
        aggregator.extend(steps.iter());
        assert_eq!(aggregator.steps(), 4);

        let mut owned = Aggregator::new(Some(0));
        owned.extend(steps);

        let batch = Histogram::from_steps(&steps, BuildOptions::started_at(0));
        assert_eq!(aggregator.finalize(), batch);
        assert_eq!(owned.finalize(), batch);
    }
}
