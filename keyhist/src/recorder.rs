use web_time::{Duration, Instant};

use crate::{Aggregator, BuildOptions, CodePoint, Configuration, Histogram, Millis, Step};

/// Stamps keystrokes with elapsed time and collects them as [Step]s
///
/// The clock either starts explicitly with [StepRecorder::start], in which case the
/// first keystroke is timed against the start, or implicitly on the first keystroke,
/// which then has no timing of its own.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
    started_at: Option<Instant>,
    anchored: bool,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock. Does nothing if it is already running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
            self.anchored = true;
        }
    }

    /// Record a keystroke at the current time
    pub fn record(&mut self, code_point: CodePoint, typo: bool) -> Step {
        // Initialize timing on first input
        let started_at = *self.started_at.get_or_insert_with(Instant::now);
        self.record_elapsed(code_point, typo, started_at.elapsed())
    }

    /// Record a keystroke `elapsed` after the start of the lesson
    pub fn record_elapsed(&mut self, code_point: CodePoint, typo: bool, elapsed: Duration) -> Step {
        let timestamp = Millis::try_from(elapsed.as_millis()).unwrap_or(Millis::MAX);
        let step = Step::new(code_point, timestamp, typo);
        self.steps.push(step);
        step
    }

    /// Check if timing has started
    pub const fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| start.elapsed())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Aggregate the recorded steps using the default [Configuration]
    pub fn histogram(&self) -> Histogram {
        self.histogram_with(Configuration::default())
    }

    pub fn histogram_with(&self, config: Configuration) -> Histogram {
        let mut aggregator = Aggregator::from_options(self.build_options().with_config(config));
        aggregator.extend(&self.steps);
        aggregator.finalize()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    fn build_options(&self) -> BuildOptions {
        if self.anchored {
            BuildOptions::started_at(0)
        } else {
            BuildOptions::default()
        }
    }
}
