use std::fmt::Write;

use keyhist::{CodePoint, Configuration, Histogram, LessonDigest, Sample};
use serde::Serialize;

/// How a character is displayed in a text report
struct Glyph(CodePoint);

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match char::from_u32(self.0) {
            Some(' ') => write!(f, "' '"),
            Some(char) if !char.is_control() => write!(f, "{char:?}"),
            _ => write!(f, "?"),
        }
    }
}

#[derive(Debug, Serialize)]
struct Transition {
    first: CodePoint,
    second: CodePoint,
    count: u32,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    complexity: usize,
    valid: bool,
    samples: Vec<&'a Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transitions: Option<Vec<Transition>>,
}

impl<'a> Report<'a> {
    fn new(histogram: &'a Histogram, config: &Configuration, digest: Option<&LessonDigest>) -> Self {
        Self {
            complexity: histogram.complexity(),
            valid: histogram.validate_with(config),
            samples: histogram.iter().collect(),
            transitions: digest.map(|digest| {
                digest
                    .transitions
                    .iter()
                    .map(|(first, second, count)| Transition {
                        first,
                        second,
                        count,
                    })
                    .collect()
            }),
        }
    }
}

/// Render a human readable report, one line per sample
pub fn render_text(
    histogram: &Histogram,
    config: &Configuration,
    digest: Option<&LessonDigest>,
) -> String {
    let mut output = String::new();

    for sample in histogram {
        // Writing into a String never fails
        let _ = writeln!(
            output,
            "{:<6} U+{:04X}  hits {:>4}  misses {:>4}  {:>5} ms",
            Glyph(sample.code_point()).to_string(),
            sample.code_point(),
            sample.hit_count(),
            sample.miss_count(),
            sample.time_to_type(),
        );
    }

    let verdict = if histogram.validate_with(config) {
        "valid"
    } else {
        "invalid"
    };
    let _ = writeln!(output, "complexity {}, {verdict}", histogram.complexity());

    if let Some(digest) = digest {
        let _ = writeln!(output, "transitions:");
        for (first, second, count) in digest.transitions.iter() {
            let _ = writeln!(output, "  {} -> {}  {count}", Glyph(first), Glyph(second));
        }
    }

    output
}

/// Render the report as TOML
pub fn render_toml(
    histogram: &Histogram,
    config: &Configuration,
    digest: Option<&LessonDigest>,
) -> Result<String, toml::ser::Error> {
    toml::to_string(&Report::new(histogram, config, digest))
}
