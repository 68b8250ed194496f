use std::path::{Path, PathBuf};

use derive_more::From;
use keyhist::{Millis, Step};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum StepLogError {
    #[error("Failed to read step log '{path}': {error}")]
    #[from(skip)]
    ReadFile { path: PathBuf, error: std::io::Error },

    #[error("Failed to parse step log: {0}")]
    Parse(toml::de::Error),
}

/// A recorded lesson: the keystrokes in order, and optionally when the lesson started
///
/// ```toml
/// started_at = 0
///
/// [[steps]]
/// code_point = 97
/// timestamp = 180
///
/// [[steps]]
/// code_point = 98
/// timestamp = 420
/// typo = true
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StepLog {
    #[serde(default)]
    pub started_at: Option<Millis>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl StepLog {
    pub fn load(path: &Path) -> Result<Self, StepLogError> {
        let content = std::fs::read_to_string(path).map_err(|error| StepLogError::ReadFile {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, StepLogError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_log() {
        let log = StepLog::parse(
            r#"
            started_at = 1000

            [[steps]]
            code_point = 97
            timestamp = 1180

            [[steps]]
            code_point = 98
            timestamp = 1420
            typo = true
            "#,
        )
        .unwrap();

        assert_eq!(log.started_at, Some(1000));
        assert_eq!(
            log.steps,
            vec![Step::new(97, 1180, false), Step::new(98, 1420, true)]
        );
    }

    #[test]
    fn test_parse_empty_step_log() {
        let log = StepLog::parse("").unwrap();
        assert_eq!(log, StepLog::default());
    }

    #[test]
    fn test_parse_invalid_step_log() {
        let error = StepLog::parse("[[steps]]\ncode_point = \"a\"\n").unwrap_err();
        assert!(matches!(error, StepLogError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let error = StepLog::load(&path).unwrap_err();
        assert!(matches!(error, StepLogError::ReadFile { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.toml");
        std::fs::write(&path, "[[steps]]\ncode_point = 65\ntimestamp = 10\n").unwrap();

        let log = StepLog::load(&path).unwrap();
        assert_eq!(log.started_at, None);
        assert_eq!(log.steps, vec![Step::new(65, 10, false)]);
    }
}
