//! Test case models

use serde::{Deserialize, Serialize};

/// Test case supplied with an execution request; never stored on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Exact comparison after trimming surrounding whitespace on both sides
    pub fn matches(&self, stdout: &str) -> bool {
        stdout.trim() == self.expected_output.trim()
    }
}

/// Test case stored on a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemTestCase {
    pub input: String,
    pub output: String,
}

impl From<&ProblemTestCase> for TestCase {
    fn from(tc: &ProblemTestCase) -> Self {
        TestCase::new(tc.input.clone(), tc.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline_is_ignored() {
        assert!(TestCase::new("2 3", "5").matches("5\n"));
        assert!(TestCase::new("2 3", "5\n").matches("  5"));
    }

    #[test]
    fn test_comparison_is_exact_after_trim() {
        assert!(!TestCase::new("", "05").matches("5 "));
        assert!(!TestCase::new("", "hello").matches("Hello"));
        assert!(!TestCase::new("", "1 2").matches("1  2"));
        assert!(!TestCase::new("", "1.0").matches("1"));
    }
}
