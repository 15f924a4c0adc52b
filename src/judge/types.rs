//! Judge0 batch API types

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::judge_status;

/// One entry of a batch submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
    /// When set, the judge compares output itself and reports Wrong Answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
}

impl BatchItem {
    /// Item that only runs the program
    pub fn run(source_code: &str, language_id: i32, stdin: &str) -> Self {
        Self {
            source_code: source_code.to_string(),
            language_id,
            stdin: stdin.to_string(),
            expected_output: None,
        }
    }

    /// Item whose output the judge checks against `expected_output`
    pub fn checked(source_code: &str, language_id: i32, stdin: &str, expected_output: &str) -> Self {
        Self {
            expected_output: Some(expected_output.to_string()),
            ..Self::run(source_code, language_id, stdin)
        }
    }
}

/// Opaque handle for one queued execution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchToken(String);

impl BatchToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BatchToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BatchToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl std::fmt::Display for BatchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Judge0 status of one execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeStatus {
    pub id: i32,
    #[serde(default)]
    pub description: String,
}

impl JudgeStatus {
    pub fn new(id: i32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    /// Anything other than queued or processing
    pub fn is_terminal(&self) -> bool {
        !matches!(self.id, judge_status::IN_QUEUE | judge_status::PROCESSING)
    }

    pub fn is_accepted(&self) -> bool {
        self.id == judge_status::ACCEPTED
    }
}

/// Outcome of one execution as reported by the judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    pub status: JudgeStatus,
    /// Peak memory in kilobytes
    #[serde(default)]
    pub memory: Option<i64>,
    /// Wall time in seconds, as the judge formats it
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: Option<String>,
}

impl ExecutionResult {
    /// Memory formatted for storage, e.g. `"1024 KB"`
    pub fn memory_display(&self) -> Option<String> {
        self.memory.map(|kb| format!("{} KB", kb))
    }

    /// Time formatted for storage, e.g. `"0.012 s"`
    pub fn time_display(&self) -> Option<String> {
        self.time
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("{} s", t))
    }
}

/// Batch submit request body
#[derive(Debug, Serialize)]
pub(crate) struct BatchRequest<'a> {
    pub submissions: &'a [BatchItem],
}

/// Batch poll response body
#[derive(Debug, Deserialize)]
pub(crate) struct BatchResults {
    pub submissions: Vec<ExecutionResult>,
}

// Judge0 reports `time` as a string, some deployments as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!JudgeStatus::new(1, "In Queue").is_terminal());
        assert!(!JudgeStatus::new(2, "Processing").is_terminal());
        assert!(JudgeStatus::new(3, "Accepted").is_terminal());
        assert!(JudgeStatus::new(6, "Compilation Error").is_terminal());
        assert!(JudgeStatus::new(11, "Runtime Error (NZEC)").is_terminal());
    }

    #[test]
    fn test_decode_poll_result() {
        let raw = r#"{
            "submissions": [
                {"stdout": "5\n", "stderr": null, "compile_output": null,
                 "status": {"id": 3, "description": "Accepted"},
                 "memory": 3200, "time": "0.012", "token": "abc"},
                {"stdout": null, "status": {"id": 2, "description": "Processing"},
                 "memory": null, "time": 0.5}
            ]
        }"#;

        let results: BatchResults = serde_json::from_str(raw).unwrap();
        assert_eq!(results.submissions.len(), 2);

        let first = &results.submissions[0];
        assert_eq!(first.stdout.as_deref(), Some("5\n"));
        assert_eq!(first.memory_display().as_deref(), Some("3200 KB"));
        assert_eq!(first.time_display().as_deref(), Some("0.012 s"));

        let second = &results.submissions[1];
        assert!(!second.status.is_terminal());
        assert_eq!(second.time.as_deref(), Some("0.5"));
        assert!(second.memory_display().is_none());
    }

    #[test]
    fn test_encode_batch_item() {
        let item = BatchItem::run("print(1)", 71, "");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("expected_output").is_none());

        let checked = BatchItem::checked("print(1)", 71, "", "1");
        let json = serde_json::to_value(&checked).unwrap();
        assert_eq!(json["expected_output"], "1");
    }
}
