//! Judge client errors

use std::time::Duration;

/// Failures talking to the judge service
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The upstream call failed or answered with something unusable
    #[error("Judge unavailable: {0}")]
    Unavailable(String),

    /// Polling exceeded its total wait budget
    #[error("Judge did not finish within {}s after {polls} polls", waited.as_secs())]
    Timeout { waited: Duration, polls: u32 },

    #[error("Batch must contain at least one submission")]
    EmptyBatch,
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JudgeError::Unavailable(format!("malformed response: {}", err))
        } else {
            JudgeError::Unavailable(err.to_string())
        }
    }
}
