//! Judge client
//!
//! Wraps the external Judge0 service behind two operations: submit a batch
//! and wait for its results. The transport is a trait so the orchestration
//! logic can run against a fake judge in tests.

pub mod error;
pub mod http;
pub mod language;
pub mod poll;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::JudgeConfig;

pub use error::JudgeError;
pub use http::Judge0Api;
pub use language::{language_id_for, language_name_for, supported_languages};
pub use poll::{PollPolicy, PollSchedule};
pub use types::{BatchItem, BatchToken, ExecutionResult, JudgeStatus};

/// Raw batch endpoints of a judge deployment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Queue every item in one call, returning whatever tokens the judge hands back
    async fn submit_batch(&self, items: &[BatchItem]) -> Result<Vec<BatchToken>, JudgeError>;

    /// Fetch the current state of every token in one call
    async fn fetch_batch(&self, tokens: &[BatchToken]) -> Result<Vec<ExecutionResult>, JudgeError>;
}

/// Batch submit and poll on top of a [`JudgeBackend`]
#[derive(Clone)]
pub struct JudgeClient {
    backend: Arc<dyn JudgeBackend>,
    policy: PollPolicy,
}

impl JudgeClient {
    pub fn new(backend: Arc<dyn JudgeBackend>, policy: PollPolicy) -> Self {
        Self { backend, policy }
    }

    /// Client for the Judge0 deployment described by `config`
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let api = Judge0Api::new(config)?;
        Ok(Self::new(Arc::new(api), PollPolicy::from_config(config)))
    }

    /// Submit all items as one batch; one token per item, same order
    pub async fn submit_batch(&self, items: &[BatchItem]) -> Result<Vec<BatchToken>, JudgeError> {
        if items.is_empty() {
            return Err(JudgeError::EmptyBatch);
        }

        let tokens = self.backend.submit_batch(items).await?;

        if tokens.len() != items.len() {
            return Err(JudgeError::Unavailable(format!(
                "judge returned {} tokens for {} submissions",
                tokens.len(),
                items.len()
            )));
        }

        debug!(batch_size = items.len(), "Batch submitted to judge");
        Ok(tokens)
    }

    /// Poll until every token has a terminal status, or the wait budget runs out
    ///
    /// Upstream failures during polling are retried on the normal schedule.
    /// Results come back in token order.
    pub async fn poll_batch_results(
        &self,
        tokens: &[BatchToken],
    ) -> Result<Vec<ExecutionResult>, JudgeError> {
        if tokens.is_empty() {
            return Err(JudgeError::EmptyBatch);
        }

        let started = Instant::now();
        let deadline = started + self.policy.max_wait;
        let mut schedule = self.policy.schedule();
        let mut polls: u32 = 0;

        loop {
            polls += 1;

            match self.backend.fetch_batch(tokens).await {
                Ok(results) if results.len() != tokens.len() => {
                    warn!(
                        polls,
                        expected = tokens.len(),
                        received = results.len(),
                        "Judge returned a partial batch, retrying"
                    );
                }
                Ok(results) => {
                    let pending = results.iter().filter(|r| !r.status.is_terminal()).count();
                    if pending == 0 {
                        info!(
                            polls,
                            batch_size = tokens.len(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "Judge batch finished"
                        );
                        return Ok(results);
                    }
                    debug!(polls, pending, "Judge batch still running");
                }
                Err(e) => {
                    warn!(polls, error = %e, "Judge poll failed, retrying");
                }
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(polls, batch_size = tokens.len(), "Judge batch timed out");
                return Err(JudgeError::Timeout {
                    waited: self.policy.max_wait,
                    polls,
                });
            }

            sleep(schedule.next_delay().min(deadline - now)).await;
        }
    }

    /// Submit then poll
    pub async fn run_batch(&self, items: &[BatchItem]) -> Result<Vec<ExecutionResult>, JudgeError> {
        let tokens = self.submit_batch(items).await?;
        self.poll_batch_results(&tokens).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::Sequence;

    use super::*;

    fn pending() -> ExecutionResult {
        ExecutionResult {
            stdout: None,
            stderr: None,
            compile_output: None,
            status: JudgeStatus::new(2, "Processing"),
            memory: None,
            time: None,
        }
    }

    fn accepted(stdout: &str) -> ExecutionResult {
        ExecutionResult {
            stdout: Some(stdout.to_string()),
            status: JudgeStatus::new(3, "Accepted"),
            memory: Some(1024),
            time: Some("0.01".to_string()),
            ..pending()
        }
    }

    fn tokens(n: usize) -> Vec<BatchToken> {
        (0..n).map(|i| BatchToken::from(format!("token-{}", i))).collect()
    }

    fn client(backend: MockJudgeBackend, max_wait: Duration) -> JudgeClient {
        JudgeClient::new(Arc::new(backend), PollPolicy::default().with_max_wait(max_wait))
    }

    #[tokio::test]
    async fn test_submit_batch_returns_tokens_in_order() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_submit_batch()
            .times(1)
            .returning(|items| Ok(items.iter().map(|i| BatchToken::from(i.stdin.as_str())).collect()));

        let items = vec![BatchItem::run("x", 71, "a"), BatchItem::run("x", 71, "b")];
        let tokens = client(backend, Duration::from_secs(10))
            .submit_batch(&items)
            .await
            .unwrap();

        assert_eq!(tokens, vec![BatchToken::from("a"), BatchToken::from("b")]);
    }

    #[tokio::test]
    async fn test_submit_batch_rejects_token_count_mismatch() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_submit_batch()
            .times(1)
            .returning(|_| Ok(vec![BatchToken::from("only-one")]));

        let items = vec![BatchItem::run("x", 71, "a"), BatchItem::run("x", 71, "b")];
        let err = client(backend, Duration::from_secs(10))
            .submit_batch(&items)
            .await
            .unwrap_err();

        assert!(matches!(err, JudgeError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_submit_batch_propagates_upstream_failure() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_submit_batch()
            .times(1)
            .returning(|_| Err(JudgeError::Unavailable("connection refused".to_string())));

        let err = client(backend, Duration::from_secs(10))
            .submit_batch(&[BatchItem::run("x", 71, "")])
            .await
            .unwrap_err();

        assert!(matches!(err, JudgeError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_submit_empty_batch() {
        let backend = MockJudgeBackend::new();
        let err = client(backend, Duration::from_secs(10))
            .submit_batch(&[])
            .await
            .unwrap_err();

        assert!(matches!(err, JudgeError::EmptyBatch));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stops_after_first_all_terminal_response() {
        let mut backend = MockJudgeBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_fetch_batch()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|tokens| Ok(tokens.iter().map(|_| pending()).collect()));
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|tokens| Ok(tokens.iter().map(|_| accepted("5")).collect()));

        let max_wait = Duration::from_secs(60);
        let client = client(backend, max_wait);
        let started = Instant::now();

        let results = client.poll_batch_results(&tokens(1)).await.unwrap();

        let elapsed = started.elapsed();
        assert_eq!(results.len(), 1);
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed <= max_wait);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_preserves_order_with_mixed_statuses() {
        let mut backend = MockJudgeBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![accepted("first"), pending()]));
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![accepted("first"), accepted("second")]));

        let results = client(backend, Duration::from_secs(60))
            .poll_batch_results(&tokens(2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].stdout.as_deref(), Some("first"));
        assert_eq!(results[1].stdout.as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_retries_after_upstream_error() {
        let mut backend = MockJudgeBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(JudgeError::Unavailable("502 Bad Gateway".to_string())));
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![accepted("1")]));

        let results = client(backend, Duration::from_secs(60))
            .poll_batch_results(&tokens(1))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_retries_partial_batch() {
        let mut backend = MockJudgeBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![accepted("1")]));
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![accepted("1"), accepted("2")]));

        let results = client(backend, Duration::from_secs(60))
            .poll_batch_results(&tokens(2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out() {
        // Polls at 0s, 1s, 2s, 3s, 4s and a last one at the 5s deadline
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .times(6)
            .returning(|tokens| Ok(tokens.iter().map(|_| pending()).collect()));

        let max_wait = Duration::from_secs(5);
        let client = client(backend, max_wait);
        let started = Instant::now();

        let err = client.poll_batch_results(&tokens(3)).await.unwrap_err();

        match err {
            JudgeError::Timeout { waited, polls } => {
                assert_eq!(waited, max_wait);
                assert_eq!(polls, 6);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(started.elapsed() >= max_wait);
        assert!(started.elapsed() < max_wait + Duration::from_secs(1));
    }
}
