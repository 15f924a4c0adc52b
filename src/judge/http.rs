//! Judge0 HTTP transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::JudgeConfig;

use super::{
    error::JudgeError,
    types::{BatchItem, BatchRequest, BatchResults, BatchToken, ExecutionResult},
    JudgeBackend,
};

/// Talks to a Judge0 deployment over its batch endpoints
#[derive(Debug, Clone)]
pub struct Judge0Api {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl Judge0Api {
    pub fn new(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/submissions/batch", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl JudgeBackend for Judge0Api {
    async fn submit_batch(&self, items: &[BatchItem]) -> Result<Vec<BatchToken>, JudgeError> {
        let response = self
            .authorize(self.http.post(self.batch_url()))
            .query(&[("base64_encoded", "false")])
            .json(&BatchRequest { submissions: items })
            .send()
            .await?
            .error_for_status()?;

        // Rejected items come back as validation objects instead of tokens
        let entries: Vec<Value> = response.json().await?;

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .get("token")
                    .and_then(Value::as_str)
                    .map(BatchToken::from)
                    .ok_or_else(|| {
                        JudgeError::Unavailable(format!(
                            "submission {} rejected by judge: {}",
                            index + 1,
                            entry
                        ))
                    })
            })
            .collect()
    }

    async fn fetch_batch(&self, tokens: &[BatchToken]) -> Result<Vec<ExecutionResult>, JudgeError> {
        let csv = tokens
            .iter()
            .map(BatchToken::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .authorize(self.http.get(self.batch_url()))
            .query(&[("tokens", csv.as_str()), ("base64_encoded", "false")])
            .send()
            .await?
            .error_for_status()?;

        let body: BatchResults = response.json().await?;
        Ok(body.submissions)
    }
}
