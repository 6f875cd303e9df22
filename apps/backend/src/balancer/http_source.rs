use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{BalancerError, CountSource};
use crate::domain::Group;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

/// Reads counts from a running backend's `/api/counts/{group}` endpoint.
#[derive(Debug, Clone)]
pub struct HttpCountSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCountSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BalancerError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BalancerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn count_url(&self, group: Group) -> String {
        format!("{}/api/counts/{}", self.base_url, group.as_str())
    }
}

#[async_trait]
impl CountSource for HttpCountSource {
    async fn group_count(&self, group: Group) -> Result<u64, BalancerError> {
        let response = self.client.get(self.count_url(group)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BalancerError::Status(status.as_u16()));
        }
        let body: CountBody = response.json().await?;
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let source = HttpCountSource::new("http://localhost:3001/").unwrap();
        assert_eq!(
            source.count_url(Group::Two),
            "http://localhost:3001/api/counts/TestGroup2"
        );
    }
}
