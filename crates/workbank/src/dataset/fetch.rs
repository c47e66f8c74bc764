use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} fetching {path}")]
    Status { path: String, status: u16 },
}

/// Transport seam for the dataset repository. The loader only needs "give me
/// the bytes of this resource"; tests substitute their own implementation.
#[async_trait]
pub trait DatasetGateway: Send + Sync {
    async fn fetch_resource(&self, repo: &str, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches dataset resources over the Hugging Face `resolve` endpoint.
pub struct HuggingFaceGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HuggingFaceGateway {
    pub const DEFAULT_BASE_URL: &'static str = "https://huggingface.co";

    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resource_url(&self, repo: &str, path: &str) -> String {
        format!("{}/datasets/{}/resolve/main/{}", self.base_url, repo, path)
    }
}

#[async_trait]
impl DatasetGateway for HuggingFaceGateway {
    async fn fetch_resource(&self, repo: &str, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.resource_url(repo, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url_targets_resolve_endpoint() {
        let gateway = HuggingFaceGateway::with_base_url(
            "https://huggingface.co/",
            Duration::from_secs(5),
        )
        .expect("client builds");
        assert_eq!(
            gateway.resource_url("SALT-NLP/WORKBank", "worker_data/domain_worker_desires.csv"),
            "https://huggingface.co/datasets/SALT-NLP/WORKBank/resolve/main/worker_data/domain_worker_desires.csv"
        );
    }
}
