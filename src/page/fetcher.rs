use crate::{config::GeneratorConfig, error::FetchError, Fetcher};
use reqwest::{redirect::Policy, Client, Url};
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// Fetches pages over HTTP, following redirects.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &GeneratorConfig) -> Result<HttpFetcher, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        debug!("{} responded with {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        Ok(response.text().await?)
    }
}
