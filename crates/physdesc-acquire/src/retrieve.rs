use physdesc_model::Manifest;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why a manifest could not be read. None of these abort a harvest.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("malformed manifest JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Result of looking up the Physical Description for one manifest URL.
#[derive(Debug)]
pub enum Lookup {
    Found(String),
    /// The manifest was read but has no non-empty Physical Description.
    Missing,
    Failed(RetrieveError),
}

impl Lookup {
    pub fn into_description(self) -> Option<String> {
        match self {
            Lookup::Found(description) => Some(description),
            Lookup::Missing | Lookup::Failed(_) => None,
        }
    }
}

/// Fetches IIIF manifests over HTTP.
///
/// Requests carry no authentication and no custom headers. There is no retry.
#[derive(Debug, Clone)]
pub struct Retriever {
    client: reqwest::Client,
}

impl Retriever {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET `url` and parse the body as a manifest.
    pub async fn fetch_manifest(&self, url: &str) -> Result<Manifest, RetrieveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RetrieveError::Transport)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(RetrieveError::HttpStatus { status, url: url.to_string() });
        }

        let body = response.text().await.map_err(RetrieveError::Body)?;
        tracing::debug!(url = %url, bytes = body.len(), "Received manifest");
        Ok(Manifest::from_json(&body)?)
    }

    /// Look up the Physical Description, keeping the reason when there is none.
    pub async fn lookup(&self, url: &str) -> Lookup {
        match self.fetch_manifest(url).await {
            Ok(manifest) => match manifest.physical_description() {
                Some(description) => Lookup::Found(description),
                None => Lookup::Missing,
            },
            Err(e) => Lookup::Failed(e),
        }
    }

    /// The Physical Description of the manifest at `url`, or `None` on any
    /// failure or when the field is absent. Failures are logged here.
    pub async fn physical_description(&self, url: &str) -> Option<String> {
        match self.lookup(url).await {
            Lookup::Failed(e) => {
                log_failure(url, &e);
                None
            }
            other => other.into_description(),
        }
    }
}

pub(crate) fn log_failure(url: &str, error: &RetrieveError) {
    match error {
        RetrieveError::MalformedJson(e) => {
            tracing::warn!(url = %url, error = %e, "Error decoding manifest JSON");
        }
        other => tracing::warn!(url = %url, error = %other, "Error fetching manifest"),
    }
}
