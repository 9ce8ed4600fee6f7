use std::fmt::Debug;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tokio::runtime::{Builder, Runtime};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("http runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("http client unavailable: {0}")]
    Client(#[source] reqwest::Error),
}

/// A downloaded body along with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Blocking HTTP GET, the only network access the fetcher needs.
pub trait HttpGateway: Debug {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
    fn get_file(&self, url: &str, timeout: Duration) -> Result<RemoteFile, FetchError>;
}

/// reqwest-backed gateway that blocks on a private current-thread runtime
/// so the batch can stay synchronous.
pub struct ReqwestGateway {
    client: reqwest::Client,
    runtime: Runtime,
}

impl ReqwestGateway {
    pub fn new() -> Result<Self, FetchError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FetchError::Runtime)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("ctcac-financing/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, runtime })
    }

    async fn send(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl Debug for ReqwestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestGateway").finish_non_exhaustive()
    }
}

impl HttpGateway for ReqwestGateway {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        self.runtime.block_on(async {
            let response = self.send(url, timeout).await?;
            response.text().await.map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
        })
    }

    fn get_file(&self, url: &str, timeout: Duration) -> Result<RemoteFile, FetchError> {
        self.runtime.block_on(async {
            let response = self.send(url, timeout).await?;
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await.map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
            Ok(RemoteFile {
                content_type,
                bytes: bytes.to_vec(),
            })
        })
    }
}
