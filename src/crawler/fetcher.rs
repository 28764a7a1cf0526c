//! HTTP fetcher implementation
//!
//! One GET per address, no retries. The pipeline only cares whether a
//! document came back, so [`Fetcher::fetch`] collapses every failure into
//! `None`; [`fetch_document`] keeps the cause for callers that want it.

use reqwest::Client;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the document
    Document {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Drops the failure cause, keeping only the body if there is one
    pub fn into_document(self) -> Option<String> {
        match self {
            FetchResult::Document { body, .. } => Some(body),
            FetchResult::HttpError { .. } | FetchResult::NetworkError { .. } => None,
        }
    }

    /// Returns true if a document was fetched
    pub fn is_document(&self) -> bool {
        matches!(self, FetchResult::Document { .. })
    }
}

/// Builds the HTTP client used for all requests
///
/// Certificate validation is disabled: the target site's chain is not
/// trusted by default trust stores. Responses are therefore not
/// authenticated and callers must not treat them as such.
///
/// Timeouts and headers are left at the transport defaults.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request, classifying the outcome
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The address to fetch
///
/// # Returns
///
/// A FetchResult holding the body or the type of failure
pub async fn fetch_document(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                format!("Request timeout: {}", e)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Document {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Issues requests on behalf of one pipeline
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with the default client
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    /// Creates a fetcher around an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url`, returning its body or `None`
    ///
    /// Never fails: transport errors and non-success statuses are logged at
    /// error level with the address and reported as `None`.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match fetch_document(&self.client, url).await {
            FetchResult::Document {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(
                    url = %url,
                    final_url = %final_url,
                    status = status_code,
                    "fetched {} bytes",
                    body.len()
                );
                Some(body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::error!(url = %url, status = status_code, "error occurred while scraping {}", url);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::error!(url = %url, error = %error, "error occurred while scraping {}", url);
                None
            }
        }
    }
}
