//! The transport module is the single seam between the orchestrator and the network.

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};

use crate::error::SummarizeError;

/// One field of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues HTTP requests on behalf of the orchestrator.
///
/// Implementations report any failure to complete the exchange (DNS, refused
/// connection, aborted body) as [`SummarizeError::Network`]; every response that
/// arrives, whatever its status, is returned as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a multipart POST to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Network`] if no response is received.
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<FormField>,
    ) -> Result<RawResponse, SummarizeError>;

    /// Sends a plain GET to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Network`] if no response is received.
    async fn get(&self, url: &str) -> Result<RawResponse, SummarizeError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<FormField>,
    ) -> Result<RawResponse, SummarizeError> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => form.part(
                    name,
                    Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)?,
                ),
            };
        }

        let response = self.client.post(url).multipart(form).send().await?;
        debug!("POST {url} answered with {}", response.status());

        read_response(response).await
    }

    async fn get(&self, url: &str) -> Result<RawResponse, SummarizeError> {
        let response = self.client.get(url).send().await?;
        debug!("GET {url} answered with {}", response.status());

        read_response(response).await
    }
}

/// Reads the body of a response.
///
/// A failing status is kept even when its body cannot be read, so it still maps
/// to its own error kind; only a success body has to arrive intact.
async fn read_response(response: reqwest::Response) -> Result<RawResponse, SummarizeError> {
    let status = response.status().as_u16();
    if response.status().is_success() {
        let body = response.text().await?;
        return Ok(RawResponse { status, body });
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Discarding unreadable body of a {status} response: {e}");
            String::new()
        }
    };
    Ok(RawResponse { status, body })
}
