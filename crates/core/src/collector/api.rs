//! Transport for the two protocol calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::debug;

use crate::protocol::{disposition_file_name, GET_REPORT_PATH, OFFSET_PARAM, REQUEST_REPORT_PATH};
use crate::ticket::Ticket;

use super::types::{Artifact, CollectorError, PollOutcome, Step};

/// The report service as seen by the collector.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Submit a report request and return the raw ticket body.
    async fn request_report(&self, offset: u64) -> Result<String, CollectorError>;

    /// Poll for the report belonging to `ticket`.
    async fn get_report(&self, ticket: &Ticket) -> Result<PollOutcome, CollectorError>;
}

/// HTTP implementation of [`ReportApi`].
pub struct HttpReportApi {
    client: Client,
    base_url: String,
}

impl HttpReportApi {
    /// Create a client for the service at `base_url`.
    ///
    /// `request_timeout` bounds each individual request.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| CollectorError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_report_url(&self, offset: u64) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url, REQUEST_REPORT_PATH, OFFSET_PARAM, offset
        )
    }

    fn get_report_url(&self, ticket: &Ticket) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            GET_REPORT_PATH,
            urlencoding::encode(&ticket.encode())
        )
    }

    async fn send(&self, step: Step, url: &str) -> Result<Response, CollectorError> {
        debug!(%step, url, "Sending request");

        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out: {}", e)
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            CollectorError::Transport { step, message }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CollectorError::UnexpectedStatus {
                step,
                status,
                body: body.trim().chars().take(200).collect(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ReportApi for HttpReportApi {
    async fn request_report(&self, offset: u64) -> Result<String, CollectorError> {
        let step = Step::RequestReport;
        let response = self.send(step, &self.request_report_url(offset)).await?;

        response
            .text()
            .await
            .map_err(|e| CollectorError::Transport {
                step,
                message: format!("failed to read response body: {}", e),
            })
    }

    async fn get_report(&self, ticket: &Ticket) -> Result<PollOutcome, CollectorError> {
        let step = Step::GetReport;
        let response = self.send(step, &self.get_report_url(ticket)).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name);

        let body = response
            .bytes()
            .await
            .map_err(|e| CollectorError::Transport {
                step,
                message: format!("failed to read response body: {}", e),
            })?;

        Ok(PollOutcome::classify(Artifact {
            body: body.to_vec(),
            content_type,
            file_name,
        }))
    }
}
