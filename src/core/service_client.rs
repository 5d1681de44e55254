// src/core/service_client.rs
//! HTTP client for the remote resume analysis service

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::SubmissionError;
use crate::types::{JobDescription, ValidFile};
use crate::utils::PDF_MEDIA_TYPE;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// One submission: a validated resume and the (possibly empty) job text.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file: ValidFile,
    pub job_description: JobDescription,
}

impl AnalysisRequest {
    pub fn new(file: ValidFile, job_description: JobDescription) -> Self {
        Self {
            file,
            job_description,
        }
    }

    /// Multipart body with the `resume` and `jobDescription` fields
    pub fn to_form(&self) -> Result<Form, SubmissionError> {
        let file = self.file.file();
        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(PDF_MEDIA_TYPE)
            .map_err(|e| SubmissionError::Request(format!("Failed to create multipart: {}", e)))?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, self.job_description.as_str().to_string()))
    }
}

/// The remote side of a submission. Returns the raw JSON body on a success
/// status; every other outcome is a `SubmissionError`.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, SubmissionError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ServiceClient {
    /// Create a client for `endpoint`. Without `timeout` the request may
    /// wait as long as the service takes.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AnalysisService for ServiceClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, SubmissionError> {
        let form = request.to_form()?;

        info!(
            "Calling analysis service: {} ({} bytes, job description {} chars)",
            self.endpoint,
            request.file.file().len(),
            request.job_description.as_str().chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Analysis service error {}: {}", status, error_text);

            let message = if error_text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Network response was not ok")
                    .to_string()
            } else {
                error_text
            };
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SubmissionError::Decode(e.to_string()))
    }
}
