// src/lib.rs
//! Resume ATS analyzer client
//!
//! Sends a PDF resume and an optional job description to the remote analysis
//! service and turns its answer into a report that is safe to display.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

pub mod core;
pub mod error;
pub mod report;
pub mod types;
pub mod utils;

pub use crate::core::{ConfigManager, ServiceClient, StateKind, SubmissionController, SubmissionState};
pub use error::{SubmissionError, ValidationError};
pub use report::{ActiveTab, AnalysisReport, Tier};
pub use types::{JobDescription, UploadedFile};

/// Convenience function for a one-off analysis of a file on disk
pub async fn analyze_resume(
    resume: &Path,
    job_description: &str,
    config: &ConfigManager,
) -> Result<AnalysisReport> {
    let file = UploadedFile::from_path(resume, None).await?;
    let service = ServiceClient::new(config.service.analysis_url.clone(), config.timeout())?;
    let controller = SubmissionController::new(Arc::new(service));

    controller
        .submit(Some(&file), &JobDescription::from(job_description))
        .await
        .with_context(|| format!("Failed to analyze {}", resume.display()))
}
