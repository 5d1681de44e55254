// src/error.rs
//! Error taxonomy shared by the submission pipeline

use thiserror::Error;

use crate::core::submission::StateKind;

/// Rejection of a candidate resume before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no resume file selected")]
    MissingFile,

    #[error("not a pdf (declared media type: {media_type})")]
    NotPdf { media_type: String },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile => "RESUME_MISSING",
            Self::NotPdf { .. } => "RESUME_NOT_PDF",
        }
    }

    /// Hint shown under the error line
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::MissingFile => "Please upload a resume file",
            Self::NotPdf { .. } => "Please upload a PDF file",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("submission in progress")]
    InProgress,

    #[error("analysis service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not build analysis request: {0}")]
    Request(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("could not read analysis response: {0}")]
    Decode(String),

    #[error("submission cancelled")]
    Cancelled,

    #[error("invalid submission state transition: {from} -> {to}")]
    InvalidTransition { from: StateKind, to: StateKind },
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
