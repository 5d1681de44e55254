// src/core/mod.rs
//! Submission pipeline: configuration, validation, transport, lifecycle

pub mod config_manager;
pub mod service_client;
pub mod submission;
pub mod validator;

pub use config_manager::ConfigManager;
pub use service_client::{AnalysisRequest, AnalysisService, ServiceClient};
pub use submission::{StateKind, SubmissionController, SubmissionState, Transition, TransitionObserver};
pub use validator::validate;
