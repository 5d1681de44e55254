// src/core/submission.rs
//! Submission lifecycle: one exclusive state, one transition function
//!
//! Idle -> Validating -> Submitting -> Succeeded | Failed. A new attempt may
//! start from Idle, Succeeded or Failed. While an attempt is in flight any
//! other attempt is rejected right away.

use chrono::Utc;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::service_client::{AnalysisRequest, AnalysisService};
use super::validator;
use crate::error::SubmissionError;
use crate::report::AnalysisReport;
use crate::types::{JobDescription, UploadedFile, ValidFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl StateKind {
    pub fn can_transition_to(self, next: StateKind) -> bool {
        use StateKind::*;
        matches!(
            (self, next),
            (Idle | Succeeded | Failed, Validating)
                | (Validating, Submitting)
                | (Submitting, Succeeded | Failed)
        )
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded(AnalysisReport),
    Failed(String),
}

impl SubmissionState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Validating => StateKind::Validating,
            Self::Submitting => StateKind::Submitting,
            Self::Succeeded(_) => StateKind::Succeeded,
            Self::Failed(_) => StateKind::Failed,
        }
    }

    /// An attempt is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Succeeded(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A state change as seen by observers
#[derive(Debug)]
pub struct Transition<'a> {
    pub from: StateKind,
    pub to: &'a SubmissionState,
}

impl Transition<'_> {
    pub fn entered(&self, kind: StateKind) -> bool {
        self.to.kind() == kind && self.from != kind
    }
}

/// Called once per state change, after the new state is in place.
/// Implementations must not call back into the controller's `submit`.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, transition: &Transition<'_>);
}

pub struct SubmissionController {
    service: Arc<dyn AnalysisService>,
    state: Mutex<SubmissionState>,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            state: Mutex::new(SubmissionState::Idle),
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    pub fn kind(&self) -> StateKind {
        self.lock_state().kind()
    }

    /// Run one attempt. Validation and in-progress rejections return without
    /// touching the state; every other failure ends in `Failed`.
    pub async fn submit(
        &self,
        file: Option<&UploadedFile>,
        job_description: &JobDescription,
    ) -> Result<AnalysisReport, SubmissionError> {
        let attempt = Uuid::new_v4();
        let span = info_span!("submission", %attempt);
        self.run(file, job_description).instrument(span).await
    }

    async fn run(
        &self,
        file: Option<&UploadedFile>,
        job_description: &JobDescription,
    ) -> Result<AnalysisReport, SubmissionError> {
        let valid = self.begin(file)?;
        info!(
            "Submitting {} ({} bytes)",
            valid.file().name(),
            valid.file().len()
        );

        let request = AnalysisRequest::new(valid, job_description.clone());
        self.transition(SubmissionState::Submitting)?;

        let in_flight = InFlight::new(self);
        let outcome = self.service.analyze(&request).await;
        in_flight.disarm();

        match outcome {
            Ok(body) => {
                let report = AnalysisReport::from_response(&body).with_received_at(Utc::now());
                info!("Analysis received, total score {}", report.total());
                self.transition(SubmissionState::Succeeded(report.clone()))?;
                Ok(report)
            }
            Err(err) => {
                warn!("Submission failed: {}", err);
                self.transition(SubmissionState::Failed(err.to_string()))?;
                Err(err)
            }
        }
    }

    /// Guard and gate in one critical section, so two callers can never both
    /// pass the in-progress check.
    fn begin(&self, file: Option<&UploadedFile>) -> Result<ValidFile, SubmissionError> {
        let (from, valid) = {
            let mut state = self.lock_state();
            if state.is_busy() {
                debug!("Rejecting submission while {}", state.kind());
                return Err(SubmissionError::InProgress);
            }
            let valid = validator::validate(file)?;
            let from = Self::apply(&mut state, SubmissionState::Validating)?;
            (from, valid)
        };
        self.notify(from, &SubmissionState::Validating);
        Ok(valid)
    }

    fn transition(&self, next: SubmissionState) -> Result<(), SubmissionError> {
        let from = Self::apply(&mut self.lock_state(), next.clone())?;
        self.notify(from, &next);
        Ok(())
    }

    fn apply(state: &mut SubmissionState, next: SubmissionState) -> Result<StateKind, SubmissionError> {
        let from = state.kind();
        let to = next.kind();
        if !from.can_transition_to(to) {
            return Err(SubmissionError::InvalidTransition { from, to });
        }
        *state = next;
        Ok(from)
    }

    fn notify(&self, from: StateKind, to: &SubmissionState) {
        debug!("Submission state {} -> {}", from, to.kind());
        let transition = Transition { from, to };
        for observer in &self.observers {
            observer.on_transition(&transition);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Moves `Submitting` to `Failed` if the submit future is dropped while the
/// service call is pending, so the controller accepts the next attempt.
struct InFlight<'a> {
    controller: &'a SubmissionController,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(controller: &'a SubmissionController) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Submission dropped before the service answered");
        let cancelled = SubmissionState::Failed(SubmissionError::Cancelled.to_string());
        if let Err(err) = self.controller.transition(cancelled) {
            warn!("Could not release cancelled submission: {}", err);
        }
    }
}
