//! Submission flow over one form instance.
//!
//! ```text
//! Idle --submit--> Validating --ok--> Submitting --handler--> Idle
//!                      |
//!                      +--invalid--> set_errors --> Idle
//! ```

mod validation;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::registry::{ErrorMap, FieldRegistry};

pub use validation::{
    FormValidator, MessageCatalog, SchemaValidator, ValidationErrors, ValidationIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("payload does not match the handler's shape")]
    Payload(#[from] serde_json::Error),
}

/// A blocking, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Invalid(ErrorMap),
    Failed { alert: Alert, reason: String },
    /// A submission is already in flight for this form.
    Busy,
}

/// Receives the validated payload. Failures are shown to the user, never
/// retried.
pub trait SubmitHandler {
    fn handle(&mut self, payload: Value) -> Result<(), SubmitError>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(Value) -> Result<(), SubmitError>,
{
    fn handle(&mut self, payload: Value) -> Result<(), SubmitError> {
        self(payload)
    }
}

pub struct Form {
    registry: FieldRegistry,
    validator: Box<dyn FormValidator>,
    phase: SubmitPhase,
    failure_alert: Alert,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("registry", &self.registry)
            .field("phase", &self.phase)
            .field("failure_alert", &self.failure_alert)
            .finish_non_exhaustive()
    }
}

impl Form {
    pub fn new(validator: impl FormValidator + 'static) -> Self {
        Self {
            registry: FieldRegistry::new(),
            validator: Box::new(validator),
            phase: SubmitPhase::Idle,
            failure_alert: Alert::new("Error", "Submission failed"),
        }
    }

    pub fn with_failure_alert(mut self, alert: Alert) -> Self {
        self.failure_alert = alert;
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Validates and submits in one step.
    pub fn submit<H>(&mut self, handler: &mut H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        match self.prepare() {
            Ok(payload) => {
                let result = handler.handle(payload);
                self.finish(result)
            }
            Err(outcome) => outcome,
        }
    }

    /// First half of a submission: collects and validates the payload. On
    /// success the form stays in [`SubmitPhase::Submitting`] until
    /// [`Form::finish`] is called, and further submits report `Busy`.
    pub fn prepare(&mut self) -> Result<Value, SubmitOutcome> {
        if self.phase != SubmitPhase::Idle {
            warn!(phase = ?self.phase, "submit ignored while another is in flight");
            return Err(SubmitOutcome::Busy);
        }
        self.phase = SubmitPhase::Validating;
        self.registry.clear_errors();
        let payload = self.registry.collect_payload();
        match self.validator.validate(&payload) {
            Ok(()) => {
                self.phase = SubmitPhase::Submitting;
                Ok(payload)
            }
            Err(errors) => {
                let map = errors.to_error_map();
                info!(issues = errors.len(), fields = map.len(), "validation failed");
                self.registry.set_errors(map.clone());
                self.phase = SubmitPhase::Idle;
                Err(SubmitOutcome::Invalid(map))
            }
        }
    }

    /// Second half of a submission. Field values are left untouched either way
    /// so the user can retry.
    pub fn finish(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        if self.phase != SubmitPhase::Submitting {
            warn!(phase = ?self.phase, "finishing a submission that was not started");
        }
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(()) => {
                info!("form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                error!(error = %err, "submission failed");
                SubmitOutcome::Failed {
                    alert: self.failure_alert.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }
}
