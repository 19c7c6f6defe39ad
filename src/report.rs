//! Validation Report
//!
//! Typed representation of a validation run and its JSON wire shape.

use serde::{Serialize, Serializer};

/// Overall outcome of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// Not finalized yet
    #[default]
    Unset,
    Valid,
    Invalid,
}

impl ValidationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationState::Unset => "",
            ValidationState::Valid => "VALID",
            ValidationState::Invalid => "INVALID",
        }
    }
}

impl Serialize for ValidationState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single problem found in the validated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationIssue {
    /// Diagnostic text taken from the external validator
    General {
        #[serde(rename = "user_friendly_message")]
        message: String,
    },
    /// Problem tied to one FASTQ record
    Record {
        #[serde(rename = "user_friendly_message")]
        message: String,
        sequence_id: String,
    },
}

impl ValidationIssue {
    pub fn general(message: impl Into<String>) -> Self {
        ValidationIssue::General {
            message: message.into(),
        }
    }

    pub fn record(sequence_id: impl Into<String>) -> Self {
        let sequence_id = sequence_id.into();
        ValidationIssue::Record {
            message: format!(
                "Invalid sequence characters found in sequence with id {}.",
                sequence_id
            ),
            sequence_id,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationIssue::General { message } | ValidationIssue::Record { message, .. } => {
                message
            }
        }
    }

    pub fn sequence_id(&self) -> Option<&str> {
        match self {
            ValidationIssue::General { .. } => None,
            ValidationIssue::Record { sequence_id, .. } => Some(sequence_id),
        }
    }
}

/// Report under construction.
///
/// Issues are appended while the validator output is classified; once the
/// stream is consumed, [`ReportBuilder::finalize`] turns it into a
/// [`ValidationReport`] that can no longer change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportBuilder {
    issues: Vec<ValidationIssue>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.issues.push(ValidationIssue::general(message));
    }

    pub fn log_record_error(&mut self, sequence_id: impl Into<String>) {
        self.issues.push(ValidationIssue::record(sequence_id));
    }

    /// Always [`ValidationState::Unset`] until finalized
    pub fn state(&self) -> ValidationState {
        ValidationState::Unset
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Compute the state from the collected issues
    pub fn finalize(self) -> ValidationReport {
        let state = if self.issues.is_empty() {
            ValidationState::Valid
        } else {
            ValidationState::Invalid
        };
        ValidationReport {
            state,
            issues: self.issues,
        }
    }
}

/// Finalized result of one validation run.
///
/// The state is `INVALID` exactly when there are issues. There is no way to
/// add issues after finalization:
///
/// ```compile_fail
/// let mut report = fastq_validator::ValidationReport::ok();
/// report.log_error("ERROR: too late");
/// ```
///
/// Serializes to:
///
/// ```json
/// {"validation_state":"INVALID","validation_errors":[{"user_friendly_message":"..."}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    #[serde(rename = "validation_state")]
    state: ValidationState,
    #[serde(rename = "validation_errors")]
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Start an empty report
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    /// Known-good report: no issues, state `VALID`
    pub fn ok() -> Self {
        ReportBuilder::new().finalize()
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_valid(&self) -> bool {
        self.state == ValidationState::Valid
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
