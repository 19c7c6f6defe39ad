//! Validation Engine
//!
//! Turns the external validator's diagnostic stream into a report.

use std::borrow::Cow;
use std::path::Path;

use crate::error::ExecutionError;
use crate::report::ValidationReport;
use crate::validation::process::{DiagnosticSource, ProcessSource, ValidatorCommand};

/// Lines carrying this marker are reported as issues
pub const ERROR_MARKER: &str = "ERROR";

/// Classify a captured diagnostic stream into a finalized report.
///
/// Every `\n`-separated line containing [`ERROR_MARKER`] becomes one issue,
/// trailing whitespace removed. Lines that are not valid UTF-8 are still
/// checked for the marker and kept with invalid bytes replaced; the first such
/// line also adds one issue noting the undecodable output.
pub fn classify_diagnostics(diagnostics: &[u8]) -> ValidationReport {
    let mut report = ValidationReport::builder();
    let mut reported_undecodable = false;

    for (index, raw) in diagnostics.split(|&b| b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => Cow::Borrowed(line),
            Err(e) => {
                if !reported_undecodable {
                    reported_undecodable = true;
                    report.log_error(format!(
                        "Validator output line {} could not be decoded as text: {}",
                        index + 1,
                        e
                    ));
                }
                log::debug!("Validator output line {} is not valid UTF-8", index + 1);
                String::from_utf8_lossy(raw)
            }
        };

        if has_marker(raw) {
            report.log_error(line.trim_end());
        } else if !line.is_empty() {
            log::trace!("Ignoring validator output: {}", line.trim_end());
        }
    }

    report.finalize()
}

/// Marker test on raw bytes, so undecodable lines are not missed
fn has_marker(raw: &[u8]) -> bool {
    raw.windows(ERROR_MARKER.len())
        .any(|window| window == ERROR_MARKER.as_bytes())
}

/// Runs a [`DiagnosticSource`] against files and reports on them
#[derive(Debug, Clone)]
pub struct Validator<S> {
    source: S,
}

impl Validator<ProcessSource> {
    /// Validator backed by `fastq_info -r -s`
    pub fn fastq_info() -> Self {
        Self::from_command(ValidatorCommand::fastq_info())
    }

    pub fn from_command(command: ValidatorCommand) -> Self {
        Self::new(ProcessSource::new(command))
    }
}

impl<S: DiagnosticSource> Validator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate one file.
    ///
    /// A file with defects still yields `Ok` with an `INVALID` report;
    /// `Err` means the validator itself could not run.
    pub async fn validate(&self, path: &Path) -> Result<ValidationReport, ExecutionError> {
        let output = self.source.run(path).await?;

        match output.exit_code {
            Some(code) => log::debug!("Validator exited with status {}", code),
            None => log::debug!("Validator terminated by signal"),
        }

        let report = classify_diagnostics(&output.diagnostics);
        log::info!(
            "{}: {} ({} issue(s))",
            path.display(),
            report.state().as_str(),
            report.issues().len()
        );

        Ok(report)
    }
}
