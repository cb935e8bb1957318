use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// Recovered per-descriptor failures do not change the exit status: the
/// run succeeds whenever the artifact was written. `Error` covers fatal
/// conditions only (unwritable output, bad configuration, missing
/// definitions directory).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and the artifact (if any) was written.
    Success,
    /// Command failed due to a fatal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
