//! Status lines reported back to the caller after an operation.

use std::fmt;

/// One-line outcome of a planner operation.
///
/// The planner reports results as plain status text; this wrapper adds the
/// `Success:`/`Error:` prefix the CLI prints.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// A status for an operation that did what was asked.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// A status for an operation that was refused or recovered from a
    /// failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}
