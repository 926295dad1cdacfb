use serde_json::{Value, json};

/// Error kind for a task that exited nonzero without reporting its own error.
pub const KIND_TASK_ERROR: &str = "puppetlabs.tasks/task-error";
/// Error kind for an exception raised before or during execution.
pub const KIND_EXCEPTION_ERROR: &str = "puppetlabs.tasks/exception-error";

pub const ISSUE_TASK_ERROR: &str = "TASK_ERROR";
pub const ISSUE_EXCEPTION: &str = "EXCEPTION";

/// Uniform error shape carried by failed outcomes.
///
/// Only the two shapes this core synthesizes itself go through this type.
/// Errors a task embeds in its own stdout under `_error` pass through as
/// raw JSON, with caller-defined `kind`/`issue_code` values.
#[derive(
    Debug, Clone, PartialEq, thiserror::Error, serde::Serialize, serde::Deserialize,
)]
#[error("{kind} ({issue_code}): {msg}")]
pub struct OutcomeError {
    pub kind: String,
    pub issue_code: String,
    pub msg: String,
    pub details: Value,
}

impl OutcomeError {
    /// Default error for a task that exited nonzero with no embedded `_error`.
    #[must_use]
    pub fn task_error(exit_code: i32) -> Self {
        Self {
            kind: KIND_TASK_ERROR.to_string(),
            issue_code: ISSUE_TASK_ERROR.to_string(),
            msg: format!("The task failed with exit code {exit_code}"),
            details: json!({ "exit_code": exit_code }),
        }
    }

    /// Error for an exception captured in place of any command or task output.
    #[must_use]
    pub fn exception(message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            kind: KIND_EXCEPTION_ERROR.to_string(),
            issue_code: ISSUE_EXCEPTION.to_string(),
            msg: message.into(),
            details: json!({ "stack_trace": stack_trace.into() }),
        }
    }

    /// Convert into the generic JSON object consumers see under `_error`.
    #[must_use]
    pub fn into_value(self) -> Value {
        json!({
            "kind": self.kind,
            "issue_code": self.issue_code,
            "msg": self.msg,
            "details": self.details,
        })
    }
}
