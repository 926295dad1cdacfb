use serde_json::{Map, Value, json};

use crate::error::OutcomeError;
use crate::exception::ExceptionInfo;
use crate::parse::parse_object;

/// Normalized result of executing one unit of work against one target.
///
/// Exactly one variant is chosen per execution, after raw exit code,
/// captured streams, and any structured stdout have been reconciled.
/// Consumers match exhaustively; there is no catch-all shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An execution acknowledged without any captured detail.
    Generic,
    /// A shell command: raw streams and exit code are the whole story.
    Command {
        stdout: String,
        stderr: String,
        exit_code: i32,
    },
    /// A task classified as successful.
    TaskOk(TaskOutput),
    /// A task classified as failed. Always carries an error: either the one
    /// the task embedded in stdout or the synthesized default.
    TaskFailed(TaskOutput),
    /// An exception raised before any command or task produced output.
    Exception(ExceptionInfo),
}

impl Outcome {
    pub fn command(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self::Command {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Classify a task run the executor counts as successful.
    pub fn task_ok(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self::TaskOk(TaskOutput::new(stdout.into(), stderr.into(), exit_code))
    }

    /// Classify a failed task run. When the task did not embed an `_error`
    /// of its own, the default task error is synthesized here, once.
    pub fn task_failed(
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        let mut output = TaskOutput::new(stdout.into(), stderr.into(), exit_code);
        if output.error.is_none() {
            output.error = Some(OutcomeError::task_error(exit_code).into_value());
        }
        Self::TaskFailed(output)
    }

    pub fn exception(exception: ExceptionInfo) -> Self {
        Self::Exception(exception)
    }

    /// The structured value of this execution, `None` where no value exists.
    pub fn value(&self) -> Option<Value> {
        match self {
            Self::Generic | Self::Exception(_) => None,
            Self::Command {
                stdout,
                stderr,
                exit_code,
            } => Some(json!({
                "stdout": stdout,
                "stderr": stderr,
                "exit_code": exit_code,
            })),
            Self::TaskOk(output) | Self::TaskFailed(output) => Some(output.value()),
        }
    }

    /// The structured error of this execution, `None` where none exists.
    ///
    /// Task variants surface whatever stdout embedded under `_error` (with
    /// `TaskFailed` falling back to the default fixed at construction); the
    /// exception variant builds its error from the captured exception.
    pub fn error(&self) -> Option<Value> {
        match self {
            Self::Generic | Self::Command { .. } => None,
            Self::TaskOk(output) | Self::TaskFailed(output) => output.error.clone(),
            Self::Exception(exception) => Some(exception.to_error().into_value()),
        }
    }

    /// Serialize to the generic mapping downstream consumers aggregate.
    ///
    /// Every variant reports `{"value": ..}` plus `"_error"` when an error
    /// is present — except `Exception`, which reports `{"_error": ..}` with
    /// no `value` key at all.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Self::Exception(exception) = self {
            map.insert("_error".to_string(), exception.to_error().into_value());
            return map;
        }
        map.insert("value".to_string(), self.value().unwrap_or(Value::Null));
        if let Some(error) = self.error() {
            map.insert("_error".to_string(), error);
        }
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Structural success: commands succeed on exit code zero, task variants
    /// by classification, exceptions never.
    ///
    /// A `TaskOk` whose stdout embedded `_error` still reports success here;
    /// the embedded error stays visible through [`Outcome::error`].
    pub fn is_success(&self) -> bool {
        match self {
            Self::Generic => true,
            Self::Command { exit_code, .. } => *exit_code == 0,
            Self::TaskOk(_) => true,
            Self::TaskFailed(_) => false,
            Self::Exception(_) => false,
        }
    }
}

/// Captured task output plus the result of interpreting stdout as JSON.
///
/// Parsing happens once, at construction. When stdout is a JSON object its
/// `_error` key (if any) is split off and the rest becomes the task value;
/// any other stdout is kept verbatim and surfaced under `_output`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutput {
    stdout: String,
    stderr: String,
    exit_code: i32,
    object: Option<Map<String, Value>>,
    pub(crate) error: Option<Value>,
}

impl TaskOutput {
    fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        let mut object = parse_object(&stdout);
        let error = object.as_mut().and_then(|map| map.remove("_error"));
        Self {
            stdout,
            stderr,
            exit_code,
            object,
            error,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// The task value: the parsed object minus `_error`, or raw stdout
    /// wrapped under `_output`.
    pub fn value(&self) -> Value {
        match &self.object {
            Some(map) => Value::Object(map.clone()),
            None => json!({ "_output": self.stdout }),
        }
    }

    /// The error carried by this output, if any: embedded `_error` content
    /// passed through unmodified, or the synthesized default on a failure.
    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }
}
