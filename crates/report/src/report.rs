use std::io::Write;

use serde_json::Value;

use drover_outcome::{ExceptionInfo, Outcome};

use crate::error::RenderError;
use crate::output::RunOutput;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Human-facing classification of one execution attempt.
///
/// The executor picks the variant once, at construction: a raised exception
/// becomes `Exception`, a nonzero exit code becomes `Failure`, anything
/// else `Success`. A report is a terminal snapshot — it renders (any number
/// of times) and converts to an [`Outcome`], and never mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
    Success {
        value: Value,
        output: Option<RunOutput>,
    },
    Failure {
        exit_code: i32,
        output: Option<RunOutput>,
    },
    Exception {
        exception: ExceptionInfo,
    },
}

impl RunReport {
    pub fn success(value: impl Into<Value>, output: Option<RunOutput>) -> Self {
        Self::Success {
            value: value.into(),
            output,
        }
    }

    pub fn failure(exit_code: i32, output: Option<RunOutput>) -> Self {
        Self::Failure { exit_code, output }
    }

    pub fn exception(exception: ExceptionInfo) -> Self {
        Self::Exception { exception }
    }

    /// Classify a finished process by its exit code.
    pub fn from_exit(exit_code: i32, output: RunOutput) -> Self {
        if exit_code == 0 {
            Self::success("", Some(output))
        } else {
            Self::failure(exit_code, Some(output))
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success { .. } => 0,
            Self::Failure { exit_code, .. } => *exit_code,
            Self::Exception { .. } => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Chain a dependent step. A success hands its value to `next` and
    /// returns the new report; failures pass through untouched and `next`
    /// never runs.
    pub fn and_then(self, next: impl FnOnce(Value) -> RunReport) -> RunReport {
        match self {
            Self::Success { value, .. } => next(value),
            other => other,
        }
    }

    /// Render to `sink`.
    ///
    /// With captured output: stdout then stderr, verbatim bytes. Without:
    /// a success prints its scalar value on one line, a failure prints
    /// nothing, and an exception prints its message.
    pub fn print_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), RenderError> {
        match self {
            Self::Success { value, output } => match output {
                Some(output) => output.copy_to(sink)?,
                None => writeln!(sink, "{}", scalar_line(value))?,
            },
            Self::Failure { output, .. } => {
                if let Some(output) = output {
                    output.copy_to(sink)?;
                }
            }
            Self::Exception { exception } => writeln!(sink, "{}", exception.message)?,
        }
        Ok(())
    }

    /// Render to an in-memory string with the same logic as [`print_to`].
    pub fn output_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.print_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Bracket `block` in this report's ANSI color when the destination
    /// supports it: green for success, red for any failure. Without color
    /// support the block runs bare, with no escape bytes at all.
    pub fn colorize<W, F>(
        &self,
        sink: &mut W,
        supports_color: bool,
        block: F,
    ) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
        F: FnOnce(&mut W) -> Result<(), RenderError>,
    {
        if !supports_color {
            return block(sink);
        }
        let color = if self.is_success() { GREEN } else { RED };
        sink.write_all(color.as_bytes())?;
        block(sink)?;
        sink.write_all(RESET.as_bytes())?;
        Ok(())
    }

    /// [`print_to`] wrapped in [`colorize`].
    pub fn print_colorized<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        supports_color: bool,
    ) -> Result<(), RenderError> {
        self.colorize(sink, supports_color, |s| self.print_to(s))
    }

    /// Discard the captured detail, keeping only the outcome class.
    pub fn to_outcome(&self) -> Outcome {
        match self {
            Self::Success { .. } | Self::Failure { .. } => Outcome::Generic,
            Self::Exception { exception } => Outcome::exception(exception.clone()),
        }
    }

    /// Interpret the captured streams as a shell command's result. Reports
    /// with no captured output convert with empty streams.
    pub fn to_command_outcome(&self) -> Outcome {
        match self {
            Self::Success { output, .. } | Self::Failure { output, .. } => {
                let (stdout, stderr) = stream_text(output);
                Outcome::command(stdout, stderr, self.exit_code())
            }
            Self::Exception { exception } => Outcome::exception(exception.clone()),
        }
    }

    /// Interpret the captured streams as a task's result: stdout goes
    /// through JSON interpretation and the failure side synthesizes its
    /// default error. An exception converts exactly as in [`RunReport::to_outcome`],
    /// since no task ever ran.
    pub fn to_task_outcome(&self) -> Outcome {
        match self {
            Self::Success { output, .. } => {
                let (stdout, stderr) = stream_text(output);
                Outcome::task_ok(stdout, stderr, 0)
            }
            Self::Failure { exit_code, output } => {
                let (stdout, stderr) = stream_text(output);
                Outcome::task_failed(stdout, stderr, *exit_code)
            }
            Self::Exception { exception } => Outcome::exception(exception.clone()),
        }
    }
}

fn stream_text(output: &Option<RunOutput>) -> (String, String) {
    match output {
        Some(output) => (output.stdout_lossy(), output.stderr_lossy()),
        None => (String::new(), String::new()),
    }
}

/// Success values are conventionally strings; anything else renders as JSON.
fn scalar_line(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
