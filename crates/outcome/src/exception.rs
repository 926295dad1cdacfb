use crate::error::OutcomeError;

/// What the executor captured from a raised exception: a human-readable
/// message and some string rendering of where it came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExceptionInfo {
    pub message: String,
    pub stack_trace: String,
}

impl ExceptionInfo {
    pub fn new(message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }

    /// Capture from any error value. The stack trace is the source chain,
    /// outermost first, one cause per line.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let message = err.to_string();
        let mut lines = vec![message.clone()];
        let mut cause = err.source();
        while let Some(c) = cause {
            lines.push(format!("caused by: {c}"));
            cause = c.source();
        }
        Self {
            message,
            stack_trace: lines.join("\n"),
        }
    }

    /// Build the uniform exception-error entry for this exception.
    #[must_use]
    pub fn to_error(&self) -> OutcomeError {
        OutcomeError::exception(self.message.clone(), self.stack_trace.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("inner failure")]
    struct Inner;

    #[test]
    fn from_error_takes_display_message() {
        let info = ExceptionInfo::from_error(&Inner);
        assert_eq!(info.message, "inner failure");
        assert_eq!(info.stack_trace, "inner failure");
    }

    #[test]
    fn from_error_walks_source_chain() {
        let err = Outer { inner: Inner };
        let info = ExceptionInfo::from_error(&err);
        assert_eq!(info.message, "outer failure");
        assert_eq!(info.stack_trace, "outer failure\ncaused by: inner failure");
    }

    #[test]
    fn to_error_carries_message_and_trace() {
        let info = ExceptionInfo::new("connection refused", "at transport");
        let err = info.to_error();
        assert_eq!(err.msg, "connection refused");
        assert_eq!(
            err.details,
            serde_json::json!({ "stack_trace": "at transport" })
        );
    }

    #[test]
    fn serde_round_trip() {
        let info = ExceptionInfo::new("boom", "trace line");
        let json = serde_json::to_string(&info).unwrap();
        let back: ExceptionInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
