pub mod error;
pub mod exception;
pub mod outcome;
mod parse;

pub use error::{
    ISSUE_EXCEPTION, ISSUE_TASK_ERROR, KIND_EXCEPTION_ERROR, KIND_TASK_ERROR, OutcomeError,
};
pub use exception::ExceptionInfo;
pub use outcome::{Outcome, TaskOutput};
