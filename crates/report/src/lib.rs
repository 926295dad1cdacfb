pub mod error;
pub mod output;
pub mod report;

pub use error::RenderError;
pub use output::{OutputBuffer, RunOutput};
pub use report::RunReport;
