use thiserror::Error;

/// Errors from the presentation layer. Rendering itself cannot fail; only
/// writes to the destination sink can.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write to output sink failed: {0}")]
    Sink(#[from] std::io::Error),
}
