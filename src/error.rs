use thiserror::Error;

/// Per-file failure reasons. One of these never aborts the batch; the
/// orchestrator records it and moves on to the next job.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source image could not be opened or parsed
    #[error("decode error: {0}")]
    Decode(String),

    /// Writing the WebP output or the intermediate PNG failed
    #[error("encode error: {0}")]
    Encode(String),
}
