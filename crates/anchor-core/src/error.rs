//! Error types for Anchor

use thiserror::Error;

/// Core Anchor errors
///
/// "No surface found" and degraded tracking are not errors. They are ordinary
/// frame outcomes and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnchorError {
    // Screen errors
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Screen point out of range: ({x}, {y})")]
    ScreenPointOutOfRange { x: f32, y: f32 },

    // Session errors
    #[error("Tracking session fault: {0}")]
    SessionFault(String),

    #[error("Frame limit reached after {0} frames")]
    FrameLimitReached(u64),
}

/// Result type for Anchor operations
pub type AnchorResult<T> = Result<T, AnchorError>;
