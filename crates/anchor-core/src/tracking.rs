//! Tracking state - what the tracking subsystem reports every frame
//!
//! Pose estimation itself happens elsewhere. Anchor only consumes the
//! per-frame result: a camera pose and a confidence classification.

use crate::{FrameTime, SceneVector, Transform};

/// Why tracking is currently limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitedReason {
    /// Session just started, not enough data yet
    Initializing,
    /// Device is moving too fast
    ExcessiveMotion,
    /// Scene lacks visible features
    InsufficientFeatures,
    /// Recovering after an interruption
    Relocalizing,
}

/// Tracking quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingState {
    NotAvailable,
    Limited(LimitedReason),
    Normal,
}

impl TrackingState {
    /// Every distinct tracking state
    pub fn all() -> &'static [TrackingState] {
        &[
            TrackingState::NotAvailable,
            TrackingState::Limited(LimitedReason::Initializing),
            TrackingState::Limited(LimitedReason::ExcessiveMotion),
            TrackingState::Limited(LimitedReason::InsufficientFeatures),
            TrackingState::Limited(LimitedReason::Relocalizing),
            TrackingState::Normal,
        ]
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, TrackingState::Normal)
    }

    pub fn limited_reason(&self) -> Option<LimitedReason> {
        match self {
            TrackingState::Limited(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Camera-to-world pose for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraPose {
    pub transform: Transform,
}

impl CameraPose {
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn position(&self) -> SceneVector {
        self.transform.position
    }

    /// World-space viewing direction
    pub fn forward(&self) -> SceneVector {
        self.transform.rotation.rotate(SceneVector::FORWARD)
    }
}

/// Everything the tracking subsystem reports for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// Frame sequence number
    pub sequence: u64,
    pub timestamp: FrameTime,
    pub camera: CameraPose,
    pub tracking: TrackingState,
}

impl FrameSnapshot {
    pub fn new(
        sequence: u64,
        timestamp: FrameTime,
        camera: CameraPose,
        tracking: TrackingState,
    ) -> Self {
        Self {
            sequence,
            timestamp,
            camera,
            tracking,
        }
    }
}
