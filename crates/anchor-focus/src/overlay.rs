//! Coaching overlay - the UI layer that guides the user to find a surface
//!
//! The overlay runs its own detection logic. The focus core only reads one
//! bit from it: is it guiding the user right now?

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the overlay coaches the user towards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CoachingGoal {
    /// Just establish tracking
    Tracking,
    #[default]
    HorizontalPlane,
    VerticalPlane,
    AnyPlane,
}

/// Fixed overlay configuration, owned by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachingConfig {
    pub goal: CoachingGoal,
    /// Overlay shows itself whenever its goal is unmet
    pub activates_automatically: bool,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            goal: CoachingGoal::HorizontalPlane,
            activates_automatically: true,
        }
    }
}

/// Read-only view of the overlay
pub trait CoachingOverlay {
    /// Is the overlay currently guiding the user?
    fn is_active(&self) -> bool;
}

/// Overlay that is always in the same state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticOverlay(pub bool);

impl CoachingOverlay for StaticOverlay {
    fn is_active(&self) -> bool {
        self.0
    }
}

impl CoachingOverlay for AtomicBool {
    fn is_active(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: CoachingOverlay + ?Sized> CoachingOverlay for &T {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

impl<T: CoachingOverlay + ?Sized> CoachingOverlay for Arc<T> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Handle for hosts whose overlay flips its active flag from the UI side
#[derive(Debug, Clone, Default)]
pub struct OverlayHandle {
    config: CoachingConfig,
    active: Arc<AtomicBool>,
}

impl OverlayHandle {
    pub fn new(config: CoachingConfig) -> Self {
        Self {
            config,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &CoachingConfig {
        &self.config
    }

    /// Called by the overlay when it starts or stops guiding
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }
}

impl CoachingOverlay for OverlayHandle {
    fn is_active(&self) -> bool {
        self.active.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoachingConfig::default();
        assert_eq!(config.goal, CoachingGoal::HorizontalPlane);
        assert!(config.activates_automatically);
    }

    #[test]
    fn test_handle_is_shared() {
        let handle = OverlayHandle::new(CoachingConfig::default());
        let ui_side = handle.clone();

        assert!(!handle.is_active());
        ui_side.set_active(true);
        assert!(handle.is_active());
        assert!((&handle).is_active());
    }

    #[test]
    fn test_static_overlay() {
        assert!(StaticOverlay(true).is_active());
        assert!(!StaticOverlay::default().is_active());
    }
}
