//! Focus State - the per-frame placement state machine
//!
//! The decision is a pure function of three inputs: the frame's tracking
//! state, the ray cast answer and whether the coaching overlay is active.
//! `FocusState` only remembers which case it resolved to last, so it can
//! report show/hide transitions. It never reuses geometry from earlier frames.

use std::fmt;

use anchor_core::FrameSnapshot;
use tracing::debug;

use crate::{RaycastQuery, RaycastResult, SurfaceHit, SurfaceQuery};

/// Where the focus indicator belongs this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPlacement {
    /// No usable surface: keep the indicator in front of the camera
    Initializing,
    /// A surface was hit: put the indicator on it
    Detecting { hit: SurfaceHit },
    /// Coaching overlay is active: hide the indicator
    Suppressed,
}

impl FocusPlacement {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FocusPlacement::Suppressed)
    }

    pub fn case(&self) -> FocusCase {
        match self {
            FocusPlacement::Initializing => FocusCase::Initializing,
            FocusPlacement::Detecting { .. } => FocusCase::Detecting,
            FocusPlacement::Suppressed => FocusCase::Suppressed,
        }
    }

    pub fn hit(&self) -> Option<&SurfaceHit> {
        match self {
            FocusPlacement::Detecting { hit } => Some(hit),
            _ => None,
        }
    }
}

/// Geometry-free tag of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusCase {
    Initializing,
    Detecting,
    Suppressed,
}

impl fmt::Display for FocusCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FocusCase::Initializing => "initializing",
            FocusCase::Detecting => "detecting",
            FocusCase::Suppressed => "suppressed",
        };
        f.write_str(name)
    }
}

/// Resolve one frame.
///
/// Priority: an active overlay suppresses the indicator and skips the ray
/// cast; otherwise a surface hit wins; everything else (no hit, limited or
/// unavailable tracking) falls back to `Initializing`.
pub fn compute_frame<F>(
    snapshot: &FrameSnapshot,
    raycast: F,
    overlay_active: bool,
    query: &SurfaceQuery,
) -> FocusPlacement
where
    F: FnOnce(&RaycastQuery) -> Vec<RaycastResult>,
{
    if overlay_active {
        return FocusPlacement::Suppressed;
    }

    match query.execute(snapshot, raycast) {
        Some(hit) => FocusPlacement::Detecting { hit },
        None => FocusPlacement::Initializing,
    }
}

/// A change of resolved case between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// `None` on the very first frame
    pub from: Option<FocusCase>,
    pub to: FocusCase,
}

impl Transition {
    /// Indicator goes from hidden to shown.
    ///
    /// Before the first frame the indicator has never been shown, so
    /// `from: None` counts as hidden.
    pub fn shows(&self) -> bool {
        !self.was_visible() && self.to != FocusCase::Suppressed
    }

    /// Indicator goes from shown to hidden
    pub fn hides(&self) -> bool {
        self.was_visible() && self.to == FocusCase::Suppressed
    }

    fn was_visible(&self) -> bool {
        matches!(self.from, Some(case) if case != FocusCase::Suppressed)
    }
}

/// Result of one `FocusState::update`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub placement: FocusPlacement,
    pub transition: Option<Transition>,
}

/// Focus indicator state machine
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    query: SurfaceQuery,
    last: Option<FocusCase>,
}

impl FocusState {
    pub fn new(query: SurfaceQuery) -> Self {
        Self { query, last: None }
    }

    pub fn query(&self) -> &SurfaceQuery {
        &self.query
    }

    /// Case resolved by the previous update
    pub fn last_case(&self) -> Option<FocusCase> {
        self.last
    }

    /// Advance one frame
    pub fn update<F>(
        &mut self,
        snapshot: &FrameSnapshot,
        raycast: F,
        overlay_active: bool,
    ) -> FrameOutcome
    where
        F: FnOnce(&RaycastQuery) -> Vec<RaycastResult>,
    {
        let placement = compute_frame(snapshot, raycast, overlay_active, &self.query);
        let case = placement.case();

        let transition = if self.last == Some(case) {
            None
        } else {
            let t = Transition {
                from: self.last,
                to: case,
            };
            debug!(
                sequence = snapshot.sequence,
                from = ?t.from,
                to = %t.to,
                tracking = ?snapshot.tracking,
                "focus placement changed"
            );
            Some(t)
        };
        self.last = Some(case);

        FrameOutcome {
            placement,
            transition,
        }
    }

    /// Forget the last resolved case
    pub fn reset(&mut self) {
        self.last = None;
    }
}
