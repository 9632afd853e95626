//! Surface Query - what real surface is under the screen centre, if any

use anchor_core::{CameraPose, FrameSnapshot, Rotation, ScreenPoint, SceneVector, TrackingState};
use tracing::trace;

use crate::{RaycastQuery, RaycastResult, RaycastTarget, TargetAlignment};

/// A surface found this frame.
///
/// Built once by `SurfaceQuery::execute` and never mutated. It lives for a
/// single frame; nothing carries it over to the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    position: SceneVector,
    normal: SceneVector,
    alignment: TargetAlignment,
    distance: f32,
    tracking: TrackingState,
    camera: CameraPose,
}

impl SurfaceHit {
    pub fn new(result: RaycastResult, tracking: TrackingState, camera: CameraPose) -> Self {
        Self {
            position: result.position,
            normal: result.normal,
            alignment: result.alignment,
            distance: result.distance,
            tracking,
            camera,
        }
    }

    pub fn position(&self) -> SceneVector {
        self.position
    }

    pub fn normal(&self) -> SceneVector {
        self.normal
    }

    pub fn alignment(&self) -> TargetAlignment {
        self.alignment
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Tracking state the hit was computed under
    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    /// Camera pose of the frame the hit belongs to
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    /// Rotation taking the indicator's up axis onto the surface normal
    pub fn orientation(&self) -> Rotation {
        Rotation::from_arc(SceneVector::UP, self.normal)
    }
}

/// Screen-centre ray cast against the tracker's estimated surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceQuery {
    point: ScreenPoint,
    alignment: TargetAlignment,
}

impl Default for SurfaceQuery {
    fn default() -> Self {
        Self::screen_center()
    }
}

impl SurfaceQuery {
    pub fn new(point: ScreenPoint, alignment: TargetAlignment) -> Self {
        Self { point, alignment }
    }

    /// Query from the middle of the screen, any surface orientation
    pub fn screen_center() -> Self {
        Self::new(ScreenPoint::CENTER, TargetAlignment::Any)
    }

    pub fn with_alignment(mut self, alignment: TargetAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn point(&self) -> ScreenPoint {
        self.point
    }

    pub fn alignment(&self) -> TargetAlignment {
        self.alignment
    }

    /// The ray cast request this query submits
    pub fn raycast_query(&self) -> RaycastQuery {
        RaycastQuery {
            point: self.point,
            target: RaycastTarget::EstimatedPlane,
            alignment: self.alignment,
        }
    }

    /// Run the query against one frame.
    ///
    /// `raycast` is only invoked when tracking is `Normal`. Of the results it
    /// returns, only the first (nearest) one is used. An empty answer is a
    /// normal outcome and yields `None`.
    pub fn execute<F>(&self, snapshot: &FrameSnapshot, raycast: F) -> Option<SurfaceHit>
    where
        F: FnOnce(&RaycastQuery) -> Vec<RaycastResult>,
    {
        if !snapshot.tracking.is_normal() {
            trace!(
                sequence = snapshot.sequence,
                tracking = ?snapshot.tracking,
                "surface query skipped"
            );
            return None;
        }

        let query = self.raycast_query();
        let first = raycast(&query).into_iter().next()?;
        Some(SurfaceHit::new(first, snapshot.tracking, snapshot.camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_core::{FrameTime, LimitedReason};
    use std::cell::Cell;

    fn snapshot(tracking: TrackingState) -> FrameSnapshot {
        FrameSnapshot::new(1, FrameTime::from_millis(16), CameraPose::identity(), tracking)
    }

    #[test]
    fn test_query_shape() {
        let q = SurfaceQuery::default().raycast_query();
        assert_eq!(q.point, ScreenPoint::CENTER);
        assert_eq!(q.target, RaycastTarget::EstimatedPlane);
        assert_eq!(q.alignment, TargetAlignment::Any);

        let q = SurfaceQuery::default()
            .with_alignment(TargetAlignment::Horizontal)
            .raycast_query();
        assert_eq!(q.alignment, TargetAlignment::Horizontal);
    }

    #[test]
    fn test_first_result_wins() {
        let near = RaycastResult::horizontal(SceneVector::new(0.0, 0.0, -1.0)).with_distance(1.0);
        let far = RaycastResult::horizontal(SceneVector::new(0.0, 0.0, -3.0)).with_distance(3.0);

        let hit = SurfaceQuery::default()
            .execute(&snapshot(TrackingState::Normal), |_| vec![near, far])
            .unwrap();

        assert_eq!(hit.position(), near.position);
        assert_eq!(hit.distance(), 1.0);
        assert_eq!(hit.tracking(), TrackingState::Normal);
    }

    #[test]
    fn test_empty_answer_is_none() {
        let hit = SurfaceQuery::default().execute(&snapshot(TrackingState::Normal), |_| vec![]);
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_skipped_without_normal_tracking() {
        let calls = Cell::new(0);
        for tracking in [
            TrackingState::NotAvailable,
            TrackingState::Limited(LimitedReason::InsufficientFeatures),
        ] {
            let hit = SurfaceQuery::default().execute(&snapshot(tracking), |_| {
                calls.set(calls.get() + 1);
                vec![RaycastResult::horizontal(SceneVector::new(1.0, 1.0, 1.0))]
            });
            assert!(hit.is_none());
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_orientation_follows_normal() {
        let wall = RaycastResult::new(
            SceneVector::new(0.0, 1.0, -2.0),
            SceneVector::new(0.0, 0.0, 1.0),
            TargetAlignment::Vertical,
        );
        let hit = SurfaceHit::new(wall, TrackingState::Normal, CameraPose::identity());
        let up = hit.orientation().rotate(SceneVector::UP);
        assert!(up.approx_eq(&SceneVector::new(0.0, 0.0, 1.0), 1e-5));
    }
}
