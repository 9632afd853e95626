//! Ray cast queries and results exchanged with the tracking subsystem

use anchor_core::{ScreenPoint, SceneVector};

/// Which surface orientations a ray cast may hit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetAlignment {
    Horizontal,
    Vertical,
    #[default]
    Any,
}

impl TargetAlignment {
    /// Does a query filtered by `self` accept a surface tagged `surface`?
    pub fn admits(&self, surface: TargetAlignment) -> bool {
        match self {
            TargetAlignment::Any => true,
            filter => *filter == surface,
        }
    }
}

/// What kind of surface estimate a ray cast may intersect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaycastTarget {
    /// Surfaces the tracker estimates but has not yet confirmed as planes
    EstimatedPlane,
    /// Detected planes, bounded by their geometry
    ExistingPlaneGeometry,
    /// Detected planes, extended infinitely
    ExistingPlaneInfinite,
}

/// A single ray cast request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    pub point: ScreenPoint,
    pub target: RaycastTarget,
    pub alignment: TargetAlignment,
}

/// One surface intersection. The tracker returns these nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastResult {
    /// World-space intersection point
    pub position: SceneVector,
    /// World-space surface normal (unit length)
    pub normal: SceneVector,
    /// Orientation class of the hit surface
    pub alignment: TargetAlignment,
    /// Distance from the camera along the ray
    pub distance: f32,
}

impl RaycastResult {
    pub fn new(position: SceneVector, normal: SceneVector, alignment: TargetAlignment) -> Self {
        Self {
            position,
            normal: normal.normalized(),
            alignment,
            distance: 0.0,
        }
    }

    /// A floor or table-top hit
    pub fn horizontal(position: SceneVector) -> Self {
        Self::new(position, SceneVector::UP, TargetAlignment::Horizontal)
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }
}
