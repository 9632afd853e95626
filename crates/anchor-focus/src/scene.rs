//! Scene - applying a placement to the single focus indicator
//!
//! The indicator is created once and never destroyed. Each frame only its
//! parent attachment, local transform and visibility change, and all three are
//! committed together.

use std::sync::Arc;

use anchor_core::{
    CameraPose, Rotation, SceneVector, ScreenProjector, Transform, Viewport,
};
use parking_lot::RwLock;

use crate::FocusPlacement;

/// Which scene node the indicator hangs off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Attachment {
    /// Follows the camera (point of view node)
    #[default]
    CameraView,
    /// Fixed in the world
    WorldRoot,
}

/// How the camera-attached indicator is posed while initializing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorStyle {
    /// Metres in front of the camera
    pub billboard_distance: f32,
    /// Rotation about the camera's X axis so the indicator faces the viewer
    pub billboard_tilt: f32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            billboard_distance: 0.8,
            billboard_tilt: std::f32::consts::FRAC_PI_2,
        }
    }
}

impl IndicatorStyle {
    /// Local transform relative to the camera node
    pub fn billboard_transform(&self) -> Transform {
        Transform::from_position(SceneVector::FORWARD * self.billboard_distance)
            .with_rotation(Rotation::from_axis_angle(SceneVector::RIGHT, self.billboard_tilt))
    }
}

/// Parent and local transform of the indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPose {
    pub attachment: Attachment,
    pub transform: Transform,
}

/// Everything the renderer must change for one frame.
///
/// `pose` is `None` when only visibility changes; the indicator then keeps
/// whatever parent and transform it had.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneUpdate {
    pub pose: Option<IndicatorPose>,
    pub visible: bool,
}

/// Translate a placement into renderer commands
pub fn scene_update(placement: &FocusPlacement, style: &IndicatorStyle) -> SceneUpdate {
    match placement {
        FocusPlacement::Detecting { hit } => SceneUpdate {
            pose: Some(IndicatorPose {
                attachment: Attachment::WorldRoot,
                transform: Transform::from_position(hit.position())
                    .with_rotation(hit.orientation()),
            }),
            visible: true,
        },
        FocusPlacement::Initializing => SceneUpdate {
            pose: Some(IndicatorPose {
                attachment: Attachment::CameraView,
                transform: style.billboard_transform(),
            }),
            visible: true,
        },
        FocusPlacement::Suppressed => SceneUpdate {
            pose: None,
            visible: false,
        },
    }
}

/// The rendering collaborator.
///
/// The core never drives the render pipeline; it hands over the camera pose
/// and one `SceneUpdate` per frame.
pub trait SceneRenderer: ScreenProjector {
    /// Pixel size of the surface `unproject_point` works in
    fn viewport(&self) -> Viewport;

    /// Pose of the point-of-view node for the current frame
    fn set_point_of_view(&mut self, camera: &CameraPose);

    fn apply(&mut self, update: &SceneUpdate);
}

/// The focus indicator node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorNode {
    pub attachment: Attachment,
    /// Local transform relative to `attachment`
    pub transform: Transform,
    pub visible: bool,
    /// Number of updates committed so far
    pub commits: u64,
}

impl IndicatorNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, update: &SceneUpdate) {
        if let Some(pose) = update.pose {
            self.attachment = pose.attachment;
            self.transform = pose.transform;
        }
        self.visible = update.visible;
        self.commits += 1;
    }

    /// World transform given the current camera pose
    pub fn world_transform(&self, camera: &CameraPose) -> Transform {
        match self.attachment {
            Attachment::CameraView => camera.transform.then(&self.transform),
            Attachment::WorldRoot => self.transform,
        }
    }
}

/// Indicator node shared between the frame loop (single writer) and readers
/// on other threads. Updates land under one write lock, so a reader never
/// sees one frame's position with another frame's orientation.
#[derive(Debug, Clone, Default)]
pub struct SharedIndicator {
    inner: Arc<RwLock<IndicatorNode>>,
}

impl SharedIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&self, update: &SceneUpdate) {
        self.inner.write().commit(update);
    }

    /// Consistent copy of the node
    pub fn snapshot(&self) -> IndicatorNode {
        self.inner.read().clone()
    }
}

/// Minimal perspective camera model: enough to unproject screen points.
#[derive(Debug, Clone, Copy)]
pub struct PinholeView {
    pub viewport: Viewport,
    /// Vertical field of view in radians
    pub vertical_fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera: CameraPose,
}

impl PinholeView {
    pub fn new(viewport: Viewport, vertical_fov: f32) -> Self {
        Self {
            viewport,
            vertical_fov,
            near: 0.001,
            far: 1000.0,
            camera: CameraPose::identity(),
        }
    }
}

impl ScreenProjector for PinholeView {
    /// `point.z` is linear depth between the near (0) and far (1) planes
    fn unproject_point(&self, point: SceneVector) -> SceneVector {
        let ndc = self.viewport.to_ndc(point.x, point.y);
        let tan = (self.vertical_fov * 0.5).tan();
        let aspect = self.viewport.width() / self.viewport.height();
        let depth = self.near + point.z * (self.far - self.near);

        let ray = SceneVector::new(ndc.x * tan * aspect, ndc.y * tan, -1.0);
        self.camera.transform.transform_point(ray * depth)
    }
}
