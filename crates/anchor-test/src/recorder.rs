//! Recording collaborators - renderer and overlay doubles

use std::cell::Cell;

use anchor_core::{CameraPose, SceneVector, ScreenProjector, Viewport};
use anchor_focus::{
    CoachingOverlay, IndicatorNode, PinholeView, SceneRenderer, SceneUpdate, SharedIndicator,
};

/// Renderer that keeps every command it receives
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    view: PinholeView,
    indicator: SharedIndicator,
    updates: Vec<SceneUpdate>,
    points_of_view: Vec<CameraPose>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(Viewport::default(), 60f32.to_radians())
    }
}

impl RecordingRenderer {
    pub fn new(viewport: Viewport, vertical_fov: f32) -> Self {
        Self {
            view: PinholeView::new(viewport, vertical_fov),
            indicator: SharedIndicator::new(),
            updates: Vec::new(),
            points_of_view: Vec::new(),
        }
    }

    /// Every update applied so far, oldest first
    pub fn updates(&self) -> &[SceneUpdate] {
        &self.updates
    }

    pub fn points_of_view(&self) -> &[CameraPose] {
        &self.points_of_view
    }

    pub fn indicator(&self) -> IndicatorNode {
        self.indicator.snapshot()
    }

    pub fn shared_indicator(&self) -> SharedIndicator {
        self.indicator.clone()
    }
}

impl ScreenProjector for RecordingRenderer {
    fn unproject_point(&self, point: SceneVector) -> SceneVector {
        self.view.unproject_point(point)
    }
}

impl SceneRenderer for RecordingRenderer {
    fn viewport(&self) -> Viewport {
        self.view.viewport
    }

    fn set_point_of_view(&mut self, camera: &CameraPose) {
        self.view.camera = *camera;
        self.points_of_view.push(*camera);
    }

    fn apply(&mut self, update: &SceneUpdate) {
        self.indicator.commit(update);
        self.updates.push(*update);
    }
}

/// Overlay replaying one active flag per read.
///
/// The frame loop reads the overlay exactly once per frame, so flag `i`
/// belongs to frame `i + 1`. Past the end the last flag repeats.
#[derive(Debug, Default)]
pub struct ScriptedOverlay {
    flags: Vec<bool>,
    cursor: Cell<usize>,
}

impl ScriptedOverlay {
    pub fn new(flags: Vec<bool>) -> Self {
        Self {
            flags,
            cursor: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.cursor.get()
    }
}

impl CoachingOverlay for ScriptedOverlay {
    fn is_active(&self) -> bool {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        self.flags
            .get(i)
            .or_else(|| self.flags.last())
            .copied()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_overlay_repeats_last_flag() {
        let overlay = ScriptedOverlay::new(vec![true, false]);
        assert!(overlay.is_active());
        assert!(!overlay.is_active());
        assert!(!overlay.is_active());
        assert_eq!(overlay.reads(), 3);

        assert!(!ScriptedOverlay::default().is_active());
    }

    #[test]
    fn test_recording_renderer_keeps_history() {
        let mut renderer = RecordingRenderer::default();
        renderer.set_point_of_view(&CameraPose::identity());
        renderer.apply(&SceneUpdate {
            pose: None,
            visible: false,
        });

        assert_eq!(renderer.updates().len(), 1);
        assert_eq!(renderer.points_of_view().len(), 1);
        assert_eq!(renderer.indicator().commits, 1);
        assert!(!renderer.indicator().visible);
    }
}
