//! Headless renderer - keeps the indicator in memory, draws nothing

use anchor_core::{CameraPose, SceneVector, ScreenProjector, Viewport};
use anchor_focus::{PinholeView, SceneRenderer, SceneUpdate, SharedIndicator};

/// Renderer without a display.
///
/// Useful for servers, replays and tests. The indicator state can be read
/// from other threads through `indicator()`.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    view: PinholeView,
    indicator: SharedIndicator,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(Viewport::default(), 60f32.to_radians())
    }
}

impl HeadlessRenderer {
    pub fn new(viewport: Viewport, vertical_fov: f32) -> Self {
        Self {
            view: PinholeView::new(viewport, vertical_fov),
            indicator: SharedIndicator::new(),
        }
    }

    /// Handle to the indicator node
    pub fn indicator(&self) -> SharedIndicator {
        self.indicator.clone()
    }

    pub fn view(&self) -> &PinholeView {
        &self.view
    }
}

impl ScreenProjector for HeadlessRenderer {
    fn unproject_point(&self, point: SceneVector) -> SceneVector {
        self.view.unproject_point(point)
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn viewport(&self) -> Viewport {
        self.view.viewport
    }

    fn set_point_of_view(&mut self, camera: &CameraPose) {
        self.view.camera = *camera;
    }

    fn apply(&mut self, update: &SceneUpdate) {
        self.indicator.commit(update);
    }
}
