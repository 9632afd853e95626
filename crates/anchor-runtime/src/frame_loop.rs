//! Anchor Frame Loop - runtime loop implementation

use std::time::{Duration, Instant};

use anchor_core::{
    unproject_tracker_point, AnchorError, AnchorResult, FrameSnapshot, FrameTime, ScreenPoint,
    TrackerVector,
};
use anchor_focus::{
    scene_update, CoachingOverlay, FocusCase, FocusPlacement, FocusState, IndicatorStyle,
    RaycastQuery, RaycastResult, SceneRenderer, SurfaceQuery, TargetAlignment, Transition,
};
use tracing::{info, trace, warn};

/// The camera-tracking collaborator
pub trait TrackingSubsystem {
    /// Snapshot for the frame about to be rendered.
    ///
    /// An error is a session-level fault; the loop stops calling the core.
    fn current_frame(&mut self) -> AnchorResult<FrameSnapshot>;

    /// Cast a ray into the tracked scene. Results are ordered nearest first.
    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastResult>;
}

/// Frame loop configuration
#[derive(Clone, Debug)]
pub struct FrameLoopConfig {
    /// Where the surface query looks (NDC)
    pub query_point: ScreenPoint,
    /// Surface orientation filter for the query
    pub alignment: TargetAlignment,
    /// Pose of the indicator while initializing
    pub style: IndicatorStyle,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        FrameLoopConfig {
            query_point: ScreenPoint::CENTER,
            alignment: TargetAlignment::Any,
            style: IndicatorStyle::default(),
            max_frames: None,
        }
    }
}

impl FrameLoopConfig {
    /// Only accept floors and table tops
    pub fn horizontal_only() -> Self {
        FrameLoopConfig {
            alignment: TargetAlignment::Horizontal,
            ..Default::default()
        }
    }

    pub fn surface_query(&self) -> SurfaceQuery {
        SurfaceQuery::new(self.query_point, self.alignment)
    }

    pub fn validate(&self) -> AnchorResult<()> {
        self.query_point.validate().map(|_| ())
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuntimeStats {
    pub frames: u64,
    pub raycasts: u64,
    pub initializing_frames: u64,
    pub detecting_frames: u64,
    pub suppressed_frames: u64,
    pub transitions: u64,
    pub faults: u64,
    pub last_frame_duration: Duration,
}

impl RuntimeStats {
    fn record(&mut self, placement: &FocusPlacement, transition: Option<&Transition>) {
        match placement.case() {
            FocusCase::Initializing => self.initializing_frames += 1,
            FocusCase::Detecting => self.detecting_frames += 1,
            FocusCase::Suppressed => self.suppressed_frames += 1,
        }
        if transition.is_some() {
            self.transitions += 1;
        }
    }
}

/// What one tick produced
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub sequence: u64,
    pub timestamp: FrameTime,
    pub placement: FocusPlacement,
    pub transition: Option<Transition>,
    /// Query point unprojected onto the near plane
    pub aim_point: TrackerVector,
}

/// Drives tracker → focus state machine → renderer, one frame per tick
pub struct FrameLoop<T, O, R> {
    tracker: T,
    overlay: O,
    renderer: R,
    focus: FocusState,
    config: FrameLoopConfig,
    stats: RuntimeStats,
    /// Set once the tracker reports a session fault
    fault: Option<AnchorError>,
}

impl<T, O, R> FrameLoop<T, O, R>
where
    T: TrackingSubsystem,
    O: CoachingOverlay,
    R: SceneRenderer,
{
    /// Create a frame loop with the default configuration
    pub fn new(tracker: T, overlay: O, renderer: R) -> Self {
        let config = FrameLoopConfig::default();
        FrameLoop {
            tracker,
            overlay,
            renderer,
            focus: FocusState::new(config.surface_query()),
            config,
            stats: RuntimeStats::default(),
            fault: None,
        }
    }

    /// Create a frame loop with custom configuration
    pub fn with_config(
        tracker: T,
        overlay: O,
        renderer: R,
        config: FrameLoopConfig,
    ) -> AnchorResult<Self> {
        config.validate()?;
        Ok(FrameLoop {
            tracker,
            overlay,
            renderer,
            focus: FocusState::new(config.surface_query()),
            config,
            stats: RuntimeStats::default(),
            fault: None,
        })
    }

    /// Execute one frame
    pub fn tick(&mut self) -> AnchorResult<FrameReport> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if let Some(max) = self.config.max_frames {
            if self.stats.frames >= max {
                return Err(AnchorError::FrameLimitReached(max));
            }
        }

        let start = Instant::now();

        // Stage 1: Pull the tracker snapshot
        let snapshot = match self.tracker.current_frame() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, frames = self.stats.frames, "tracking session fault, frame loop stopped");
                self.stats.faults += 1;
                self.fault = Some(err.clone());
                return Err(err);
            }
        };
        self.stats.frames += 1;

        // Stage 2: Move the point of view
        self.renderer.set_point_of_view(&snapshot.camera);

        // Stage 3: Resolve placement
        let overlay_active = self.overlay.is_active();
        let tracker = &self.tracker;
        let stats = &mut self.stats;
        let outcome = self.focus.update(
            &snapshot,
            |query| {
                stats.raycasts += 1;
                tracker.raycast(query)
            },
            overlay_active,
        );
        self.stats
            .record(&outcome.placement, outcome.transition.as_ref());

        // Stage 4: Apply to the scene
        let update = scene_update(&outcome.placement, &self.config.style);
        self.renderer.apply(&update);

        // Stage 5: Where the user is aiming, in the renderer's own pixels
        let (px, py) = self.renderer.viewport().from_ndc(self.config.query_point);
        let aim_point = unproject_tracker_point(&self.renderer, TrackerVector::new(px, py, 0.0));

        trace!(
            sequence = snapshot.sequence,
            case = %outcome.placement.case(),
            visible = update.visible,
            "frame applied"
        );

        self.stats.last_frame_duration = start.elapsed();

        Ok(FrameReport {
            sequence: snapshot.sequence,
            timestamp: snapshot.timestamp,
            placement: outcome.placement,
            transition: outcome.transition,
            aim_point,
        })
    }

    /// Run up to `frames` ticks.
    ///
    /// Stops early without error when `max_frames` is reached. A session fault
    /// ends the run with that fault.
    pub fn run(&mut self, frames: u64) -> AnchorResult<Vec<FrameReport>> {
        info!(frames, "frame loop started");
        let mut reports = Vec::new();
        for _ in 0..frames {
            match self.tick() {
                Ok(report) => reports.push(report),
                Err(AnchorError::FrameLimitReached(_)) => break,
                Err(err) => return Err(err),
            }
        }
        info!(
            frames = self.stats.frames,
            detecting = self.stats.detecting_frames,
            transitions = self.stats.transitions,
            "frame loop finished"
        );
        Ok(reports)
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn config(&self) -> &FrameLoopConfig {
        &self.config
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Session fault that stopped the loop, if any
    pub fn fault(&self) -> Option<&AnchorError> {
        self.fault.as_ref()
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (T, O, R) {
        (self.tracker, self.overlay, self.renderer)
    }
}
