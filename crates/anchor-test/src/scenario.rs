//! Scenario harness - runs the real frame loop against scripted collaborators

use anchor_core::AnchorResult;
use anchor_focus::{FocusCase, IndicatorNode, SceneUpdate};
use anchor_runtime::{FrameLoop, FrameLoopConfig, FrameReport, RuntimeStats};

use crate::{RecordingRenderer, ScriptedFrame, ScriptedOverlay, ScriptedTracker};

/// Test scenario builder
pub struct ScenarioBuilder {
    frames: Vec<ScriptedFrame>,
    overlay: Vec<bool>,
    config: FrameLoopConfig,
    fault_at: Option<u64>,
}

/// Everything observed while running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub reports: Vec<FrameReport>,
    pub stats: RuntimeStats,
    pub updates: Vec<SceneUpdate>,
    pub raycast_calls: u64,
    pub indicator: IndicatorNode,
}

impl ScenarioResult {
    /// Resolved case of every frame, in order
    pub fn cases(&self) -> Vec<FocusCase> {
        self.reports.iter().map(|r| r.placement.case()).collect()
    }
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        ScenarioBuilder {
            frames: Vec::new(),
            overlay: Vec::new(),
            config: FrameLoopConfig::default(),
            fault_at: None,
        }
    }

    /// Add a frame with the overlay inactive
    pub fn frame(self, frame: ScriptedFrame) -> Self {
        self.frame_with_overlay(frame, false)
    }

    /// Add a frame with an explicit overlay flag
    pub fn frame_with_overlay(mut self, frame: ScriptedFrame, overlay_active: bool) -> Self {
        self.frames.push(frame);
        self.overlay.push(overlay_active);
        self
    }

    /// Add `count` copies of a frame
    pub fn repeat(mut self, count: usize, frame: ScriptedFrame, overlay_active: bool) -> Self {
        for _ in 0..count {
            self = self.frame_with_overlay(frame.clone(), overlay_active);
        }
        self
    }

    pub fn with_config(mut self, config: FrameLoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Tracker fails at frame `sequence` (1-based)
    pub fn with_fault_at(mut self, sequence: u64) -> Self {
        self.fault_at = Some(sequence);
        self
    }

    /// Build the frame loop without running it
    pub fn build(
        self,
    ) -> AnchorResult<FrameLoop<ScriptedTracker, ScriptedOverlay, RecordingRenderer>> {
        let mut tracker = ScriptedTracker::new(self.frames);
        if let Some(sequence) = self.fault_at {
            tracker = tracker.with_fault_at(sequence);
        }
        FrameLoop::with_config(
            tracker,
            ScriptedOverlay::new(self.overlay),
            RecordingRenderer::default(),
            self.config,
        )
    }

    /// Run every scripted frame
    pub fn run(self) -> AnchorResult<ScenarioResult> {
        let frames = self.frames.len() as u64;
        let mut frame_loop = self.build()?;
        let reports = frame_loop.run(frames)?;

        let stats = frame_loop.stats().clone();
        let (tracker, _overlay, renderer) = frame_loop.into_parts();
        Ok(ScenarioResult {
            reports,
            stats,
            updates: renderer.updates().to_vec(),
            raycast_calls: tracker.raycast_calls(),
            indicator: renderer.indicator(),
        })
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
