//! Simulated tracking subsystems
//!
//! - `ScriptedTracker` replays a fixed list of frames
//! - `NoisyTracker` walks a camera over a floor with seeded tracking noise

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Duration;

use anchor_core::{
    AnchorError, AnchorResult, CameraPose, FrameSnapshot, FrameTime, LimitedReason, Rotation,
    SceneVector, TrackingState, Transform,
};
use anchor_focus::{RaycastQuery, RaycastResult, TargetAlignment};
use anchor_runtime::TrackingSubsystem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Timestamp of frame `sequence` at a fixed frame interval
pub fn frame_timestamp(interval: Duration, sequence: u64) -> FrameTime {
    let interval = i64::try_from(interval.as_micros()).unwrap_or(i64::MAX);
    let sequence = i64::try_from(sequence).unwrap_or(i64::MAX);
    FrameTime::from_micros(interval.saturating_mul(sequence))
}

/// One scripted frame
#[derive(Clone, Debug)]
pub struct ScriptedFrame {
    pub tracking: TrackingState,
    pub camera: CameraPose,
    /// Ray cast answer for this frame, nearest first
    pub hits: Vec<RaycastResult>,
}

impl ScriptedFrame {
    pub fn normal(hits: Vec<RaycastResult>) -> Self {
        Self {
            tracking: TrackingState::Normal,
            camera: CameraPose::identity(),
            hits,
        }
    }

    pub fn limited(reason: LimitedReason, hits: Vec<RaycastResult>) -> Self {
        Self {
            tracking: TrackingState::Limited(reason),
            camera: CameraPose::identity(),
            hits,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            tracking: TrackingState::NotAvailable,
            camera: CameraPose::identity(),
            hits: Vec::new(),
        }
    }

    pub fn with_camera(mut self, camera: CameraPose) -> Self {
        self.camera = camera;
        self
    }
}

/// Tracker replaying a script. Fails with a session fault when the script
/// runs out or at an injected frame.
#[derive(Debug)]
pub struct ScriptedTracker {
    frames: VecDeque<ScriptedFrame>,
    current: Vec<RaycastResult>,
    sequence: u64,
    frame_interval: Duration,
    fault_at: Option<u64>,
    raycast_calls: Cell<u64>,
    last_query: Cell<Option<RaycastQuery>>,
}

impl ScriptedTracker {
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        Self {
            frames: frames.into(),
            current: Vec::new(),
            sequence: 0,
            frame_interval: Duration::from_micros(16_667),
            fault_at: None,
            raycast_calls: Cell::new(0),
            last_query: Cell::new(None),
        }
    }

    /// Report a session fault instead of frame `sequence` (1-based)
    pub fn with_fault_at(mut self, sequence: u64) -> Self {
        self.fault_at = Some(sequence);
        self
    }

    pub fn raycast_calls(&self) -> u64 {
        self.raycast_calls.get()
    }

    pub fn last_query(&self) -> Option<RaycastQuery> {
        self.last_query.get()
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl TrackingSubsystem for ScriptedTracker {
    fn current_frame(&mut self) -> AnchorResult<FrameSnapshot> {
        let next = self.sequence + 1;
        if self.fault_at == Some(next) {
            return Err(AnchorError::SessionFault(format!(
                "injected fault at frame {}",
                next
            )));
        }

        let frame = self
            .frames
            .pop_front()
            .ok_or_else(|| AnchorError::SessionFault("script exhausted".to_string()))?;

        self.sequence = next;
        self.current = frame.hits;
        Ok(FrameSnapshot::new(
            next,
            frame_timestamp(self.frame_interval, next),
            frame.camera,
            frame.tracking,
        ))
    }

    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastResult> {
        self.raycast_calls.set(self.raycast_calls.get() + 1);
        self.last_query.set(Some(*query));
        self.current
            .iter()
            .filter(|hit| query.alignment.admits(hit.alignment))
            .copied()
            .collect()
    }
}

/// Noise model for `NoisyTracker`
#[derive(Clone, Debug)]
pub struct NoiseConfig {
    /// Probability a frame reports limited tracking
    pub limited_prob: f64,
    /// Probability a frame reports no tracking at all
    pub loss_prob: f64,
    /// Probability a normal frame finds no surface
    pub miss_prob: f64,
    /// Max horizontal jitter of the floor hit, metres
    pub position_jitter: f32,
    /// Camera height above the floor, metres
    pub camera_height: f32,
    /// Downward camera pitch, radians
    pub camera_pitch: f32,
    pub frame_interval: Duration,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            limited_prob: 0.05,
            loss_prob: 0.01,
            miss_prob: 0.05,
            position_jitter: 0.01,
            camera_height: 1.5,
            camera_pitch: 30f32.to_radians(),
            frame_interval: Duration::from_micros(16_667),
        }
    }
}

impl NoiseConfig {
    /// Well-lit room, steady hands
    pub fn stable() -> Self {
        NoiseConfig {
            limited_prob: 0.0,
            loss_prob: 0.0,
            miss_prob: 0.0,
            position_jitter: 0.0,
            ..Default::default()
        }
    }

    /// Hand-held, some motion blur
    pub fn shaky() -> Self {
        NoiseConfig {
            limited_prob: 0.2,
            loss_prob: 0.02,
            miss_prob: 0.15,
            position_jitter: 0.05,
            ..Default::default()
        }
    }

    /// Featureless floor, fast motion
    pub fn hostile() -> Self {
        NoiseConfig {
            limited_prob: 0.4,
            loss_prob: 0.1,
            miss_prob: 0.5,
            position_jitter: 0.2,
            ..Default::default()
        }
    }
}

const LIMITED_REASONS: [LimitedReason; 4] = [
    LimitedReason::Initializing,
    LimitedReason::ExcessiveMotion,
    LimitedReason::InsufficientFeatures,
    LimitedReason::Relocalizing,
];

/// Camera looking down at an infinite floor (y = 0) through noisy tracking
#[derive(Debug)]
pub struct NoisyTracker {
    config: NoiseConfig,
    rng: StdRng,
    sequence: u64,
    camera: CameraPose,
    hits: Vec<RaycastResult>,
}

impl NoisyTracker {
    pub fn new(config: NoiseConfig, seed: u64) -> Self {
        let camera = CameraPose::new(
            Transform::from_position(SceneVector::new(0.0, config.camera_height, 0.0))
                .with_rotation(Rotation::from_axis_angle(
                    SceneVector::RIGHT,
                    -config.camera_pitch,
                )),
        );
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            sequence: 0,
            camera,
            hits: Vec::new(),
        }
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    fn sample_tracking(&mut self) -> TrackingState {
        let roll: f64 = self.rng.gen();
        if roll < self.config.loss_prob {
            TrackingState::NotAvailable
        } else if roll < self.config.loss_prob + self.config.limited_prob {
            let idx = self.rng.gen_range(0..LIMITED_REASONS.len());
            TrackingState::Limited(LIMITED_REASONS[idx])
        } else {
            TrackingState::Normal
        }
    }

    /// Floor intersection of the view ray, plus a farther wall behind it
    fn sample_hits(&mut self) -> Vec<RaycastResult> {
        if self.rng.gen::<f64>() < self.config.miss_prob {
            return Vec::new();
        }

        let origin = self.camera.position();
        let forward = self.camera.forward();
        if forward.y >= -1e-6 {
            return Vec::new();
        }

        let t = -origin.y / forward.y;
        let j = self.config.position_jitter;
        let jitter = SceneVector::new(
            self.rng.gen_range(-j..=j),
            0.0,
            self.rng.gen_range(-j..=j),
        );
        let floor = RaycastResult::horizontal(origin + forward * t + jitter).with_distance(t);

        let wall_distance = t * 2.0;
        let wall = RaycastResult::new(
            origin + forward * wall_distance,
            -forward,
            TargetAlignment::Vertical,
        )
        .with_distance(wall_distance);

        vec![floor, wall]
    }
}

impl TrackingSubsystem for NoisyTracker {
    fn current_frame(&mut self) -> AnchorResult<FrameSnapshot> {
        self.sequence += 1;
        let tracking = self.sample_tracking();
        self.hits = self.sample_hits();

        Ok(FrameSnapshot::new(
            self.sequence,
            frame_timestamp(self.config.frame_interval, self.sequence),
            self.camera,
            tracking,
        ))
    }

    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastResult> {
        self.hits
            .iter()
            .filter(|hit| query.alignment.admits(hit.alignment))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_core::ScreenPoint;
    use anchor_focus::RaycastTarget;

    fn query(alignment: TargetAlignment) -> RaycastQuery {
        RaycastQuery {
            point: ScreenPoint::CENTER,
            target: RaycastTarget::EstimatedPlane,
            alignment,
        }
    }

    #[test]
    fn test_frame_timestamp_does_not_wrap() {
        let interval = Duration::from_micros(16_667);
        assert_eq!(frame_timestamp(interval, 3), FrameTime::from_micros(50_001));

        let past_u32 = u64::from(u32::MAX) + 2;
        assert_eq!(
            frame_timestamp(interval, past_u32).as_micros(),
            16_667 * past_u32 as i64
        );
        assert!(frame_timestamp(interval, past_u32) > frame_timestamp(interval, 1));
        assert_eq!(frame_timestamp(interval, u64::MAX), FrameTime::from_micros(i64::MAX));
    }

    #[test]
    fn test_scripted_tracker_replays_and_faults() {
        let mut tracker = ScriptedTracker::new(vec![
            ScriptedFrame::normal(vec![]),
            ScriptedFrame::unavailable(),
        ]);

        assert_eq!(tracker.current_frame().unwrap().sequence, 1);
        let second = tracker.current_frame().unwrap();
        assert_eq!(second.tracking, TrackingState::NotAvailable);
        assert!(second.timestamp > FrameTime::ZERO);
        assert!(matches!(
            tracker.current_frame(),
            Err(AnchorError::SessionFault(_))
        ));
    }

    #[test]
    fn test_scripted_tracker_injected_fault() {
        let mut tracker =
            ScriptedTracker::new(vec![ScriptedFrame::normal(vec![]); 3]).with_fault_at(2);

        assert!(tracker.current_frame().is_ok());
        assert!(tracker.current_frame().is_err());
        assert_eq!(tracker.remaining(), 2);
    }

    #[test]
    fn test_scripted_tracker_honours_alignment() {
        let mut tracker = ScriptedTracker::new(vec![ScriptedFrame::normal(vec![
            RaycastResult::new(
                SceneVector::new(0.0, 0.0, -2.0),
                SceneVector::new(0.0, 0.0, 1.0),
                TargetAlignment::Vertical,
            ),
            RaycastResult::horizontal(SceneVector::new(0.0, -1.0, -3.0)),
        ])]);
        tracker.current_frame().unwrap();

        assert_eq!(tracker.raycast(&query(TargetAlignment::Any)).len(), 2);
        let horizontal = tracker.raycast(&query(TargetAlignment::Horizontal));
        assert_eq!(horizontal.len(), 1);
        assert_eq!(horizontal[0].alignment, TargetAlignment::Horizontal);
        assert_eq!(tracker.raycast_calls(), 2);
        assert_eq!(
            tracker.last_query().map(|q| q.alignment),
            Some(TargetAlignment::Horizontal)
        );
    }

    #[test]
    fn test_stable_noisy_tracker_hits_floor() {
        let mut tracker = NoisyTracker::new(NoiseConfig::stable(), 7);

        for _ in 0..10 {
            let snapshot = tracker.current_frame().unwrap();
            assert!(snapshot.tracking.is_normal());

            let hits = tracker.raycast(&query(TargetAlignment::Any));
            assert_eq!(hits.len(), 2);
            assert!(hits[0].position.y.abs() < 1e-4);
            assert!(hits[0].distance < hits[1].distance);
        }
    }

    #[test]
    fn test_noisy_tracker_is_deterministic_per_seed() {
        let mut a = NoisyTracker::new(NoiseConfig::hostile(), 42);
        let mut b = NoisyTracker::new(NoiseConfig::hostile(), 42);

        for _ in 0..50 {
            let sa = a.current_frame().unwrap();
            let sb = b.current_frame().unwrap();
            assert_eq!(sa, sb);
            assert_eq!(
                a.raycast(&query(TargetAlignment::Any)),
                b.raycast(&query(TargetAlignment::Any))
            );
        }
    }
}
