//! Anchor Focus Demo
//!
//! Runs the frame loop against a noisy simulated tracker while the coaching
//! overlay comes and goes, and prints how the focus indicator moves.
//!
//! `RUST_LOG=debug` shows every placement transition.

use anchor_focus::{CoachingConfig, CoachingOverlay, FocusPlacement, OverlayHandle};
use anchor_runtime::{init_logging, FrameLoop, FrameLoopConfig, HeadlessRenderer};
use anchor_test::{NoiseConfig, NoisyTracker};
use tracing::info;

fn main() {
    init_logging("info");
    println!("=== Anchor Focus Demo ===\n");

    // 1. Collaborators
    println!("1. Setting up simulated tracker, overlay and renderer...");
    let tracker = NoisyTracker::new(NoiseConfig::shaky(), 2020);
    let overlay = OverlayHandle::new(CoachingConfig::default());
    let renderer = HeadlessRenderer::default();
    let indicator = renderer.indicator();
    println!("   Coaching goal: {:?}", overlay.config().goal);

    // 2. Frame loop
    println!("\n2. Building frame loop (horizontal surfaces only)...");
    let mut frame_loop = match FrameLoop::with_config(
        tracker,
        overlay.clone(),
        renderer,
        FrameLoopConfig::horizontal_only(),
    ) {
        Ok(frame_loop) => frame_loop,
        Err(err) => {
            eprintln!("   Invalid configuration: {}", err);
            return;
        }
    };

    // 3. Run: overlay guides the user for the first 30 frames
    println!("\n3. Running 120 frames...");
    for frame in 0..120u32 {
        overlay.set_active(frame < 30);

        let report = match frame_loop.tick() {
            Ok(report) => report,
            Err(err) => {
                eprintln!("   Session fault: {}", err);
                break;
            }
        };

        if let Some(transition) = report.transition {
            let node = indicator.snapshot();
            match report.placement {
                FocusPlacement::Detecting { hit } => println!(
                    "   frame {:>3}: {:?} -> {} at ({:.2}, {:.2}, {:.2})",
                    report.sequence,
                    transition.from,
                    transition.to,
                    hit.position().x,
                    hit.position().y,
                    hit.position().z
                ),
                _ => println!(
                    "   frame {:>3}: {:?} -> {} (visible: {}, overlay: {})",
                    report.sequence,
                    transition.from,
                    transition.to,
                    node.visible,
                    overlay.is_active()
                ),
            }
        }
    }

    // 4. Stats
    let stats = frame_loop.stats();
    println!("\n4. Stats");
    println!("   Frames:       {}", stats.frames);
    println!("   Ray casts:    {}", stats.raycasts);
    println!("   Detecting:    {}", stats.detecting_frames);
    println!("   Initializing: {}", stats.initializing_frames);
    println!("   Suppressed:   {}", stats.suppressed_frames);
    println!("   Transitions:  {}", stats.transitions);
    info!(commits = indicator.snapshot().commits, "demo finished");
}
