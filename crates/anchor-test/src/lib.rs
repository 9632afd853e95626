//! Anchor Test Harness - simulated collaborators for the focus core
//!
//! This crate provides:
//! - Scripted and noisy tracking subsystems
//! - A recording renderer and a scripted coaching overlay
//! - A scenario builder that runs the real frame loop against them

pub mod recorder;
pub mod scenario;
pub mod tracker_sim;

pub use recorder::*;
pub use scenario::*;
pub use tracker_sim::*;
