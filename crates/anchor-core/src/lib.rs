//! Anchor Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every Anchor crate:
//! - Geometry (SceneVector, TrackerVector, Rotation, Transform)
//! - Tracking state and per-frame snapshots
//! - Screen space (ScreenPoint, Viewport)
//! - Frame time and errors

pub mod error;
pub mod geometry;
pub mod screen;
pub mod time;
pub mod tracking;

pub use error::*;
pub use geometry::*;
pub use screen::*;
pub use time::*;
pub use tracking::*;
