//! Anchor Runtime - the explicit per-frame loop
//!
//! Each tick pulls one snapshot from the tracking subsystem, resolves the
//! focus placement and hands the resulting scene update to the renderer.

pub mod frame_loop;
pub mod headless;
pub mod logging;

pub use frame_loop::*;
pub use headless::*;
pub use logging::*;
