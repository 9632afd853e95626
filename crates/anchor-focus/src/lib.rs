//! Anchor Focus - where should the focus indicator go this frame?
//!
//! Per frame the tracking subsystem reports a pose and a tracking state. This
//! crate turns that, plus a single ray cast from the screen centre, into a
//! `FocusPlacement`:
//!
//! - `Initializing`: no usable surface, indicator rides along with the camera
//! - `Detecting`: a surface was hit, indicator sits on it
//! - `Suppressed`: the coaching overlay is guiding the user, indicator hidden
//!
//! Deciding the placement and mutating the indicator are separate steps.
//! `placement` decides, `scene` turns the decision into a `SceneUpdate` that a
//! renderer commits in one go.

pub mod overlay;
pub mod placement;
pub mod query;
pub mod raycast;
pub mod scene;

pub use overlay::*;
pub use placement::*;
pub use query::*;
pub use raycast::*;
pub use scene::*;
