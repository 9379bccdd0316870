//! Reelforge Edit Plan
//!
//! The edit decision list (EDL) data model and the timeline resolver that
//! maps an elapsed presentation time to the shot occupying it. The resolver
//! is a pure function of `(elapsed, plan)`; no stepping state survives
//! between ticks.

pub mod shot;
pub mod timeline;

pub use shot::{EditPlan, PanZoom, Shot};
pub use timeline::{resolve, RenderState, ResolvedShot};
