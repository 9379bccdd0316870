//! Reelforge Compositor
//!
//! The per-frame rendering half of the engine: a fixed-geometry drawing
//! surface, one renderer per shot type, an explicit shot-dispatch table
//! (including the clip-unavailable fallback), and the pull-based frame
//! scheduler that ties them to the timeline resolver.
//!
//! All renderers are synchronous and bounded-cost; decode happens in the
//! asset loader, never here.

pub mod dispatch;
pub mod image_shot;
pub mod scheduler;
pub mod surface;
pub mod text_shot;
pub mod video_shot;

pub use dispatch::{plan_shot, RenderOp};
pub use scheduler::{FrameScheduler, ProgressReport, ProgressSink};
pub use surface::Surface;
