//! Reelforge Asset Loader
//!
//! Resolves each scene's still image and optional video clip into decoded
//! in-memory handles before the render loop starts. All fetch/decode work
//! is front-loaded here; nothing inside the frame loop touches I/O.
//!
//! Failure policy: a still image that cannot be decoded is fatal for the
//! render pass; a clip that cannot be decoded downgrades the scene to
//! "no clip available" and is only logged.

pub mod clip;
pub mod font;
pub mod loader;
pub mod probe;
pub mod scene;

pub use clip::DecodedClip;
pub use loader::load_scene_assets;
pub use scene::{SceneAsset, SceneSource};
