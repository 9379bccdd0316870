//! Scene source locators and decoded asset handles.

use std::path::PathBuf;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::clip::DecodedClip;

/// Caller-side locators for one scene's media, as handed over by the
/// upstream generation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSource {
    /// Scene description from the script stage.
    pub description: String,

    /// Path to the generated still image. Required.
    #[serde(rename = "still")]
    pub still_path: PathBuf,

    /// Path to the generated video clip, when one was produced.
    #[serde(rename = "clip", default, skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<PathBuf>,
}

/// One scene's decoded media, immutable for the duration of a render pass.
#[derive(Debug)]
pub struct SceneAsset {
    /// Scene description, carried through for logs.
    pub description: String,

    /// Decoded still image. Always present.
    pub still: RgbImage,

    /// Decoded clip frames, when extraction succeeded.
    pub clip: Option<DecodedClip>,
}

impl SceneAsset {
    /// Whether a video shot on this scene can use real clip footage.
    pub fn clip_available(&self) -> bool {
        self.clip.is_some()
    }
}
