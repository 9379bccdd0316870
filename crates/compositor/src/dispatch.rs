//! Shot dispatch: which renderer runs for which shot.
//!
//! The mapping `(shot type, clip availability) -> renderer` lives here and
//! nowhere else. In particular, a video shot whose scene has no decodable
//! clip dispatches to the image renderer with the default pan/zoom style.
//! That substitution is first-class behavior, not an error path: a pass
//! with zero clips available still renders completely.

use image::RgbImage;

use reelforge_assets::{DecodedClip, SceneAsset};
use reelforge_common::error::{ReelforgeError, ReelforgeResult};
use reelforge_edit_plan::{PanZoom, ResolvedShot, Shot};

/// A fully resolved renderer invocation for one tick.
#[derive(Debug)]
pub enum RenderOp<'a> {
    Image {
        still: &'a RgbImage,
        style: PanZoom,
        progress: f64,
    },
    Video {
        clip: &'a DecodedClip,
        local_elapsed: f64,
    },
    TextCard {
        text: &'a str,
    },
}

/// Map the current shot to the renderer that draws it.
///
/// Scene indices were validated before the pass started; an out-of-range
/// index here means the plan mutated mid-pass and is reported rather than
/// panicking.
pub fn plan_shot<'a>(
    resolved: &ResolvedShot<'a>,
    assets: &'a [SceneAsset],
) -> ReelforgeResult<RenderOp<'a>> {
    match resolved.shot {
        Shot::Image {
            scene_index,
            pan_zoom_style,
            ..
        } => {
            let asset = scene_asset(assets, *scene_index)?;
            Ok(RenderOp::Image {
                still: &asset.still,
                style: *pan_zoom_style,
                progress: resolved.progress(),
            })
        }

        Shot::Video { scene_index, .. } => {
            let asset = scene_asset(assets, *scene_index)?;
            match &asset.clip {
                Some(clip) => Ok(RenderOp::Video {
                    clip,
                    local_elapsed: resolved.local_elapsed,
                }),
                // automatic downgrade to the animated still
                None => Ok(RenderOp::Image {
                    still: &asset.still,
                    style: PanZoom::default(),
                    progress: resolved.progress(),
                }),
            }
        }

        Shot::TextCard { text, .. } => Ok(RenderOp::TextCard { text }),
    }
}

fn scene_asset(assets: &[SceneAsset], index: usize) -> ReelforgeResult<&SceneAsset> {
    assets.get(index).ok_or_else(|| {
        ReelforgeError::composition(format!(
            "Shot references scene {index}, but only {} scenes are loaded",
            assets.len()
        ))
    })
}
