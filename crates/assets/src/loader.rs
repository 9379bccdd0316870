//! Concurrent scene asset loading.

use reelforge_common::config::OutputProfile;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};

use crate::clip::extract_clip_frames;
use crate::scene::{SceneAsset, SceneSource};

/// Load every scene's media, fanning decode out across blocking tasks and
/// joining before returning.
///
/// `clip_windows[i]` bounds how many seconds of scene `i`'s clip are worth
/// extracting (the longest video-shot window referencing it); a zero window
/// skips extraction entirely since no shot can display the footage.
///
/// A still that fails to decode fails the whole load. A clip that fails to
/// decode downgrades its scene to `clip: None` and is only logged.
pub async fn load_scene_assets(
    sources: Vec<SceneSource>,
    profile: &OutputProfile,
    clip_windows: Vec<f64>,
) -> ReelforgeResult<Vec<SceneAsset>> {
    if sources.len() != clip_windows.len() {
        return Err(ReelforgeError::render(format!(
            "Clip window count {} does not match scene count {}",
            clip_windows.len(),
            sources.len()
        )));
    }

    let started = std::time::Instant::now();
    let scene_count = sources.len();

    let handles: Vec<_> = sources
        .into_iter()
        .zip(clip_windows)
        .enumerate()
        .map(|(index, (source, window))| {
            let profile = profile.clone();
            tokio::task::spawn_blocking(move || load_one(index, source, &profile, window))
        })
        .collect();

    let mut assets = Vec::with_capacity(scene_count);
    for handle in handles {
        let asset = handle
            .await
            .map_err(|e| ReelforgeError::render(format!("Asset load task failed: {e}")))??;
        assets.push(asset);
    }

    let clips_available = assets.iter().filter(|a| a.clip_available()).count();
    tracing::info!(
        scenes = assets.len(),
        clips_available,
        load_ms = started.elapsed().as_millis(),
        "Scene assets loaded"
    );

    Ok(assets)
}

fn load_one(
    index: usize,
    source: SceneSource,
    profile: &OutputProfile,
    clip_window_secs: f64,
) -> ReelforgeResult<SceneAsset> {
    let still = image::open(&source.still_path)
        .map_err(|e| {
            ReelforgeError::asset_load(format!(
                "Scene {index}: failed to decode still {}: {e}",
                source.still_path.display()
            ))
        })?
        .to_rgb8();

    let clip = match &source.clip_path {
        Some(path) if clip_window_secs > 0.0 => {
            match extract_clip_frames(path, profile, clip_window_secs) {
                Ok(clip) => Some(clip),
                Err(e) => {
                    tracing::warn!(
                        scene = index,
                        clip = %path.display(),
                        error = %e,
                        "Clip failed to decode; scene will fall back to its still"
                    );
                    None
                }
            }
        }
        Some(path) => {
            tracing::debug!(
                scene = index,
                clip = %path.display(),
                "No video shot references this clip; skipping extraction"
            );
            None
        }
        None => None,
    };

    Ok(SceneAsset {
        description: source.description,
        still,
        clip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::path::PathBuf;

    fn write_png(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(32, 18, image::Rgb([120, 40, 200]))
            .save(&path)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn loads_stills_and_downgrades_missing_clips() {
        let dir = tempfile::tempdir().unwrap();
        let still = write_png(dir.path(), "scene0.png");

        let sources = vec![SceneSource {
            description: "opening shot".to_string(),
            still_path: still,
            clip_path: Some(dir.path().join("missing-clip.mp4")),
        }];

        let assets = load_scene_assets(sources, &OutputProfile::default(), vec![3.0])
            .await
            .unwrap();

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].still.dimensions(), (32, 18));
        assert!(!assets[0].clip_available());
    }

    #[tokio::test]
    async fn unreferenced_clip_is_not_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let still = write_png(dir.path(), "scene0.png");

        let sources = vec![SceneSource {
            description: "scene".to_string(),
            still_path: still,
            clip_path: Some(dir.path().join("clip.mp4")),
        }];

        // zero window: loader must not even attempt the (absent) clip
        let assets = load_scene_assets(sources, &OutputProfile::default(), vec![0.0])
            .await
            .unwrap();
        assert!(!assets[0].clip_available());
    }

    #[tokio::test]
    async fn undecodable_still_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-an-image.png");
        std::fs::write(&bogus, b"definitely not a png").unwrap();

        let sources = vec![SceneSource {
            description: "broken".to_string(),
            still_path: bogus,
            clip_path: None,
        }];

        let err = load_scene_assets(sources, &OutputProfile::default(), vec![0.0])
            .await
            .unwrap_err();
        assert!(matches!(err, ReelforgeError::AssetLoad { .. }));
    }
}
