//! Assembly manifest: the handover file from the upstream generation
//! stages.
//!
//! One JSON document bundling the edit plan, the per-scene media locators,
//! and the mixed audio track. Relative paths are resolved against the
//! manifest's own directory so a manifest travels with its assets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reelforge_assets::SceneSource;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};
use reelforge_edit_plan::EditPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyManifest {
    /// The edit decision list produced by the planning stage.
    pub plan: EditPlan,

    /// Scene media, ordered by scene index.
    pub scenes: Vec<SceneSource>,

    /// The pre-mixed voice+music track.
    pub audio: PathBuf,
}

impl AssemblyManifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> ReelforgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest file and resolve its relative paths.
    pub fn load(path: &Path) -> ReelforgeResult<Self> {
        if !path.exists() {
            return Err(ReelforgeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_json(&content)?;

        let base = path.parent().unwrap_or(Path::new("."));
        manifest.resolve_relative(base);
        Ok(manifest)
    }

    /// Anchor relative media paths at `base`.
    pub fn resolve_relative(&mut self, base: &Path) {
        let anchor = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        anchor(&mut self.audio);
        for scene in &mut self.scenes {
            anchor(&mut scene.still_path);
            if let Some(clip) = &mut scene.clip_path {
                anchor(clip);
            }
        }
    }
}
