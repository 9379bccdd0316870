//! Edit decision list types.
//!
//! The EDL arrives from the upstream planning stage as JSON; this module
//! mirrors that wire format (`type`, `duration`, `sceneIndex`,
//! `panZoomStyle`, `text`, `totalDuration`) and adds the structural
//! validation that gates a render pass.

use std::path::Path;

use serde::{Deserialize, Serialize};

use reelforge_common::error::{ReelforgeError, ReelforgeResult};

/// Tolerated gap between the declared total duration and the sum of shot
/// durations before a warning is logged. Never fatal; the scheduler clamps
/// at the authoritative stop boundary either way.
pub const DURATION_SUM_TOLERANCE_SECS: f64 = 0.05;

/// Parametric pan/zoom style applied to still-image shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanZoom {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

impl Default for PanZoom {
    /// The style substituted when a video shot degrades to its still image.
    fn default() -> Self {
        PanZoom::ZoomIn
    }
}

/// One timed segment of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shot {
    /// A still image animated with a pan/zoom transform.
    #[serde(rename_all = "camelCase")]
    Image {
        scene_index: usize,
        duration: f64,
        #[serde(default)]
        pan_zoom_style: PanZoom,
    },

    /// A generated video clip resampled to this shot's window.
    #[serde(rename_all = "camelCase")]
    Video { scene_index: usize, duration: f64 },

    /// A text card on a plain background.
    #[serde(rename = "intertitle")]
    TextCard { duration: f64, text: String },
}

impl Shot {
    /// Allotted time window in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            Shot::Image { duration, .. }
            | Shot::Video { duration, .. }
            | Shot::TextCard { duration, .. } => *duration,
        }
    }

    /// Scene referenced by this shot, if any.
    pub fn scene_index(&self) -> Option<usize> {
        match self {
            Shot::Image { scene_index, .. } | Shot::Video { scene_index, .. } => {
                Some(*scene_index)
            }
            Shot::TextCard { .. } => None,
        }
    }

    /// Whether this shot counts toward the UI shot-progress counter.
    /// Text cards are editorial beats, not footage.
    pub fn is_visual(&self) -> bool {
        matches!(self, Shot::Image { .. } | Shot::Video { .. })
    }

    /// Wire-format tag, for logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Shot::Image { .. } => "image",
            Shot::Video { .. } => "video",
            Shot::TextCard { .. } => "intertitle",
        }
    }
}

/// Ordered, timed sequence of shots describing the assembled output.
///
/// Presentation order is the vector order; the engine never reorders shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPlan {
    /// Declared total duration in seconds.
    pub total_duration: f64,

    /// Shots in presentation order.
    pub shots: Vec<Shot>,
}

impl EditPlan {
    /// Parse a plan from its JSON wire form.
    pub fn from_json(json: &str) -> ReelforgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a plan from a JSON file.
    pub fn load(path: &Path) -> ReelforgeResult<Self> {
        if !path.exists() {
            return Err(ReelforgeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Sum of all shot durations.
    pub fn shots_duration_sum(&self) -> f64 {
        self.shots.iter().map(Shot::duration).sum()
    }

    /// Number of Image/Video shots.
    pub fn visual_shot_count(&self) -> usize {
        self.shots.iter().filter(|s| s.is_visual()).count()
    }

    /// Longest window any Video shot gives to `scene_index`, or zero.
    ///
    /// Bounds how much of a clip the asset loader needs to extract.
    pub fn max_video_window_secs(&self, scene_index: usize) -> f64 {
        self.shots
            .iter()
            .filter_map(|s| match s {
                Shot::Video {
                    scene_index: idx,
                    duration,
                } if *idx == scene_index => Some(*duration),
                _ => None,
            })
            .fold(0.0, f64::max)
    }

    /// Check the structural invariants that gate a render pass.
    ///
    /// Violations are fatal before capture starts. A duration sum that
    /// disagrees with the declared total beyond tolerance is only logged;
    /// the scheduler clamps at the stop boundary regardless.
    pub fn validate(&self, scene_count: usize) -> ReelforgeResult<()> {
        if self.shots.is_empty() {
            return Err(ReelforgeError::composition("Edit plan contains no shots"));
        }

        if self.total_duration <= 0.0 {
            return Err(ReelforgeError::composition(format!(
                "Edit plan total duration must be positive, got {}",
                self.total_duration
            )));
        }

        for (index, shot) in self.shots.iter().enumerate() {
            if shot.duration() <= 0.0 {
                return Err(ReelforgeError::composition(format!(
                    "Shot {index} ({}) has non-positive duration {}",
                    shot.kind(),
                    shot.duration()
                )));
            }

            if let Some(scene) = shot.scene_index() {
                if scene >= scene_count {
                    return Err(ReelforgeError::composition(format!(
                        "Shot {index} ({}) references scene {scene}, but only {scene_count} scenes exist",
                        shot.kind()
                    )));
                }
            }
        }

        let sum = self.shots_duration_sum();
        if (sum - self.total_duration).abs() > DURATION_SUM_TOLERANCE_SECS {
            tracing::warn!(
                declared = self.total_duration,
                shot_sum = sum,
                "Shot durations do not sum to the declared total; output will be clamped"
            );
        }

        Ok(())
    }

    /// Whether the plan contains at least one text card.
    pub fn has_text_cards(&self) -> bool {
        self.shots.iter().any(|s| matches!(s, Shot::TextCard { .. }))
    }
}
