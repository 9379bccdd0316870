//! Frame scheduler: the pull-based presentation loop core.
//!
//! `render_at(elapsed, surface)` is a pure step: resolve the timeline,
//! dispatch to the matching renderer, and report the recomputed render
//! state. It has no knowledge of what drives it; a real-time preview loop
//! and the off-line encode loop both just feed it clock values.

use rusttype::Font;

use reelforge_assets::SceneAsset;
use reelforge_common::clock::FrameClock;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};
use reelforge_edit_plan::{resolve, EditPlan, RenderState};

use crate::dispatch::{plan_shot, RenderOp};
use crate::image_shot::render_image;
use crate::surface::Surface;
use crate::text_shot::{render_text_card, TextStyle};
use crate::video_shot::render_video;

/// Progress reports never exceed this until finalization confirms.
const PROGRESS_CAP_PERCENT: f64 = 99.0;

/// Coarse-grained progress handed to the caller's sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Percent complete, capped at 99 until the artifact is finalized.
    pub percent: f64,

    /// 1-based visual shot ordinal; `None` before the first Image/Video
    /// shot has been reached.
    pub current_shot: Option<usize>,

    /// Total Image/Video shots in the plan.
    pub total_shots: usize,
}

impl ProgressReport {
    /// In-flight report for a tick.
    pub fn at(elapsed: f64, stop_secs: f64, state: &RenderState) -> Self {
        let ratio = if stop_secs > 0.0 {
            elapsed / stop_secs
        } else {
            0.0
        };
        Self {
            percent: (ratio * 100.0).min(PROGRESS_CAP_PERCENT),
            current_shot: (state.visual_ordinal > 0).then_some(state.visual_ordinal),
            total_shots: state.total_visual,
        }
    }

    /// The single 100% report, emitted once after capture finalization.
    pub fn complete(total_shots: usize) -> Self {
        Self {
            percent: 100.0,
            current_shot: (total_shots > 0).then_some(total_shots),
            total_shots,
        }
    }
}

/// Callback receiving progress reports at render-loop cadence.
pub type ProgressSink = Box<dyn Fn(ProgressReport) + Send>;

/// Drives per-tick rendering for one render pass.
#[derive(Debug)]
pub struct FrameScheduler<'a> {
    plan: &'a EditPlan,
    assets: &'a [SceneAsset],
    font: Option<&'a Font<'static>>,
    text_style: TextStyle,
    stop_secs: f64,
}

impl<'a> FrameScheduler<'a> {
    /// Build a scheduler for one pass.
    ///
    /// `stop_secs` is the single stop boundary (audio end or declared plan
    /// total, whichever is earlier). A plan containing text cards requires
    /// a font up front; failing at construction beats failing mid-pass.
    pub fn new(
        plan: &'a EditPlan,
        assets: &'a [SceneAsset],
        font: Option<&'a Font<'static>>,
        stop_secs: f64,
    ) -> ReelforgeResult<Self> {
        if stop_secs <= 0.0 {
            return Err(ReelforgeError::render(format!(
                "Stop boundary must be positive, got {stop_secs}"
            )));
        }
        if plan.has_text_cards() && font.is_none() {
            return Err(ReelforgeError::config(
                "Edit plan contains text cards but no font is available",
            ));
        }

        tracing::debug!(
            stop_secs,
            shots = plan.shots.len(),
            visual_shots = plan.visual_shot_count(),
            "Frame scheduler ready"
        );

        Ok(Self {
            plan,
            assets,
            font,
            text_style: TextStyle::default(),
            stop_secs,
        })
    }

    /// The stop boundary this pass renders up to.
    pub fn stop_secs(&self) -> f64 {
        self.stop_secs
    }

    /// Whether `elapsed` has reached the stop boundary. The sole
    /// normal-path stop signal, evaluated once per tick.
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.stop_secs
    }

    /// Whole frames an off-line encode of this pass produces.
    pub fn total_frames(&self, fps: u32) -> u64 {
        FrameClock::frames_for(fps, self.stop_secs)
    }

    /// Render one tick.
    ///
    /// Clears the surface, draws the shot occupying `elapsed` (if any;
    /// past the last shot the frame stays black), and returns the render
    /// state recomputed from the clock.
    pub fn render_at(&self, elapsed: f64, surface: &mut Surface) -> ReelforgeResult<RenderState> {
        surface.clear();

        if let Some(resolved) = resolve(elapsed, self.plan) {
            match plan_shot(&resolved, self.assets)? {
                RenderOp::Image {
                    still,
                    style,
                    progress,
                } => render_image(surface, still, style, progress),

                RenderOp::Video {
                    clip,
                    local_elapsed,
                } => render_video(surface, clip, local_elapsed)?,

                RenderOp::TextCard { text } => {
                    let font = self.font.ok_or_else(|| {
                        ReelforgeError::config("Text card reached renderer without a font")
                    })?;
                    render_text_card(surface, font, text, &self.text_style);
                }
            }
        }

        Ok(RenderState::at(elapsed, self.plan))
    }

    /// Progress report for a tick.
    pub fn progress_at(&self, elapsed: f64, state: &RenderState) -> ProgressReport {
        ProgressReport::at(elapsed, self.stop_secs, state)
    }
}
