//! The render pass: validate → probe → load → schedule → capture.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reelforge_assets::font::load_font;
use reelforge_assets::loader::load_scene_assets;
use reelforge_assets::probe::probe_duration_secs;
use reelforge_assets::SceneSource;
use reelforge_capture::{CapturePipeline, FfmpegCapturePipeline};
use reelforge_common::clock::FrameClock;
use reelforge_common::config::{OutputProfile, RenderSettings};
use reelforge_common::error::{ReelforgeError, ReelforgeResult};
use reelforge_compositor::{FrameScheduler, ProgressReport, ProgressSink, Surface};
use reelforge_edit_plan::EditPlan;

/// Cooperative cancellation flag, checked once per tick.
pub type CancelFlag = Arc<AtomicBool>;

/// Everything one render pass consumes.
#[derive(Debug, Clone)]
pub struct AssemblyJob {
    /// The edit decision list, consumed as-is; shots are never reordered.
    pub plan: EditPlan,

    /// Scene media locators, in scene-index order.
    pub scenes: Vec<SceneSource>,

    /// The pre-mixed audio track. Its decoded duration is ground truth
    /// for the artifact length.
    pub audio_path: PathBuf,

    /// Where the muxed artifact lands.
    pub output_path: PathBuf,

    /// Output profile and font configuration.
    pub settings: RenderSettings,
}

/// The single stop condition: audio end or declared plan total, whichever
/// fires first. Evaluated once per tick, so there is no double-stop or
/// never-stop race between the two signals.
pub fn stop_boundary(audio_secs: f64, plan_total_secs: f64) -> f64 {
    audio_secs.min(plan_total_secs)
}

/// Run a full render pass and return the artifact path.
///
/// Fatal errors (`AssetLoad`, `Composition`, capture failures) propagate;
/// recoverable anomalies (clip downgrades, duration drift) are logged and
/// absorbed. Validation happens before any capture resource is acquired,
/// so a rejected pass leaves no partial artifact behind.
pub async fn assemble(
    job: AssemblyJob,
    progress: Option<ProgressSink>,
    cancel: Option<CancelFlag>,
) -> ReelforgeResult<PathBuf> {
    let started = std::time::Instant::now();

    job.plan.validate(job.scenes.len())?;

    let audio_duration = probe_duration_secs(&job.audio_path)?;
    let stop_secs = stop_boundary(audio_duration, job.plan.total_duration);
    tracing::info!(
        audio_duration,
        plan_total = job.plan.total_duration,
        stop_secs,
        shots = job.plan.shots.len(),
        "Starting assembly"
    );

    let clip_windows: Vec<f64> = (0..job.scenes.len())
        .map(|i| job.plan.max_video_window_secs(i))
        .collect();
    let assets =
        load_scene_assets(job.scenes.clone(), &job.settings.profile, clip_windows).await?;

    // a plan with no text cards renders fine without any font on the system
    let font = if job.plan.has_text_cards() {
        Some(load_font(job.settings.font_path.as_deref())?)
    } else {
        None
    };

    let scheduler = FrameScheduler::new(&job.plan, &assets, font.as_ref(), stop_secs)?;
    let mut pipeline = FfmpegCapturePipeline::new(
        &job.output_path,
        &job.audio_path,
        job.settings.profile.clone(),
        stop_secs,
    );

    let artifact = run_render_pass(
        &scheduler,
        &mut pipeline,
        &job.settings.profile,
        progress,
        cancel,
    )?;

    tracing::info!(
        artifact = %artifact.display(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Assembly finished"
    );
    Ok(artifact)
}

/// Drive a prepared scheduler into a capture pipeline.
///
/// Start order: capture first, then the frame loop, so no leading frames
/// are dropped (the audio track is an encoder input and starts with it).
/// Exactly one 100% progress report is emitted, after finalization.
pub fn run_render_pass(
    scheduler: &FrameScheduler<'_>,
    pipeline: &mut dyn CapturePipeline,
    profile: &OutputProfile,
    progress: Option<ProgressSink>,
    cancel: Option<CancelFlag>,
) -> ReelforgeResult<PathBuf> {
    pipeline.start()?;

    let total_frames = scheduler.total_frames(profile.fps);
    let mut surface = Surface::for_profile(profile);
    let mut clock = FrameClock::new(profile.fps);
    let mut total_visual = 0;

    for _ in 0..total_frames {
        let elapsed = clock.elapsed_secs();

        if cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
        {
            pipeline.abort()?;
            return Err(ReelforgeError::Cancelled);
        }

        let state = match scheduler.render_at(elapsed, &mut surface) {
            Ok(state) => state,
            Err(e) => {
                // release encoder resources before surfacing the failure
                let _ = pipeline.abort();
                return Err(e);
            }
        };
        total_visual = state.total_visual;

        if let Err(e) = pipeline.write_frame(surface.as_bytes()) {
            let _ = pipeline.abort();
            return Err(e);
        }

        if let Some(sink) = &progress {
            sink(scheduler.progress_at(elapsed, &state));
        }

        clock.tick();
    }

    let artifact = pipeline.finish()?;

    if let Some(sink) = &progress {
        sink(ProgressReport::complete(total_visual));
    }

    Ok(artifact)
}
