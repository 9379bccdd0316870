//! Render-pass scenarios driven through a mock capture pipeline.
//!
//! The `CapturePipeline` trait is the seam: these tests count and inspect
//! every frame the loop produces without spawning an encoder.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use image::RgbImage;
use reelforge_assembler::{assemble, run_render_pass, stop_boundary, AssemblyJob, CancelFlag};
use reelforge_assets::{DecodedClip, SceneAsset, SceneSource};
use reelforge_capture::{CapturePipeline, PipelineStats};
use reelforge_common::config::{OutputProfile, RenderSettings};
use reelforge_common::error::{ReelforgeError, ReelforgeResult};
use reelforge_compositor::{FrameScheduler, ProgressReport, ProgressSink};
use reelforge_edit_plan::{EditPlan, PanZoom, Shot};

/// Small geometry keeps per-frame work negligible.
fn test_profile() -> OutputProfile {
    OutputProfile {
        width: 32,
        height: 18,
        fps: 30,
        ..OutputProfile::default()
    }
}

#[derive(Default)]
struct MockPipeline {
    started: bool,
    finished: bool,
    aborted: bool,
    frames: Vec<Vec<u8>>,
}

impl CapturePipeline for MockPipeline {
    fn start(&mut self) -> ReelforgeResult<()> {
        self.started = true;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> ReelforgeResult<()> {
        assert!(self.started, "frame written before start");
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> ReelforgeResult<PathBuf> {
        self.finished = true;
        if self.frames.is_empty() {
            return Err(ReelforgeError::EmptyArtifact {
                path: PathBuf::from("mock.mp4"),
            });
        }
        Ok(PathBuf::from("mock.mp4"))
    }

    fn abort(&mut self) -> ReelforgeResult<()> {
        self.aborted = true;
        Ok(())
    }

    fn stats(&self) -> PipelineStats {
        PipelineStats {
            frames_written: self.frames.len() as u64,
            bytes_written: self.frames.iter().map(|f| f.len() as u64).sum(),
        }
    }
}

fn red_asset(profile: &OutputProfile, with_clip: bool) -> SceneAsset {
    let clip = with_clip.then(|| {
        let frame_bytes = profile.frame_bytes();
        let blue_frame: Vec<u8> = (0..frame_bytes)
            .map(|i| if i % 3 == 2 { 255 } else { 0 })
            .collect();
        let frames = vec![blue_frame; (profile.fps as usize) * 3];
        DecodedClip::from_frames(profile.width, profile.height, profile.fps, 3.0, frames).unwrap()
    });
    SceneAsset {
        description: "scene".to_string(),
        still: RgbImage::from_pixel(64, 36, image::Rgb([255, 0, 0])),
        clip,
    }
}

fn collect_progress() -> (ProgressSink, Arc<Mutex<Vec<ProgressReport>>>) {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink_reports = Arc::clone(&reports);
    let sink: ProgressSink = Box::new(move |report| {
        sink_reports.lock().unwrap().push(report);
    });
    (sink, reports)
}

fn center_pixel(profile: &OutputProfile, frame: &[u8]) -> [u8; 3] {
    let idx = ((profile.height / 2) as usize * profile.width as usize
        + (profile.width / 2) as usize)
        * 3;
    [frame[idx], frame[idx + 1], frame[idx + 2]]
}

#[test]
fn five_second_pass_produces_exact_frame_count_and_one_final_report() {
    let profile = test_profile();
    let plan = EditPlan {
        total_duration: 5.0,
        shots: vec![
            Shot::Image {
                scene_index: 0,
                duration: 2.0,
                pan_zoom_style: PanZoom::ZoomIn,
            },
            Shot::Video {
                scene_index: 0,
                duration: 3.0,
            },
        ],
    };
    let assets = vec![red_asset(&profile, true)];

    // audio duration matches the plan total exactly
    let stop = stop_boundary(5.0, plan.total_duration);
    let scheduler = FrameScheduler::new(&plan, &assets, None, stop).unwrap();

    let mut pipeline = MockPipeline::default();
    let (sink, reports) = collect_progress();

    let artifact = run_render_pass(&scheduler, &mut pipeline, &profile, Some(sink), None).unwrap();
    assert_eq!(artifact, PathBuf::from("mock.mp4"));
    assert!(pipeline.finished);

    // 5s at 30fps, to the frame
    assert_eq!(pipeline.frames.len(), 150);

    // the image shot renders the red still, the video shot the blue clip
    assert_eq!(center_pixel(&profile, &pipeline.frames[30]), [255, 0, 0]);
    assert_eq!(center_pixel(&profile, &pipeline.frames[100]), [0, 0, 255]);

    let reports = reports.lock().unwrap();
    let finals = reports.iter().filter(|r| r.percent >= 100.0).count();
    assert_eq!(finals, 1, "exactly one 100% report");
    assert_eq!(reports.last().unwrap().percent, 100.0);
    for report in reports.iter().take(reports.len() - 1) {
        assert!(report.percent <= 99.0);
    }

    // percent never goes backward
    for window in reports.windows(2) {
        assert!(window[1].percent >= window[0].percent);
    }
}

#[test]
fn overrunning_shots_are_truncated_at_the_audio_boundary() {
    // shots sum to 10.2s, plan declares 10s, audio runs 10s
    let profile = test_profile();
    let plan = EditPlan {
        total_duration: 10.0,
        shots: vec![
            Shot::Image {
                scene_index: 0,
                duration: 5.0,
                pan_zoom_style: PanZoom::PanRight,
            },
            Shot::Image {
                scene_index: 0,
                duration: 5.2,
                pan_zoom_style: PanZoom::PanLeft,
            },
        ],
    };
    let assets = vec![red_asset(&profile, false)];

    let stop = stop_boundary(10.0, plan.total_duration);
    assert_eq!(stop, 10.0);

    let scheduler = FrameScheduler::new(&plan, &assets, None, stop).unwrap();
    let mut pipeline = MockPipeline::default();

    run_render_pass(&scheduler, &mut pipeline, &profile, None, None).unwrap();

    // stops at 10s; the tail of the second shot is simply never rendered
    assert_eq!(pipeline.frames.len(), 300);
    let last = pipeline.frames.last().unwrap();
    assert_eq!(center_pixel(&profile, last), [255, 0, 0]);
}

#[test]
fn unavailable_clip_renders_animated_still_for_the_whole_window() {
    let profile = test_profile();
    let plan = EditPlan {
        total_duration: 4.0,
        shots: vec![Shot::Video {
            scene_index: 0,
            duration: 4.0,
        }],
    };
    // clip failed to load: scene downgrades to its still
    let assets = vec![red_asset(&profile, false)];

    let scheduler = FrameScheduler::new(&plan, &assets, None, 4.0).unwrap();
    let mut pipeline = MockPipeline::default();

    run_render_pass(&scheduler, &mut pipeline, &profile, None, None).unwrap();

    assert_eq!(pipeline.frames.len(), 120);
    for probe in [0, 60, 119] {
        assert_eq!(
            center_pixel(&profile, &pipeline.frames[probe]),
            [255, 0, 0],
            "frame {probe} must show the still, not black"
        );
    }
}

#[tokio::test]
async fn invalid_scene_index_rejects_before_any_capture() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.mp4");

    let job = AssemblyJob {
        plan: EditPlan {
            total_duration: 5.0,
            shots: vec![Shot::Image {
                scene_index: 3,
                duration: 5.0,
                pan_zoom_style: PanZoom::ZoomIn,
            }],
        },
        scenes: vec![],
        audio_path: dir.path().join("audio.m4a"),
        output_path: output.clone(),
        settings: RenderSettings::default(),
    };

    let err = assemble(job, None, None).await.unwrap_err();
    assert!(matches!(err, ReelforgeError::Composition { .. }));
    assert!(err.is_pre_capture());
    assert!(!output.exists(), "no partial artifact may be produced");
}

#[test]
fn cancellation_aborts_the_pipeline() {
    let profile = test_profile();
    let plan = EditPlan {
        total_duration: 5.0,
        shots: vec![Shot::Image {
            scene_index: 0,
            duration: 5.0,
            pan_zoom_style: PanZoom::ZoomOut,
        }],
    };
    let assets = vec![red_asset(&profile, false)];
    let scheduler = FrameScheduler::new(&plan, &assets, None, 5.0).unwrap();

    let cancel: CancelFlag = Arc::new(AtomicBool::new(true));
    let mut pipeline = MockPipeline::default();

    let err = run_render_pass(&scheduler, &mut pipeline, &profile, None, Some(cancel)).unwrap_err();
    assert!(matches!(err, ReelforgeError::Cancelled));
    assert!(pipeline.aborted);
    assert!(!pipeline.finished);
    assert!(pipeline.frames.is_empty());
}
