//! Clip frame extraction.
//!
//! Clips are decoded up-front into raw RGB24 frames at the output geometry
//! and frame rate, with cover-fit applied in the extraction filter chain.
//! The frame loop then only ever blits; no decoder runs mid-tick.

use std::path::Path;
use std::process::Command;

use reelforge_common::config::OutputProfile;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};

use crate::probe::probe_duration_secs;

/// A clip decoded into output-geometry frames.
///
/// Frames are RGB24 at the profile's width/height; `frame_at` implements
/// the clamped seek a video shot performs when its window outruns the clip.
#[derive(Debug)]
pub struct DecodedClip {
    width: u32,
    height: u32,
    fps: u32,
    duration_secs: f64,
    frames: Vec<Vec<u8>>,
}

impl DecodedClip {
    /// Source clip duration in seconds (container metadata).
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Number of extracted frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Output geometry the frames were extracted at.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The frame at `local_elapsed` seconds into the clip, clamped to the
    /// final extracted frame once the shot window outruns the footage.
    pub fn frame_at(&self, local_elapsed: f64) -> &[u8] {
        let index = (local_elapsed.max(0.0) * self.fps as f64).floor() as usize;
        let index = index.min(self.frames.len().saturating_sub(1));
        &self.frames[index]
    }

    /// Build a clip from pre-extracted frames. Test/synthetic entry point.
    pub fn from_frames(
        width: u32,
        height: u32,
        fps: u32,
        duration_secs: f64,
        frames: Vec<Vec<u8>>,
    ) -> ReelforgeResult<Self> {
        if frames.is_empty() {
            return Err(ReelforgeError::render("Clip contains no frames"));
        }
        let expected = width as usize * height as usize * 3;
        if frames.iter().any(|f| f.len() != expected) {
            return Err(ReelforgeError::render(format!(
                "Clip frame size mismatch, expected {expected} bytes"
            )));
        }
        Ok(Self {
            width,
            height,
            fps: fps.max(1),
            duration_secs,
            frames,
        })
    }
}

/// Extract up to `window_secs` of a clip as cover-fit RGB24 frames.
///
/// The filter chain scales so the shorter side covers the output and crops
/// the overflow, so every frame fully fills the surface. Extraction is
/// bounded by the longest shot window that references the clip.
pub fn extract_clip_frames(
    path: &Path,
    profile: &OutputProfile,
    window_secs: f64,
) -> ReelforgeResult<DecodedClip> {
    if !path.exists() {
        return Err(ReelforgeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let duration_secs = probe_duration_secs(path)?;
    let extract_secs = window_secs.min(duration_secs).max(0.0);
    if extract_secs <= 0.0 {
        return Err(ReelforgeError::render(format!(
            "Empty extraction window for {}",
            path.display()
        )));
    }

    let (w, h) = (profile.width, profile.height);
    let filter =
        format!("scale={w}:{h}:force_original_aspect_ratio=increase:flags=lanczos,crop={w}:{h}");

    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error"])
        .arg("-i")
        .arg(path)
        .args(["-t", &format!("{extract_secs:.6}")])
        .args(["-vf", &filter])
        .args(["-r", &profile.fps.to_string()])
        .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
        .output()
        .map_err(|e| ReelforgeError::render(format!("Failed to run ffmpeg: {e}")))?;

    if !output.status.success() {
        return Err(ReelforgeError::render(format!(
            "ffmpeg clip extraction failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let frame_bytes = profile.frame_bytes();
    let whole_frames = output.stdout.len() / frame_bytes;
    if whole_frames == 0 {
        return Err(ReelforgeError::render(format!(
            "ffmpeg produced no frames for {}",
            path.display()
        )));
    }

    let frames: Vec<Vec<u8>> = output
        .stdout
        .chunks_exact(frame_bytes)
        .map(|chunk| chunk.to_vec())
        .collect();

    tracing::debug!(
        clip = %path.display(),
        frames = frames.len(),
        extract_secs,
        "Extracted clip frames"
    );

    DecodedClip::from_frames(w, h, profile.fps, duration_secs, frames)
}
