//! Media probing via ffprobe.

use std::path::Path;
use std::process::Command;

use reelforge_common::error::{ReelforgeError, ReelforgeResult};

/// Duration of a media file in seconds, from container metadata.
///
/// The decoded audio length is ground truth for the render stop boundary,
/// so failure here is fatal for the pass.
pub fn probe_duration_secs(path: &Path) -> ReelforgeResult<f64> {
    if !path.exists() {
        return Err(ReelforgeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| ReelforgeError::probe(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(ReelforgeError::probe(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let duration = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ReelforgeError::probe(format!("Unparsable duration {raw:?}")))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(ReelforgeError::probe(format!(
            "Non-positive duration {duration} for {}",
            path.display()
        )));
    }

    Ok(duration)
}

/// Pixel dimensions of the first video stream.
pub fn probe_video_dimensions(path: &Path) -> Option<(u32, u32)> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=p=0:s=x",
        ])
        .arg(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let line = raw.lines().next()?.trim();
    let (w, h) = line.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Whether a binary is reachable on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
