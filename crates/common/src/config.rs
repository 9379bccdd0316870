//! Render configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The single project-wide output profile.
///
/// Every render pass draws into a surface of this geometry and encodes at
/// this frame rate. There is deliberately no per-shot or per-pass profile
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputProfile {
    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Output frame rate.
    pub fps: u32,

    /// Video encoder passed to ffmpeg.
    pub video_codec: String,

    /// Video bitrate in kbps.
    pub video_bitrate_kbps: u32,

    /// Audio bitrate in kbps.
    pub audio_bitrate_kbps: u32,
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            video_codec: "libx264".to_string(),
            video_bitrate_kbps: 6000,
            audio_bitrate_kbps: 192,
        }
    }
}

impl OutputProfile {
    /// Width/height aspect ratio.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Bytes per RGB24 frame at this geometry.
    pub fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Settings for one render pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output geometry and encoding profile.
    pub profile: OutputProfile,

    /// TTF font used by text cards. When `None`, standard system font
    /// locations are searched at load time.
    pub font_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reelforge=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
