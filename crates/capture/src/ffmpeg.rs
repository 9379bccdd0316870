//! ffmpeg-backed capture pipeline.
//!
//! Spawns ffmpeg reading raw RGB24 frames on stdin alongside the audio
//! file as a second input, muxing H.264 + AAC into the output container.
//! Frame writing is decoupled from the render loop through a bounded
//! channel and a writer thread so a momentarily slow encoder never blocks
//! a tick.
//!
//! The encoder is clamped with `-t <stop_secs>`: the audio track's decoded
//! length is ground truth for the artifact duration, regardless of how
//! many frames arrive.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::JoinHandle;

use reelforge_common::config::OutputProfile;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};

use crate::pipeline::{CapturePipeline, PipelineStats};

/// Frames buffered between the render loop and the writer thread.
/// Two seconds of video at the default profile.
const MAX_FRAME_BUFFER: usize = 60;

enum WriterMessage {
    Frame(Vec<u8>),
    Finish,
}

/// Production capture pipeline driving an ffmpeg subprocess.
pub struct FfmpegCapturePipeline {
    output_path: PathBuf,
    audio_path: PathBuf,
    profile: OutputProfile,
    stop_secs: f64,
    sender: Option<SyncSender<WriterMessage>>,
    writer: Option<JoinHandle<std::io::Result<()>>>,
    stats: PipelineStats,
}

impl FfmpegCapturePipeline {
    pub fn new(
        output_path: impl Into<PathBuf>,
        audio_path: impl Into<PathBuf>,
        profile: OutputProfile,
        stop_secs: f64,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            audio_path: audio_path.into(),
            profile,
            stop_secs,
            sender: None,
            writer: None,
            stats: PipelineStats::default(),
        }
    }

    fn started(&self) -> bool {
        self.writer.is_some() || self.sender.is_some()
    }
}

/// The full ffmpeg invocation for a capture run. Pure so the muxing
/// contract is testable without spawning anything.
pub fn build_encoder_args(
    output_path: &Path,
    audio_path: &Path,
    profile: &OutputProfile,
    stop_secs: f64,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        // rendered frames on stdin
        "-f".into(),
        "rawvideo".into(),
        "-pixel_format".into(),
        "rgb24".into(),
        "-video_size".into(),
        format!("{}x{}", profile.width, profile.height),
        "-framerate".into(),
        profile.fps.to_string(),
        "-i".into(),
        "-".into(),
        // the pre-mixed audio track
        "-i".into(),
        audio_path.display().to_string(),
        "-map".into(),
        "0:v".into(),
        "-map".into(),
        "1:a".into(),
        "-c:v".into(),
        profile.video_codec.clone(),
        "-preset".into(),
        "medium".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-b:v".into(),
        format!("{}k", profile.video_bitrate_kbps.max(1000)),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        format!("{}k", profile.audio_bitrate_kbps.max(64)),
        // audio-duration clamp: the authoritative stop boundary
        "-t".into(),
        format!("{stop_secs:.6}"),
        "-movflags".into(),
        "+faststart".into(),
    ];
    args.push(output_path.display().to_string());
    args
}

impl CapturePipeline for FfmpegCapturePipeline {
    fn start(&mut self) -> ReelforgeResult<()> {
        if self.started() {
            return Err(ReelforgeError::capture("Capture pipeline already started"));
        }

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let args = build_encoder_args(
            &self.output_path,
            &self.audio_path,
            &self.profile,
            self.stop_secs,
        );
        tracing::debug!(?args, "Starting ffmpeg capture");

        let child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelforgeError::CaptureNeverStarted {
                message: format!("Failed to spawn ffmpeg: {e}"),
            })?;

        tracing::info!(
            pid = child.id(),
            output = %self.output_path.display(),
            stop_secs = self.stop_secs,
            "Capture pipeline started"
        );

        let (sender, receiver) = mpsc::sync_channel::<WriterMessage>(MAX_FRAME_BUFFER);
        self.writer = Some(std::thread::spawn(move || writer_thread(child, receiver)));
        self.sender = Some(sender);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> ReelforgeResult<()> {
        let Some(sender) = &self.sender else {
            return Err(ReelforgeError::CaptureNeverStarted {
                message: "write_frame called before start".to_string(),
            });
        };

        let expected = self.profile.frame_bytes();
        if frame.len() != expected {
            return Err(ReelforgeError::capture(format!(
                "Frame size mismatch: expected {expected} bytes, got {}",
                frame.len()
            )));
        }

        sender
            .send(WriterMessage::Frame(frame.to_vec()))
            .map_err(|_| ReelforgeError::capture("Encoder writer thread stopped"))?;

        self.stats.frames_written += 1;
        self.stats.bytes_written += frame.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> ReelforgeResult<PathBuf> {
        if !self.started() {
            return Err(ReelforgeError::CaptureNeverStarted {
                message: "finish called before start".to_string(),
            });
        }

        if let Some(sender) = self.sender.take() {
            let _ = sender.send(WriterMessage::Finish);
        }

        if let Some(handle) = self.writer.take() {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    return Err(ReelforgeError::capture(format!("ffmpeg capture failed: {e}")))
                }
                Err(_) => return Err(ReelforgeError::capture("Encoder writer thread panicked")),
            }
        }

        let size = std::fs::metadata(&self.output_path).map(|m| m.len()).ok();
        match size {
            Some(bytes) if bytes > 0 => {
                tracing::info!(
                    output = %self.output_path.display(),
                    bytes,
                    frames = self.stats.frames_written,
                    "Capture finalized"
                );
                Ok(self.output_path.clone())
            }
            _ => Err(ReelforgeError::EmptyArtifact {
                path: self.output_path.clone(),
            }),
        }
    }

    fn abort(&mut self) -> ReelforgeResult<()> {
        // dropping the sender without Finish makes the writer kill ffmpeg
        self.sender = None;
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }
        if self.output_path.exists() {
            std::fs::remove_file(&self.output_path)?;
        }
        tracing::info!(output = %self.output_path.display(), "Capture aborted");
        Ok(())
    }

    fn stats(&self) -> PipelineStats {
        self.stats
    }
}

impl Drop for FfmpegCapturePipeline {
    fn drop(&mut self) {
        self.sender = None;
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }
    }
}

fn writer_thread(
    mut child: Child,
    receiver: Receiver<WriterMessage>,
) -> std::io::Result<()> {
    let mut stdin = child.stdin.take();

    loop {
        match receiver.recv() {
            Ok(WriterMessage::Frame(data)) => {
                if let Some(pipe) = stdin.as_mut() {
                    if let Err(e) = pipe.write_all(&data) {
                        tracing::warn!(error = %e, "ffmpeg stdin write failed");
                        break;
                    }
                }
            }
            Ok(WriterMessage::Finish) => break,
            Err(_) => {
                // sender dropped without Finish: abort path
                let _ = child.kill();
                let _ = child.wait();
                return Ok(());
            }
        }
    }

    // closing stdin signals end of the frame stream
    drop(stdin);

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}
