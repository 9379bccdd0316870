//! Reelforge Capture Pipeline
//!
//! Binds the rendering surface's frame stream and the pre-mixed audio
//! track into one muxed artifact. The `CapturePipeline` trait is the seam
//! between the render loop and the encoder; the production backend drives
//! ffmpeg over a pipe, and tests substitute an in-memory pipeline.

pub mod ffmpeg;
pub mod pipeline;

pub use ffmpeg::FfmpegCapturePipeline;
pub use pipeline::{CapturePipeline, PipelineStats};
