//! Render a manifest to a video file.

use std::path::PathBuf;

use reelforge_assembler::{assemble, AssemblyJob, AssemblyManifest};
use reelforge_common::config::{OutputProfile, RenderSettings};
use reelforge_compositor::{ProgressReport, ProgressSink};

pub async fn run(
    manifest_path: PathBuf,
    output: Option<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
    font: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("Rendering manifest: {}", manifest_path.display());

    let manifest = AssemblyManifest::load(&manifest_path)
        .map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;

    let output_path = output.unwrap_or_else(|| {
        manifest_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("trailer.mp4")
    });

    let profile = OutputProfile {
        width,
        height,
        fps,
        ..OutputProfile::default()
    };

    println!("  Output: {}", output_path.display());
    println!("  Resolution: {width}x{height} @ {fps}fps");
    println!(
        "  Shots: {} ({} visual)",
        manifest.plan.shots.len(),
        manifest.plan.visual_shot_count()
    );

    let job = AssemblyJob {
        plan: manifest.plan,
        scenes: manifest.scenes,
        audio_path: manifest.audio,
        output_path: output_path.clone(),
        settings: RenderSettings {
            profile,
            font_path: font,
        },
    };

    let progress: ProgressSink = Box::new(|p: ProgressReport| {
        use std::io::Write;
        match p.current_shot {
            Some(shot) => print!(
                "\r  Progress: {:5.1}%  (shot {}/{})   ",
                p.percent, shot, p.total_shots
            ),
            None => print!("\r  Progress: {:5.1}%               ", p.percent),
        }
        let _ = std::io::stdout().flush();
    });

    match assemble(job, Some(progress), None).await {
        Ok(artifact) => {
            println!("\nRender complete: {}", artifact.display());
        }
        Err(e) => {
            println!("\nRender failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
