//! Validate a manifest without rendering.

use std::path::PathBuf;

use reelforge_assembler::AssemblyManifest;

pub fn run(manifest_path: PathBuf) -> anyhow::Result<()> {
    println!("Validating manifest: {}", manifest_path.display());

    let manifest = AssemblyManifest::load(&manifest_path)
        .map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;

    let mut problems = 0usize;

    if let Err(e) = manifest.plan.validate(manifest.scenes.len()) {
        println!("  ✗ plan: {e}");
        problems += 1;
    } else {
        println!("  ✓ plan: {} shots, invariants hold", manifest.plan.shots.len());
    }

    let sum = manifest.plan.shots_duration_sum();
    let drift = (sum - manifest.plan.total_duration).abs();
    if drift > reelforge_edit_plan::shot::DURATION_SUM_TOLERANCE_SECS {
        println!(
            "  ! durations: shots sum to {sum:.2}s, plan declares {:.2}s (output will be clamped)",
            manifest.plan.total_duration
        );
    }

    if manifest.audio.exists() {
        println!("  ✓ audio: {}", manifest.audio.display());
    } else {
        println!("  ✗ audio missing: {}", manifest.audio.display());
        problems += 1;
    }

    for (index, scene) in manifest.scenes.iter().enumerate() {
        if scene.still_path.exists() {
            println!("  ✓ scene {index} still: {}", scene.still_path.display());
        } else {
            println!("  ✗ scene {index} still missing: {}", scene.still_path.display());
            problems += 1;
        }

        match &scene.clip_path {
            Some(clip) if clip.exists() => {
                println!("  ✓ scene {index} clip: {}", clip.display());
            }
            Some(clip) => {
                // missing clips degrade to the still at render time
                println!("  ! scene {index} clip missing (will fall back): {}", clip.display());
            }
            None => {}
        }
    }

    if problems == 0 {
        println!("Manifest is renderable.");
        Ok(())
    } else {
        Err(anyhow::anyhow!("{problems} problem(s) found"))
    }
}
