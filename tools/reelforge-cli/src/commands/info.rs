//! Show the edit plan summary for a manifest.

use std::path::PathBuf;

use reelforge_assembler::AssemblyManifest;

pub fn run(manifest_path: PathBuf) -> anyhow::Result<()> {
    let manifest = AssemblyManifest::load(&manifest_path)
        .map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;

    let plan = &manifest.plan;
    println!("Edit plan: {}", manifest_path.display());
    println!("  Declared total: {:.2}s", plan.total_duration);
    println!("  Shot durations: {:.2}s", plan.shots_duration_sum());
    println!(
        "  Shots: {} total, {} visual",
        plan.shots.len(),
        plan.visual_shot_count()
    );
    println!("  Scenes: {}", manifest.scenes.len());
    println!("  Audio: {}", manifest.audio.display());
    println!();

    let mut start = 0.0f64;
    for (index, shot) in plan.shots.iter().enumerate() {
        let detail = match shot {
            reelforge_edit_plan::Shot::Image {
                scene_index,
                pan_zoom_style,
                ..
            } => format!("scene {scene_index}, {pan_zoom_style:?}"),
            reelforge_edit_plan::Shot::Video { scene_index, .. } => {
                format!("scene {scene_index}")
            }
            reelforge_edit_plan::Shot::TextCard { text, .. } => format!("{text:?}"),
        };
        println!(
            "  [{index}] {:>6.2}s - {:>6.2}s  {:<10} {detail}",
            start,
            start + shot.duration(),
            shot.kind()
        );
        start += shot.duration();
    }

    Ok(())
}
