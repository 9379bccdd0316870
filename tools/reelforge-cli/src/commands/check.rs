//! Check system capabilities.

use reelforge_assets::font::discover_font_path;
use reelforge_assets::probe::command_exists;

pub fn run() -> anyhow::Result<()> {
    println!("System capabilities:");

    let ffmpeg = command_exists("ffmpeg");
    let ffprobe = command_exists("ffprobe");
    println!("  ffmpeg:  {}", if ffmpeg { "found" } else { "MISSING" });
    println!("  ffprobe: {}", if ffprobe { "found" } else { "MISSING" });

    match discover_font_path() {
        Some(path) => println!("  text-card font: {}", path.display()),
        None => println!("  text-card font: none found (pass --font to render)"),
    }

    if ffmpeg && ffprobe {
        println!("Ready to render.");
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "ffmpeg and ffprobe are required on PATH for rendering"
        ))
    }
}
