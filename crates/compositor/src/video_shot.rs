//! Video-frame renderer.
//!
//! Clip frames were extracted cover-fit at the output geometry during asset
//! loading, so rendering a video shot is a clamped-seek plus a blit. This
//! renderer must only be dispatched when the clip is available; the
//! dispatch table substitutes the image renderer otherwise.

use reelforge_assets::DecodedClip;
use reelforge_common::error::{ReelforgeError, ReelforgeResult};

use crate::surface::Surface;

/// Draw the clip frame at `local_elapsed` seconds into the shot window.
///
/// Seeks to `min(local_elapsed, clip duration)`: a shot window longer than
/// the footage holds the final frame rather than going black.
pub fn render_video(
    surface: &mut Surface,
    clip: &DecodedClip,
    local_elapsed: f64,
) -> ReelforgeResult<()> {
    let (w, h) = clip.dimensions();
    if (w, h) != (surface.width(), surface.height()) {
        return Err(ReelforgeError::render(format!(
            "Clip extracted at {w}x{h} but surface is {}x{}",
            surface.width(),
            surface.height()
        )));
    }

    let seek = local_elapsed.min(clip.duration_secs());
    surface.blit_frame(clip.frame_at(seek))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(w: u32, h: u32) -> DecodedClip {
        let frames = (0..5u8)
            .map(|n| vec![n * 10; w as usize * h as usize * 3])
            .collect();
        DecodedClip::from_frames(w, h, 5, 1.0, frames).unwrap()
    }

    #[test]
    fn draws_the_frame_for_the_local_time() {
        let clip = clip(4, 2);
        let mut surface = Surface::new(4, 2);

        render_video(&mut surface, &clip, 0.0).unwrap();
        assert_eq!(surface.pixel(0, 0), [0, 0, 0]);

        render_video(&mut surface, &clip, 0.5).unwrap();
        assert_eq!(surface.pixel(0, 0), [20, 20, 20]);
    }

    #[test]
    fn holds_final_frame_past_clip_end() {
        let clip = clip(4, 2);
        let mut surface = Surface::new(4, 2);
        render_video(&mut surface, &clip, 9.0).unwrap();
        assert_eq!(surface.pixel(3, 1), [40, 40, 40]);
    }

    #[test]
    fn rejects_geometry_mismatch() {
        let clip = clip(4, 2);
        let mut surface = Surface::new(8, 8);
        assert!(render_video(&mut surface, &clip, 0.0).is_err());
    }
}
