//! Text-card font loading.
//!
//! No font ships with the engine; one is either configured explicitly or
//! discovered from standard system locations. A plan without text cards
//! renders fine with no font at all.

use std::path::{Path, PathBuf};

use rusttype::Font;

use reelforge_common::error::{ReelforgeError, ReelforgeResult};

/// Standard font locations probed when no font is configured, best first.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// First discoverable system font, if any.
pub fn discover_font_path() -> Option<PathBuf> {
    FONT_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the text-card font from `configured`, falling back to discovery.
pub fn load_font(configured: Option<&Path>) -> ReelforgeResult<Font<'static>> {
    let path = match configured {
        Some(path) => {
            if !path.exists() {
                return Err(ReelforgeError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => discover_font_path().ok_or_else(|| {
            ReelforgeError::config(
                "No text-card font configured and none found in system font locations",
            )
        })?,
    };

    let bytes = std::fs::read(&path)?;
    let font = Font::try_from_vec(bytes).ok_or_else(|| {
        ReelforgeError::config(format!("Failed to parse font file {}", path.display()))
    })?;

    tracing::debug!(font = %path.display(), "Loaded text-card font");
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_missing_font_is_file_not_found() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, ReelforgeError::FileNotFound { .. }));
    }
}
