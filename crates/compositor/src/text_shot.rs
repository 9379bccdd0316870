//! Text-card renderer.
//!
//! Centers greedily word-wrapped text within the safe frame area over the
//! cleared background, with a drop-shadow pass under the fill pass for
//! legibility. Wrapping and centering are pure layout over a width-measure
//! function, so they are testable without a font; rasterization uses the
//! TTF loaded at asset time.

use rusttype::{point, Font, Scale};

use crate::surface::Surface;

/// Typography for text cards.
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Glyph size in pixels.
    pub font_size: f32,

    /// Vertical advance between line tops.
    pub line_advance: f32,

    /// Fill color.
    pub fill: [u8; 3],

    /// Drop-shadow color.
    pub shadow: [u8; 3],

    /// Drop-shadow opacity.
    pub shadow_alpha: f32,

    /// Drop-shadow offset in pixels (x, y).
    pub shadow_offset: (i64, i64),

    /// Fraction of the frame width a line may occupy.
    pub max_width_frac: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 64.0,
            line_advance: 80.0,
            fill: [255, 255, 255],
            shadow: [0, 0, 0],
            shadow_alpha: 0.7,
            shadow_offset: (4, 4),
            max_width_frac: 0.9,
        }
    }
}

/// Greedy word wrap: pack words onto a line while the measured width stays
/// within `max_width`; a word that doesn't fit starts the next line. A
/// single word wider than the limit gets its own line rather than being
/// split.
pub fn wrap_text(text: &str, max_width: f32, measure: &dyn Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Top of a multi-line block vertically re-centered as a group.
pub fn group_top(line_count: usize, line_advance: f32, surface_height: u32) -> f32 {
    (surface_height as f32 - line_count as f32 * line_advance) / 2.0
}

/// Pixel width of a laid-out line.
pub fn measure_line_width(font: &Font<'_>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .map(|bb| bb.max.x as f32)
        .fold(0.0, f32::max)
}

/// Draw a text card centered on the surface.
pub fn render_text_card(surface: &mut Surface, font: &Font<'_>, text: &str, style: &TextStyle) {
    let max_width = surface.width() as f32 * style.max_width_frac;
    let measure = |line: &str| measure_line_width(font, line, style.font_size);
    let lines = wrap_text(text, max_width, &measure);
    if lines.is_empty() {
        return;
    }

    let scale = Scale::uniform(style.font_size);
    let v_metrics = font.v_metrics(scale);
    let glyph_height = v_metrics.ascent - v_metrics.descent;
    let top = group_top(lines.len(), style.line_advance, surface.height());

    for (i, line) in lines.iter().enumerate() {
        let line_width = measure(line);
        let x = (surface.width() as f32 - line_width) / 2.0;
        let baseline =
            top + i as f32 * style.line_advance + (style.line_advance - glyph_height) / 2.0
                + v_metrics.ascent;

        let (dx, dy) = style.shadow_offset;
        draw_line(
            surface,
            font,
            line,
            x + dx as f32,
            baseline + dy as f32,
            scale,
            style.shadow,
            style.shadow_alpha,
        );
        draw_line(surface, font, line, x, baseline, scale, style.fill, 1.0);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_line(
    surface: &mut Surface,
    font: &Font<'_>,
    text: &str,
    x: f32,
    baseline: f32,
    scale: Scale,
    color: [u8; 3],
    alpha: f32,
) {
    for glyph in font.layout(text, scale, point(x, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x as i64 + gx as i64;
                let py = bb.min.y as i64 + gy as i64;
                surface.blend_pixel(px, py, color, coverage * alpha);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10px per character, like a monospace face.
    fn fixed_measure(line: &str) -> f32 {
        line.chars().count() as f32 * 10.0
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("THE RECKONING", 200.0, &fixed_measure);
        assert_eq!(lines, vec!["THE RECKONING"]);
    }

    #[test]
    fn wraps_greedily_at_max_width() {
        let lines = wrap_text("one two three four five", 100.0, &fixed_measure);
        for line in &lines {
            assert!(fixed_measure(line) <= 100.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), "one two three four five");
        assert!(lines.len() > 1);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_text("a incomprehensibilities b", 100.0, &fixed_measure);
        assert!(lines.contains(&"incomprehensibilities".to_string()));
    }

    #[test]
    fn empty_text_produces_no_lines() {
        assert!(wrap_text("", 100.0, &fixed_measure).is_empty());
        assert!(wrap_text("   ", 100.0, &fixed_measure).is_empty());
    }

    #[test]
    fn group_centering_is_symmetric() {
        // one 80px line in a 720px frame sits 320px from the top
        assert_eq!(group_top(1, 80.0, 720), 320.0);
        // three lines: block of 240px, so 240px above and below
        assert_eq!(group_top(3, 80.0, 720), 240.0);
    }
}
