//! Still-image renderer: cover-fit plus parametric pan/zoom.
//!
//! The transform is expressed as a crop window in source-pixel space. The
//! window always has the output aspect ratio and always lies fully inside
//! the source image, so sampling it can never expose a letterbox edge.
//!
//! Zoom styles shrink/grow the window around the cover-fit center; pan
//! styles hold the window at the zoomed size and translate it across the
//! margin the zoom headroom created.

use image::RgbImage;

use reelforge_edit_plan::PanZoom;

use crate::surface::Surface;

/// Extra scale applied on top of cover-fit. Pans travel across the margin
/// this headroom creates, which is what keeps them letterbox-free.
pub const PAN_ZOOM_HEADROOM: f64 = 0.15;

/// Axis-aligned crop window in source-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWindow {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropWindow {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// The largest output-aspect window that fits the source (the cover-fit
/// base: sampling exactly this window fills the output with no crop
/// beyond what aspect mismatch requires).
fn cover_fit_window(img_w: u32, img_h: u32, out_w: u32, out_h: u32) -> CropWindow {
    let img_w = img_w.max(1) as f64;
    let img_h = img_h.max(1) as f64;
    let out_aspect = out_w.max(1) as f64 / out_h.max(1) as f64;
    let img_aspect = img_w / img_h;

    let (w, h) = if img_aspect > out_aspect {
        // source wider than output: full height, crop left/right
        (img_h * out_aspect, img_h)
    } else {
        // source taller than output: full width, crop top/bottom
        (img_w, img_w / out_aspect)
    };

    CropWindow {
        x: (img_w - w) / 2.0,
        y: (img_h - h) / 2.0,
        w,
        h,
    }
}

/// Crop window for a pan/zoom style at `progress` through the shot.
pub fn pan_zoom_window(
    img_w: u32,
    img_h: u32,
    out_w: u32,
    out_h: u32,
    style: PanZoom,
    progress: f64,
) -> CropWindow {
    let t = progress.clamp(0.0, 1.0);
    let base = cover_fit_window(img_w, img_h, out_w, out_h);
    let max_scale = 1.0 + PAN_ZOOM_HEADROOM;

    let scale = match style {
        PanZoom::ZoomIn => 1.0 + t * PAN_ZOOM_HEADROOM,
        PanZoom::ZoomOut => max_scale - t * PAN_ZOOM_HEADROOM,
        // pans hold the zoomed-in size for the whole shot
        PanZoom::PanLeft | PanZoom::PanRight | PanZoom::PanUp | PanZoom::PanDown => max_scale,
    };

    let w = base.w / scale;
    let h = base.h / scale;
    let margin_x = base.w - w;
    let margin_y = base.h - h;

    let (x, y) = match style {
        PanZoom::ZoomIn | PanZoom::ZoomOut => {
            (base.x + margin_x / 2.0, base.y + margin_y / 2.0)
        }
        PanZoom::PanRight => (base.x + t * margin_x, base.y + margin_y / 2.0),
        PanZoom::PanLeft => (base.x + (1.0 - t) * margin_x, base.y + margin_y / 2.0),
        PanZoom::PanDown => (base.x + margin_x / 2.0, base.y + t * margin_y),
        PanZoom::PanUp => (base.x + margin_x / 2.0, base.y + (1.0 - t) * margin_y),
    };

    CropWindow { x, y, w, h }
}

/// Draw the still onto the surface with the pan/zoom transform applied.
pub fn render_image(surface: &mut Surface, still: &RgbImage, style: PanZoom, progress: f64) {
    let window = pan_zoom_window(
        still.width(),
        still.height(),
        surface.width(),
        surface.height(),
        style,
        progress,
    );

    let out_w = surface.width();
    let out_h = surface.height();

    for oy in 0..out_h {
        let sy = window.y + (oy as f64 + 0.5) / out_h as f64 * window.h - 0.5;
        for ox in 0..out_w {
            let sx = window.x + (ox as f64 + 0.5) / out_w as f64 * window.w - 0.5;
            surface.put_pixel(ox as i64, oy as i64, sample_bilinear(still, sx, sy));
        }
    }
}

/// Bilinear sample with edge clamping.
fn sample_bilinear(img: &RgbImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = (img.width() - 1) as f64;
    let max_y = (img.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let x0 = x0 as u32;
    let y0 = y0 as u32;
    let x1 = (x0 + 1).min(img.width() - 1);
    let y1 = (y0 + 1).min(img.height() - 1);

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
    }
    out
}
