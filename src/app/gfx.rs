// src/app/gfx.rs
use std::path::Path;

use eframe::egui::{self as eg, ColorImage, TextureHandle};

/// Upload an RGBA image to a GPU texture. (UI thread only)
pub fn upload_rgba(ctx: &eg::Context, w: u32, h: u32, bytes: &[u8], name: &str) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], bytes);
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}

/// Load a texture from a cached file path. (UI thread only)
pub fn load_texture_from_path(ctx: &eg::Context, path: &Path, cache_name: &str) -> Result<TextureHandle, String> {
    let (w, h, bytes) = crate::app::cache::load_rgba_image(path)?;
    if w == 0 || h == 0 {
        return Err(format!("empty image {w}x{h}"));
    }
    Ok(upload_rgba(ctx, w, h, &bytes, cache_name))
}

/// UV window that lets a texture of `tex_size` fill `rect` undistorted,
/// cropping the overflow (like `object-fit: cover`).
pub fn cover_uv(tex_size: eg::Vec2, rect: eg::Rect) -> eg::Rect {
    let full = eg::Rect::from_min_max(eg::pos2(0.0, 0.0), eg::pos2(1.0, 1.0));
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return full;
    }
    let tex_ar = tex_size.x / tex_size.y;
    let rect_ar = rect.width() / rect.height();
    if tex_ar > rect_ar {
        // wider than the slot: crop left/right
        let keep = rect_ar / tex_ar;
        let pad = (1.0 - keep) * 0.5;
        eg::Rect::from_min_max(eg::pos2(pad, 0.0), eg::pos2(1.0 - pad, 1.0))
    } else {
        let keep = tex_ar / rect_ar;
        let pad = (1.0 - keep) * 0.5;
        eg::Rect::from_min_max(eg::pos2(0.0, pad), eg::pos2(1.0, 1.0 - pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_crops_the_long_side() {
        let slot = eg::Rect::from_min_size(eg::pos2(0.0, 0.0), eg::vec2(100.0, 100.0));
        let wide = cover_uv(eg::vec2(200.0, 100.0), slot);
        assert!((wide.min.x - 0.25).abs() < 1e-5 && (wide.max.x - 0.75).abs() < 1e-5);
        assert_eq!(wide.min.y, 0.0);
        let tall = cover_uv(eg::vec2(100.0, 400.0), slot);
        assert!((tall.min.y - 0.375).abs() < 1e-5);
        assert_eq!(tall.min.x, 0.0);
    }
}
