use egui::{ColorImage, TextureHandle, Vec2};

use crate::range_seek::{ThumbImage, ThumbMetrics};

/// Normal and pressed thumb textures, drawn procedurally as shaded discs.
pub struct ThumbTextures {
    normal: TextureHandle,
    pressed: TextureHandle,
    size: Vec2,
}

impl ThumbTextures {
    pub fn new(ctx: &egui::Context, diameter: f32) -> Self {
        let diameter = diameter.max(4.0);
        // Rasterize at physical resolution so the disc edge stays crisp
        let side = (diameter * ctx.pixels_per_point()).round().max(4.0) as usize;

        let normal = ctx.load_texture(
            "range_seek_thumb_normal",
            ColorImage::from_rgba_unmultiplied([side, side], &thumb_pixels(side, false)),
            egui::TextureOptions::LINEAR,
        );
        let pressed = ctx.load_texture(
            "range_seek_thumb_pressed",
            ColorImage::from_rgba_unmultiplied([side, side], &thumb_pixels(side, true)),
            egui::TextureOptions::LINEAR,
        );

        tracing::debug!(diameter, side, "thumb textures created");

        Self {
            normal,
            pressed,
            size: Vec2::splat(diameter),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn metrics(&self) -> ThumbMetrics {
        ThumbMetrics::new(self.size.x, self.size.y)
    }

    pub fn texture(&self, image: ThumbImage) -> &TextureHandle {
        match image {
            ThumbImage::Normal => &self.normal,
            ThumbImage::Pressed => &self.pressed,
        }
    }
}

/// RGBA pixels of a `side` x `side` thumb.
pub fn thumb_pixels(side: usize, pressed: bool) -> Vec<u8> {
    let mut rgba = vec![0u8; side * side * 4];
    let center = side as f32 / 2.0;
    let radius = center - 1.0;

    for y in 0..side {
        for x in 0..side {
            let idx = (y * side + x) * 4;
            let cx = x as f32 + 0.5 - center;
            let cy = y as f32 + 0.5 - center;
            let dist = (cx * cx + cy * cy).sqrt();

            // Anti-aliased edge
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            // Lit from the top-left, darker towards the rim
            let t = (dist / radius).min(1.0);
            let light = 1.0 - 0.25 * t - 0.1 * (cy / radius).max(0.0);
            let (r, g, b) = if pressed {
                (255.0 * light, 200.0 * light, 120.0 * light)
            } else {
                (235.0 * light, 235.0 * light, 240.0 * light)
            };

            rgba[idx] = r as u8;
            rgba[idx + 1] = g as u8;
            rgba[idx + 2] = b as u8;
            rgba[idx + 3] = (255.0 * coverage) as u8;
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], side: usize, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * side + x) * 4;
        [rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3]]
    }

    #[test]
    fn test_thumb_pixels_shape() {
        let side = 32;
        let rgba = thumb_pixels(side, false);
        assert_eq!(rgba.len(), side * side * 4);

        // Corners are outside the disc
        assert_eq!(pixel(&rgba, side, 0, 0)[3], 0);
        assert_eq!(pixel(&rgba, side, side - 1, side - 1)[3], 0);

        // Center is opaque
        assert_eq!(pixel(&rgba, side, side / 2, side / 2)[3], 255);
    }

    #[test]
    fn test_pressed_variant_is_tinted() {
        let side = 24;
        let normal = pixel(&thumb_pixels(side, false), side, side / 2, side / 2);
        let pressed = pixel(&thumb_pixels(side, true), side, side / 2, side / 2);
        assert_ne!(normal, pressed);
        assert!(pressed[2] < normal[2]);
    }

    #[test]
    fn test_textures_match_metrics() {
        let ctx = egui::Context::default();
        let thumbs = ThumbTextures::new(&ctx, 28.0);
        assert_eq!(thumbs.size(), Vec2::splat(28.0));
        assert_eq!(thumbs.metrics(), ThumbMetrics::new(28.0, 28.0));
        assert_ne!(
            thumbs.texture(ThumbImage::Normal).id(),
            thumbs.texture(ThumbImage::Pressed).id()
        );
    }
}
