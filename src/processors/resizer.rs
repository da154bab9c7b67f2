// panelpress/src/processors/resizer.rs
use image::{imageops::FilterType, DynamicImage, GenericImageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Scale by `min(max_w / w, max_h / h, 1.0)`, truncating to whole pixels.
    Bounded(u32, u32),
    /// Fit inside the box preserving aspect ratio, rounding to whole pixels.
    Thumbnail(u32, u32),
}

pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    pub fn resize(&self, image: DynamicImage, mode: ResizeMode) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = Self::calculate_dimensions(orig_width, orig_height, mode);

        if width == orig_width && height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            width,
            height
        );

        image.resize_exact(width, height, self.filter)
    }

    pub fn calculate_dimensions(orig_w: u32, orig_h: u32, mode: ResizeMode) -> (u32, u32) {
        if orig_w == 0 || orig_h == 0 {
            return (orig_w, orig_h);
        }

        let (box_w, box_h, round) = match mode {
            ResizeMode::Bounded(w, h) => (w, h, false),
            ResizeMode::Thumbnail(w, h) => (w, h, true),
        };

        if orig_w <= box_w && orig_h <= box_h {
            return (orig_w, orig_h);
        }

        let (w, h) = (orig_w as u64, orig_h as u64);
        let (bw, bh) = (box_w as u64, box_h as u64);
        let scale = |value: u64, num: u64, den: u64| {
            if round {
                (value * num + den / 2) / den
            } else {
                value * num / den
            }
        };

        // Compare bw / w against bh / h without leaving integers.
        let (new_w, new_h) = if bw * h <= bh * w {
            (bw, scale(h, bw, w))
        } else {
            (scale(w, bh, h), bh)
        };

        (
            (new_w as u32).clamp(1, box_w.max(1)),
            (new_h as u32).clamp(1, box_h.max(1)),
        )
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
