// Mip chains for face textures, built on the CPU when an image is decoded.
// Kept free of web types so it can be tested on the host.

use image::imageops::FilterType;
use image::RgbaImage;

#[derive(Clone, Debug)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl MipLevel {
    /// Non-empty and `rgba` holds exactly `width * height` pixels.
    pub fn is_consistent(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgba.len() == self.width as usize * self.height as usize * 4
    }
}

/// Levels in a full chain down to 1x1.
#[inline]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Full chain from `base` down to 1x1, each level half the previous
/// (rounded down, at least 1).
pub fn build_mip_chain(base: RgbaImage) -> Vec<MipLevel> {
    let count = mip_level_count(base.width(), base.height()) as usize;
    let mut levels = Vec::with_capacity(count);
    let mut current = base;
    loop {
        let (w, h) = current.dimensions();
        let next = if w > 1 || h > 1 {
            Some(image::imageops::resize(
                &current,
                (w / 2).max(1),
                (h / 2).max(1),
                FilterType::Triangle,
            ))
        } else {
            None
        };
        levels.push(MipLevel {
            width: w,
            height: h,
            rgba: current.into_raw(),
        });
        match next {
            Some(n) => current = n,
            None => break,
        }
    }
    levels
}
