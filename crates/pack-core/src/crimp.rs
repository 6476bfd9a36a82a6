//! Procedural stripe texture for the pack's crimped top and bottom seals.

pub const CRIMP_WIDTH: u32 = 512;
pub const CRIMP_HEIGHT: u32 = 64;

const BACKGROUND: [u8; 3] = [0xf6, 0xf7, 0xff];
const STROKE: [u8; 3] = [110, 126, 180];
const STROKE_ALPHA: f32 = 0.55;
const STROKE_WIDTH: f32 = 8.0;
const STROKE_COUNT: u32 = 6;
const STROKE_FIRST_Y: f32 = 6.0;
const STROKE_STEP_Y: f32 = 9.0;

/// Fraction of pixel row `row` covered by horizontal strokes centred on
/// `y = 6 + 9i`. Overlapping strokes composite like repeated source-over
/// draws, so coverage is returned per stroke.
fn stroke_coverages(row: u32) -> impl Iterator<Item = f32> {
    let top = row as f32;
    let bottom = top + 1.0;
    (0..STROKE_COUNT).filter_map(move |i| {
        let centre = STROKE_FIRST_Y + STROKE_STEP_Y * i as f32;
        let s0 = centre - STROKE_WIDTH / 2.0;
        let s1 = centre + STROKE_WIDTH / 2.0;
        let covered = (bottom.min(s1) - top.max(s0)).max(0.0);
        (covered > 0.0).then_some(covered)
    })
}

/// RGBA8 pixels (sRGB encoded, row-major, top row first).
pub fn crimp_pixels() -> Vec<u8> {
    let mut out = Vec::with_capacity((CRIMP_WIDTH * CRIMP_HEIGHT * 4) as usize);
    for row in 0..CRIMP_HEIGHT {
        let mut rgb = BACKGROUND.map(f32::from);
        for coverage in stroke_coverages(row) {
            let a = STROKE_ALPHA * coverage;
            for (c, s) in rgb.iter_mut().zip(STROKE) {
                *c = *c * (1.0 - a) + f32::from(s) * a;
            }
        }
        let px = [
            rgb[0].round() as u8,
            rgb[1].round() as u8,
            rgb[2].round() as u8,
            0xff,
        ];
        for _ in 0..CRIMP_WIDTH {
            out.extend_from_slice(&px);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pixels: &[u8], y: u32) -> [u8; 4] {
        let i = (y * CRIMP_WIDTH * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn has_expected_size_and_is_opaque() {
        let px = crimp_pixels();
        assert_eq!(px.len(), (CRIMP_WIDTH * CRIMP_HEIGHT * 4) as usize);
        assert!(px.chunks_exact(4).all(|p| p[3] == 0xff));
    }

    #[test]
    fn stripe_rows_are_darker_than_background() {
        let px = crimp_pixels();
        // Row 6 is a stroke centre; row 63 is past the last stroke (51 + 4).
        let stripe = row(&px, 6);
        let bg = row(&px, 63);
        assert_eq!(bg, [0xf6, 0xf7, 0xff, 0xff]);
        assert!(stripe[0] < bg[0] && stripe[2] < bg[2]);
    }

    #[test]
    fn rows_are_uniform_across_width() {
        let px = crimp_pixels();
        let first = row(&px, 10);
        let i = (10 * CRIMP_WIDTH * 4 + (CRIMP_WIDTH - 1) * 4) as usize;
        assert_eq!(&px[i..i + 4], &first);
    }
}
