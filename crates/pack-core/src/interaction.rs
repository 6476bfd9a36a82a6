//! Pointer normalisation and click intent resolution.

use glam::Vec2;

/// What a click means given the current scene state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickIntent {
    /// Start (or keep) opening the pack.
    OpenPack,
    /// Flip the card at this stack index to its other face.
    ToggleFlip(usize),
    None,
}

/// Opening takes precedence over everything while the pack is not fully
/// open; afterwards a click flips whichever card is under the pointer.
#[inline]
pub fn resolve_click(pack_open: bool, card_under_pointer: Option<usize>) -> ClickIntent {
    if !pack_open {
        return ClickIntent::OpenPack;
    }
    match card_under_pointer {
        Some(i) => ClickIntent::ToggleFlip(i),
        None => ClickIntent::None,
    }
}

/// Map client-space pointer coordinates inside a `rect` (left, top, width,
/// height) to normalised device coordinates, y up.
///
/// Degenerate rectangles and non-finite coordinates map to the centre;
/// positions outside the rectangle are clamped to its edge.
pub fn pointer_to_ndc(client: Vec2, rect: [f32; 4]) -> Vec2 {
    let [left, top, width, height] = rect;
    if !client.is_finite() || !width.is_finite() || !height.is_finite() {
        return Vec2::ZERO;
    }
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = ((client.x - left) / width).clamp(0.0, 1.0);
    let v = ((client.y - top) / height).clamp(0.0, 1.0);
    Vec2::new(u * 2.0 - 1.0, -(v * 2.0) + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_pack_always_opens() {
        assert_eq!(resolve_click(false, Some(2)), ClickIntent::OpenPack);
        assert_eq!(resolve_click(false, None), ClickIntent::OpenPack);
    }

    #[test]
    fn open_pack_flips_hit_card_or_does_nothing() {
        assert_eq!(resolve_click(true, Some(1)), ClickIntent::ToggleFlip(1));
        assert_eq!(resolve_click(true, None), ClickIntent::None);
    }

    #[test]
    fn ndc_corners_and_centre() {
        let rect = [10.0, 20.0, 200.0, 100.0];
        assert_eq!(pointer_to_ndc(Vec2::new(10.0, 20.0), rect), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(Vec2::new(210.0, 120.0), rect), Vec2::new(1.0, -1.0));
        assert_eq!(pointer_to_ndc(Vec2::new(110.0, 70.0), rect), Vec2::ZERO);
    }

    #[test]
    fn malformed_input_is_clamped() {
        let rect = [0.0, 0.0, 100.0, 100.0];
        assert_eq!(pointer_to_ndc(Vec2::new(f32::NAN, 5.0), rect), Vec2::ZERO);
        assert_eq!(pointer_to_ndc(Vec2::new(5.0, 5.0), [0.0, 0.0, 0.0, 50.0]), Vec2::ZERO);
        assert_eq!(pointer_to_ndc(Vec2::new(-50.0, 500.0), rect), Vec2::new(-1.0, -1.0));
    }
}
