//! Per-frame animation drivers.
//!
//! The pack driver owns `open_progress` and the card positions; the flip
//! driver owns each card's flip progress, angle and settled face. Both only
//! read targets, which the interaction layer writes.

use crate::constants::*;
use crate::easing::{damp, lerp, smoothstep};
use crate::entities::{Card, Pack};
use glam::Vec3;
use std::f32::consts::PI;

/// How far cards have emerged, gated so nothing shows before the pouch is
/// partly open.
#[inline]
pub fn reveal_amount(open_progress: f32) -> f32 {
    smoothstep(REVEAL_START, REVEAL_END, open_progress)
}

/// Staggered reveal of card `index` out of `count`: each card takes `1/count`
/// of the reveal range, in stack order.
#[inline]
pub fn card_reveal(reveal: f32, count: usize, index: usize) -> f32 {
    (reveal * count as f32 - index as f32).clamp(0.0, 1.0)
}

/// Fanned pose for card `index` out of `count`.
#[inline]
pub fn fanned_position(index: usize, count: usize) -> Vec3 {
    let centre = (count as f32 - 1.0) / 2.0;
    Vec3::new(
        (index as f32 - centre) * FAN_SPACING_X,
        stack_base_y() + FAN_LIFT_Y,
        FAN_Z,
    )
}

/// Card position for a given per-card reveal factor.
#[inline]
pub fn card_position(index: usize, count: usize, reveal: f32) -> Vec3 {
    let hidden = Card::hidden_position(index);
    let fanned = fanned_position(index, count);
    Vec3::new(
        lerp(hidden.x, fanned.x, reveal),
        lerp(hidden.y, fanned.y, reveal),
        lerp(hidden.z, fanned.z, reveal),
    )
}

/// Advance the pack toward `target_open` and lay the cards out for the new
/// progress. Returns the overall reveal amount.
pub fn animate_pack(pack: &mut Pack, cards: &mut [Card], target_open: f32, dt: f32) -> f32 {
    let next = damp(pack.open_progress, target_open, OPEN_DAMPING_RATE, dt).clamp(0.0, 1.0);
    pack.open_progress = next;

    let reveal = reveal_amount(next);
    let n = cards.len();
    for (i, card) in cards.iter_mut().enumerate() {
        card.position = card_position(i, n, card_reveal(reveal, n, i));
    }
    reveal
}

/// Advance every card's flip toward its target and derive its rotation.
pub fn animate_card_flips(cards: &mut [Card], dt: f32) {
    for card in cards.iter_mut() {
        let p = damp(card.flip_progress, card.flip_target, FLIP_DAMPING_RATE, dt).clamp(0.0, 1.0);
        card.flip_progress = p;
        card.flip_angle = PI * p;

        if (p - 1.0).abs() < PROGRESS_EPSILON && !card.flipped {
            card.flipped = true;
            log::debug!("[card] {} settled on back", card.index);
        }
        if p.abs() < PROGRESS_EPSILON && card.flipped {
            card.flipped = false;
            log::debug!("[card] {} settled on front", card.index);
        }

        card.rotation = Vec3::new(0.0, card.flip_angle, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{create_card, create_pack};
    use crate::material::TextureId;

    fn deck(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| create_card(i, TextureId(0), TextureId(1)).unwrap())
            .collect()
    }

    #[test]
    fn no_card_moves_before_reveal_threshold() {
        let mut pack = create_pack(TextureId(0), TextureId(1), TextureId(2)).unwrap();
        let mut cards = deck(4);
        pack.open_progress = 0.3;
        let reveal = animate_pack(&mut pack, &mut cards, 0.3, 0.016);
        assert_eq!(reveal, 0.0);
        for (i, c) in cards.iter().enumerate() {
            assert_eq!(c.position, Card::hidden_position(i));
        }
    }

    #[test]
    fn card_reveal_is_non_increasing_in_index() {
        for step in 0..=100 {
            let reveal = step as f32 / 100.0;
            let values: Vec<f32> = (0..6).map(|i| card_reveal(reveal, 6, i)).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]), "{values:?}");
        }
    }

    #[test]
    fn first_card_finishes_before_second_starts() {
        assert_eq!(card_reveal(0.25, 4, 0), 1.0);
        assert_eq!(card_reveal(0.25, 4, 1), 0.0);
        assert!((card_reveal(0.375, 4, 1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fanned_positions_are_centred() {
        for (i, want) in [-1.2f32, -0.4, 0.4, 1.2].into_iter().enumerate() {
            assert!((fanned_position(i, 4).x - want).abs() < 1e-6);
        }
        assert!((fanned_position(0, 4).y - 0.82).abs() < 1e-6);
    }

    #[test]
    fn flipped_snaps_only_inside_tolerance_bands() {
        let mut cards = deck(1);
        cards[0].flip_to(1.0);
        let mut prev = cards[0].flipped;
        for _ in 0..600 {
            animate_card_flips(&mut cards, 0.016);
            let c = &cards[0];
            if c.flipped != prev {
                assert!(c.flip_progress > 1.0 - PROGRESS_EPSILON);
            }
            prev = c.flipped;
        }
        assert!(cards[0].flipped);

        cards[0].flip_to(0.0);
        for _ in 0..600 {
            animate_card_flips(&mut cards, 0.016);
            let c = &cards[0];
            if c.flipped != prev {
                assert!(c.flip_progress < PROGRESS_EPSILON);
            }
            prev = c.flipped;
        }
        assert!(!cards[0].flipped);
    }

    #[test]
    fn flip_angle_tracks_progress() {
        let mut cards = deck(1);
        cards[0].flip_to(1.0);
        animate_card_flips(&mut cards, 0.033);
        let c = &cards[0];
        assert!((c.flip_angle - PI * c.flip_progress).abs() < 1e-6);
        assert_eq!(c.rotation, Vec3::new(0.0, c.flip_angle, 0.0));
        assert!(c.flip_progress > 0.0 && c.flip_progress < 1.0);
    }
}
