//! Ray casting against card boxes.
//!
//! Everything here is a pure query over current transforms; callers decide
//! what a hit means.

use crate::entities::Card;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// `dir` is normalised; a zero direction falls back to `-Z`.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        let dir = dir.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, dir }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Distance along `ray` to an axis-aligned box centred on the origin with
/// `half_extents`, if the ray enters (or starts inside) it at `t >= 0`.
pub fn ray_aabb(ray: &Ray, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.dir[axis];
        let h = half_extents[axis];
        if d.abs() < 1e-12 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (-h - o) * inv;
            let b = (h - o) * inv;
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Distance along a world-space `ray` to a box with `half_extents` placed by
/// `model` (rotation + translation, optional uniform scale).
pub fn ray_oriented_box(ray: &Ray, model: Mat4, half_extents: Vec3) -> Option<f32> {
    let inv = model.inverse();
    let local_origin = inv.transform_point3(ray.origin);
    let local_dir = inv.transform_vector3(ray.dir);
    let len = local_dir.length();
    if !len.is_finite() || len <= 0.0 {
        return None;
    }
    let local = Ray {
        origin: local_origin,
        dir: local_dir / len,
    };
    let t_local = ray_aabb(&local, half_extents)?;
    let hit_world = model.transform_point3(local.at(t_local));
    Some(hit_world.distance(ray.origin))
}

/// Index of the nearest card under `ray`, with its hit distance.
pub fn pick_card(ray: &Ray, cards: &[Card]) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, card) in cards.iter().enumerate() {
        if let Some(t) = ray_oriented_box(ray, card.model_matrix(), card.dims.half_extents()) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::create_card;
    use crate::material::TextureId;

    #[test]
    fn aabb_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray_aabb(&ray, Vec3::splat(1.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-6);

        let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_aabb(&miss, Vec3::splat(1.0)).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray_aabb(&behind, Vec3::splat(1.0)).is_none());
    }

    #[test]
    fn rotated_box_is_hit_edge_on_only_within_thickness() {
        let half = Vec3::new(0.3, 0.4, 0.002);
        let model = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        // After a quarter turn the thin axis points along world X.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray_oriented_box(&ray, model, half).unwrap();
        assert!((t - 4.7).abs() < 1e-4);
        let off = Ray::new(Vec3::new(0.01, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_oriented_box(&off, model, half).is_none());
    }

    #[test]
    fn nearest_card_wins() {
        let mut cards: Vec<Card> = (0..3)
            .map(|i| create_card(i, TextureId(0), TextureId(1)).unwrap())
            .collect();
        cards[0].position = Vec3::new(0.0, 0.0, 0.0);
        cards[1].position = Vec3::new(0.0, 0.0, 1.0);
        cards[2].position = Vec3::new(2.0, 0.0, 2.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let (i, _) = pick_card(&ray, &cards).unwrap();
        assert_eq!(i, 1);
    }
}
