//! Pack and card entities plus the factories that assemble them.

use crate::constants::*;
use crate::error::Result;
use crate::material::{srgb_hex_to_linear, MaterialSpec, TextureId};
use crate::mesh::{BoxDimensions, BoxMesh};
use crate::sculpt::sculpt_foil;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Per-card offset drawn once at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scatter {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub index: usize,
    pub dims: BoxDimensions,
    pub mesh: BoxMesh,
    /// Face materials in `[+x, -x, +y, -y, +z, -z]` order.
    pub materials: [MaterialSpec; 6],

    pub flip_progress: f32,
    pub flip_target: f32,
    pub flipped: bool,
    pub flip_angle: f32,

    pub base_angle: f32,
    pub scatter: Scatter,

    pub position: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
}

impl Card {
    /// Request a flip toward the back (`1.0`) or the front (`0.0`).
    pub fn flip_to(&mut self, target: f32) {
        self.flip_target = if target >= 0.5 { 1.0 } else { 0.0 };
    }

    /// Aim at the face opposite to the one currently settled on.
    pub fn toggle_flip(&mut self) {
        self.flip_to(if self.flipped { 0.0 } else { 1.0 });
    }

    /// Stacked pose inside the pouch for the card at `index`.
    #[inline]
    pub fn hidden_position(index: usize) -> Vec3 {
        Vec3::new(
            0.0,
            stack_base_y() + index as f32 * STACK_SPACING,
            STACK_HIDDEN_Z,
        )
    }

    /// Zero all animation state and put the card back in the stack.
    pub fn reset(&mut self) {
        self.flip_target = 0.0;
        self.flipped = false;
        self.flip_progress = 0.0;
        self.flip_angle = 0.0;
        self.position = Self::hidden_position(self.index);
        self.rotation = Vec3::ZERO;
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(rot, self.position)
    }
}

/// Fan spread angle for card `index` out of `count`.
#[inline]
pub fn fan_angle(index: usize, count: usize) -> f32 {
    let centre = (count as f32 - 1.0) / 2.0;
    ((index as f32 - centre) * FAN_ANGLE_STEP_DEG).to_radians()
}

/// Build card `index` with its own front art and the shared back.
pub fn create_card(index: usize, front: TextureId, back: TextureId) -> Result<Card> {
    let dims = BoxDimensions::new("card", CARD_W, CARD_H, CARD_T)?;
    let mesh = BoxMesh::new(dims, [1, 1, 1])?;
    let side = MaterialSpec {
        color: [1.0, 1.0, 1.0],
        roughness: 0.6,
        metalness: 0.0,
        clearcoat: 0.3,
        texture: None,
    };
    let front = MaterialSpec::textured(front, 0.4, 0.05, 0.6);
    let back = MaterialSpec::textured(back, 0.45, 0.05, 0.6);
    Ok(Card {
        index,
        dims,
        mesh,
        materials: [side.clone(), side.clone(), side.clone(), side, front, back],
        flip_progress: 0.0,
        flip_target: 0.0,
        flipped: false,
        flip_angle: 0.0,
        base_angle: 0.0,
        scatter: Scatter::default(),
        position: Card::hidden_position(index),
        rotation: Vec3::ZERO,
    })
}

#[derive(Clone, Debug)]
pub struct Pack {
    pub dims: BoxDimensions,
    pub body: BoxMesh,
    pub materials: [MaterialSpec; 6],
    pub open_progress: f32,
    pub position: Vec3,
    pub scale: f32,
}

impl Pack {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::IDENTITY,
            self.position,
        )
    }
}

/// Build the sealed foil pouch with the given front/back art.
pub fn create_pack(front: TextureId, back: TextureId, crimp: TextureId) -> Result<Pack> {
    create_pack_with_dims(PACK_W, PACK_H, PACK_D, front, back, crimp)
}

pub fn create_pack_with_dims(
    width: f32,
    height: f32,
    depth: f32,
    front: TextureId,
    back: TextureId,
    crimp: TextureId,
) -> Result<Pack> {
    let dims = BoxDimensions::new("pack", width, height, depth)?;
    let mut body = BoxMesh::new(dims, PACK_SEGMENTS)?;
    sculpt_foil(&mut body, dims);

    let side = MaterialSpec {
        color: srgb_hex_to_linear(0xbec6df),
        roughness: 0.32,
        metalness: 0.45,
        clearcoat: 0.6,
        texture: None,
    };
    let seal = MaterialSpec {
        color: srgb_hex_to_linear(0xf3f5ff),
        roughness: 0.32,
        metalness: 0.42,
        clearcoat: 0.5,
        texture: Some(crimp),
    };
    let front = MaterialSpec::textured(front, 0.18, 0.8, 1.0);
    let back = MaterialSpec {
        texture: Some(back),
        ..front.clone()
    };

    Ok(Pack {
        dims,
        body,
        materials: [side.clone(), side, seal.clone(), seal, front, back],
        open_progress: 0.0,
        position: PACK_POSITION,
        scale: 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn card_starts_neutral_and_stacked() {
        let card = create_card(2, TextureId(0), TextureId(1)).unwrap();
        assert_eq!(card.flip_progress, 0.0);
        assert_eq!(card.flip_target, 0.0);
        assert!(!card.flipped);
        assert_eq!(card.position, Card::hidden_position(2));
        assert_eq!(card.materials[4].texture, Some(TextureId(0)));
        assert_eq!(card.materials[5].texture, Some(TextureId(1)));
        assert!(card.materials[..4].iter().all(|m| m.texture.is_none()));
    }

    #[test]
    fn toggle_flip_aims_opposite_of_settled_face() {
        let mut card = create_card(0, TextureId(0), TextureId(1)).unwrap();
        card.toggle_flip();
        assert_eq!(card.flip_target, 1.0);
        // Not settled yet, so toggling again keeps aiming at the back.
        card.toggle_flip();
        assert_eq!(card.flip_target, 1.0);
        card.flipped = true;
        card.toggle_flip();
        assert_eq!(card.flip_target, 0.0);
    }

    #[test]
    fn fan_angles_are_symmetric() {
        let n = 4;
        for i in 0..n {
            let a = fan_angle(i, n);
            let mirror = fan_angle(n - 1 - i, n);
            assert!((a + mirror).abs() < 1e-6);
        }
        assert!((fan_angle(0, 4) - (-6.75f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn pack_rejects_zero_depth() {
        let err = create_pack_with_dims(1.0, 1.0, 0.0, TextureId(0), TextureId(1), TextureId(2))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension { axis: "depth", .. }));
    }

    #[test]
    fn pack_is_sealed_and_sculpted() {
        let pack = create_pack(TextureId(0), TextureId(1), TextureId(2)).unwrap();
        assert_eq!(pack.open_progress, 0.0);
        let flat = BoxMesh::new(pack.dims, PACK_SEGMENTS).unwrap();
        assert_ne!(flat.positions, pack.body.positions);
        assert_eq!(pack.materials[2].texture, Some(TextureId(2)));
    }
}
