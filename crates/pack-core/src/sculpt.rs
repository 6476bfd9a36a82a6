//! Foil pouch sculpting.
//!
//! Turns a rigid, regularly subdivided box into something that reads as a
//! soft foil bag: a low frequency bulge and fine wrinkles on the large faces,
//! crimped seams near the top and bottom, a ripple along the sealed edges and
//! slightly pinched sides. The transform is deterministic and is applied once
//! when the pack mesh is built.

use crate::mesh::{BoxDimensions, BoxMesh};
use std::f32::consts::PI;

/// Tolerance used to classify a vertex as lying on a face plane.
pub const FACE_TOLERANCE: f32 = 1e-4;

const BULGE_AMP: f32 = 0.015;
const BULGE_FREQ_X: f32 = PI * 0.9;
const BULGE_FREQ_Y: f32 = PI * 0.65;

const WRINKLE_AMP: f32 = 0.0035;
const WRINKLE_FINE_AMP: f32 = 0.002;

const GATHER_AMP: f32 = 0.01;
const GATHER_CENTER: f32 = 0.92; // normalised y of the crimped seams
const GATHER_SHARPNESS: f32 = 3.2;

const SEAL_RIPPLE_AMP: f32 = 0.0025;
const SEAL_RIPPLE_FREQ: f32 = PI * 9.0;

const EDGE_SOFTEN: f32 = 0.08;
const EDGE_SOFTEN_MIX: f32 = 0.35;

/// Outward displacement of the front/back faces at normalised `(xn, yn)`.
#[inline]
pub fn face_offset(xn: f32, yn: f32) -> f32 {
    let bulge = BULGE_AMP * (xn * BULGE_FREQ_X).cos() * (yn * BULGE_FREQ_Y).cos();
    let wrinkle = WRINKLE_AMP * (xn * 6.0 + yn * 4.0).sin() + WRINKLE_FINE_AMP * (xn * 13.0).sin();
    let gather_top = GATHER_AMP * (-((yn - GATHER_CENTER) * GATHER_SHARPNESS).powi(2)).exp();
    let gather_bottom = GATHER_AMP * (-((yn + GATHER_CENTER) * GATHER_SHARPNESS).powi(2)).exp();
    bulge + wrinkle + gather_top + gather_bottom
}

/// Outward ripple of the top/bottom seals at normalised `xn`.
#[inline]
pub fn seal_ripple(xn: f32) -> f32 {
    SEAL_RIPPLE_AMP * ((xn + 1.0) * SEAL_RIPPLE_FREQ).sin()
}

/// Horizontal contraction factor for a vertex at normalised `xn`.
#[inline]
pub fn edge_contraction(xn: f32) -> f32 {
    let soft = EDGE_SOFTEN * xn.abs().powi(3);
    1.0 - soft * EDGE_SOFTEN_MIX
}

#[inline]
fn outward_sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Deform `mesh` in place into a foil pouch and recompute its normals.
///
/// Every input coordinate is read from the undeformed vertex, so the face
/// tests and the x contraction do not see each other's output. The
/// front/back and top/bottom tests are independent: an edge vertex lying on
/// both planes receives both offsets.
pub fn sculpt_foil(mesh: &mut BoxMesh, dims: BoxDimensions) {
    let half = dims.half_extents();
    for p in mesh.positions.iter_mut() {
        let [x, y, z] = *p;
        let xn = x / half.x;
        let yn = y / half.y;

        if (z.abs() - half.z).abs() < FACE_TOLERANCE {
            let dir = outward_sign(z);
            p[2] = dir * half.z + dir * face_offset(xn, yn);
        }

        if (y.abs() - half.y).abs() < FACE_TOLERANCE {
            let dir = outward_sign(y);
            p[1] = dir * half.y + dir * seal_ripple(xn);
        }

        p[0] = x * edge_contraction(xn);
    }
    mesh.compute_vertex_normals();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;

    fn pack_mesh() -> (BoxMesh, BoxDimensions) {
        let dims = BoxDimensions::new("pack", 0.8, 1.2, 0.16).unwrap();
        (BoxMesh::new(dims, [8, 10, 2]).unwrap(), dims)
    }

    #[test]
    fn is_bit_identical_across_runs() {
        let (mut a, dims) = pack_mesh();
        let mut b = a.clone();
        sculpt_foil(&mut a, dims);
        sculpt_foil(&mut b, dims);
        let bits = |m: &BoxMesh| {
            m.positions
                .iter()
                .chain(&m.normals)
                .flat_map(|v| v.iter().map(|c| c.to_bits()))
                .collect::<Vec<u32>>()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn front_bulges_outward_and_back_mirrors_it() {
        let (mut mesh, dims) = pack_mesh();
        let before = mesh.positions.clone();
        sculpt_foil(&mut mesh, dims);
        let half_d = dims.depth() / 2.0;
        for (orig, now) in before.iter().zip(&mesh.positions) {
            if (orig[2].abs() - half_d).abs() < FACE_TOLERANCE {
                let xn = orig[0] / (dims.width() / 2.0);
                let yn = orig[1] / (dims.height() / 2.0);
                let expected = orig[2].signum() * (half_d + face_offset(xn, yn));
                assert_eq!(now[2], expected);
            }
        }
    }

    #[test]
    fn centre_of_front_face_is_pushed_out_by_bulge() {
        let (mut mesh, dims) = pack_mesh();
        sculpt_foil(&mut mesh, dims);
        let half_d = dims.depth() / 2.0;
        let centre = mesh
            .positions
            .iter()
            .find(|p| p[0].abs() < 1e-5 && p[1].abs() < 1e-5 && p[2] > 0.0)
            .copied()
            .unwrap();
        assert!(centre[2] > half_d + 0.01);
    }

    #[test]
    fn interior_depth_vertices_keep_their_z() {
        let (mut mesh, dims) = pack_mesh();
        let before = mesh.positions.clone();
        sculpt_foil(&mut mesh, dims);
        // The mid-depth ring on the side faces sits at z == 0.
        for (orig, now) in before.iter().zip(&mesh.positions) {
            if orig[2] == 0.0 {
                assert_eq!(now[2], 0.0);
            }
        }
    }

    #[test]
    fn edge_vertices_get_both_offsets() {
        let (mut mesh, dims) = pack_mesh();
        let before = mesh.positions.clone();
        sculpt_foil(&mut mesh, dims);
        let half = dims.half_extents();
        let mut seen = 0;
        for (orig, now) in before.iter().zip(&mesh.positions) {
            let on_front = (orig[2].abs() - half.z).abs() < FACE_TOLERANCE;
            let on_seal = (orig[1].abs() - half.y).abs() < FACE_TOLERANCE;
            if on_front && on_seal {
                let xn = orig[0] / half.x;
                assert_eq!(now[1], orig[1].signum() * (half.y + seal_ripple(xn)));
                assert_ne!(now[2], orig[2]);
                seen += 1;
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn sides_are_pinched_inward() {
        let (mut mesh, dims) = pack_mesh();
        sculpt_foil(&mut mesh, dims);
        let right = mesh.groups[Face::Right.slot()];
        let i = mesh.indices[right.start as usize] as usize;
        assert!(mesh.positions[i][0] < dims.width() / 2.0);
        assert_eq!(edge_contraction(0.0), 1.0);
        assert!((edge_contraction(1.0) - (1.0 - 0.08 * 0.35)).abs() < 1e-7);
    }

    #[test]
    fn normals_are_unit_length_after_sculpting() {
        let (mut mesh, dims) = pack_mesh();
        sculpt_foil(&mut mesh, dims);
        for n in &mesh.normals {
            let len = glam::Vec3::from(*n).length();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
