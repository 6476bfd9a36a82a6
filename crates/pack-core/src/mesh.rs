//! Subdivided box meshes with per-face material groups.
//!
//! The vertex layout matches the common real-time convention for box
//! geometry: six independent face grids emitted in the order
//! `[+x, -x, +y, -y, +z, -z]`, each with its own vertices (no sharing across
//! faces), counter-clockwise winding seen from outside, and one material
//! group per face.

use crate::error::{ConfigError, Result};
use glam::Vec3;
use smallvec::SmallVec;

/// Validated box extents. Every axis is finite and strictly positive, which
/// keeps later normalisations (`x / (w / 2)`) free of division by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDimensions {
    width: f32,
    height: f32,
    depth: f32,
}

impl BoxDimensions {
    pub fn new(entity: &'static str, width: f32, height: f32, depth: f32) -> Result<Self> {
        for (axis, value) in [("width", width), ("height", height), ("depth", depth)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension {
                    entity,
                    axis,
                    value,
                });
            }
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }
}

/// Box face, in material-slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }
}

/// Contiguous index range drawn with one material slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceGroup {
    pub start: u32,
    pub count: u32,
    pub material: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub groups: SmallVec<[FaceGroup; 6]>,
}

impl BoxMesh {
    /// Build a box centred on the origin with `segments` subdivisions along
    /// x, y and z.
    pub fn new(dims: BoxDimensions, segments: [u32; 3]) -> Result<Self> {
        for (axis, s) in ["x", "y", "z"].into_iter().zip(segments) {
            if s == 0 {
                return Err(ConfigError::InvalidSegments { axis });
            }
        }
        let [sx, sy, sz] = segments;
        let (w, h, d) = (dims.width, dims.height, dims.depth);
        let mut mesh = BoxMesh::default();
        // (u axis, v axis, w axis, udir, vdir, plane width, plane height, plane depth, grid)
        mesh.push_plane(Axes(2, 1, 0), -1.0, -1.0, [d, h, w], [sz, sy], Face::Right);
        mesh.push_plane(Axes(2, 1, 0), 1.0, -1.0, [d, h, -w], [sz, sy], Face::Left);
        mesh.push_plane(Axes(0, 2, 1), 1.0, 1.0, [w, d, h], [sx, sz], Face::Top);
        mesh.push_plane(Axes(0, 2, 1), 1.0, -1.0, [w, d, -h], [sx, sz], Face::Bottom);
        mesh.push_plane(Axes(0, 1, 2), 1.0, -1.0, [w, h, d], [sx, sy], Face::Front);
        mesh.push_plane(Axes(0, 1, 2), -1.0, -1.0, [w, h, -d], [sx, sy], Face::Back);
        Ok(mesh)
    }

    #[cfg(test)]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn push_plane(
        &mut self,
        axes: Axes,
        udir: f32,
        vdir: f32,
        [width, height, depth]: [f32; 3],
        [grid_x, grid_y]: [u32; 2],
        face: Face,
    ) {
        let Axes(u, v, w) = axes;
        let segment_w = width / grid_x as f32;
        let segment_h = height / grid_y as f32;
        let width_half = width / 2.0;
        let height_half = height / 2.0;
        let depth_half = depth / 2.0;
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;
        let start_vertex = self.positions.len() as u32;
        let start_index = self.indices.len() as u32;

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_h - height_half;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_w - width_half;
                let mut p = [0.0f32; 3];
                p[u] = x * udir;
                p[v] = y * vdir;
                p[w] = depth_half;
                let mut n = [0.0f32; 3];
                n[w] = if depth > 0.0 { 1.0 } else { -1.0 };
                self.positions.push(p);
                self.normals.push(n);
                self.uvs.push([
                    ix as f32 / grid_x as f32,
                    1.0 - iy as f32 / grid_y as f32,
                ]);
            }
        }

        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = start_vertex + ix + grid_x1 * iy;
                let b = start_vertex + ix + grid_x1 * (iy + 1);
                let c = start_vertex + (ix + 1) + grid_x1 * (iy + 1);
                let d = start_vertex + (ix + 1) + grid_x1 * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        self.groups.push(FaceGroup {
            start: start_index,
            count: self.indices.len() as u32 - start_index,
            material: face.slot(),
        });
    }

    /// Recompute smooth vertex normals from the indexed triangles.
    ///
    /// Face normals are accumulated unnormalised (area weighted) into each
    /// referenced vertex and normalised at the end.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = Vec3::from(self.positions[ia]);
            let pb = Vec3::from(self.positions[ib]);
            let pc = Vec3::from(self.positions[ic]);
            let n = (pc - pb).cross(pa - pb);
            acc[ia] += n;
            acc[ib] += n;
            acc[ic] += n;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

#[derive(Clone, Copy)]
struct Axes(usize, usize, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_dims() -> BoxDimensions {
        BoxDimensions::new("test box", 2.0, 2.0, 2.0).unwrap()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(
            BoxDimensions::new("pack", 1.0, 0.0, 1.0),
            Err(ConfigError::InvalidDimension { axis: "height", .. })
        ));
        assert!(BoxDimensions::new("pack", f32::NAN, 1.0, 1.0).is_err());
        assert!(BoxDimensions::new("pack", 1.0, 1.0, -0.5).is_err());
    }

    #[test]
    fn rejects_zero_segments() {
        let err = BoxMesh::new(unit_dims(), [1, 0, 1]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSegments { axis: "y" });
    }

    #[test]
    fn vertex_and_index_counts_follow_segments() {
        let mesh = BoxMesh::new(unit_dims(), [2, 3, 1]).unwrap();
        // +-x: (1+1)(3+1), +-y: (2+1)(1+1), +-z: (2+1)(3+1)
        let expected_vertices = 2 * (2 * 4) + 2 * (3 * 2) + 2 * (3 * 4);
        assert_eq!(mesh.vertex_count(), expected_vertices);
        let expected_indices = 6 * (2 * (1 * 3) + 2 * (2 * 1) + 2 * (2 * 3));
        assert_eq!(mesh.indices.len(), expected_indices);
        assert_eq!(mesh.groups.len(), 6);
        let total: u32 = mesh.groups.iter().map(|g| g.count).sum();
        assert_eq!(total as usize, mesh.indices.len());
        for (i, g) in mesh.groups.iter().enumerate() {
            assert_eq!(g.material, i);
        }
    }

    #[test]
    fn recomputed_normals_point_outward_on_flat_box() {
        let mut mesh = BoxMesh::new(unit_dims(), [1, 1, 1]).unwrap();
        let authored = mesh.normals.clone();
        mesh.compute_vertex_normals();
        for (a, b) in authored.iter().zip(&mesh.normals) {
            let d = Vec3::from(*a) - Vec3::from(*b);
            assert!(d.length() < 1e-5, "authored {:?} vs computed {:?}", a, b);
        }
    }

    #[test]
    fn front_face_sits_at_half_depth() {
        let dims = BoxDimensions::new("card", 0.6, 0.9, 0.004).unwrap();
        let mesh = BoxMesh::new(dims, [1, 1, 1]).unwrap();
        let front = mesh.groups[Face::Front.slot()];
        for &i in &mesh.indices[front.start as usize..(front.start + front.count) as usize] {
            assert_eq!(mesh.positions[i as usize][2], 0.002);
        }
    }
}
