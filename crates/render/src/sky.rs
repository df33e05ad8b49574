use glam::Vec3;
use terrastream_common::{Mesh, Rgb, rgb8};

pub const SKY_COLOR: Rgb = rgb8(135, 206, 250);

/// Corner signs and local triangles for each face, wound so the face is
/// visible from inside the cube. No floor.
const FACES: [([[f32; 3]; 4], [[u32; 3]; 2]); 5] = [
    // back (-z)
    (
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        [[0, 1, 2], [3, 0, 2]],
    ),
    // front (+z)
    (
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [[2, 1, 0], [2, 0, 3]],
    ),
    // left (-x)
    (
        [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]],
        [[0, 1, 2], [2, 1, 3]],
    ),
    // right (+x)
    (
        [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0]],
        [[2, 1, 0], [3, 1, 2]],
    ),
    // top (+y)
    (
        [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]],
        [[0, 1, 2], [2, 1, 3]],
    ),
];

/// Open cube that follows the camera so the horizon always reads as sky.
///
/// Rebuilt every frame; 20 vertices is cheaper to regenerate than to track.
#[derive(Debug, Clone)]
pub struct SkyVolume {
    color: Rgb,
    mesh: Mesh,
}

impl Default for SkyVolume {
    fn default() -> Self {
        Self::new(SKY_COLOR)
    }
}

impl SkyVolume {
    pub const VERTEX_COUNT: usize = 20;

    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            mesh: Mesh::with_capacity(Self::VERTEX_COUNT, 30),
        }
    }

    /// Rebuild around the camera's `(x, z)` at height 0 with half-extent `size`.
    pub fn rebuild(&mut self, camera: Vec3, size: f32) -> &Mesh {
        let center = Vec3::new(camera.x, 0.0, camera.z);
        self.mesh.clear();
        for (corners, triangles) in FACES {
            let base = self.mesh.vertex_count() as u32;
            for corner in corners {
                self.mesh
                    .push_vertex(center + Vec3::from_array(corner) * size, self.color);
            }
            for [a, b, c] in triangles {
                self.mesh.push_triangle(base + a, base + b, base + c);
            }
        }
        &self.mesh
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_five_open_faces() {
        let mut sky = SkyVolume::default();
        let mesh = sky.rebuild(Vec3::new(3.0, 7.0, -2.0), 10.0);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 10);
        assert!(mesh.indices_in_bounds());
        assert!(mesh.colors.iter().all(|&c| c == SKY_COLOR));
        // No floor: no face lies flat at the bottom.
        for face in mesh.positions.chunks(4) {
            assert!(!face.iter().all(|p| p.y == -10.0));
        }
    }

    #[test]
    fn centered_on_camera_ground_point() {
        let mut sky = SkyVolume::default();
        let mesh = sky.rebuild(Vec3::new(100.0, 15.0, -40.0), 6.0);
        let min = mesh.positions.iter().fold(Vec3::splat(f32::MAX), |a, &p| a.min(p));
        let max = mesh.positions.iter().fold(Vec3::splat(f32::MIN), |a, &p| a.max(p));
        assert_eq!(min, Vec3::new(94.0, -6.0, -46.0));
        assert_eq!(max, Vec3::new(106.0, 6.0, -34.0));
    }

    #[test]
    fn faces_do_not_share_vertices() {
        let mut sky = SkyVolume::default();
        let mesh = sky.rebuild(Vec3::ZERO, 1.0);
        for (face, tris) in mesh.indices.chunks(6).enumerate() {
            let lo = face as u32 * 4;
            assert!(tris.iter().all(|&i| (lo..lo + 4).contains(&i)));
        }
    }

    #[test]
    fn every_triangle_faces_inward() {
        let mut sky = SkyVolume::default();
        let mesh = sky.rebuild(Vec3::ZERO, 5.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(-centroid) > 0.0, "triangle {tri:?} faces outward");
        }
    }

    #[test]
    fn each_face_is_fully_covered() {
        let mut sky = SkyVolume::default();
        let mesh = sky.rebuild(Vec3::ZERO, 2.0);
        for face in mesh.indices.chunks(6) {
            let area: f32 = face
                .chunks(3)
                .map(|t| {
                    let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[t[k] as usize]);
                    (b - a).cross(c - a).length() * 0.5
                })
                .sum();
            assert!((area - 16.0).abs() < 1e-4);
        }
    }

    #[test]
    fn rebuild_replaces_previous_geometry() {
        let mut sky = SkyVolume::default();
        sky.rebuild(Vec3::ZERO, 4.0);
        let mesh = sky.rebuild(Vec3::new(50.0, 0.0, 0.0), 4.0);
        assert_eq!(mesh.vertex_count(), 20);
        assert!(mesh.positions.iter().all(|p| p.x >= 46.0));
    }
}
