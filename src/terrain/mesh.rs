//! Displaced disk mesh for the ground
//!
//! The render collaborator uploads [`TerrainMesh::vertices`] and
//! [`TerrainMesh::indices`] as-is. Vertex heights are sampled from the same
//! [`HeightField`] the simulation queries, so what is drawn and what the
//! creature walks on never diverge.

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use super::HeightField;

/// Largest number of rim vertices a mesh may have (`segments * rings`).
/// Keeps every vertex index representable as `u32`.
pub const MAX_MESH_VERTICES: u32 = 1 << 22;

/// GPU-ready terrain vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Size of the ground disk and the sky sphere around it
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Radius of the ground disk
    pub plane_radius: f32,
    /// Angular subdivisions of the ground disk
    pub mesh_segments: u32,
    /// Radial subdivisions of the ground disk
    pub mesh_rings: u32,
    /// Radius of the translucent sky sphere enclosing the scene
    pub sphere_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            plane_radius: 240.0,
            mesh_segments: 128,
            mesh_rings: 64,
            sphere_radius: 240.0,
        }
    }
}

/// Triangulated disk with per-vertex normals
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build a disk of `radius` centred on the origin, displaced by `field`.
    ///
    /// Layout: vertex 0 is the center, followed by `rings` rings of
    /// `segments` vertices each, innermost first. Triangles wind
    /// counter-clockwise seen from above.
    pub fn build<H>(field: &H, radius: f32, segments: u32, rings: u32) -> Self
    where
        H: HeightField + Sync + ?Sized,
    {
        let (segments, rings) = clamp_resolution(segments, rings);

        let mut vertices = Vec::with_capacity(1 + segments as usize * rings as usize);
        vertices.push(TerrainVertex::default());
        for ring in 1..=rings {
            let r = radius * ring as f32 / rings as f32;
            for s in 0..segments {
                let theta = std::f32::consts::TAU * s as f32 / segments as f32;
                vertices.push(TerrainVertex {
                    position: [r * theta.cos(), 0.0, r * theta.sin()],
                    normal: [0.0, 1.0, 0.0],
                });
            }
        }

        vertices.par_iter_mut().for_each(|v| {
            v.position[1] = field.height(v.position[0], v.position[2]);
        });

        let indices = disk_indices(segments, rings);
        let mut mesh = Self { vertices, indices };
        mesh.compute_normals();
        mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted vertex normals from the triangle faces
    fn compute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from_array(self.vertices[a].position);
            let pb = Vec3::from_array(self.vertices[b].position);
            let pc = Vec3::from_array(self.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        self.vertices
            .par_iter_mut()
            .zip(accum.par_iter())
            .for_each(|(v, n)| {
                v.normal = n.try_normalize().unwrap_or(Vec3::Y).to_array();
            });
    }
}

/// At least 3 segments and 1 ring, at most [`MAX_MESH_VERTICES`] in total
pub fn clamp_resolution(segments: u32, rings: u32) -> (u32, u32) {
    let segments = segments.clamp(3, MAX_MESH_VERTICES);
    let rings = rings.clamp(1, MAX_MESH_VERTICES / segments);
    (segments, rings)
}

fn disk_indices(segments: u32, rings: u32) -> Vec<u32> {
    let ring_start = |ring: u32| 1 + (ring - 1) * segments;
    let (n_seg, n_ring) = (segments as usize, rings as usize);
    let mut indices = Vec::with_capacity(3 * n_seg + 6 * n_seg * (n_ring - 1));

    // Center fan
    for s in 0..segments {
        let next = (s + 1) % segments;
        indices.extend_from_slice(&[0, ring_start(1) + next, ring_start(1) + s]);
    }

    for ring in 1..rings {
        let inner = ring_start(ring);
        let outer = ring_start(ring + 1);
        for s in 0..segments {
            let next = (s + 1) % segments;
            let (i0, i1) = (inner + s, inner + next);
            let (o0, o1) = (outer + s, outer + next);
            indices.extend_from_slice(&[i0, i1, o0]);
            indices.extend_from_slice(&[i1, o1, o0]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HillTerrain;
    use crate::terrain::height_field::FlatTerrain;

    #[test]
    fn test_counts() {
        let mesh = TerrainMesh::build(&FlatTerrain(0.0), 10.0, 8, 3);
        assert_eq!(mesh.vertices.len(), 1 + 8 * 3);
        assert_eq!(mesh.triangle_count(), 8 + 2 * 8 * 2);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_resolution_clamped() {
        assert_eq!(clamp_resolution(0, 0), (3, 1));
        assert_eq!(clamp_resolution(128, 64), (128, 64));

        let (segments, rings) = clamp_resolution(u32::MAX, u32::MAX);
        assert_eq!((segments, rings), (MAX_MESH_VERTICES, 1));
        let (segments, rings) = clamp_resolution(100_000, 100_000);
        assert!(segments as u64 * rings as u64 <= MAX_MESH_VERTICES as u64);
        assert_eq!(segments, 100_000);
    }

    #[test]
    fn test_flat_normals_point_up() {
        let mesh = TerrainMesh::build(&FlatTerrain(3.0), 10.0, 16, 4);
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 3.0);
            assert!((v.normal[1] - 1.0).abs() < 1e-5, "normal {:?}", v.normal);
        }
    }

    #[test]
    fn test_vertices_match_runtime_field() {
        let terrain = HillTerrain::default();
        let mesh = TerrainMesh::build(&terrain, 240.0, 32, 8);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert_eq!(y, terrain.height(x, z));
        }
    }

    #[test]
    fn test_rim_on_radius() {
        let mesh = TerrainMesh::build(&FlatTerrain(0.0), 240.0, 128, 4);
        let rim = &mesh.vertices[mesh.vertices.len() - 128..];
        for v in rim {
            let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((r - 240.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_vertex_is_pod() {
        let mesh = TerrainMesh::build(&FlatTerrain(0.0), 1.0, 3, 1);
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), mesh.vertices.len() * 24);
    }
}
