//! Terrain height field, ground clamping and mesh

pub mod height_field;
pub use height_field::{HeightField, HillTerrain, TerrainParams};

pub mod ground;
pub use ground::{clamp_to_ground, ground_point};

pub mod mesh;
pub use mesh::{MAX_MESH_VERTICES, TerrainMesh, TerrainVertex, WorldConfig};
