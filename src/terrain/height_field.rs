//! Procedural hill height field

use serde::{Deserialize, Serialize};

/// Terrain elevation as a pure function of planar position.
///
/// Implementations must be deterministic and total: the mesh builder and
/// every runtime ground query sample the same field, so any two calls with
/// the same `(x, z)` have to agree bit for bit.
pub trait HeightField {
    /// Terrain height at world position (x, z)
    fn height(&self, x: f32, z: f32) -> f32;
}

/// Parameters of the three-wave hill formula
///
/// `h(x, z) = sin(x * fx) * ax + cos(z * fz) * az + sin((x + z) * fd) * ad`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub x_frequency: f32,
    pub x_amplitude: f32,
    pub z_frequency: f32,
    pub z_amplitude: f32,
    pub diagonal_frequency: f32,
    pub diagonal_amplitude: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            x_frequency: 0.03,
            x_amplitude: 6.0,
            z_frequency: 0.04,
            z_amplitude: 4.0,
            diagonal_frequency: 0.015,
            diagonal_amplitude: 8.0,
        }
    }
}

impl TerrainParams {
    /// Largest |height| the formula can produce
    pub fn max_abs_height(&self) -> f32 {
        self.x_amplitude.abs() + self.z_amplitude.abs() + self.diagonal_amplitude.abs()
    }
}

/// Smooth rolling hills built from three sine waves
#[derive(Clone, Debug, Default)]
pub struct HillTerrain {
    params: TerrainParams,
}

impl HillTerrain {
    pub fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }
}

impl HeightField for HillTerrain {
    #[inline]
    fn height(&self, x: f32, z: f32) -> f32 {
        let p = &self.params;
        (x * p.x_frequency).sin() * p.x_amplitude
            + (z * p.z_frequency).cos() * p.z_amplitude
            + ((x + z) * p.diagonal_frequency).sin() * p.diagonal_amplitude
    }
}

/// Level ground, for tests that need predictable heights
#[cfg(test)]
pub(crate) struct FlatTerrain(pub f32);

#[cfg(test)]
impl HeightField for FlatTerrain {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}
