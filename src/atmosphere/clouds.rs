//! Drifting cloud layer.

use rand::Rng;

use super::config::CloudConfig;

/// Radius of a cloud body at scale 1.
pub const CLOUD_BODY_RADIUS: f32 = 6.0;

/// A small sphere attached to a cloud body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Puff {
    /// Offset from the cloud center
    pub offset: glam::Vec3,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub position: glam::Vec3,
    pub scale: f32,
    pub puffs: Vec<Puff>,
}

impl Cloud {
    pub fn body_radius(&self) -> f32 {
        CLOUD_BODY_RADIUS * self.scale
    }
}

/// All clouds, drifting back and forth along X.
pub struct CloudLayer {
    config: CloudConfig,
    clouds: Vec<Cloud>,
}

impl CloudLayer {
    /// Scatter clouds on a ring around the origin.
    pub fn generate<R: Rng + ?Sized>(config: CloudConfig, rng: &mut R) -> Self {
        let clouds = (0..config.count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let radius = config.min_radius + rng.random::<f32>() * config.radius_spread;
                let height = config.min_height + rng.random::<f32>() * config.height_spread;
                let scale = config.min_scale + rng.random::<f32>() * config.scale_spread;
                let puffs = (0..config.puffs)
                    .map(|_| Puff {
                        radius: (3.0 + rng.random::<f32>() * 3.0) * scale,
                        offset: glam::Vec3::new(
                            (rng.random::<f32>() - 0.5) * 12.0 * scale,
                            (rng.random::<f32>() - 0.5) * 4.0 * scale,
                            (rng.random::<f32>() - 0.5) * 8.0 * scale,
                        ),
                    })
                    .collect();
                Cloud {
                    position: glam::Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
                    scale,
                    puffs,
                }
            })
            .collect();
        Self { config, clouds }
    }

    /// Drift every cloud by `dt` seconds, wrapping at `±wrap_x`.
    pub fn update(&mut self, dt: f32) {
        let step = self.config.drift_speed * dt;
        let wrap = self.config.wrap_x;
        for (i, cloud) in self.clouds.iter_mut().enumerate() {
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            cloud.position.x += step * dir;
            if cloud.position.x > wrap {
                cloud.position.x = -wrap;
            } else if cloud.position.x < -wrap {
                cloud.position.x = wrap;
            }
        }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layer() -> CloudLayer {
        CloudLayer::generate(CloudConfig::default(), &mut StdRng::seed_from_u64(4))
    }

    #[test]
    fn test_generated_within_ranges() {
        let layer = layer();
        assert_eq!(layer.clouds().len(), 8);
        for cloud in layer.clouds() {
            let r = (cloud.position.x.powi(2) + cloud.position.z.powi(2)).sqrt();
            assert!((120.0 - 1e-3..=200.0 + 1e-3).contains(&r));
            assert!((80.0..=120.0).contains(&cloud.position.y));
            assert!((0.8..=2.0).contains(&cloud.scale));
            assert_eq!(cloud.puffs.len(), 3);
        }
    }

    #[test]
    fn test_body_radius_follows_scale() {
        for cloud in layer().clouds() {
            assert!((cloud.body_radius() - CLOUD_BODY_RADIUS * cloud.scale).abs() < 1e-6);
            assert!((4.8..=12.0).contains(&cloud.body_radius()));
        }
    }

    #[test]
    fn test_alternating_drift() {
        let mut layer = layer();
        let before: Vec<f32> = layer.clouds().iter().map(|c| c.position.x).collect();
        layer.update(0.5);
        for (i, cloud) in layer.clouds().iter().enumerate() {
            let moved = cloud.position.x - before[i];
            // Skip clouds that wrapped this step
            if moved.abs() > 1.0 {
                continue;
            }
            let expected = if i % 2 == 0 { 0.6 } else { -0.6 };
            assert!((moved - expected).abs() < 1e-4, "cloud {i} moved {moved}");
        }
    }

    #[test]
    fn test_wraps_at_edge() {
        let mut layer = layer();
        layer.clouds[0].position.x = 199.9;
        layer.clouds[1].position.x = -199.9;
        layer.update(1.0);
        assert_eq!(layer.clouds()[0].position.x, -200.0);
        assert_eq!(layer.clouds()[1].position.x, 200.0);
    }
}
