//! Seeded 3D density field used by the generator, wrapping the `noise`
//! crate's FBM/Perlin combinator the way `world/generation/terrain.rs` wraps
//! `noise::{NoiseFn, Perlin}` for its terrain heightfield.

use noise::{Fbm, NoiseFn, Perlin};

/// Deterministic fractal-Brownian-motion density field, sampled in [0, 1].
pub struct DensityField {
    fbm: Fbm<Perlin>,
}

impl DensityField {
    pub fn new(seed: u32) -> Self {
        let mut fbm = Fbm::<Perlin>::new(seed);
        fbm.octaves = 4;
        fbm.frequency = 1.0;
        fbm.lacunarity = 2.0;
        fbm.persistence = 0.5;
        Self { fbm }
    }

    /// Sample the field at a voxel coordinate, scaled down so neighboring
    /// voxels vary smoothly, and folded into [0, 1].
    pub fn sample(&self, x: i32, y: i32, z: i32) -> f64 {
        const SCALE: f64 = 0.05;
        let raw = self
            .fbm
            .get([x as f64 * SCALE, y as f64 * SCALE, z as f64 * SCALE]);
        raw.abs().clamp(0.0, 1.0)
    }
}
