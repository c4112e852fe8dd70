//! Terrain generation: fills a freshly-allocated voxel buffer from a seeded
//! density field, in either DEFAULT (heightfield) or SPHERE (planetoid) mode.
//!
//! Grounded on `world/generation/terrain.rs` / `terrain_cpu.rs` for the
//! overall "walk every column, sample noise, write solid cells" shape, and on
//! `voxels.c`'s `generate` for the exact DEFAULT/SPHERE solidity predicates.

use log::info;

use crate::color::color_from_noise;
use crate::constants::{block, GENERATION_MARGIN};
use crate::heightmap::Heightmap;
use crate::noise_adapter::DensityField;
use crate::voxel::{set_color, set_type, voxel_offset};
use crate::world::World;

/// Which solidity predicate `generate` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainMode {
    Default,
    Sphere,
}

/// Tunables for a generation pass, grounded on the teacher's
/// `LightPropagatorConfig`-style small explicit config struct.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub seed: u32,
    pub mode: TerrainMode,
}

impl GeneratorConfig {
    pub fn new(seed: u32, mode: TerrainMode) -> Self {
        Self { seed, mode }
    }
}

/// Fill `voxels` and `heightmap` for `world` according to `config`. Leaves a
/// `GENERATION_MARGIN`-voxel AIR border along X and Z untouched.
pub fn generate(world: World, heightmap: &mut Heightmap, voxels: &mut [u8], config: GeneratorConfig) {
    let field = DensityField::new(config.seed);
    let margin = GENERATION_MARGIN;
    let mut solid_count = 0usize;

    for z in margin..(world.depth - margin).max(margin) {
        for x in margin..(world.width - margin).max(margin) {
            for y in 0..world.height {
                let n = field.sample(x, y, z);
                let solid = match config.mode {
                    TerrainMode::Default => (y as f64) <= n * world.height as f64,
                    TerrainMode::Sphere => sphere_solid(world, x, y, z, n),
                };
                if !solid {
                    continue;
                }
                let offset = match voxel_offset(world, x, y, z) {
                    Some(offset) => offset,
                    None => continue,
                };
                set_type(voxels, offset, block::STONE);
                let (r, g, b) = color_from_noise((255.0 * n) as u8);
                set_color(voxels, offset, r, g, b);
                if heightmap.get(x, z) < y {
                    heightmap.set(x, z, y);
                }
                solid_count += 1;
            }
        }
    }

    info!(
        "generate: mode={:?} seed={} solid_voxels={}",
        config.mode, config.seed, solid_count
    );
}

fn sphere_solid(world: World, x: i32, y: i32, z: i32, n: f64) -> bool {
    let cx = world.width as f64 / 2.0 - x as f64;
    let cy = world.height as f64 / 2.0 - y as f64;
    let cz = world.depth as f64 / 2.0 - z as f64;

    if y >= world.height - 32 {
        return false;
    }
    if n <= 0.1 {
        return false;
    }
    let radial_xz = (cx * cx + cz * cz).sqrt();
    if !(y < 8 || radial_xz >= 0.05 * world.width as f64) {
        return false;
    }
    let radius = (cx * cx + cy * cy + cz * cz).sqrt();
    radius <= 0.425 * world.width as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STRIDE;

    #[test]
    fn default_mode_fills_low_columns_with_stone() {
        let world = World::new(96, 32, 96);
        let mut heightmap = Heightmap::new(world);
        let mut voxels = vec![0u8; world.volume() * STRIDE];
        generate(
            world,
            &mut heightmap,
            &mut voxels,
            GeneratorConfig::new(1, TerrainMode::Default),
        );

        let offset = voxel_offset(world, 48, 0, 48).unwrap();
        assert_eq!(voxels[offset], block::STONE);
        assert!(heightmap.get(48, 48) >= 0);
    }

    #[test]
    fn margin_columns_stay_air() {
        let world = World::new(96, 32, 96);
        let mut heightmap = Heightmap::new(world);
        let mut voxels = vec![0u8; world.volume() * STRIDE];
        generate(
            world,
            &mut heightmap,
            &mut voxels,
            GeneratorConfig::new(1, TerrainMode::Default),
        );

        for y in 0..world.height {
            let offset = voxel_offset(world, 0, y, 48).unwrap();
            assert_eq!(voxels[offset], block::AIR);
        }
        assert_eq!(heightmap.get(0, 48), -1);
    }

    #[test]
    fn sphere_mode_is_deterministic() {
        let world = World::new(96, 64, 96);
        let mut hm_a = Heightmap::new(world);
        let mut hm_b = Heightmap::new(world);
        let mut voxels_a = vec![0u8; world.volume() * STRIDE];
        let mut voxels_b = vec![0u8; world.volume() * STRIDE];

        generate(
            world,
            &mut hm_a,
            &mut voxels_a,
            GeneratorConfig::new(9, TerrainMode::Sphere),
        );
        generate(
            world,
            &mut hm_b,
            &mut voxels_b,
            GeneratorConfig::new(9, TerrainMode::Sphere),
        );

        assert_eq!(voxels_a, voxels_b);
        assert_eq!(hm_a.as_slice(), hm_b.as_slice());
    }
}
