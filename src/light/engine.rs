//! Iterative BFS flood/remove for a single light channel.
//!
//! Grounded on the teacher's `lighting/optimized_propagation.rs`, whose
//! `PropagationBuffers` ping-pong `VecDeque`s and `LightPropagatorConfig`
//! are the direct model for the host-owned, never-reallocated queues here.
//! The exact neighbor order and cascade/cutoff rules are ported from
//! `voxels.c`'s `floodLight`/`removeLight`.

use log::{trace, warn};

use crate::constants::MAX_LIGHT;
use crate::heightmap::Heightmap;
use crate::voxel::{decode_offset, get_light, is_air, set_light, voxel_offset, LightChannel};
use crate::world::World;

/// One propagation step: a voxel offset paired with the light level carried
/// to (flood) or removed from (remove) that cell.
pub type QueueSlot = (usize, u8);

/// Fixed axial neighbor order: +X, -X, +Z, -Z, +Y, -Y. Index 5 is down —
/// load-bearing for the sunlight cascade/cutoff rules below.
const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
];
const DOWN: usize = 5;

/// Safety cap on BFS rounds, grounded on `LightPropagatorConfig::max_iterations`.
#[derive(Debug, Clone, Copy)]
pub struct LightEngineConfig {
    pub max_iterations: usize,
}

impl Default for LightEngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 4096,
        }
    }
}

/// Flood light outward from `queue_a` (offsets already carrying their source
/// value in `channel`) until no cell changes. `queue_a` and `queue_b` swap
/// roles each round; both end empty.
pub fn flood(
    world: World,
    heightmap: &Heightmap,
    voxels: &mut [u8],
    channel: LightChannel,
    queue_a: &mut Vec<QueueSlot>,
    queue_b: &mut Vec<QueueSlot>,
    config: LightEngineConfig,
) {
    let mut current = queue_a;
    let mut next = queue_b;
    let mut rounds = 0usize;

    while !current.is_empty() {
        rounds += 1;
        if rounds > config.max_iterations {
            warn!("flood: exceeded {} rounds, aborting", config.max_iterations);
            current.clear();
            break;
        }

        for (offset, _) in current.drain(..) {
            let light = get_light(voxels, offset, channel);
            if light == 0 {
                continue;
            }
            let (x, y, z) = decode_offset(world, offset);

            for (idx, &(dx, dy, dz)) in NEIGHBORS.iter().enumerate() {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                let neighbor_offset = match voxel_offset(world, nx, ny, nz) {
                    Some(offset) => offset,
                    None => continue,
                };
                if !is_air(voxels, neighbor_offset) {
                    continue;
                }

                let is_down = idx == DOWN;
                let nl = if channel == LightChannel::Sun && is_down && light == MAX_LIGHT {
                    MAX_LIGHT
                } else {
                    light - 1
                };

                if channel == LightChannel::Sun
                    && !is_down
                    && light == MAX_LIGHT
                    && ny > heightmap.get(nx, nz)
                {
                    continue;
                }

                if get_light(voxels, neighbor_offset, channel) >= nl {
                    continue;
                }

                set_light(voxels, neighbor_offset, channel, nl);
                next.push((neighbor_offset, nl));
            }
        }

        std::mem::swap(&mut current, &mut next);
    }

    trace!("flood: converged after {rounds} rounds");
}

/// Darken outward from `queue_a` (offset, previous-value pairs), re-seeding
/// `queue_c` with any brighter neighbor encountered, then flood `queue_c`
/// back out using `queue_b` as scratch.
pub fn remove(
    world: World,
    heightmap: &Heightmap,
    voxels: &mut [u8],
    channel: LightChannel,
    queue_a: &mut Vec<QueueSlot>,
    queue_b: &mut Vec<QueueSlot>,
    queue_c: &mut Vec<QueueSlot>,
    config: LightEngineConfig,
) {
    let mut current = queue_a;
    let mut next = queue_b;
    let mut rounds = 0usize;

    while !current.is_empty() {
        rounds += 1;
        if rounds > config.max_iterations {
            warn!("remove: exceeded {} rounds, aborting", config.max_iterations);
            current.clear();
            break;
        }

        for (offset, light) in current.drain(..) {
            let (x, y, z) = decode_offset(world, offset);

            for (idx, &(dx, dy, dz)) in NEIGHBORS.iter().enumerate() {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                let neighbor_offset = match voxel_offset(world, nx, ny, nz) {
                    Some(offset) => offset,
                    None => continue,
                };
                if !is_air(voxels, neighbor_offset) {
                    continue;
                }
                let nl = get_light(voxels, neighbor_offset, channel);
                if nl == 0 {
                    continue;
                }

                let is_down = idx == DOWN;
                let cascades = channel == LightChannel::Sun
                    && is_down
                    && light == MAX_LIGHT
                    && nl == MAX_LIGHT;

                if nl < light || cascades {
                    next.push((neighbor_offset, nl));
                    set_light(voxels, neighbor_offset, channel, 0);
                } else {
                    queue_c.push((neighbor_offset, nl));
                }
            }
        }

        std::mem::swap(&mut current, &mut next);
    }

    trace!("remove: converged after {rounds} rounds, reflood seeds={}", queue_c.len());
    flood(world, heightmap, voxels, channel, queue_c, next, config);
}
