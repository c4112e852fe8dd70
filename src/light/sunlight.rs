//! Initial sunlight seeding: the top plane of every AIR column starts at
//! full strength, then floods downward/outward through the Light Engine.

use log::debug;

use crate::heightmap::Heightmap;
use crate::voxel::{is_air, set_light, voxel_offset, LightChannel};
use crate::world::World;

use super::engine::{flood, LightEngineConfig, QueueSlot};

/// Seed every AIR cell at `y = height - 1` with full sunlight and flood it
/// outward. `queue_a`/`queue_b` are the Light Engine's ping-pong scratch.
pub fn propagate(
    world: World,
    heightmap: &Heightmap,
    voxels: &mut [u8],
    queue_a: &mut Vec<QueueSlot>,
    queue_b: &mut Vec<QueueSlot>,
    config: LightEngineConfig,
) {
    queue_a.clear();
    queue_b.clear();

    let top = world.height - 1;
    for z in 0..world.depth {
        for x in 0..world.width {
            let offset = match voxel_offset(world, x, top, z) {
                Some(offset) => offset,
                None => continue,
            };
            if !is_air(voxels, offset) {
                continue;
            }
            set_light(voxels, offset, LightChannel::Sun, crate::constants::MAX_LIGHT);
            queue_a.push((offset, crate::constants::MAX_LIGHT));
        }
    }

    debug!("propagate: seeded {} top-plane columns", queue_a.len());
    flood(world, heightmap, voxels, LightChannel::Sun, queue_a, queue_b, config);
}
