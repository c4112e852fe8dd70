//! Single-voxel edits that keep the heightmap and both light channels
//! consistent. Ordering within `update` is load-bearing: heightmap first,
//! then the type write, then darken, then relight.

use log::debug;

use crate::constants::{block, GENERATION_MARGIN, MAX_LIGHT};
use crate::heightmap::Heightmap;
use crate::light::engine::{flood, remove, LightEngineConfig, QueueSlot};
use crate::voxel::{get_light, is_air, set_color, set_light, set_type, voxel_offset, LightChannel};
use crate::world::World;

/// Host-owned scratch reused across `update` calls, mirroring the Light
/// Engine's three ping-pong/reflood buffers.
pub struct MutatorQueues {
    pub queue_a: Vec<QueueSlot>,
    pub queue_b: Vec<QueueSlot>,
    pub queue_c: Vec<QueueSlot>,
}

impl MutatorQueues {
    pub fn new() -> Self {
        Self {
            queue_a: Vec::new(),
            queue_b: Vec::new(),
            queue_c: Vec::new(),
        }
    }
}

impl Default for MutatorQueues {
    fn default() -> Self {
        Self::new()
    }
}

/// Edit voxel (x, y, z) to `new_type`/(r, g, b). Silently ignored on the
/// 1-voxel X/Z generation border and at `y >= height - 1`.
#[allow(clippy::too_many_arguments)]
pub fn update(
    world: World,
    heightmap: &mut Heightmap,
    voxels: &mut [u8],
    queues: &mut MutatorQueues,
    config: LightEngineConfig,
    new_type: u8,
    x: i32,
    y: i32,
    z: i32,
    r: u8,
    g: u8,
    b: u8,
) {
    if x < GENERATION_MARGIN
        || x >= world.width - GENERATION_MARGIN
        || z < GENERATION_MARGIN
        || z >= world.depth - GENERATION_MARGIN
        || y >= world.height - 1
    {
        return;
    }
    let offset = match voxel_offset(world, x, y, z) {
        Some(offset) => offset,
        None => return,
    };

    let current = crate::voxel::get_type(voxels, offset);

    // Heightmap maintenance.
    if new_type == block::AIR && y == heightmap.get(x, z) {
        let mut surface = -1;
        for scan_y in (0..y).rev() {
            if let Some(scan_offset) = voxel_offset(world, x, scan_y, z) {
                if !is_air(voxels, scan_offset) {
                    surface = scan_y;
                    break;
                }
            }
        }
        heightmap.set(x, z, surface);
    } else if new_type != block::AIR && y > heightmap.get(x, z) {
        heightmap.set(x, z, y);
    }

    set_type(voxels, offset, new_type);
    set_color(voxels, offset, r, g, b);

    // Darken.
    if current == block::LIGHT {
        let previous = get_light(voxels, offset, LightChannel::Block);
        set_light(voxels, offset, LightChannel::Block, 0);
        queues.queue_a.clear();
        queues.queue_a.push((offset, previous));
        queues.queue_b.clear();
        queues.queue_c.clear();
        remove(
            world,
            heightmap,
            voxels,
            LightChannel::Block,
            &mut queues.queue_a,
            &mut queues.queue_b,
            &mut queues.queue_c,
            config,
        );
    } else if current == block::AIR && new_type != block::AIR {
        for channel in [LightChannel::Block, LightChannel::Sun] {
            let previous = get_light(voxels, offset, channel);
            if previous == 0 {
                continue;
            }
            set_light(voxels, offset, channel, 0);
            queues.queue_a.clear();
            queues.queue_a.push((offset, previous));
            queues.queue_b.clear();
            queues.queue_c.clear();
            remove(
                world,
                heightmap,
                voxels,
                channel,
                &mut queues.queue_a,
                &mut queues.queue_b,
                &mut queues.queue_c,
                config,
            );
        }
    }

    // Relight.
    if new_type == block::LIGHT {
        set_light(voxels, offset, LightChannel::Block, MAX_LIGHT);
        queues.queue_a.clear();
        queues.queue_a.push((offset, MAX_LIGHT));
        queues.queue_b.clear();
        flood(
            world,
            heightmap,
            voxels,
            LightChannel::Block,
            &mut queues.queue_a,
            &mut queues.queue_b,
            config,
        );
    } else if new_type == block::AIR && current != block::AIR {
        let (cx, cy, cz) = (x, y, z);
        queues.queue_a.clear();
        queues.queue_c.clear();
        for (dx, dy, dz) in [(1, 0, 0), (-1, 0, 0), (0, 0, 1), (0, 0, -1), (0, 1, 0), (0, -1, 0)] {
            let neighbor = match voxel_offset(world, cx + dx, cy + dy, cz + dz) {
                Some(offset) => offset,
                None => continue,
            };
            if !is_air(voxels, neighbor) {
                continue;
            }
            let block_level = get_light(voxels, neighbor, LightChannel::Block);
            if block_level > 0 {
                queues.queue_a.push((neighbor, block_level));
            }
            let sun_level = get_light(voxels, neighbor, LightChannel::Sun);
            if sun_level > 0 {
                queues.queue_c.push((neighbor, sun_level));
            }
        }

        queues.queue_b.clear();
        if !queues.queue_a.is_empty() {
            flood(world, heightmap, voxels, LightChannel::Block, &mut queues.queue_a, &mut queues.queue_b, config);
        }
        queues.queue_b.clear();
        if !queues.queue_c.is_empty() {
            flood(world, heightmap, voxels, LightChannel::Sun, &mut queues.queue_c, &mut queues.queue_b, config);
        }
    }

    debug!("update: ({x},{y},{z}) {current} -> {new_type}");
}
