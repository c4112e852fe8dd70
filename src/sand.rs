//! Falling-sand cellular update: each SAND voxel tries to drop one Y level,
//! settles to STONE when it can't, and wakes any STONE directly above it
//! back into SAND since it may have just lost its support.
//!
//! Grounded on `voxels.c`'s `simulate`, generalized per DESIGN.md's Open
//! Question decision to alternate the X/Z scan direction by `step mod 4` and
//! to settle unsupported sand into STONE rather than leaving it suspended.
//! This step intentionally does not touch the heightmap (§9): a host that
//! wants correct lighting after a sand step must re-run Sunlight Seeder.

use log::trace;

use crate::constants::block;
use crate::voxel::{get_color, get_type, is_air, set_color, set_type, voxel_offset};
use crate::world::World;

/// Offsets (dx, dz) of the five cells one Y below a grain, in the fixed
/// try-order: straight down, then the four lateral spill directions.
const FALL_OFFSETS: [(i32, i32); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

/// Advance the sand simulation by one step. `step` selects the scan
/// direction so repeated steps don't bias settling toward one corner.
pub fn simulate(world: World, voxels: &mut [u8], step: u64) {
    let (x_desc, z_desc) = match step % 4 {
        0 => (false, false),
        1 => (true, false),
        2 => (false, true),
        _ => (true, true),
    };

    let mut moved = 0usize;
    let mut settled = 0usize;

    for z in scan_range(world.depth, z_desc) {
        for x in scan_range(world.width, x_desc) {
            for y in 0..world.height {
                let offset = match voxel_offset(world, x, y, z) {
                    Some(offset) => offset,
                    None => continue,
                };
                if get_type(voxels, offset) != block::SAND {
                    continue;
                }

                let target = FALL_OFFSETS.iter().find_map(|(dx, dz)| {
                    let below = voxel_offset(world, x + dx, y - 1, z + dz)?;
                    is_air(voxels, below).then_some(below)
                });

                match target {
                    None => {
                        set_type(voxels, offset, block::STONE);
                        settled += 1;
                    }
                    Some(below) => {
                        let color = get_color(voxels, offset);
                        set_type(voxels, below, block::SAND);
                        set_color(voxels, below, color.0, color.1, color.2);
                        set_type(voxels, offset, block::AIR);
                        set_color(voxels, offset, 0, 0, 0);
                        moved += 1;

                        for (dx, dz) in FALL_OFFSETS {
                            if let Some(above) = voxel_offset(world, x + dx, y + 1, z + dz) {
                                if get_type(voxels, above) == block::STONE {
                                    set_type(voxels, above, block::SAND);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    trace!("simulate: step={step} moved={moved} settled={settled}");
}

fn scan_range(extent: i32, descending: bool) -> Box<dyn Iterator<Item = i32>> {
    if descending {
        Box::new((0..extent).rev())
    } else {
        Box::new(0..extent)
    }
}
