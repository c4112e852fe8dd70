//! Flat voxel buffer access: offset arithmetic, bounds, and field reads/writes.
//!
//! Grounded on `world/storage/cpu_chunks.rs`'s flat, index-keyed array layout
//! and `voxels.c`'s `getVoxel` — the out-of-bounds sentinel is modeled here
//! as `Option<usize>` rather than `-1`, per the crate's §9 design note, but
//! the "missing neighbor is opaque" contract is unchanged.

use crate::constants::{block, field, STRIDE};
use crate::world::World;

/// Which light channel a caller wants to read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightChannel {
    Block,
    Sun,
}

impl LightChannel {
    #[inline]
    pub fn field(self) -> usize {
        match self {
            LightChannel::Block => field::BLOCK_LIGHT,
            LightChannel::Sun => field::SUN_LIGHT,
        }
    }
}

/// Compute the byte offset of voxel (x, y, z) in a row-major, X-fastest
/// buffer, or `None` if the coordinate falls outside `world`.
#[inline]
pub fn voxel_offset(world: World, x: i32, y: i32, z: i32) -> Option<usize> {
    if !world.in_bounds(x, y, z) {
        return None;
    }
    let index = (z as usize * world.width as usize * world.height as usize)
        + (y as usize * world.width as usize)
        + x as usize;
    Some(index * STRIDE)
}

/// Decode a byte offset back into (x, y, z). The offset must have been
/// produced by `voxel_offset` for this same `world`.
#[inline]
pub fn decode_offset(world: World, offset: usize) -> (i32, i32, i32) {
    let index = offset / STRIDE;
    let plane = world.width as usize * world.height as usize;
    let z = index / plane;
    let rem = index % plane;
    let y = rem / world.width as usize;
    let x = rem % world.width as usize;
    (x as i32, y as i32, z as i32)
}

#[inline]
pub fn get_type(voxels: &[u8], offset: usize) -> u8 {
    voxels[offset + field::TYPE]
}

#[inline]
pub fn set_type(voxels: &mut [u8], offset: usize, ty: u8) {
    voxels[offset + field::TYPE] = ty;
}

#[inline]
pub fn is_air(voxels: &[u8], offset: usize) -> bool {
    get_type(voxels, offset) == block::AIR
}

#[inline]
pub fn get_color(voxels: &[u8], offset: usize) -> (u8, u8, u8) {
    (
        voxels[offset + field::R],
        voxels[offset + field::G],
        voxels[offset + field::B],
    )
}

#[inline]
pub fn set_color(voxels: &mut [u8], offset: usize, r: u8, g: u8, b: u8) {
    voxels[offset + field::R] = r;
    voxels[offset + field::G] = g;
    voxels[offset + field::B] = b;
}

#[inline]
pub fn get_light(voxels: &[u8], offset: usize, channel: LightChannel) -> u8 {
    voxels[offset + channel.field()]
}

#[inline]
pub fn set_light(voxels: &mut [u8], offset: usize, channel: LightChannel, value: u8) {
    voxels[offset + channel.field()] = value;
}
