//! Per-column height tracking.
//!
//! One entry per (x, z) column, holding the Y of the topmost non-AIR voxel.
//! Grounded on `world/storage/cpu_chunks.rs`'s flat column-indexed arrays;
//! the empty-column sentinel (-1) is the Open Question decision recorded in
//! DESIGN.md — 0 would be indistinguishable from "ground floor occupied".

use crate::world::World;

/// Flat (x, z) height buffer. `-1` marks an empty column.
pub struct Heightmap {
    world: World,
    heights: Vec<i32>,
}

impl Heightmap {
    pub fn new(world: World) -> Self {
        Self {
            world,
            heights: vec![-1; world.columns()],
        }
    }

    #[inline]
    fn column_index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || x >= self.world.width || z < 0 || z >= self.world.depth {
            return None;
        }
        Some(z as usize * self.world.width as usize + x as usize)
    }

    /// Height of the topmost non-AIR voxel in column (x, z), or `-1` if the
    /// column is empty or out of bounds.
    pub fn get(&self, x: i32, z: i32) -> i32 {
        match self.column_index(x, z) {
            Some(index) => self.heights[index],
            None => -1,
        }
    }

    /// Record the topmost non-AIR Y for column (x, z). A no-op if the
    /// column is out of bounds.
    pub fn set(&mut self, x: i32, z: i32, y: i32) {
        if let Some(index) = self.column_index(x, z) {
            self.heights[index] = y;
        }
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }
}
