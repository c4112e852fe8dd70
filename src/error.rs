//! Error handling for the voxel core.
//!
//! The core reports exactly one failure mode (an out-of-bounds mesh chunk,
//! see `mesher`); every other boundary condition is a documented silent
//! no-op rather than an error. This mirrors the teacher's per-subsystem
//! `EngineError`/`*Result` convention (e.g. `renderer::error::RendererResult`)
//! scaled down to the single variant this crate actually needs.

use thiserror::Error;

use crate::world::World;

/// Errors produced by the voxel core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VoxelWorldError {
    /// A mesh chunk's origin + edge length does not fit inside the world.
    #[error(
        "chunk at ({cx},{cy},{cz}) with edge {size} does not fit inside a world of {width}x{height}x{depth}"
    )]
    ChunkOutOfBounds {
        cx: i32,
        cy: i32,
        cz: i32,
        size: i32,
        width: i32,
        height: i32,
        depth: i32,
    },
}

impl VoxelWorldError {
    pub fn chunk_out_of_bounds(cx: i32, cy: i32, cz: i32, size: i32, world: World) -> Self {
        VoxelWorldError::ChunkOutOfBounds {
            cx,
            cy,
            cz,
            size,
            width: world.width,
            height: world.height,
            depth: world.depth,
        }
    }
}

/// Result alias for voxel core operations, following the teacher's
/// `RendererResult<T> = EngineResult<T>` naming convention.
pub type VoxelWorldResult<T> = Result<T, VoxelWorldError>;
