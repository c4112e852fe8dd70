//! Chunked greedy-adjacent meshing with per-vertex ambient occlusion and
//! smoothed light, plus anisotropy-resolved quad triangulation.
//!
//! The six per-face vertex orders and their three ambient-occlusion-neighbor
//! offsets are ported directly from `voxels.c`'s `mesh`/`pushFace`/`getLight`
//! rather than re-derived, to guarantee bit-for-bit agreement with worked
//! examples that depend on exact vertex ordering.

use log::debug;

use crate::constants::MAX_LIGHT;
use crate::error::{VoxelWorldError, VoxelWorldResult};
use crate::voxel::{get_color, get_light, is_air, voxel_offset, LightChannel};
use crate::world::World;

/// Quad/triangle count emitted by a `mesh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub faces: u32,
}

/// Chunk-local bounding sphere, grown over every emitted vertex position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub center: (f32, f32, f32),
    pub radius: f32,
}

impl Default for MeshBounds {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0, 0.0),
            radius: 0.0,
        }
    }
}

type Offset3 = (i32, i32, i32);

struct VertexSpec {
    pos: Offset3,
    ao: [Offset3; 3],
}

struct FaceSpec {
    normal: Offset3,
    vertices: [VertexSpec; 4],
}

const TOP: FaceSpec = FaceSpec {
    normal: (0, 1, 0),
    vertices: [
        VertexSpec { pos: (0, 1, 1), ao: [(-1, 1, 0), (0, 1, 1), (-1, 1, 1)] },
        VertexSpec { pos: (1, 1, 1), ao: [(1, 1, 0), (0, 1, 1), (1, 1, 1)] },
        VertexSpec { pos: (1, 1, 0), ao: [(1, 1, 0), (0, 1, -1), (1, 1, -1)] },
        VertexSpec { pos: (0, 1, 0), ao: [(-1, 1, 0), (0, 1, -1), (-1, 1, -1)] },
    ],
};

const BOTTOM: FaceSpec = FaceSpec {
    normal: (0, -1, 0),
    vertices: [
        VertexSpec { pos: (0, 0, 0), ao: [(-1, -1, 0), (0, -1, -1), (-1, -1, -1)] },
        VertexSpec { pos: (1, 0, 0), ao: [(1, -1, 0), (0, -1, -1), (1, -1, -1)] },
        VertexSpec { pos: (1, 0, 1), ao: [(1, -1, 0), (0, -1, 1), (1, -1, 1)] },
        VertexSpec { pos: (0, 0, 1), ao: [(-1, -1, 0), (0, -1, 1), (-1, -1, 1)] },
    ],
};

const SOUTH: FaceSpec = FaceSpec {
    normal: (0, 0, 1),
    vertices: [
        VertexSpec { pos: (0, 0, 1), ao: [(-1, 0, 1), (0, -1, 1), (-1, -1, 1)] },
        VertexSpec { pos: (1, 0, 1), ao: [(1, 0, 1), (0, -1, 1), (1, -1, 1)] },
        VertexSpec { pos: (1, 1, 1), ao: [(1, 0, 1), (0, 1, 1), (1, 1, 1)] },
        VertexSpec { pos: (0, 1, 1), ao: [(-1, 0, 1), (0, 1, 1), (-1, 1, 1)] },
    ],
};

const NORTH: FaceSpec = FaceSpec {
    normal: (0, 0, -1),
    vertices: [
        VertexSpec { pos: (1, 0, 0), ao: [(1, 0, -1), (0, -1, -1), (1, -1, -1)] },
        VertexSpec { pos: (0, 0, 0), ao: [(-1, 0, -1), (0, -1, -1), (-1, -1, -1)] },
        VertexSpec { pos: (0, 1, 0), ao: [(-1, 0, -1), (0, 1, -1), (-1, 1, -1)] },
        VertexSpec { pos: (1, 1, 0), ao: [(1, 0, -1), (0, 1, -1), (1, 1, -1)] },
    ],
};

const EAST: FaceSpec = FaceSpec {
    normal: (1, 0, 0),
    vertices: [
        VertexSpec { pos: (1, 0, 1), ao: [(1, 0, 1), (1, -1, 0), (1, -1, 1)] },
        VertexSpec { pos: (1, 0, 0), ao: [(1, 0, -1), (1, -1, 0), (1, -1, -1)] },
        VertexSpec { pos: (1, 1, 0), ao: [(1, 0, -1), (1, 1, 0), (1, 1, -1)] },
        VertexSpec { pos: (1, 1, 1), ao: [(1, 0, 1), (1, 1, 0), (1, 1, 1)] },
    ],
};

const WEST: FaceSpec = FaceSpec {
    normal: (-1, 0, 0),
    vertices: [
        VertexSpec { pos: (0, 0, 0), ao: [(-1, 0, -1), (-1, -1, 0), (-1, -1, -1)] },
        VertexSpec { pos: (0, 0, 1), ao: [(-1, 0, 1), (-1, -1, 0), (-1, -1, 1)] },
        VertexSpec { pos: (0, 1, 1), ao: [(-1, 0, 1), (-1, 1, 0), (-1, 1, 1)] },
        VertexSpec { pos: (0, 1, 0), ao: [(-1, 0, -1), (-1, 1, 0), (-1, 1, -1)] },
    ],
};

const FACES: [&FaceSpec; 6] = [&TOP, &BOTTOM, &SOUTH, &NORTH, &EAST, &WEST];

#[inline]
fn is_solid(world: World, voxels: &[u8], base: (i32, i32, i32), offset: Offset3) -> bool {
    let (x, y, z) = (base.0 + offset.0, base.1 + offset.1, base.2 + offset.2);
    match voxel_offset(world, x, y, z) {
        Some(voxel_offset) => !is_air(voxels, voxel_offset),
        None => true,
    }
}

#[inline]
fn neighbor_channel(
    world: World,
    voxels: &[u8],
    base: (i32, i32, i32),
    offset: Offset3,
    channel: LightChannel,
) -> Option<u8> {
    let (x, y, z) = (base.0 + offset.0, base.1 + offset.1, base.2 + offset.2);
    let voxel_offset = voxel_offset(world, x, y, z)?;
    if !is_air(voxels, voxel_offset) {
        return None;
    }
    Some(get_light(voxels, voxel_offset, channel))
}

fn ambient_occlusion(world: World, voxels: &[u8], base: (i32, i32, i32), ao: &[Offset3; 3]) -> u8 {
    let v1 = is_solid(world, voxels, base, ao[0]);
    let v2 = is_solid(world, voxels, base, ao[1]);
    let v3 = is_solid(world, voxels, base, ao[2]);
    let mut value = 0u8;
    if v1 {
        value += 20;
    }
    if v2 {
        value += 20;
    }
    if (v1 && v2) || v3 {
        value += 20;
    }
    value
}

fn smoothed_light(
    world: World,
    voxels: &[u8],
    base: (i32, i32, i32),
    ao: &[Offset3; 3],
    face_light: u8,
    channel: LightChannel,
) -> u8 {
    let n1 = neighbor_channel(world, voxels, base, ao[0], channel);
    let n2 = neighbor_channel(world, voxels, base, ao[1], channel);
    let n3 = neighbor_channel(world, voxels, base, ao[2], channel);

    let mut sum = face_light as u32;
    let mut count = 1u32;
    if let Some(value) = n1 {
        sum += value as u32;
        count += 1;
    }
    if let Some(value) = n2 {
        sum += value as u32;
        count += 1;
    }
    if (n1.is_some() || n2.is_some()) && n3.is_some() {
        sum += n3.unwrap() as u32;
        count += 1;
    }

    let average = sum as f32 / count as f32;
    ((average / MAX_LIGHT as f32) * 255.0).round().clamp(0.0, 255.0) as u8
}

fn grow_box(box_min_max: &mut [i32; 6], pos: (i32, i32, i32)) {
    if box_min_max[0] > pos.0 {
        box_min_max[0] = pos.0;
    }
    if box_min_max[1] > pos.1 {
        box_min_max[1] = pos.1;
    }
    if box_min_max[2] > pos.2 {
        box_min_max[2] = pos.2;
    }
    if box_min_max[3] < pos.0 {
        box_min_max[3] = pos.0;
    }
    if box_min_max[4] < pos.1 {
        box_min_max[4] = pos.1;
    }
    if box_min_max[5] < pos.2 {
        box_min_max[5] = pos.2;
    }
}

/// Mesh a cubic chunk at world origin `chunk` (edge `chunk_size`) into
/// `vertices`/`indices`, writing the resulting bounding sphere into `bounds`.
/// `vertices` and `indices` are cleared but not reallocated between calls
/// when their existing capacity suffices.
pub fn mesh(
    world: World,
    voxels: &[u8],
    chunk: (i32, i32, i32),
    chunk_size: i32,
    vertices: &mut Vec<u8>,
    indices: &mut Vec<u32>,
    bounds: &mut MeshBounds,
) -> VoxelWorldResult<MeshStats> {
    let (chunk_x, chunk_y, chunk_z) = chunk;
    if chunk_x < 0
        || chunk_y < 0
        || chunk_z < 0
        || chunk_x + chunk_size > world.width
        || chunk_y + chunk_size > world.height
        || chunk_z + chunk_size > world.depth
    {
        return Err(VoxelWorldError::chunk_out_of_bounds(
            chunk_x, chunk_y, chunk_z, chunk_size, world,
        ));
    }

    vertices.clear();
    indices.clear();
    let mut box_min_max = [chunk_size, chunk_size, chunk_size, 0, 0, 0];
    let mut faces = 0u32;

    for z in chunk_z..chunk_z + chunk_size {
        for y in chunk_y..chunk_y + chunk_size {
            for x in chunk_x..chunk_x + chunk_size {
                let offset = match voxel_offset(world, x, y, z) {
                    Some(offset) => offset,
                    None => continue,
                };
                if is_air(voxels, offset) {
                    continue;
                }
                let (r, g, b) = get_color(voxels, offset);
                let base = (x, y, z);

                for face in FACES {
                    let (nx, ny, nz) = (x + face.normal.0, y + face.normal.1, z + face.normal.2);
                    let neighbor_offset = match voxel_offset(world, nx, ny, nz) {
                        Some(offset) => offset,
                        None => continue,
                    };
                    if !is_air(voxels, neighbor_offset) {
                        continue;
                    }

                    let block_light = get_light(voxels, neighbor_offset, LightChannel::Block);
                    let sun_light = get_light(voxels, neighbor_offset, LightChannel::Sun);

                    let mut block_values = [0u8; 4];
                    let mut sun_values = [0u8; 4];
                    let mut ao_values = [0u8; 4];
                    let mut local_positions = [(0u8, 0u8, 0u8); 4];

                    for (i, vertex) in face.vertices.iter().enumerate() {
                        let world_pos = (
                            x + vertex.pos.0,
                            y + vertex.pos.1,
                            z + vertex.pos.2,
                        );
                        local_positions[i] = (
                            (world_pos.0 - chunk_x) as u8,
                            (world_pos.1 - chunk_y) as u8,
                            (world_pos.2 - chunk_z) as u8,
                        );
                        ao_values[i] = ambient_occlusion(world, voxels, base, &vertex.ao);
                        block_values[i] = smoothed_light(
                            world,
                            voxels,
                            base,
                            &vertex.ao,
                            block_light,
                            LightChannel::Block,
                        );
                        sun_values[i] = smoothed_light(
                            world,
                            voxels,
                            base,
                            &vertex.ao,
                            sun_light,
                            LightChannel::Sun,
                        );
                    }

                    let flip = ao_values[0] as u32 + ao_values[2] as u32
                        > ao_values[1] as u32 + ao_values[3] as u32;

                    let vertex_base = (vertices.len() / 8) as u32;
                    for i in 0..4 {
                        let shade = 1.0 - ao_values[i] as f32 / 255.0;
                        let (lx, ly, lz) = local_positions[i];
                        vertices.push(lx);
                        vertices.push(ly);
                        vertices.push(lz);
                        vertices.push((r as f32 * shade).round().clamp(0.0, 255.0) as u8);
                        vertices.push((g as f32 * shade).round().clamp(0.0, 255.0) as u8);
                        vertices.push((b as f32 * shade).round().clamp(0.0, 255.0) as u8);
                        vertices.push(block_values[i]);
                        vertices.push(sun_values[i]);
                        grow_box(&mut box_min_max, (lx as i32, ly as i32, lz as i32));
                    }

                    let flip_offset = if flip { 1 } else { 0 };
                    indices.push(vertex_base + flip_offset);
                    indices.push(vertex_base + flip_offset + 1);
                    indices.push(vertex_base + flip_offset + 2);
                    indices.push(vertex_base + flip_offset + 2);
                    indices.push(vertex_base + (flip_offset + 3) % 4);
                    indices.push(vertex_base + flip_offset);

                    faces += 1;
                }
            }
        }
    }

    bounds.center = (
        0.5 * (box_min_max[0] + box_min_max[3]) as f32,
        0.5 * (box_min_max[1] + box_min_max[4]) as f32,
        0.5 * (box_min_max[2] + box_min_max[5]) as f32,
    );
    let half_width = 0.5 * (box_min_max[3] - box_min_max[0]) as f32;
    let half_height = 0.5 * (box_min_max[4] - box_min_max[1]) as f32;
    let half_depth = 0.5 * (box_min_max[5] - box_min_max[2]) as f32;
    bounds.radius = (half_width * half_width + half_height * half_height + half_depth * half_depth).sqrt();

    debug!("mesh: chunk=({chunk_x},{chunk_y},{chunk_z}) size={chunk_size} faces={faces}");
    Ok(MeshStats { faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{block, STRIDE};
    use crate::voxel::{set_color, set_light, set_type};

    #[test]
    fn rejects_chunk_that_does_not_fit() {
        let world = World::new(16, 16, 16);
        let voxels = vec![0u8; world.volume() * STRIDE];
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut bounds = MeshBounds::default();
        let result = mesh(world, &voxels, (8, 8, 8), 16, &mut vertices, &mut indices, &mut bounds);
        assert!(result.is_err());
    }

    #[test]
    fn single_floating_cube_emits_six_faces() {
        let world = World::new(16, 16, 16);
        let mut voxels = vec![0u8; world.volume() * STRIDE];
        let offset = voxel_offset(world, 8, 8, 8).unwrap();
        set_type(&mut voxels, offset, block::STONE);
        set_color(&mut voxels, offset, 200, 100, 50);

        for (dx, dy, dz) in [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)] {
            let neighbor = voxel_offset(world, 8 + dx, 8 + dy, 8 + dz).unwrap();
            set_light(&mut voxels, neighbor, LightChannel::Sun, MAX_LIGHT);
        }

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut bounds = MeshBounds::default();
        let stats = mesh(world, &voxels, (0, 0, 0), 16, &mut vertices, &mut indices, &mut bounds).unwrap();

        assert_eq!(stats.faces, 6);
        assert_eq!(vertices.len(), 6 * 4 * 8);
        assert_eq!(indices.len(), 6 * 6);
    }

    #[test]
    fn side_face_ao_reads_the_through_axis_neighbor() {
        // STONE at (8,8,8) with a second STONE at (7,8,8) sharing only an
        // edge with the emitted SOUTH face (at z+1). The west-edge vertices
        // of that face must sample (7,8,9)/(8,7,9)/(7,7,9) -- all AIR -- not
        // (7,8,8), which is solid. A face that samples the wrong plane would
        // wrongly occlude a vertex that has no actual neighbor there.
        let world = World::new(16, 16, 16);
        let mut voxels = vec![0u8; world.volume() * STRIDE];
        let base = voxel_offset(world, 8, 8, 8).unwrap();
        set_type(&mut voxels, base, block::STONE);
        set_color(&mut voxels, base, 255, 255, 255);
        let edge_neighbor = voxel_offset(world, 7, 8, 8).unwrap();
        set_type(&mut voxels, edge_neighbor, block::STONE);
        set_color(&mut voxels, edge_neighbor, 255, 255, 255);

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut bounds = MeshBounds::default();
        mesh(world, &voxels, (0, 0, 0), 16, &mut vertices, &mut indices, &mut bounds).unwrap();

        // Faces are emitted in FACES order (TOP, BOTTOM, SOUTH, ...); WEST is
        // skipped since (7,8,8) is solid, so SOUTH is the third face emitted
        // and its first vertex's R channel sits 64+3 bytes in.
        let south_vertex0_r = vertices[2 * 4 * 8 + 3];
        assert_eq!(south_vertex0_r, 255, "vertex AO must not occlude from the wrong plane");
    }

    #[test]
    fn solid_world_emits_no_faces() {
        let world = World::new(8, 8, 8);
        let mut voxels = vec![0u8; world.volume() * STRIDE];
        for offset in (0..voxels.len()).step_by(STRIDE) {
            set_type(&mut voxels, offset, block::STONE);
        }
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut bounds = MeshBounds::default();
        let stats = mesh(world, &voxels, (0, 0, 0), 8, &mut vertices, &mut indices, &mut bounds).unwrap();
        assert_eq!(stats.faces, 0);
    }
}
