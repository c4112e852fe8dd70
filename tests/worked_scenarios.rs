//! End-to-end scenarios exercising the full generate/propagate/mesh/sand
//! pipeline across module boundaries, colocated at the crate root the way
//! the teacher keeps its own cross-cutting integration tests under `tests/`.

use voxel_core::constants::{block, MAX_LIGHT, STRIDE};
use voxel_core::light::engine::LightEngineConfig;
use voxel_core::light::sunlight::propagate;
use voxel_core::mesher::{mesh, MeshBounds};
use voxel_core::mutator::{update, MutatorQueues};
use voxel_core::sand::simulate;
use voxel_core::voxel::{get_light, get_type, set_color, set_type, voxel_offset, LightChannel};
use voxel_core::{Heightmap, World};

fn empty_buffer(world: World) -> Vec<u8> {
    vec![0u8; world.volume() * STRIDE]
}

#[test]
fn empty_world_propagate_fills_full_sunlight() {
    let world = World::new(4, 4, 4);
    let heightmap = Heightmap::new(world);
    let mut voxels = empty_buffer(world);

    let mut queue_a = Vec::new();
    let mut queue_b = Vec::new();
    propagate(world, &heightmap, &mut voxels, &mut queue_a, &mut queue_b, LightEngineConfig::default());

    for z in 0..world.depth {
        for y in 0..world.height {
            for x in 0..world.width {
                let offset = voxel_offset(world, x, y, z).unwrap();
                assert_eq!(get_light(&voxels, offset, LightChannel::Sun), MAX_LIGHT);
                assert_eq!(get_light(&voxels, offset, LightChannel::Block), 0);
            }
        }
    }
    for z in 0..world.depth {
        for x in 0..world.width {
            assert_eq!(heightmap.get(x, z), -1);
        }
    }
}

#[test]
fn stone_pillar_lights_the_column_above_it() {
    let world = World::new(3, 3, 3);
    let mut heightmap = Heightmap::new(world);
    let mut voxels = empty_buffer(world);
    let pillar = voxel_offset(world, 1, 0, 1).unwrap();
    set_type(&mut voxels, pillar, block::STONE);
    heightmap.set(1, 1, 0);

    let mut queue_a = Vec::new();
    let mut queue_b = Vec::new();
    propagate(world, &heightmap, &mut voxels, &mut queue_a, &mut queue_b, LightEngineConfig::default());

    for y in 1..world.height {
        let offset = voxel_offset(world, 1, y, 1).unwrap();
        assert_eq!(get_light(&voxels, offset, LightChannel::Sun), MAX_LIGHT);
    }
    assert_eq!(heightmap.get(1, 1), 0);
}

/// Builds a 5x5x5 STONE shell with a 3x3x3 AIR cavity, embedded far enough
/// from the world edge that Mutator's border check never rejects an edit.
fn closed_cavity() -> (World, Heightmap, Vec<u8>, (i32, i32, i32)) {
    let world = World::new(96, 16, 96);
    let heightmap = Heightmap::new(world);
    let mut voxels = empty_buffer(world);
    let center = (48, 8, 48);

    for dz in -2..=2 {
        for dy in -2..=2 {
            for dx in -2..=2 {
                if dx.abs() < 2 && dy.abs() < 2 && dz.abs() < 2 {
                    continue;
                }
                let offset = voxel_offset(world, center.0 + dx, center.1 + dy, center.2 + dz).unwrap();
                set_type(&mut voxels, offset, block::STONE);
            }
        }
    }
    (world, heightmap, voxels, center)
}

#[test]
fn light_in_closed_cavity_falls_off_by_manhattan_distance() {
    let (world, mut heightmap, mut voxels, (cx, cy, cz)) = closed_cavity();
    let mut queues = MutatorQueues::new();
    let config = LightEngineConfig::default();

    update(world, &mut heightmap, &mut voxels, &mut queues, config, block::LIGHT, cx, cy, cz, 255, 255, 255);

    let center = voxel_offset(world, cx, cy, cz).unwrap();
    assert_eq!(get_light(&voxels, center, LightChannel::Block), MAX_LIGHT);

    let face_adjacent = voxel_offset(world, cx + 1, cy, cz).unwrap();
    assert_eq!(get_light(&voxels, face_adjacent, LightChannel::Block), MAX_LIGHT - 1);

    let opposite_corner = voxel_offset(world, cx - 1, cy - 1, cz - 1).unwrap();
    assert_eq!(get_light(&voxels, opposite_corner, LightChannel::Block), MAX_LIGHT - 3);
}

#[test]
fn removing_light_darkens_the_whole_cavity() {
    let (world, mut heightmap, mut voxels, (cx, cy, cz)) = closed_cavity();
    let mut queues = MutatorQueues::new();
    let config = LightEngineConfig::default();

    update(world, &mut heightmap, &mut voxels, &mut queues, config, block::LIGHT, cx, cy, cz, 255, 255, 255);
    update(world, &mut heightmap, &mut voxels, &mut queues, config, block::AIR, cx, cy, cz, 0, 0, 0);

    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let offset = voxel_offset(world, cx + dx, cy + dy, cz + dz).unwrap();
                assert_eq!(get_light(&voxels, offset, LightChannel::Block), 0);
            }
        }
    }
}

#[test]
fn single_floating_cube_meshes_to_six_faces_with_bounds() {
    let world = World::new(5, 5, 5);
    let heightmap = Heightmap::new(world);
    let mut voxels = empty_buffer(world);
    let offset = voxel_offset(world, 2, 2, 2).unwrap();
    set_type(&mut voxels, offset, block::STONE);
    set_color(&mut voxels, offset, 180, 90, 40);

    let mut queue_a = Vec::new();
    let mut queue_b = Vec::new();
    propagate(world, &heightmap, &mut voxels, &mut queue_a, &mut queue_b, LightEngineConfig::default());

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut bounds = MeshBounds::default();
    let stats = mesh(world, &voxels, (0, 0, 0), 5, &mut vertices, &mut indices, &mut bounds).unwrap();

    assert_eq!(stats.faces, 6);
    assert_eq!(vertices.len(), 24 * 8);
    assert_eq!(indices.len(), 36);

    assert_eq!(bounds.center, (2.5, 2.5, 2.5));
    assert!((bounds.radius - 0.75f32.sqrt()).abs() < 1e-5);
}

#[test]
fn sand_falls_then_settles_on_the_floor() {
    // Each `simulate` call drops a grain by exactly one Y level (per the
    // "cells one Y below" rule), so a grain starting two levels above the
    // floor needs two steps to reach it and a third to find itself blocked
    // and settle -- see DESIGN.md's Open Question on this scenario's count.
    let world = World::new(5, 5, 5);
    let mut voxels = empty_buffer(world);
    for z in 0..world.depth {
        for x in 0..world.width {
            let floor = voxel_offset(world, x, 0, z).unwrap();
            set_type(&mut voxels, floor, block::STONE);
        }
    }
    let start = voxel_offset(world, 2, 3, 2).unwrap();
    set_type(&mut voxels, start, block::SAND);

    simulate(world, &mut voxels, 0);
    let one_step_down = voxel_offset(world, 2, 2, 2).unwrap();
    assert_eq!(get_type(&voxels, one_step_down), block::SAND);

    for step in 1..8 {
        simulate(world, &mut voxels, step);
    }
    let resting = voxel_offset(world, 2, 1, 2).unwrap();
    assert_eq!(get_type(&voxels, resting), block::STONE);
}
