//! Core of a colored voxel world engine: a flat-array volumetric store plus
//! terrain generation, two-channel light propagation, chunked AO meshing and
//! a falling-sand cellular update.
//!
//! This crate is a pure computational kernel. It owns no buffers: the host
//! allocates the voxel buffer, heightmap, and BFS scratch queues and passes
//! them in by mutable reference for the duration of each call. There is no
//! rendering, file I/O, threading, or process-lifecycle code here — those
//! are the host's concerns.

pub mod color;
pub mod constants;
pub mod error;
pub mod generator;
pub mod heightmap;
pub mod light;
pub mod mesher;
pub mod mutator;
pub mod noise_adapter;
pub mod sand;
pub mod voxel;
pub mod world;

pub use color::color_from_noise;
pub use error::{VoxelWorldError, VoxelWorldResult};
pub use generator::{generate, GeneratorConfig, TerrainMode};
pub use heightmap::Heightmap;
pub use light::engine::{flood, remove, LightEngineConfig, QueueSlot};
pub use light::sunlight::propagate;
pub use mesher::{mesh, MeshBounds, MeshStats};
pub use mutator::{update, MutatorQueues};
pub use sand::simulate;
pub use voxel::LightChannel;
pub use world::World;
