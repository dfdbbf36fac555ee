//! Voronoi-based world generation for survival games
//!
//! A standalone library for generating zone-based square world maps,
//! suitable for use with any game engine (Bevy, Godot, etc.)
//!
//! Worlds are fully determined by a small serializable configuration:
//! scattered zone sites are triangulated, refined with edge flips, and
//! dualized into Voronoi cells that are clipped to the map square and
//! assigned biomes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_worldgen::*;
//!
//! // Configure a world
//! let config = WorldConfigBuilder::new()
//!     .seed(42)
//!     .map_size(MapSize::Medium)
//!     .build().unwrap();
//!
//! // Describe the biome table
//! let biomes = vec![
//!     Biome::new("forest", 3.0).starting(),
//!     Biome::new("desert", 1.0),
//!     Biome::new("lake", 1.0).water(-0.5),
//! ];
//!
//! // Generate zones
//! let world = VoronoiWorld::generate(config, &biomes).unwrap();
//! println!("Generated {} zones", world.zone_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-zone lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, biomes and zones

// Modules
pub mod error;
pub mod config;
pub mod geom;
pub mod cell;
pub mod biome;
pub mod generation;
pub mod zone;
pub mod world;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{WorldGenError, Result};
pub use config::{WorldConfig, WorldConfigBuilder, MapSize};
pub use cell::VoronoiCell;
pub use biome::{Biome, BiomeSampler, WeightedBiomeSampler};
pub use zone::Zone;
pub use world::VoronoiWorld;
pub use generation::{build_cells, generate_cells, RawCell, RefineOutcome, VoronoiEdge};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
