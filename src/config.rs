//! World Configuration and Builder
//!
//! This module provides configuration types for deterministic Voronoi world generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldGenError};

/// Map size presets matching the existing game's generator settings
///
/// Each size maps to a specific zone count and map half-width; zone density
/// stays roughly constant across presets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapSize {
    /// Small map: ~25 zones, half-width 100 units
    Small,
    /// Medium map: ~100 zones, half-width 200 units (default)
    Medium,
    /// Large map: ~400 zones, half-width 400 units
    Large,
    /// Custom map size with specific zone count and half-width
    Custom {
        /// Number of zone sites to scatter
        zone_count: usize,
        /// Half the side length of the square map, in world units
        half_width: f32,
    },
}

impl MapSize {
    /// Get the number of zone sites scattered for this map size
    ///
    /// The final zone count can be slightly lower: a cell whose clipped
    /// polygon degenerates to fewer than 3 vertices does not become a zone.
    pub fn zone_count(self) -> usize {
        match self {
            MapSize::Small => 25,
            MapSize::Medium => 100,
            MapSize::Large => 400,
            MapSize::Custom { zone_count, .. } => zone_count,
        }
    }

    /// Get the map half-width for this size
    ///
    /// The playable area is the square `[-half_width, half_width]` on both
    /// the X and Z axes.
    pub fn half_width(self) -> f32 {
        match self {
            MapSize::Small => 100.0,
            MapSize::Medium => 200.0,
            MapSize::Large => 400.0,
            MapSize::Custom { half_width, .. } => half_width,
        }
    }

    /// Get a human-readable name for this map size
    pub fn name(self) -> &'static str {
        match self {
            MapSize::Small => "Small",
            MapSize::Medium => "Medium",
            MapSize::Large => "Large",
            MapSize::Custom { .. } => "Custom",
        }
    }
}

impl Default for MapSize {
    fn default() -> Self {
        MapSize::Medium // Match existing game defaults (100 zones, half-width 200)
    }
}

/// Configuration for deterministic Voronoi world generation
///
/// This configuration is serializable and can be shared between client and server.
/// The same configuration will always produce the identical world.
///
/// # Serialization
///
/// Only the configuration is serialized (~20 bytes), not the generated zones.
/// The world is regenerated from the configuration when loading a save file.
///
/// # Example
///
/// ```rust
/// use voronoi_worldgen::*;
///
/// let config = WorldConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Medium)
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: WorldConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config.seed, restored.seed);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Random seed for deterministic world generation
    ///
    /// The same seed (with the same map_size) will always produce the exact
    /// same world with identical zone positions and borders.
    pub seed: u32,

    /// Map size preset (determines zone count and map half-width)
    pub map_size: MapSize,

    /// Random seed for biome assignment (separate from zone placement seed)
    ///
    /// This allows the same zone layout with different biome distributions.
    pub biome_seed: u32,

    /// Override the map half-width from the map_size preset
    ///
    /// If set, this half-width will be used instead of the preset value.
    /// Useful for fine-tuning zone density without creating a custom size.
    pub half_width_override: Option<f32>,
}

impl WorldConfig {
    /// Get the zone site count for this configuration
    #[inline]
    pub fn zone_count(&self) -> usize {
        self.map_size.zone_count()
    }

    /// Get the map half-width for this configuration
    ///
    /// Returns the half_width_override if set, otherwise the map_size preset value.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width_override
            .unwrap_or_else(|| self.map_size.half_width())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating WorldConfig with validation
///
/// Uses the builder pattern to create configurations with sensible defaults
/// and runtime guarantees of validity.
///
/// # Example
///
/// ```rust
/// use voronoi_worldgen::*;
///
/// // Use defaults
/// let config = WorldConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = WorldConfigBuilder::new()
///     .seed(12345)
///     .map_size(MapSize::Small)
///     .biome_seed(67890)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct WorldConfigBuilder {
    seed: Option<u32>,
    map_size: MapSize,
    biome_seed: Option<u32>,
    half_width_override: Option<f32>,
}

impl WorldConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - map_size: Medium (~100 zones)
    /// - biome_seed: Same as seed
    /// - half_width_override: None
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: MapSize::default(),
            biome_seed: None,
            half_width_override: None,
        }
    }

    /// Set the random seed for world generation
    ///
    /// Using the same seed with the same other parameters will produce
    /// an identical world every time.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map size preset
    ///
    /// This determines the zone count and the map half-width.
    /// Custom sizes are validated in [`build`](Self::build).
    pub fn map_size(mut self, size: MapSize) -> Self {
        self.map_size = size;
        self
    }

    /// Set a separate biome seed
    ///
    /// If not set, the biome seed will match the world seed.
    /// Setting a different biome seed allows the same zone layout
    /// with different biome distributions.
    pub fn biome_seed(mut self, seed: u32) -> Self {
        self.biome_seed = Some(seed);
        self
    }

    /// Override the map half-width
    ///
    /// If set, this half-width will be used instead of the map_size preset value.
    /// Useful for fine-tuning zone density.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if half_width <= 0.0
    pub fn half_width_override(mut self, half_width: f32) -> Result<Self> {
        if half_width <= 0.0 {
            return Err(WorldGenError::InvalidConfig(format!(
                "Half-width override must be positive (got {})",
                half_width
            )));
        }
        self.half_width_override = Some(half_width);
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the map size resolves to zero zones or a
    /// non-positive half-width.
    pub fn build(self) -> Result<WorldConfig> {
        if self.map_size.zone_count() == 0 {
            return Err(WorldGenError::InvalidConfig(
                "Zone count must be at least 1".to_string(),
            ));
        }
        if self.map_size.half_width() <= 0.0 && self.half_width_override.is_none() {
            return Err(WorldGenError::InvalidConfig(format!(
                "Half-width must be positive (got {})",
                self.map_size.half_width()
            )));
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let biome_seed = self.biome_seed.unwrap_or(seed);

        Ok(WorldConfig {
            seed,
            map_size: self.map_size,
            biome_seed,
            half_width_override: self.half_width_override,
        })
    }
}

impl Default for WorldConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
