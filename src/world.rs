//! VoronoiWorld main structure

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::biome::{Biome, BiomeSampler, WeightedBiomeSampler};
use crate::config::WorldConfig;
use crate::error::Result;
use crate::generation::generate_cells;
use crate::zone::Zone;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete generated world
///
/// Generic over the biome type `B` so games can plug their own biome data
/// through a custom [`BiomeSampler`]. The world keeps all zones in memory
/// for queries; saves should persist the [`WorldConfig`] and regenerate.
///
/// # Examples
///
/// ```
/// use voronoi_worldgen::*;
///
/// let config = WorldConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Small)
///     .build()
///     .unwrap();
///
/// let biomes = vec![
///     Biome::new("forest", 3.0).starting(),
///     Biome::new("desert", 1.0),
/// ];
///
/// let world = VoronoiWorld::generate(config, &biomes).unwrap();
/// println!("Generated {} zones", world.zone_count());
///
/// if let Some(zone) = world.get_zone(0) {
///     println!("Zone 0 biome: {}", zone.biome.id);
/// }
/// ```
#[derive(Clone)]
pub struct VoronoiWorld<B> {
    /// Configuration used to generate this world
    config: WorldConfig,

    /// All zones, indexed by zone ID
    zones: Vec<Zone<B>>,

    /// Map half-width for bounds checks
    half_width: f32,

    /// The zone nearest the world origin, if any zone exists
    starting_zone_id: Option<usize>,

    /// Spatial index over zone sites (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl VoronoiWorld<Biome> {
    /// Generate a world with weighted biome assignment
    ///
    /// Each zone draws its biome from the table, then the zone nearest the
    /// world origin is forced to a starting biome so a new player always
    /// lands in one. The force is skipped when the nearest zone already
    /// rolled a starting biome, and cannot apply when the table marks none.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_worldgen::*;
    ///
    /// let config = WorldConfigBuilder::new()
    ///     .seed(7)
    ///     .map_size(MapSize::Small)
    ///     .build()
    ///     .unwrap();
    ///
    /// let biomes = vec![
    ///     Biome::new("plains", 2.0).starting(),
    ///     Biome::new("swamp", 1.0).water(-0.2),
    /// ];
    ///
    /// let world = VoronoiWorld::generate(config, &biomes).unwrap();
    /// let start = world.starting_zone_id().unwrap();
    /// assert!(world.get_zone(start).unwrap().biome.starting_zone);
    /// ```
    pub fn generate(config: WorldConfig, biomes: &[Biome]) -> Result<Self> {
        let sampler = WeightedBiomeSampler::new(biomes)?;
        let (mut world, mut rng) = Self::assemble(config, &sampler)?;

        let starting: Vec<&Biome> = biomes.iter().filter(|b| b.starting_zone).collect();
        if !starting.is_empty() {
            if let Some(zone_id) = world.starting_zone_id {
                let pick = starting[rng.gen_range(0..starting.len())].clone();
                let zone = &mut world.zones[zone_id];
                if !zone.biome.starting_zone {
                    log::debug!(
                        "starting zone {} rerolled from {} to {}",
                        zone_id,
                        zone.biome.id,
                        pick.id
                    );
                    zone.biome = pick;
                }
            }
        }

        Ok(world)
    }
}

impl<B: Clone> VoronoiWorld<B> {
    /// Generate a world with a custom biome sampler
    ///
    /// The sampler is called once per valid cell, in zone ID order, with
    /// the world's biome RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_worldgen::*;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// struct Flat;
    ///
    /// impl BiomeSampler for Flat {
    ///     type Output = u8;
    ///     fn sample(&self, _site: Vec3, _rng: &mut ChaCha8Rng) -> u8 {
    ///         0
    ///     }
    /// }
    ///
    /// let config = WorldConfigBuilder::new()
    ///     .seed(3)
    ///     .map_size(MapSize::Small)
    ///     .build()
    ///     .unwrap();
    ///
    /// let world = VoronoiWorld::generate_with_sampler(config, &Flat).unwrap();
    /// assert!(world.zones().iter().all(|z| z.biome == 0));
    /// ```
    pub fn generate_with_sampler<S>(config: WorldConfig, sampler: &S) -> Result<Self>
    where
        S: BiomeSampler<Output = B>,
    {
        let (world, _rng) = Self::assemble(config, sampler)?;
        Ok(world)
    }

    /// Generate cells, keep the valid ones and join them with biomes
    ///
    /// Returns the biome RNG alongside the world so callers can keep
    /// drawing from the same stream.
    fn assemble<S>(config: WorldConfig, sampler: &S) -> Result<(Self, ChaCha8Rng)>
    where
        S: BiomeSampler<Output = B>,
    {
        let half_width = config.half_width();
        let cells = generate_cells(&config)?;
        let cell_count = cells.len();

        // One draw order per biome seed: biome then content seed, zone by
        // zone
        let mut rng = ChaCha8Rng::seed_from_u64(config.biome_seed as u64);

        let mut zones: Vec<Zone<B>> = Vec::new();
        for cell in cells {
            if !cell.is_valid() {
                continue;
            }

            let biome = sampler.sample(cell.site, &mut rng);
            let seed = rng.gen::<u32>();

            zones.push(Zone {
                id: zones.len(),
                site: cell.site,
                border: cell.border,
                biome,
                seed,
            });
        }

        log::info!(
            "assembled {} zones from {} cells (seed {}, half-width {})",
            zones.len(),
            cell_count,
            config.seed,
            half_width
        );

        let starting_zone_id = nearest_zone_to(&zones, Vec3::ZERO);

        #[cfg(feature = "spatial-index")]
        let spatial_index = if zones.is_empty() {
            None
        } else {
            let sites: Vec<Vec3> = zones.iter().map(|z| z.site).collect();
            Some(SpatialIndex::new(&sites))
        };

        Ok((
            Self {
                config,
                zones,
                half_width,
                starting_zone_id,
                #[cfg(feature = "spatial-index")]
                spatial_index,
            },
            rng,
        ))
    }

    /// Get the configuration used to generate this world
    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Get the number of zones
    #[inline]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Get the map half-width
    ///
    /// The playable area spans `[-half_width, half_width]` on X and Z.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Get a zone by ID
    ///
    /// Returns `None` if the zone ID is out of bounds.
    #[inline]
    pub fn get_zone(&self, id: usize) -> Option<&Zone<B>> {
        self.zones.get(id)
    }

    /// Get all zones as a slice
    #[inline]
    pub fn zones(&self) -> &[Zone<B>] {
        &self.zones
    }

    /// The zone nearest the world origin, where a new player spawns
    ///
    /// `None` only when the world has no zones at all.
    #[inline]
    pub fn starting_zone_id(&self) -> Option<usize> {
        self.starting_zone_id
    }

    /// Check whether a position lies on the map
    #[inline]
    pub fn in_bounds(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_width && position.z.abs() <= self.half_width
    }

    /// Find the zone owning a position (requires spatial-index feature)
    ///
    /// Looks up the zone with the nearest site, which by the Voronoi
    /// property is the zone whose cell contains the position whenever the
    /// position falls inside any zone.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_worldgen::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let config = WorldConfigBuilder::new()
    /// #     .seed(42)
    /// #     .map_size(MapSize::Small)
    /// #     .build()
    /// #     .unwrap();
    /// # let biomes = vec![Biome::new("forest", 1.0).starting()];
    /// # let world = VoronoiWorld::generate(config, &biomes).unwrap();
    /// let zone_id = world.find_zone_at(Vec3::new(10.0, 0.0, -25.0));
    /// # let _ = zone_id;
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_zone_at(&self, position: Vec3) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }
}

/// Index of the zone whose site lies nearest to a position
fn nearest_zone_to<B>(zones: &[Zone<B>], position: Vec3) -> Option<usize> {
    zones
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (a.site - position).length_squared();
            let db = (b.site - position).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapSize, WorldConfigBuilder};

    fn test_config(seed: u32) -> WorldConfig {
        WorldConfigBuilder::new()
            .seed(seed)
            .map_size(MapSize::Custom {
                zone_count: 12,
                half_width: 40.0,
            })
            .build()
            .unwrap()
    }

    fn test_biomes() -> Vec<Biome> {
        vec![
            Biome::new("forest", 3.0).starting(),
            Biome::new("desert", 2.0),
            Biome::new("lake", 1.0).water(-0.5),
        ]
    }

    #[test]
    fn test_world_generation() {
        let world = VoronoiWorld::generate(test_config(42), &test_biomes()).unwrap();

        assert!(world.zone_count() > 0);
        assert!(world.zone_count() <= 12);
        assert_eq!(world.half_width(), 40.0);

        for (i, zone) in world.zones().iter().enumerate() {
            assert_eq!(zone.id, i);
            assert!(zone.border.len() >= 3);
            assert!(zone.area() > 0.0);

            for v in &zone.border {
                assert!(v.x.abs() <= 40.0 + 1e-3);
                assert!(v.z.abs() <= 40.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = VoronoiWorld::generate(test_config(7), &test_biomes()).unwrap();
        let b = VoronoiWorld::generate(test_config(7), &test_biomes()).unwrap();

        assert_eq!(a.zone_count(), b.zone_count());
        for (left, right) in a.zones().iter().zip(b.zones()) {
            assert_eq!(left.site, right.site);
            assert_eq!(left.border, right.border);
            assert_eq!(left.biome.id, right.biome.id);
            assert_eq!(left.seed, right.seed);
        }
    }

    #[test]
    fn test_seeds_produce_different_worlds() {
        let a = VoronoiWorld::generate(test_config(1), &test_biomes()).unwrap();
        let b = VoronoiWorld::generate(test_config(2), &test_biomes()).unwrap();

        let sites_a: Vec<_> = a.zones().iter().map(|z| z.site).collect();
        let sites_b: Vec<_> = b.zones().iter().map(|z| z.site).collect();
        assert_ne!(sites_a, sites_b);
    }

    #[test]
    fn test_biome_seed_changes_biomes_only() {
        let config_a = WorldConfigBuilder::new()
            .seed(7)
            .biome_seed(100)
            .map_size(MapSize::Custom {
                zone_count: 12,
                half_width: 40.0,
            })
            .build()
            .unwrap();
        let config_b = WorldConfigBuilder::new()
            .seed(7)
            .biome_seed(200)
            .map_size(MapSize::Custom {
                zone_count: 12,
                half_width: 40.0,
            })
            .build()
            .unwrap();

        let a = VoronoiWorld::generate(config_a, &test_biomes()).unwrap();
        let b = VoronoiWorld::generate(config_b, &test_biomes()).unwrap();

        // Same geometry
        for (left, right) in a.zones().iter().zip(b.zones()) {
            assert_eq!(left.site, right.site);
            assert_eq!(left.border, right.border);
        }

        // Different biome draws somewhere in the world
        let ids_a: Vec<_> = a.zones().iter().map(|z| z.biome.id.clone()).collect();
        let ids_b: Vec<_> = b.zones().iter().map(|z| z.biome.id.clone()).collect();
        let seeds_a: Vec<_> = a.zones().iter().map(|z| z.seed).collect();
        let seeds_b: Vec<_> = b.zones().iter().map(|z| z.seed).collect();
        assert!(ids_a != ids_b || seeds_a != seeds_b);
    }

    #[test]
    fn test_starting_zone_forced() {
        let world = VoronoiWorld::generate(test_config(99), &test_biomes()).unwrap();

        let start = world.starting_zone_id().unwrap();
        let zone = world.get_zone(start).unwrap();
        assert!(zone.biome.starting_zone);

        // It really is the closest zone to the origin
        for other in world.zones() {
            assert!(zone.site.length_squared() <= other.site.length_squared() + 1e-6);
        }
    }

    #[test]
    fn test_no_starting_biome_in_table() {
        let biomes = vec![Biome::new("desert", 1.0), Biome::new("lake", 1.0)];
        let world = VoronoiWorld::generate(test_config(5), &biomes).unwrap();

        // The geometric pick exists, the biome force does not apply
        assert!(world.starting_zone_id().is_some());
    }

    #[test]
    fn test_custom_sampler() {
        struct Fixed;

        impl BiomeSampler for Fixed {
            type Output = u8;
            fn sample(&self, _site: Vec3, _rng: &mut ChaCha8Rng) -> u8 {
                7
            }
        }

        let world = VoronoiWorld::generate_with_sampler(test_config(3), &Fixed).unwrap();
        assert!(world.zone_count() > 0);
        assert!(world.zones().iter().all(|z| z.biome == 7));
    }

    #[test]
    fn test_zone_lookup() {
        let world = VoronoiWorld::generate(test_config(42), &test_biomes()).unwrap();

        assert!(world.get_zone(0).is_some());
        assert!(world.get_zone(world.zone_count()).is_none());
    }

    #[test]
    fn test_in_bounds() {
        let world = VoronoiWorld::generate(test_config(42), &test_biomes()).unwrap();

        assert!(world.in_bounds(Vec3::ZERO));
        assert!(world.in_bounds(Vec3::new(40.0, 0.0, -40.0)));
        assert!(!world.in_bounds(Vec3::new(41.0, 0.0, 0.0)));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_zone_at() {
        let world = VoronoiWorld::generate(test_config(42), &test_biomes()).unwrap();

        // A zone's own site maps back to that zone
        let zone = world.get_zone(0).unwrap();
        assert_eq!(world.find_zone_at(zone.site), Some(0));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_zone_at_agrees_with_contains() {
        let world = VoronoiWorld::generate(test_config(17), &test_biomes()).unwrap();

        for zone in world.zones() {
            let inside = zone.center();
            if zone.contains(inside) {
                assert_eq!(world.find_zone_at(inside), Some(zone.id));
            }
        }
    }
}
