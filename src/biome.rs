//! Biome data and assignment
//!
//! Zones receive biomes through a [`BiomeSampler`]; the bundled
//! [`WeightedBiomeSampler`] draws from a weight table, which is how the
//! survival-game tuning data describes biome rarity.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldGenError};

/// Descriptive data for one biome
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Biome {
    /// Identifier, also used when naming zones
    pub id: String,
    /// Relative pick weight; higher is more common
    pub weight: f32,
    /// Whether a new player may start in this biome
    pub starting_zone: bool,
    /// Ground elevation offset inside the biome
    pub elevation: f32,
    /// Whether the biome is flooded
    pub is_water: bool,
}

impl Biome {
    /// Create a land biome with the given pick weight
    pub fn new(id: impl Into<String>, weight: f32) -> Self {
        Self {
            id: id.into(),
            weight,
            starting_zone: false,
            elevation: 0.0,
            is_water: false,
        }
    }

    /// Mark the biome as a valid starting zone
    pub fn starting(mut self) -> Self {
        self.starting_zone = true;
        self
    }

    /// Mark the biome as water at the given elevation
    pub fn water(mut self, elevation: f32) -> Self {
        self.is_water = true;
        self.elevation = elevation;
        self
    }

    /// Set the ground elevation
    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }
}

/// Assigns a biome to each zone during world assembly
///
/// Implementations receive the zone's site and the world's biome RNG.
/// Taking every draw from that RNG keeps assignment deterministic for a
/// given biome seed.
pub trait BiomeSampler {
    /// The biome type produced by this sampler
    type Output;

    /// Pick a biome for the zone anchored at `site`
    fn sample(&self, site: Vec3, rng: &mut ChaCha8Rng) -> Self::Output;
}

/// Weighted random biome pick
///
/// Draws a value in the total weight range and walks the table until the
/// remainder falls inside an entry's weight.
#[derive(Debug, Clone)]
pub struct WeightedBiomeSampler {
    biomes: Vec<Biome>,
    total_weight: f32,
}

impl WeightedBiomeSampler {
    /// Create a sampler from a biome table
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::InvalidConfig`] when the table is empty or
    /// the weights do not sum to a positive value.
    pub fn new(biomes: &[Biome]) -> Result<Self> {
        if biomes.is_empty() {
            return Err(WorldGenError::InvalidConfig(
                "biome table must not be empty".to_string(),
            ));
        }

        let total_weight: f32 = biomes.iter().map(|b| b.weight).sum();
        if total_weight <= 0.0 {
            return Err(WorldGenError::InvalidConfig(format!(
                "biome weights must sum to a positive value (got {})",
                total_weight
            )));
        }

        Ok(Self {
            biomes: biomes.to_vec(),
            total_weight,
        })
    }

    /// The table this sampler draws from
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }
}

impl BiomeSampler for WeightedBiomeSampler {
    type Output = Biome;

    fn sample(&self, _site: Vec3, rng: &mut ChaCha8Rng) -> Biome {
        let mut value: f32 = rng.gen_range(0.0..self.total_weight);

        for biome in &self.biomes {
            if value < biome.weight {
                return biome.clone();
            }
            value -= biome.weight;
        }

        // Float drift can walk past the last entry
        self.biomes[self.biomes.len() - 1].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_biome_builders() {
        let lake = Biome::new("lake", 1.0).water(-0.5);
        assert!(lake.is_water);
        assert_eq!(lake.elevation, -0.5);
        assert!(!lake.starting_zone);

        let forest = Biome::new("forest", 3.0).starting().with_elevation(0.2);
        assert!(forest.starting_zone);
        assert_eq!(forest.elevation, 0.2);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(WeightedBiomeSampler::new(&[]).is_err());
    }

    #[test]
    fn test_zero_total_weight_rejected() {
        let biomes = vec![Biome::new("a", 0.0), Biome::new("b", 0.0)];
        assert!(WeightedBiomeSampler::new(&biomes).is_err());
    }

    #[test]
    fn test_single_biome_always_picked() {
        let sampler = WeightedBiomeSampler::new(&[Biome::new("only", 2.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(sampler.sample(Vec3::ZERO, &mut rng).id, "only");
        }
    }

    #[test]
    fn test_weights_shape_distribution() {
        let biomes = vec![
            Biome::new("common", 3.0),
            Biome::new("never", 0.0),
            Biome::new("rare", 1.0),
        ];
        let sampler = WeightedBiomeSampler::new(&biomes).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut common = 0;
        let mut never = 0;
        let mut rare = 0;
        for _ in 0..4000 {
            match sampler.sample(Vec3::ZERO, &mut rng).id.as_str() {
                "common" => common += 1,
                "never" => never += 1,
                _ => rare += 1,
            }
        }

        assert_eq!(never, 0);
        // Roughly 3:1
        assert!(common > rare * 2);
        assert!(rare > 0);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let biomes = vec![Biome::new("a", 1.0), Biome::new("b", 1.0)];
        let sampler = WeightedBiomeSampler::new(&biomes).unwrap();

        let draw = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| sampler.sample(Vec3::ZERO, &mut rng).id)
                .collect::<Vec<_>>()
        };

        assert_eq!(draw(3), draw(3));
        assert_ne!(draw(3), draw(4));
    }
}
