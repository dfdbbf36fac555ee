//! Example: Generate a Voronoi world
//!
//! Demonstrates the basic usage of the generation pipeline.

use std::collections::BTreeMap;

use voronoi_worldgen::*;

fn main() {
    println!("Voronoi World Generation Example");
    println!("=================================\n");

    // Create a configuration for a small map
    let config = WorldConfigBuilder::new()
        .seed(42)
        .map_size(MapSize::Small) // Use Small for faster generation in example
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Biome Seed: {}", config.biome_seed);
    println!("  Map Size: {}", config.map_size.name());
    println!("  Zone Count: {}", config.zone_count());
    println!("  Half-Width: {}", config.half_width());
    println!();

    // Describe the biome table
    let biomes = vec![
        Biome::new("forest", 3.0).starting(),
        Biome::new("plains", 3.0).starting(),
        Biome::new("desert", 2.0),
        Biome::new("swamp", 1.0).water(-0.2),
        Biome::new("lake", 1.0).water(-0.5),
    ];

    // Generate the world
    println!("Generating world...");
    let world = VoronoiWorld::generate(config, &biomes).expect("Failed to generate world");
    println!("Generated {} zones\n", world.zone_count());

    // Analyze the generated zones
    let total_vertices: usize = world.zones().iter().map(|z| z.border.len()).sum();
    let avg_vertices = total_vertices as f32 / world.zone_count() as f32;

    let map_area = (2.0 * world.half_width()).powi(2);
    let zone_area: f32 = world.zones().iter().map(|z| z.area()).sum();

    let mut biome_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for zone in world.zones() {
        *biome_counts.entry(zone.biome.id.as_str()).or_insert(0) += 1;
    }

    println!("Statistics:");
    println!("  Average border vertices per zone: {:.2}", avg_vertices);
    println!("  Map coverage: {:.1}%", 100.0 * zone_area / map_area);
    for (id, count) in &biome_counts {
        println!("  {}: {} zones", id, count);
    }
    println!();

    // Show details for first few zones
    println!("Sample zones:");
    for zone in world.zones().iter().take(5) {
        println!(
            "  Zone {}: biome={}, site=({:.2}, {:.2}), area={:.1}, vertices={}",
            zone.id,
            zone.biome.id,
            zone.site.x,
            zone.site.z,
            zone.area(),
            zone.border.len()
        );
    }

    if let Some(start) = world.starting_zone_id() {
        let zone = world.get_zone(start).expect("starting zone exists");
        println!("\nStarting zone: {} ({})", start, zone.biome.id);
    }

    println!("\nGeneration complete!");
}
