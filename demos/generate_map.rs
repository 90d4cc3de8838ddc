//! Complete workflow demonstration for continent_map
//!
//! Run with `RUST_LOG=debug` to see every pipeline stage.

use continent_map::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== continent_map Complete Demo ===\n");

    // Step 1: Configure map
    println!("Step 1: Configuring map...");
    let config = MapConfigBuilder::new()
        .seed(12345)
        .crusts(400)?
        .land_ratio(0.35)?
        .continent_count(5)?
        .build()?;

    println!("  Seed: {}", config.seed);
    println!("  Size: {} x {}", config.width, config.height);
    println!("  Crusts: {} ({} land)", config.crusts, config.land_site_count());
    println!("  Relaxation rounds: {}", config.relaxation_rounds());

    // Step 2: Generate map
    println!("\nStep 2: Generating map...");
    let map = ContinentMap::generate(config)?;
    println!("  Generated {} sites", map.site_count());
    println!(
        "  Refinement added {} sites",
        map.sites()
            .iter()
            .filter(|s| s.origin == SiteOrigin::Refined)
            .count()
    );

    // Step 3: Land and coastline
    println!("\nStep 3: Land and coastline:");
    println!("  Land sites: {}", map.land_site_count());
    println!("  Land area: {:.1}%", map.land_fraction() * 100.0);
    if let Some((low, high)) = map.elevation_range() {
        println!("  Elevation: {:.3} .. {:.3}", low, high);
    }
    for (stage, coastline) in map.coastline_history().iter().enumerate() {
        let length: f64 = coastline.iter().map(CoastlineEdge::length).sum();
        println!("  Stage {}: {} coastline edges, length {:.0}", stage, coastline.len(), length);
    }

    // Step 4: Point queries
    println!("\nStep 4: Point queries:");
    let center = DVec2::new(config.width / 2.0, config.height / 2.0);
    if let Some(index) = map.site_at(center) {
        let site = map.try_site(index)?;
        println!("  Position {} -> Site {} (elevation {:.3})", center, index, site.elevation);
        println!("  Site has {} neighbors", map.neighbors(index).len());
    }

    // Step 5: Generate mesh
    println!("\nStep 5: Generating mesh...");
    let mesh = generate_mesh(&map, &BandedColorMapper);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Coastline segments: {}", mesh.coastline.len());

    let light = generate_mesh(&map, &GradientColorMapper::light());
    println!("  Light palette mesh: {} triangles", light.triangle_count());

    // Memory estimate
    let mem = (mesh.positions.len() * 8
        + mesh.colors.len() * 16
        + mesh.indices.len() * 4
        + mesh.coastline.len() * 16) as f32
        / 1024.0
        / 1024.0;
    println!("  Memory: {:.2} MB", mem);

    println!("\n=== Demo Complete ===");
    Ok(())
}
