//! Getting started with geosearch.
//!
//! Builds a small index of Vietnamese landmarks, runs radius and rectangle
//! queries, and prints the tree statistics.
//!
//! Run with: cargo run --example getting_started

use geosearch::{GeoPoint, Mbr, RTree, TreeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== geosearch: Getting Started ===\n");

    let mut tree = RTree::new(TreeConfig::default().with_max_entries(4))?;

    let landmarks = [
        (10.7720, 106.6983, "Ben Thanh Market"),
        (10.7798, 106.6990, "Notre-Dame Cathedral"),
        (10.7769, 106.7009, "Saigon Opera House"),
        (10.8231, 106.6297, "Tan Son Nhat Airport"),
        (21.0285, 105.8542, "Hoan Kiem Lake"),
        (21.0368, 105.8342, "Ho Chi Minh Mausoleum"),
        (16.0544, 108.2022, "Dragon Bridge"),
    ];
    for &(lat, lon, name) in &landmarks {
        tree.try_insert(GeoPoint::new(lat, lon, name))?;
    }
    println!("1. Indexed {} landmarks\n", tree.len());

    // Radius search, nearest first
    let center = GeoPoint::at(10.7769, 106.7009);
    println!("2. Within 2 km of ({}, {}):", center.latitude(), center.longitude());
    for hit in tree.search(&center, 2.0)? {
        println!("   {:<24} {:>6.3} km", hit.point.payload(), hit.distance_km);
    }

    let count = tree.count_within_radius(&center, 15.0)?;
    println!("\n3. Landmarks within 15 km: {}", count);

    // Rectangle query covering Hanoi
    let hanoi = Mbr::new(20.9, 21.1, 105.7, 105.9);
    println!("\n4. Inside the Hanoi rectangle:");
    for point in tree.search_rect(&hanoi) {
        println!("   {}", point.payload());
    }

    // Invalid queries are rejected rather than clamped
    if let Err(e) = tree.search(&center, 0.0) {
        println!("\n5. Zero radius rejected: {}", e);
    }

    let stats = tree.stats();
    println!("\n6. Tree statistics");
    println!("   height:         {}", stats.height);
    println!("   leaf nodes:     {}", stats.counts.leaf_count);
    println!("   internal nodes: {}", stats.counts.internal_count);
    println!("   points:         {}", stats.points);
    println!("   as JSON:        {}", serde_json::to_string(&stats)?);

    Ok(())
}
