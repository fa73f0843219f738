//! Builds a small room with a pillar, scans a distance field toward one
//! corner, and prints both the scan and the greedy-descent path another
//! mover would take to reach it.
//!
//! Run with `cargo run --example basic` (or place under a workspace binary
//! target, depending on how this crate is wired into a larger project).

use gridflow::{Cell, DistanceField, Measurement};

fn main() {
    let rows: Vec<Vec<char>> = vec![
        "..........".chars().collect(),
        "..........".chars().collect(),
        "....##....".chars().collect(),
        "....##....".chars().collect(),
        "..........".chars().collect(),
        "..........".chars().collect(),
    ];

    let mut field = DistanceField::new(Measurement::Euclidean);
    field.initialize(&rows, '#');
    field.set_goal(Cell::new(9, 5));

    let grid = field.scan(None).expect("field was initialized above");
    for row in grid.iter().rev() {
        let line: String = row
            .iter()
            .map(|v| if *v > 999_000.0 { '#' } else { '.' })
            .collect();
        println!("{line}");
    }

    let path = field.find_path_pre_scanned(Cell::new(0, 0), 64, None, None);
    println!("path length: {}", path.len());
    for cell in &path {
        println!("  ({}, {})", cell.x(), cell.y());
    }
}
