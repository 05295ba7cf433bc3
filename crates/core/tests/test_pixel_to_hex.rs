use hexgrid::{CoordinateEngine, HexCoordinate, Orientation};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

fn c(column: i32, row: i32) -> HexCoordinate {
    HexCoordinate::new(column, row)
}

#[test]
fn test_horizontal_scenario() {
    let engine =
        CoordinateEngine::new(32.0, 16.0, Orientation::Horizontal).unwrap();
    assert_eq!(engine.pixel_to_hex(0.0, 0.0), c(-1, -1));
    assert_eq!(engine.pixel_to_hex(16.0, 8.0), c(0, 0));
    assert_eq!(engine.pixel_to_hex(48.0, 16.0), c(1, 0));
    assert_eq!(engine.pixel_to_hex(16.0, 24.0), c(0, 1));
}

#[test]
fn test_vertical_ring_scenario() {
    let engine =
        CoordinateEngine::new(20.0, 20.0, Orientation::Vertical).unwrap();
    assert_eq!(
        engine.ring(c(5, 6), 1).unwrap(),
        vec![c(5, 5), c(6, 6), c(5, 7), c(4, 7), c(4, 6), c(4, 5)]
    );
    assert_eq!(engine.ring(c(5, 6), 0).unwrap(), vec![c(5, 6)]);
}

/// Every pixel belongs to exactly one cell, and that cell's hexagon actually
/// contains the pixel. Sampled at pixel centers, so every value involved is
/// exact in floating point.
#[test]
fn test_partition() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    for &(width, height, orientation) in &[
        (32.0, 16.0, Orientation::Horizontal),
        (20.0, 20.0, Orientation::Vertical),
        (24.0, 32.0, Orientation::Horizontal),
        (40.0, 18.0, Orientation::Vertical),
    ] {
        let engine =
            CoordinateEngine::new(width, height, orientation).unwrap();
        let snapshot = engine.snapshot();
        for _ in 0..5000 {
            let x = rng.gen_range(0..2000) as f32 + 0.5;
            let y = rng.gen_range(0..2000) as f32 + 0.5;
            let coord = snapshot.pixel_to_hex(x, y);
            assert!(
                snapshot.contains_point(coord, x, y),
                "{} grid {}x{}: ({}, {}) mapped to {}, which doesn't contain it",
                orientation,
                width,
                height,
                x,
                y,
                coord
            );
        }
    }
}

#[test]
fn test_center_round_trip_scaled() {
    for &orientation in &[Orientation::Horizontal, Orientation::Vertical] {
        let engine = CoordinateEngine::new(32.0, 24.0, orientation).unwrap();
        for &(scale_x, scale_y) in &[(1.0, 1.0), (0.25, 0.25), (3.0, 1.5)] {
            engine.set_scale(scale_x, scale_y).unwrap();
            let snapshot = engine.snapshot();
            for column in 0..20 {
                for row in 0..20 {
                    let center = snapshot.center_of(c(column, row));
                    assert_eq!(
                        snapshot.pixel_to_hex(center.x, center.y),
                        c(column, row)
                    );
                }
            }
        }
    }
}

#[test]
fn test_negative_sentinels() {
    for &orientation in &[Orientation::Horizontal, Orientation::Vertical] {
        let engine = CoordinateEngine::new(32.0, 24.0, orientation).unwrap();
        assert_eq!(engine.column_of(-0.001, 100.0), -1);
        assert_eq!(engine.row_of(100.0, -0.001), -1);
        assert!(engine.pixel_to_hex(-5.0, -5.0).is_outside());
        // Only the negative axis gets the sentinel
        assert!(engine.pixel_to_hex(-5.0, 200.0).row > 0);
    }
}

#[test]
fn test_scale_changes_mapping() {
    let engine =
        CoordinateEngine::new(32.0, 16.0, Orientation::Horizontal).unwrap();
    let before = engine.pixel_to_hex(100.0, 100.0);
    engine.set_scale(2.0, 2.0).unwrap();
    let after = engine.pixel_to_hex(100.0, 100.0);
    assert_ne!(before, after);
    // Scaling up by 2 means the same pixel lands on half the indices
    assert_eq!(engine.pixel_to_hex(200.0, 200.0), before);
}
