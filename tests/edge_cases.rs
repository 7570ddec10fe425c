use geosearch::{GeoPoint, GeoSearchError, Mbr, RTree, SearchWindow, TreeConfig};

#[test]
fn test_invalid_radius_rejected() {
    let mut tree = RTree::default();
    tree.insert(GeoPoint::new(10.0, 106.0, 1));
    let center = GeoPoint::at(10.0, 106.0);

    for radius in [0.0, -0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = tree.search(&center, radius);
        assert!(
            matches!(result, Err(GeoSearchError::InvalidInput(_))),
            "radius {} should be rejected",
            radius
        );
    }
}

#[test]
fn test_invalid_center_rejected() {
    let mut tree = RTree::default();
    tree.insert(GeoPoint::new(10.0, 106.0, 1));

    assert!(tree.search(&GeoPoint::at(f64::NAN, 0.0), 1.0).is_err());
    assert!(tree.search(&GeoPoint::at(0.0, f64::INFINITY), 1.0).is_err());
    assert!(tree.search(&GeoPoint::at(91.0, 0.0), 1.0).is_err());
    assert!(tree.search(&GeoPoint::at(0.0, -181.0), 1.0).is_err());
}

#[test]
fn test_capacity_below_two_rejected() {
    for max_entries in [0, 1] {
        assert!(matches!(
            RTree::<()>::new(TreeConfig::new(max_entries)),
            Err(GeoSearchError::InvalidConfig(_))
        ));
    }
    let tree = RTree::<()>::with_max_entries(2).unwrap();
    assert_eq!(tree.min_entries(), 2);
}

#[test]
fn test_duplicate_points_all_found() {
    let mut tree = RTree::with_max_entries(3).unwrap();
    for i in 0..50 {
        tree.insert(GeoPoint::new(10.776, 106.700, i));
    }
    tree.check_invariants().unwrap();

    let hits = tree.search(&GeoPoint::at(10.776, 106.700), 0.01).unwrap();
    assert_eq!(hits.len(), 50);
    assert!(hits.iter().all(|h| h.distance_km < 1e-9));

    // Equal distances keep traversal order.
    let traversal: Vec<i32> = tree.iter().map(|p| *p.payload()).collect();
    let found: Vec<i32> = hits.iter().map(|h| *h.point.payload()).collect();
    assert_eq!(found, traversal);
}

#[test]
fn test_points_on_a_line_split_cleanly() {
    // Every rectangle has zero latitude width, so seed picking falls back to
    // the longitude axis.
    let mut tree = RTree::with_max_entries(4).unwrap();
    for i in 0..100 {
        tree.insert(GeoPoint::new(0.0, i as f64 * 0.01, i));
    }
    tree.check_invariants().unwrap();
    assert_eq!(tree.len(), 100);
    assert_eq!(tree.count_within_radius(&GeoPoint::at(0.0, 0.5), 2.0).unwrap(), 3);
}

#[test]
fn test_search_across_antimeridian() {
    let mut tree = RTree::with_max_entries(4).unwrap();
    tree.insert(GeoPoint::new(0.0, 179.99, "east"));
    tree.insert(GeoPoint::new(0.0, -179.99, "west"));
    tree.insert(GeoPoint::new(0.0, 170.0, "far"));
    for i in 0..20 {
        tree.insert(GeoPoint::new(45.0, -170.0 + i as f64, "filler"));
    }

    let hits = tree.search(&GeoPoint::at(0.0, 180.0), 5.0).unwrap();
    let names: Vec<&str> = hits.iter().map(|h| *h.point.payload()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"east"));
    assert!(names.contains(&"west"));

    let window = SearchWindow::new(0.0, 180.0, 5.0);
    assert_eq!(window.rects().len(), 2);
}

#[test]
fn test_search_near_pole_covers_all_longitudes() {
    let mut tree = RTree::with_max_entries(4).unwrap();
    for lon in (-180..180).step_by(30) {
        tree.insert(GeoPoint::new(89.99, lon as f64, lon));
    }
    tree.insert(GeoPoint::new(80.0, 0.0, 999));

    // Every point at 89.99N is about 1.1 km from the pole.
    let hits = tree.search(&GeoPoint::at(90.0, 0.0), 2.0).unwrap();
    assert_eq!(hits.len(), 12);
    assert!(hits.iter().all(|h| *h.point.payload() != 999));

    let window = SearchWindow::new(89.99, 0.0, 5.0);
    assert!(window.covers_all_longitudes());
    assert_eq!(window.rects()[0].max_lat(), 90.0);
}

#[test]
fn test_south_pole_center() {
    let mut tree = RTree::default();
    tree.insert(GeoPoint::new(-89.995, 45.0, 'a'));
    tree.insert(GeoPoint::new(-89.995, -135.0, 'b'));

    let hits = tree.search(&GeoPoint::at(-90.0, 0.0), 1.0).unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_huge_radius_returns_everything() {
    let mut tree = RTree::with_max_entries(5).unwrap();
    let cities = [
        (21.0285, 105.8542),
        (-33.8688, 151.2093),
        (51.5074, -0.1278),
        (-54.8019, -68.3030),
        (64.1466, -21.9426),
    ];
    for (i, &(lat, lon)) in cities.iter().enumerate() {
        tree.insert(GeoPoint::new(lat, lon, i));
    }

    // Half the circumference reaches the antipode of any center.
    let hits = tree.search(&GeoPoint::at(0.0, 0.0), 20_100.0).unwrap();
    assert_eq!(hits.len(), cities.len());
}

#[test]
fn test_rect_query_on_tree_boundary() {
    let mut tree = RTree::with_max_entries(2).unwrap();
    tree.insert(GeoPoint::new(10.0, 106.0, 0));
    tree.insert(GeoPoint::new(11.0, 107.0, 1));
    tree.insert(GeoPoint::new(12.0, 108.0, 2));

    // Closed bounds: a rectangle touching a point includes it.
    assert_eq!(tree.search_rect(&Mbr::new(12.0, 13.0, 108.0, 109.0)).len(), 1);
    assert_eq!(tree.search_rect(&Mbr::from_coords(11.0, 107.0)).len(), 1);
    assert!(tree.search_rect(&Mbr::new(12.5, 13.0, 108.5, 109.0)).is_empty());
}

#[test]
fn test_try_insert_rejects_out_of_range() {
    let mut tree = RTree::default();
    assert!(tree.try_insert(GeoPoint::new(-90.0, -180.0, 0)).is_ok());
    assert!(tree.try_insert(GeoPoint::new(90.0, 180.0, 1)).is_ok());
    assert!(tree.try_insert(GeoPoint::new(90.0001, 0.0, 2)).is_err());
    assert!(tree.try_insert(GeoPoint::new(0.0, f64::NAN, 3)).is_err());
    assert_eq!(tree.len(), 2);
    tree.check_invariants().unwrap();
}
