use crowdnav_lib::{
    build_venue, calculate_auto_zones, Coordinate, ZoneLayout, DEFAULT_RADIUS_METERS,
    FULLY_CONNECTED_WEIGHT,
};

const BANGALORE: Coordinate = Coordinate::new(12.9716, 77.5946);

#[test]
fn auto_zones_are_deterministic() {
    let first = calculate_auto_zones(BANGALORE, 500.0).expect("valid layout");
    let second = calculate_auto_zones(BANGALORE, 500.0).expect("valid layout");
    assert_eq!(first, second);
}

#[test]
fn auto_zones_follow_fixed_naming_and_offsets() {
    let zones = calculate_auto_zones(BANGALORE, 1110.0).expect("valid layout");
    let names: Vec<&str> = zones.iter().map(|zone| zone.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Event Center",
            "North Zone",
            "South Zone",
            "East Zone",
            "West Zone",
            "North East Sector",
            "North West Sector",
            "South East Sector",
            "South West Sector",
        ]
    );

    // 1110 m is 0.01 degrees at 111 km per degree.
    let offset = 0.01;
    let diagonal = offset / 1.5;
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;

    assert_eq!(zones[0].coordinate, BANGALORE);
    assert!(close(zones[1].coordinate.lat, BANGALORE.lat + offset));
    assert!(close(zones[2].coordinate.lat, BANGALORE.lat - offset));
    assert!(close(zones[3].coordinate.lng, BANGALORE.lng + offset));
    assert!(close(zones[4].coordinate.lng, BANGALORE.lng - offset));
    assert!(close(zones[5].coordinate.lat, BANGALORE.lat + diagonal));
    assert!(close(zones[8].coordinate.lng, BANGALORE.lng - diagonal));
}

#[test]
fn generated_venue_is_fully_connected() {
    let venue = build_venue(&ZoneLayout::Auto {
        center: BANGALORE,
        radius_m: DEFAULT_RADIUS_METERS,
    })
    .expect("valid layout");

    let n = venue.zones().len();
    assert_eq!(n, 9);
    assert_eq!(venue.graph().edge_count(), n * (n - 1));

    for a in venue.zones() {
        assert_eq!(venue.graph().weight(&a.name, &a.name), None);
        for b in venue.zones().iter().filter(|b| b.name != a.name) {
            assert_eq!(
                venue.graph().weight(&a.name, &b.name),
                Some(FULLY_CONNECTED_WEIGHT)
            );
        }
    }
}

#[test]
fn invalid_center_is_rejected() {
    let err = calculate_auto_zones(Coordinate::new(95.0, 0.0), 500.0).expect_err("bad latitude");
    assert!(err.to_string().contains("invalid venue configuration"));
}
