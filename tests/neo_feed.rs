use atmoshield::neo::{dedup, parse_feed};

fn fixture() -> String {
    std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/neo_feed.json"
    ))
    .expect("fixture readable")
}

#[test]
fn malformed_records_are_skipped_not_fatal() {
    let records = parse_feed(&fixture()).expect("feed parses");
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    // Sorted by approach date; the missing-diameter, bad-velocity and
    // missing-id records drop out alongside the filtered ones.
    assert_eq!(ids, vec!["54016123", "3542519", "3542519"]);
}

#[test]
fn filter_uses_earth_approach_and_minimum_diameter() {
    let records = parse_feed(&fixture()).unwrap();
    let qf2 = &records[0];
    assert_eq!(qf2.name, "(2020 QF2)");
    assert_eq!(qf2.date, "2026-10-19");
    assert_eq!(qf2.velocity_km_s, 12.75);
    assert_eq!(qf2.diameter_min_m, 64.3);
    assert!(records
        .iter()
        .all(|r| (10.0..=100.0).contains(&r.diameter_min_m) && r.potentially_hazardous));
}

#[test]
fn duplicates_keep_first_window() {
    let records = dedup(parse_feed(&fixture()).unwrap());
    assert_eq!(records.len(), 2);
    let pk9 = records.iter().find(|r| r.id == "3542519").unwrap();
    assert_eq!(pk9.date, "2026-10-21");
    assert!((pk9.velocity_km_s - 17.2041).abs() < 1e-9);
}

#[test]
fn candidates_become_simulation_inputs() {
    let records = dedup(parse_feed(&fixture()).unwrap());
    let input = records[1].simulation_input(45.0).unwrap();
    assert_eq!(input.diameter_m(), 22.0);
    assert_eq!(input.velocity_km_s(), 17.2);
    assert_eq!(input.angle_deg(), 45.0);
    assert!(!records[1].identity().synthetic);
    assert!(records[1].simulation_input(91.0).is_err());
}
