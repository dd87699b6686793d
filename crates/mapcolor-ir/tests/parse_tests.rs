use mapcolor_ir::parse::{parse_map, to_json};
use mapcolor_ir::syntax::{parse_border_pairs, parse_domain, parse_region_list};
use mapcolor_ir::{Color, MapError, Palette, RegionMap};

#[test]
fn test_parse_map_from_file() {
    let json = include_str!("fixtures/australia.json");
    let doc = parse_map(json).unwrap();
    assert_eq!(doc.regions.len(), 7);
    assert_eq!(doc.borders.len(), 9);
    assert!(doc.palette.is_none());
    let toggles = doc.heuristics.unwrap();
    assert!(toggles.use_mrv && toggles.use_degree);

    let map = RegionMap::from_document(&doc).unwrap();
    assert_eq!(map.palette().len(), 15);
    // Region 7 is an island.
    assert!(map.region(7).unwrap().borders().is_empty());
    assert_eq!(map.region(3).unwrap().borders().len(), 5);
}

#[test]
fn test_parse_restricted_domains() {
    let json = include_str!("fixtures/restricted.json");
    let doc = parse_map(json).unwrap();
    let map = RegionMap::from_document(&doc).unwrap();
    let domains = map.initial_domains();

    assert_eq!(domains[&1], vec![Color::parse("#45B7D1").unwrap()]);
    assert_eq!(domains[&2].len(), 2);
    assert_eq!(domains[&3].len(), 3);
}

#[test]
fn test_parse_invalid_json() {
    assert!(parse_map("not json at all").is_err());
}

#[test]
fn test_parse_rejects_bad_color() {
    let json = r##"{ "regions": [{ "id": 1, "color": "#12" }], "borders": [] }"##;
    assert!(parse_map(json).is_err());
}

#[test]
fn test_parse_rejects_empty_palette() {
    let json = r#"{ "palette": [], "regions": [] }"#;
    assert!(parse_map(json).is_err());
}

#[test]
fn test_document_with_unknown_border_is_rejected() {
    let json = r#"{ "regions": [{ "id": 1 }], "borders": [[1, 2]] }"#;
    let doc = parse_map(json).unwrap();
    assert_eq!(
        RegionMap::from_document(&doc),
        Err(MapError::UnknownRegion(2))
    );
}

#[test]
fn test_document_with_duplicate_region_is_rejected() {
    let json = r#"{ "regions": [{ "id": 1 }, { "id": 1 }] }"#;
    let doc = parse_map(json).unwrap();
    assert_eq!(
        RegionMap::from_document(&doc),
        Err(MapError::DuplicateRegion(1))
    );
}

#[test]
fn test_pinned_color_outside_palette_is_rejected() {
    let json = r##"{
        "palette": ["#FF6B6B"],
        "regions": [{ "id": 1, "color": "#000000" }]
    }"##;
    let doc = parse_map(json).unwrap();
    assert!(matches!(
        RegionMap::from_document(&doc),
        Err(MapError::ColorOutsideDomain { region: 1, .. })
    ));
}

#[test]
fn test_serialize_and_reparse() {
    let doc = parse_map(include_str!("fixtures/restricted.json")).unwrap();
    let json = to_json(&doc).unwrap();
    assert_eq!(parse_map(&json).unwrap(), doc);
}

#[test]
fn test_editor_session_from_text_input() {
    let palette = Palette::compact();
    let mut map = RegionMap::new(palette.clone());
    map.add_region(&[]).unwrap();
    map.add_region(&parse_region_list("1").unwrap()).unwrap();
    map.add_region(&parse_region_list("1,2").unwrap()).unwrap();
    map.add_region(&[]).unwrap();
    assert_eq!(map.border_pairs(), vec![(1, 2), (1, 3), (2, 3)]);

    map.set_borders(&parse_border_pairs("1-2, 2-3 3-4").unwrap())
        .unwrap();
    assert_eq!(map.border_pairs(), vec![(1, 2), (2, 3), (3, 4)]);

    map.restrict_domain(4, parse_domain("1 #45b7d1", &palette).unwrap())
        .unwrap();
    assert_eq!(
        map.region(4).unwrap().domain,
        vec![
            Color::parse("#FF6B6B").unwrap(),
            Color::parse("#45B7D1").unwrap()
        ]
    );
    map.reset_domain(4).unwrap();
    assert_eq!(map.region(4).unwrap().domain.len(), 10);
}

#[test]
fn test_largest_region_id_loads_but_exhausts_numbering() {
    let doc = parse_map(r#"{ "regions": [{ "id": 4294967295 }, { "id": 3 }] }"#).unwrap();
    let mut map = RegionMap::from_document(&doc).unwrap();
    assert_eq!(map.region_ids(), vec![3, u32::MAX]);
    assert_eq!(map.add_region(&[3]), Err(MapError::RegionIdExhausted));
    assert_eq!(map.len(), 2);

    map.clear_all();
    assert_eq!(map.add_region(&[]), Ok(1));
}
