use glam::DVec3;
use strand::catalog::{BeadKind, BeadSpec};
use strand::presets::{Design, Style};
use strand::{
    BeadId, Catalog, GemType, PatternConfig, circumference_of, configure, layout, total_price,
    total_width,
};

/// Standard gems plus a 7mm wide disc, so widths match round numbers.
fn wide_disc_catalog() -> Catalog {
    let disc = BeadSpec {
        id: BeadId::from("disc-7"),
        label: "Disc 7mm".to_string(),
        kind: BeadKind::Spacer {
            diameter_mm: 8.0,
            thickness_mm: 7.0,
        },
        price: 0.45,
        color: None,
    };
    Catalog::from_specs([
        BeadSpec::gem(GemType::Onyx, 10),
        BeadSpec::gem(GemType::Malachite, 10),
        BeadSpec::lava_cube(10),
        disc,
    ])
    .unwrap()
}

fn ids(list: &[&str]) -> Vec<BeadId> {
    list.iter().map(|&s| BeadId::from(s)).collect()
}

#[test]
fn repeating_primary_only() {
    let catalog = Catalog::standard();
    let config = PatternConfig {
        target_circumference_mm: 177.8,
        ..Default::default()
    };
    let seq = configure(&config, catalog).unwrap();
    assert_eq!(seq.len(), 18);
    assert!(seq.iter().all(|id| id.as_str() == "onyx-10"));
    assert_eq!(total_width(catalog, &seq).unwrap(), 180.0);
    assert_eq!(circumference_of(catalog, &seq).unwrap(), 180.0);
    // 18 * 1.0 + cord + labor
    assert_eq!(total_price(catalog, &seq).unwrap(), 29);
}

#[test]
fn repeating_pair_with_spacers() {
    let catalog = wide_disc_catalog();
    let config = PatternConfig {
        target_circumference_mm: 177.8,
        secondary: Some(GemType::Malachite),
        use_spacers: true,
        spacer: Some(BeadId::from("disc-7")),
        ..Default::default()
    };
    let seq = configure(&config, &catalog).unwrap();
    assert_eq!(seq.len(), 6 * 4);
    assert_eq!(seq[..4], ids(&["onyx-10", "disc-7", "malachite-10", "disc-7"])[..]);
    assert_eq!(total_width(&catalog, &seq).unwrap(), 204.0);
}

#[test]
fn single_focal_fills_remaining() {
    let catalog = wide_disc_catalog();
    let focal = ids(&["disc-7", "lava-cube-10", "disc-7"]);
    let config = PatternConfig {
        target_circumference_mm: 165.1,
        focal: focal.clone(),
        ..Default::default()
    };
    let seq = configure(&config, &catalog).unwrap();
    assert_eq!(seq.len(), 3 + 15);
    assert_eq!(seq[..3], focal[..]);
    assert!(seq[3..].iter().all(|id| id.as_str() == "onyx-10"));
    assert!(total_width(&catalog, &seq).unwrap() >= 165.1);
}

#[test]
fn flat_run_is_threaded_on_chord() {
    let catalog = wide_disc_catalog();
    let seq = ids(&["onyx-10", "disc-7", "disc-7", "disc-7", "onyx-10"]);
    let placements = layout(&seq, 200.0, &catalog).unwrap();
    assert_eq!(placements.len(), seq.len());

    let a = placements[1].position;
    let b = placements[2].position;
    let c = placements[3].position;
    let ab = b - a;
    let ac = c - a;
    assert!(ab.cross(ac).length() < 1e-9, "spacer centers are not collinear");
    assert!(ab.dot(ac) > 0.0 && ac.length() > ab.length(), "spacer centers out of order");

    // centers sit 7mm apart along the arc, scaled by chord over arc span
    let radius = 200.0 / std::f64::consts::TAU;
    let span = 14.0;
    let chord = 2.0 * radius * (span / (2.0 * radius)).sin();
    let step = 7.0 * chord / span;
    assert!((ab.length() - step).abs() < 1e-9);
    assert!(((c - b).length() - step).abs() < 1e-9);

    for p in &placements {
        assert!(p.position.y.abs() < 1e-12);
        assert_eq!(p.flat, p.bead.as_str() == "disc-7");
    }
    // spacers on a shared chord share a bore direction
    let bore = placements[1].basis.y_axis;
    assert!((placements[2].basis.y_axis - bore).length() < 1e-9);
    assert!((placements[3].basis.y_axis - bore).length() < 1e-9);
    assert!(bore.dot(ac.normalize()) > 1.0 - 1e-9);
}

#[test]
fn triad_design_end_to_end() {
    let catalog = Catalog::standard();
    let design = Design {
        style: Style::Triad,
        target_mm: 180.0,
        primary: GemType::Onyx,
        secondary: Some(GemType::RubyInZoisite),
        spacers: true,
        focal: Some("lava-cube-8".to_string()),
    };
    let seq = configure(&design.pattern().unwrap(), catalog).unwrap();
    assert_eq!(seq.len(), 36);
    assert_eq!(seq[..3], ids(&["spacer-8x2", "lava-cube-8", "spacer-8x2"])[..]);
    assert_eq!(seq[12..15], seq[..3]);
    assert_eq!(seq[24..27], seq[..3]);

    let circumference = circumference_of(catalog, &seq).unwrap();
    assert!(circumference >= 180.0);

    let placements = layout(&seq, circumference, catalog).unwrap();
    assert_eq!(placements.len(), seq.len());
    let radius = circumference / std::f64::consts::TAU;
    for p in placements.iter().filter(|p| !p.flat) {
        assert!((p.position.length() - radius).abs() < 1e-9);
    }
    assert!(placements.iter().all(|p| p.position != DVec3::ZERO));
}
