use centersnap_core::{
    compute_padding, CarouselConfig, CarouselError, Easing, ElementRegistry, LayoutHost,
    ProximityResolver, Size, UpdateMode,
};
use centersnap_test_fixtures::{configs, layouts, RowLayout};

#[test]
fn initialize_captures_original_sizes_in_order() {
    let host = layouts::host("mixed-widths").unwrap();
    let mut registry = ElementRegistry::new();
    assert_eq!(registry.initialize(&host), 5);

    let widths: Vec<f32> = registry.iter().map(|i| i.original_size.width).collect();
    assert_eq!(widths, vec![80.0, 120.0, 100.0, 160.0, 60.0]);
    assert_eq!(registry.reference_width(&host), Some(80.0));
    assert_eq!(registry.ids().collect::<Vec<_>>(), host.children());
}

#[test]
fn reference_width_follows_measured_first_item() {
    let mut host = layouts::host("five-equal").unwrap();
    let mut registry = ElementRegistry::new();
    registry.initialize(&host);
    let first = registry.get(0).unwrap().id;

    host.set_item_size(first, Size::new(150.0, 150.0));
    assert_eq!(registry.reference_width(&host), Some(150.0));
    assert_eq!(registry.original_size(first), Some(Size::new(100.0, 100.0)));

    host.remove_externally(first);
    assert_eq!(registry.reference_width(&host), Some(100.0));
}

#[test]
fn reinitialize_replaces_previous_items() {
    let host = layouts::host("five-equal").unwrap();
    let mut registry = ElementRegistry::new();
    registry.initialize(&host);
    registry.initialize(&host);
    assert_eq!(registry.len(), 5);

    let empty = layouts::host("empty").unwrap();
    assert_eq!(registry.initialize(&empty), 0);
    assert!(registry.is_empty());
    assert_eq!(registry.reference_width(&empty), None);
}

#[test]
fn add_and_remove_keep_order() {
    let mut host = RowLayout::new(300.0);
    let mut registry = ElementRegistry::new();
    let a = registry.add(&mut host, &Size::new(10.0, 10.0)).unwrap();
    let b = registry.add(&mut host, &Size::new(20.0, 20.0)).unwrap();
    let c = registry.add(&mut host, &Size::new(30.0, 30.0)).unwrap();
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b, c]);

    let (index, item) = registry.remove(b).unwrap();
    assert_eq!(index, 1);
    assert_eq!(item.original_size, Size::new(20.0, 20.0));
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, c]);
    assert!(registry.remove(b).is_none());
    assert_eq!(registry.original_size(c), Some(Size::new(30.0, 30.0)));
}

#[test]
fn resolver_on_empty_registry_is_none() {
    let host = layouts::host("empty").unwrap();
    assert_eq!(ProximityResolver::resolve(&host, &ElementRegistry::new()), None);
}

#[test]
fn resolver_reads_live_scroll_offset() {
    let mut host = layouts::host("five-equal").unwrap();
    let mut registry = ElementRegistry::new();
    registry.initialize(&host);
    // No padding applied: item i spans [100 i, 100 i + 100).
    assert_eq!(ProximityResolver::resolve(&host, &registry), Some(1));
    host.set_scroll_offset(-200.0);
    assert_eq!(ProximityResolver::resolve(&host, &registry), Some(3));
    assert_eq!(ProximityResolver::resolve(&host, &registry), Some(3));
}

#[test]
fn every_layout_fixture_builds_a_host() {
    for name in layouts::keys() {
        let fx = layouts::fixture(&name).unwrap();
        let host = layouts::host(&name).unwrap();
        let mut registry = ElementRegistry::new();
        assert_eq!(registry.initialize(&host), fx.items.len(), "{name}");
        assert_eq!(host.viewport_width(), fx.viewport_width, "{name}");
    }
}

#[test]
fn fixture_configs_parse() {
    for name in configs::keys() {
        let json = configs::json(&name).unwrap();
        CarouselConfig::from_json(&json).unwrap_or_else(|e| panic!("{name}: {e}"));
    }

    let snappy = CarouselConfig::from_json(&configs::json("snappy").unwrap()).unwrap();
    assert_eq!(snappy.selected_scale, 1.25);
    assert_eq!(snappy.easing, Easing::CubicBezier([0.25, 0.1, 0.25, 1.0]));
    assert_eq!(snappy.size_update, UpdateMode::Scaled);
    assert_eq!(snappy.scroll_update, UpdateMode::Scaled);
}

#[test]
fn padding_uses_fixture_reference_width() {
    let fx = centersnap_test_fixtures::layouts::fixture("mixed-widths").unwrap();
    let padding = compute_padding(fx.viewport_width, fx.items.first().map(|s| s.width), 100.0);
    assert_eq!(padding.left, 160);
    assert_eq!(padding.right, 160);
}

#[test]
fn invalid_duration_is_rejected() {
    let err = CarouselConfig::from_json(r#"{ "tween_duration": -1.0 }"#).unwrap_err();
    assert!(matches!(err, CarouselError::InvalidConfig(_)));
}
