use centersnap_core::{
    AnimationCoordinator, AnimationEngine, CarouselConfig, CarouselError, ElementRegistry,
    FrameTime, ItemId, LayoutHost, Size, TweenEngine, TweenTarget,
};
use centersnap_test_fixtures::{layouts, HostCall, RowLayout};

fn setup() -> (AnimationCoordinator, ElementRegistry, RowLayout) {
    let host = layouts::host("five-equal").unwrap();
    let mut registry = ElementRegistry::new();
    assert_eq!(registry.initialize(&host), 5);
    (
        AnimationCoordinator::new(&CarouselConfig::default()),
        registry,
        host,
    )
}

fn assert_single_slot(coord: &AnimationCoordinator, registry: &ElementRegistry) {
    let engine: &TweenEngine = coord.engine();
    assert!(engine.live_on(TweenTarget::ScrollOffset) <= 1);
    for id in registry.ids() {
        assert!(engine.live_on(TweenTarget::ItemSize(id)) <= 1, "{id:?}");
    }
}

#[test]
fn restarting_scroll_tween_replaces_previous() {
    let (mut coord, registry, mut host) = setup();
    coord.move_scroll_to(&mut host, -100.0, true);
    let first = coord.scroll_tween().unwrap();
    coord.move_scroll_to(&mut host, -200.0, true);
    let second = coord.scroll_tween().unwrap();
    assert_ne!(first, second);
    assert!(!coord.engine().is_live(first));
    assert_single_slot(&coord, &registry);

    for _ in 0..60 {
        coord.tick(&mut host, &registry, FrameTime::uniform(1.0 / 60.0));
    }
    assert_eq!(host.scroll_offset(), -200.0);
    assert!(coord.scroll_tween().is_none());
}

#[test]
fn immediate_move_kills_live_scroll_tween() {
    let (mut coord, registry, mut host) = setup();
    coord.move_scroll_to(&mut host, -300.0, true);
    coord.move_scroll_to(&mut host, 42.0, false);
    assert!(coord.scroll_tween().is_none());
    assert_eq!(host.scroll_offset(), 42.0);

    coord.tick(&mut host, &registry, FrameTime::uniform(0.25));
    assert_eq!(host.scroll_offset(), 42.0);
}

#[test]
fn racing_rescales_leave_one_tween_per_item() {
    let (mut coord, registry, mut host) = setup();
    let ids: Vec<ItemId> = registry.ids().collect();
    for &target in ids.iter().chain(ids.iter().rev()) {
        coord
            .set_selected_visual(&mut host, &registry, target, true)
            .unwrap();
        assert_single_slot(&coord, &registry);
        coord.tick(&mut host, &registry, FrameTime::uniform(0.01));
        assert_single_slot(&coord, &registry);
    }
    // Last caller wins.
    for _ in 0..60 {
        coord.tick(&mut host, &registry, FrameTime::uniform(1.0 / 60.0));
    }
    assert_eq!(host.size_of(ids[0]), Some(Size::new(150.0, 150.0)));
    for id in &ids[1..] {
        assert_eq!(host.size_of(*id), Some(Size::new(100.0, 100.0)));
    }
    assert!(!coord.is_animating());
}

#[test]
fn immediate_rescale_relayouts_synchronously() {
    let (mut coord, registry, mut host) = setup();
    let target = registry.get(2).unwrap().id;
    coord
        .set_selected_visual(&mut host, &registry, target, false)
        .unwrap();
    assert_eq!(host.size_of(target), Some(Size::new(150.0, 150.0)));
    assert_eq!(host.calls().last(), Some(&HostCall::Relayout));
    assert!(!coord.is_animating());
}

#[test]
fn only_one_deferred_relayout_is_pending() {
    let (mut coord, registry, mut host) = setup();
    let a = registry.get(1).unwrap().id;
    let b = registry.get(2).unwrap().id;
    coord.set_selected_visual(&mut host, &registry, a, true).unwrap();
    coord.tick(&mut host, &registry, FrameTime::uniform(0.3));
    coord.set_selected_visual(&mut host, &registry, b, true).unwrap();
    host.clear_calls();

    // The first call's timer would have fired here had it survived.
    coord.tick(&mut host, &registry, FrameTime::uniform(0.3));
    assert_eq!(host.relayout_count(), 0);
    coord.tick(&mut host, &registry, FrameTime::uniform(0.3));
    assert_eq!(host.relayout_count(), 1);
}

#[test]
fn rescale_of_unregistered_item_is_stale() {
    let (mut coord, registry, mut host) = setup();
    let ghost = ItemId(9_999);
    let err = coord
        .set_selected_visual(&mut host, &registry, ghost, true)
        .unwrap_err();
    assert_eq!(err, CarouselError::StaleTarget { item: ghost });
    assert!(!coord.is_animating());
}

#[test]
fn size_tweens_run_on_unscaled_time() {
    let (mut coord, registry, mut host) = setup();
    let target = registry.get(0).unwrap().id;
    coord
        .set_selected_visual(&mut host, &registry, target, true)
        .unwrap();
    coord.move_scroll_to(&mut host, -50.0, true);

    // Game time paused: sizes keep animating, scroll does not.
    for _ in 0..40 {
        coord.tick(&mut host, &registry, FrameTime::new(0.0, 1.0 / 60.0));
    }
    assert_eq!(host.size_of(target), Some(Size::new(150.0, 150.0)));
    assert_eq!(host.scroll_offset(), 0.0);
    assert!(coord.scroll_tween().is_some());
}

#[test]
fn cancel_all_clears_every_slot() {
    let (mut coord, registry, mut host) = setup();
    coord.move_scroll_to(&mut host, -50.0, true);
    coord
        .set_selected_visual(&mut host, &registry, registry.get(3).unwrap().id, true)
        .unwrap();
    assert!(coord.relayout_pending());
    coord.cancel_all();
    assert!(!coord.is_animating());
    assert!(!coord.relayout_pending());
    assert_eq!(coord.engine().live_count(), 0);
}
