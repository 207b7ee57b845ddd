use tuipage::{find_element, Element, LayoutResult, Rect, RevealObserver};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn card(id: &str) -> Element {
    Element::col()
        .id(id)
        .class("reveal")
        .child(Element::text("card body"))
}

fn page_tree() -> Element {
    Element::col()
        .id("page")
        .child(Element::text("intro").id("intro"))
        .child(card("a"))
        .child(card("b"))
        .child(card("c"))
        .child(card("d"))
}

// Four cards of four rows each, stacked under the viewport origin.
fn page_layout() -> LayoutResult {
    create_layout(&[
        ("page", Rect::new(0, 0, 40, 16)),
        ("a", Rect::new(0, 0, 40, 4)),
        ("b", Rect::new(0, 4, 40, 4)),
        ("c", Rect::new(0, 8, 40, 4)),
        ("d", Rect::new(0, 12, 40, 4)),
    ])
}

fn has_visible(root: &Element, id: &str) -> bool {
    find_element(root, id).unwrap().has_class("visible")
}

// =============================================================================
// Watching
// =============================================================================

#[test]
fn test_observe_all_collects_marked_elements() {
    let root = page_tree();
    let mut observer = RevealObserver::new(0.1);

    observer.observe_all(&root);

    assert_eq!(observer.pending(), ["a", "b", "c", "d"]);
}

#[test]
fn test_observe_all_is_idempotent() {
    let root = page_tree();
    let mut observer = RevealObserver::new(0.1);

    observer.observe_all(&root);
    observer.observe_all(&root);

    assert_eq!(observer.pending().len(), 4);
}

#[test]
fn test_observe_all_skips_revealed() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.1);

    observer.observe_all(&root);
    observer.update(&mut root, &layout, Rect::new(0, 0, 40, 8));
    assert!(observer.is_revealed("a"));

    // Re-scanning after a tree change must not rewatch what already fired.
    observer.observe_all(&root);
    assert_eq!(observer.pending(), ["c", "d"]);
}

// =============================================================================
// Crossing the threshold
// =============================================================================

#[test]
fn test_update_reveals_visible_cards() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.1);
    observer.observe_all(&root);

    let newly = observer.update(&mut root, &layout, Rect::new(0, 0, 40, 8));

    assert_eq!(newly, ["a", "b"]);
    assert!(has_visible(&root, "a"));
    assert!(has_visible(&root, "b"));
    assert!(!has_visible(&root, "c"));
    assert_eq!(observer.pending(), ["c", "d"]);
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.25);
    observer.observe_all(&root);

    // One of card c's four rows is inside: exactly the threshold.
    let newly = observer.update(&mut root, &layout, Rect::new(0, 0, 40, 9));

    assert!(newly.contains(&"c".to_string()));
}

#[test]
fn test_below_threshold_stays_pending() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.5);
    observer.observe_all(&root);

    // Card b shows one row of four: a quarter visible, under the half
    // required.
    let newly = observer.update(&mut root, &layout, Rect::new(0, 0, 40, 5));

    assert_eq!(newly, ["a"]);
    assert!(!has_visible(&root, "b"));
    assert_eq!(observer.pending(), ["b", "c", "d"]);
}

#[test]
fn test_zero_threshold_requires_overlap() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.0);
    observer.observe_all(&root);

    // Viewport scrolled past everything: no overlap, nothing fires.
    let newly = observer.update(&mut root, &layout, Rect::new(0, 100, 40, 8));
    assert!(newly.is_empty());

    // A single overlapping row is enough at threshold zero.
    let newly = observer.update(&mut root, &layout, Rect::new(0, 3, 40, 1));
    assert_eq!(newly, ["a"]);
}

#[test]
fn test_reveal_is_permanent() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.1);
    observer.observe_all(&root);

    observer.update(&mut root, &layout, Rect::new(0, 0, 40, 8));
    assert!(has_visible(&root, "a"));

    // Scrolling the card back out changes nothing.
    let newly = observer.update(&mut root, &layout, Rect::new(0, 100, 40, 8));
    assert!(newly.is_empty());
    assert!(has_visible(&root, "a"));
    assert!(observer.is_revealed("a"));
    assert!(!observer.pending().contains(&"a".to_string()));
}

#[test]
fn test_revealed_cards_stop_being_checked() {
    let mut root = page_tree();
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.1);
    observer.observe_all(&root);

    observer.update(&mut root, &layout, Rect::new(0, 0, 40, 8));
    let newly = observer.update(&mut root, &layout, Rect::new(0, 0, 40, 8));

    assert!(newly.is_empty());
}

#[test]
fn test_missing_layout_entry_stays_watched() {
    let mut root = page_tree().child(Element::col().id("ghost").class("reveal"));
    let layout = page_layout();
    let mut observer = RevealObserver::new(0.1);
    observer.observe_all(&root);

    // `ghost` has no rect yet; it must survive the pass unharmed.
    observer.update(&mut root, &layout, Rect::new(0, 0, 40, 16));

    assert_eq!(observer.pending(), ["ghost"]);
    assert!(!observer.is_revealed("ghost"));
}

// =============================================================================
// Degraded path
// =============================================================================

#[test]
fn test_reveal_all_fires_everything() {
    let mut root = page_tree();
    let mut observer = RevealObserver::new(0.1);
    observer.observe_all(&root);

    let revealed = observer.reveal_all(&mut root);

    assert_eq!(revealed, ["a", "b", "c", "d"]);
    assert!(observer.pending().is_empty());
    for id in ["a", "b", "c", "d"] {
        assert!(has_visible(&root, id));
        assert!(observer.is_revealed(id));
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_custom_classes() {
    let mut root = Element::col()
        .id("page")
        .child(Element::col().id("hero").class("lazy"));
    let layout = create_layout(&[
        ("page", Rect::new(0, 0, 40, 4)),
        ("hero", Rect::new(0, 0, 40, 4)),
    ]);
    let mut observer = RevealObserver::new(0.1)
        .marker_class("lazy")
        .visible_class("shown");

    observer.observe_all(&root);
    assert_eq!(observer.pending(), ["hero"]);

    observer.update(&mut root, &layout, Rect::new(0, 0, 40, 4));
    let hero = find_element(&root, "hero").unwrap();
    assert!(hero.has_class("shown"));
    assert!(!hero.has_class("visible"));
}

#[test]
fn test_threshold_is_clamped() {
    assert_eq!(RevealObserver::new(3.0).threshold(), 1.0);
    assert_eq!(RevealObserver::new(-1.0).threshold(), 0.0);
    assert_eq!(RevealObserver::new(0.5).threshold(), 0.5);
}
