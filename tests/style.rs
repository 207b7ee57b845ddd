use tuipage::{Color, Element, Rgb, Selector, Style, Stylesheet};

fn toggle_element() -> Element {
    Element::text("[ pins ]")
        .id("toggle")
        .class("pin-link")
        .class("pin-toggle")
        .attr("aria-expanded", "false")
}

// =============================================================================
// Selector Matching
// =============================================================================

#[test]
fn test_selector_id() {
    let el = toggle_element();

    assert!(Selector::id("toggle").matches(&el));
    assert!(!Selector::id("other").matches(&el));
}

#[test]
fn test_selector_class() {
    let el = toggle_element();

    assert!(Selector::class("pin-link").matches(&el));
    assert!(Selector::class("pin-toggle").matches(&el));
    assert!(!Selector::class("expanded").matches(&el));
}

#[test]
fn test_selector_attr_presence() {
    let el = toggle_element();

    assert!(Selector::attr("aria-expanded").matches(&el));
    assert!(!Selector::attr("href").matches(&el));
}

#[test]
fn test_selector_attr_value() {
    let el = toggle_element();

    assert!(Selector::attr_eq("aria-expanded", "false").matches(&el));
    assert!(!Selector::attr_eq("aria-expanded", "true").matches(&el));
}

// =============================================================================
// Rule Resolution
// =============================================================================

#[test]
fn test_unmatched_resolves_to_default() {
    let sheet = Stylesheet::new().class("pin-link", Style::new().bold());
    let el = Element::text("plain").id("plain");

    assert_eq!(sheet.resolve(&el), Style::default());
}

#[test]
fn test_later_rules_override_colors() {
    let sheet = Stylesheet::new()
        .class("pin-link", Style::new().foreground(Color::rgb(100, 100, 100)))
        .class(
            "pin-toggle",
            Style::new().foreground(Color::rgb(255, 200, 0)),
        );
    let el = toggle_element();

    let resolved = sheet.resolve(&el);
    assert_eq!(resolved.foreground, Some(Color::rgb(255, 200, 0)));
}

#[test]
fn test_unset_properties_survive_overrides() {
    let sheet = Stylesheet::new()
        .class(
            "pin-link",
            Style::new().background(Color::rgb(30, 30, 30)).bold(),
        )
        .class(
            "pin-toggle",
            Style::new().foreground(Color::rgb(255, 200, 0)),
        );
    let el = toggle_element();

    let resolved = sheet.resolve(&el);
    assert_eq!(resolved.background, Some(Color::rgb(30, 30, 30)));
    assert_eq!(resolved.foreground, Some(Color::rgb(255, 200, 0)));
    assert!(resolved.text_style.bold);
}

#[test]
fn test_text_styles_accumulate() {
    let sheet = Stylesheet::new()
        .class("pin-link", Style::new().bold())
        .id("toggle", Style::new().underline());
    let el = toggle_element();

    let resolved = sheet.resolve(&el);
    assert!(resolved.text_style.bold);
    assert!(resolved.text_style.underline);
    assert!(!resolved.text_style.italic);
}

#[test]
fn test_sheet_tracks_rule_count() {
    let sheet = Stylesheet::new();
    assert!(sheet.is_empty());

    let sheet = sheet
        .class("pin-link", Style::new().bold())
        .id("toggle", Style::new().underline());
    assert_eq!(sheet.len(), 2);
    assert!(!sheet.is_empty());
}

// =============================================================================
// Widget State Contract
// =============================================================================

// Widgets flip classes and attributes; the stylesheet turns those flips
// into presentation. These two tests pin that contract down.

#[test]
fn test_attr_rule_follows_widget_state() {
    let sheet = Stylesheet::new().attr_eq("aria-expanded", "true", Style::new().underline());
    let mut el = toggle_element();

    assert!(!sheet.resolve(&el).text_style.underline);

    el.set_attr("aria-expanded", "true");
    assert!(sheet.resolve(&el).text_style.underline);
}

#[test]
fn test_class_rule_follows_reveal() {
    let hidden = Color::rgb(60, 60, 60);
    let shown = Color::rgb(220, 220, 220);
    let sheet = Stylesheet::new()
        .class("reveal", Style::new().foreground(hidden))
        .class("visible", Style::new().foreground(shown));
    let mut el = Element::text("card").id("card").class("reveal");

    assert_eq!(sheet.resolve(&el).foreground, Some(hidden));

    el.add_class("visible");
    assert_eq!(sheet.resolve(&el).foreground, Some(shown));
}

// =============================================================================
// Color Conversion
// =============================================================================

#[test]
fn test_rgb_passes_through() {
    assert_eq!(Color::rgb(12, 34, 56).to_rgb(), Rgb::new(12, 34, 56));
}

#[test]
fn test_oklch_extremes() {
    assert_eq!(Color::oklch(1.0, 0.0, 0.0).to_rgb(), Rgb::new(255, 255, 255));
    assert_eq!(Color::oklch(0.0, 0.0, 0.0).to_rgb(), Rgb::new(0, 0, 0));
}
