use std::fs::File;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use tuipage::{
    layout, Color, Content, Element, Event, FocusState, Key, LayoutResult, Rect, RevealObserver,
    Session, Style, Stylesheet,
};

const CARDS: u16 = 12;

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("reveal.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut session = Session::new()?;
    let mut focus = FocusState::new();
    let sheet = stylesheet();

    let mut root = ui();
    let mut observer = RevealObserver::new(0.25);
    observer.observe_all(&root);

    // `--all` exercises the degraded path: no viewport tracking, reveal
    // everything up front.
    if std::env::args().any(|arg| arg == "--all") {
        observer.reveal_all(&mut root);
    }

    let mut scroll_y: u16 = 0;
    let mut revealed: usize = 0;

    loop {
        let (width, height) = session.size()?;
        let computed = layout(&root, Rect::from_size(width, height));

        let content_height = computed.get("page").map(|r| r.height).unwrap_or(0);
        let max_scroll = content_height.saturating_sub(height);
        scroll_y = scroll_y.min(max_scroll);

        let viewport = Rect::new(0, scroll_y, width, height);
        revealed += observer.update(&mut root, &computed, viewport).len();

        draw(&mut session, &root, &computed, &sheet, viewport, revealed)?;

        let raw_events = session.poll(Some(Duration::from_millis(250)))?;
        for event in focus.process_events(&raw_events, &root, &computed) {
            match event {
                Event::Key { key, .. } => match key {
                    Key::Char('q') | Key::Escape => return Ok(()),
                    Key::Up => scroll_y = scroll_y.saturating_sub(1),
                    Key::Down => scroll_y = (scroll_y + 1).min(max_scroll),
                    Key::PageUp => scroll_y = scroll_y.saturating_sub(height / 2),
                    Key::PageDown => scroll_y = (scroll_y + height / 2).min(max_scroll),
                    Key::Home => scroll_y = 0,
                    Key::End => scroll_y = max_scroll,
                    _ => {}
                },
                Event::Scroll { delta_y, .. } => {
                    let next = scroll_y as i32 + delta_y as i32 * 2;
                    scroll_y = next.clamp(0, max_scroll as i32) as u16;
                }
                _ => {}
            }
        }
    }
}

fn ui() -> Element {
    let mut page = Element::col()
        .id("page")
        .child(Element::text("scroll down to reveal the cards").id("intro"));

    for n in 0..CARDS {
        page = page.child(card(n));
    }

    page
}

fn card(n: u16) -> Element {
    Element::col()
        .id(format!("card-{n}"))
        .class("reveal")
        .gap(0)
        .child(Element::text(""))
        .child(Element::text(format!("  ┌─ card {n} ─────────────┐")))
        .child(Element::text("  │ fades in when scrolled │"))
        .child(Element::text("  └────────────────────────┘"))
}

fn stylesheet() -> Stylesheet {
    Stylesheet::new()
        .id("intro", Style::new().bold())
        .class("reveal", Style::new().foreground(Color::oklch(0.35, 0.01, 250.0)))
        .class(
            "visible",
            Style::new().foreground(Color::oklch(0.85, 0.1, 150.0)),
        )
}

fn draw(
    session: &mut Session,
    root: &Element,
    computed: &LayoutResult,
    sheet: &Stylesheet,
    viewport: Rect,
    revealed: usize,
) -> std::io::Result<()> {
    session.clear()?;
    draw_element(session, root, computed, sheet, viewport, Style::new())?;

    let status = format!("revealed {revealed}/{CARDS}  (wheel or arrows scroll, q quits)");
    session.draw_text(
        0,
        viewport.height.saturating_sub(1),
        &status,
        &Style::new().dim(),
    )?;

    session.flush()
}

fn draw_element(
    session: &mut Session,
    element: &Element,
    computed: &LayoutResult,
    sheet: &Stylesheet,
    viewport: Rect,
    inherited: Style,
) -> std::io::Result<()> {
    // Reveal classes live on the card; its text rows inherit the result.
    let own = sheet.resolve(element);
    let style = if own == Style::default() { inherited } else { own };

    if let (Some(rect), Content::Text(text)) = (computed.get(&element.id), &element.content) {
        if !rect.intersection(&viewport).is_empty() && rect.y >= viewport.y {
            session.draw_text(rect.x, rect.y - viewport.y, text, &style)?;
        }
    }

    for child in element.content.children() {
        draw_element(session, child, computed, sheet, viewport, style)?;
    }

    Ok(())
}
