use std::fs::File;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};
use tuipage::{
    layout, Color, Content, Edges, Element, Event, FocusState, InputMode, Key, LayoutResult,
    MenuEvent, PinMenu, Rect, Selector, Session, Size, Style, Stylesheet,
};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("pin_menu.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    // `--touch` drives the menu with tap semantics instead of hover
    let mode = if std::env::args().any(|arg| arg == "--touch") {
        InputMode::Touch
    } else {
        InputMode::Mouse
    };

    let mut session = Session::new()?;
    let mut focus = FocusState::new();
    let sheet = stylesheet();

    let mut root = ui(mode);
    let Some(mut menu) = PinMenu::mount(&mut root, "pin-menu", mode) else {
        return Ok(());
    };

    let mut status = String::from("hover the pins (or tap with --touch)");

    loop {
        let (width, height) = session.size()?;
        let computed = layout(&root, Rect::from_size(width, height));

        draw(&mut session, &root, &computed, &sheet, &menu, &status)?;

        let now = Instant::now();
        let timeout = match menu.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => Duration::from_millis(250),
        };
        let raw_events = session.poll(Some(timeout))?;

        let events = focus.process_events(&raw_events, &root, &computed);
        let now = Instant::now();

        let mut outputs = Vec::new();
        if events.is_empty() {
            outputs.extend(menu.tick(&mut root, now));
        }
        for event in &events {
            if let Event::Key {
                key: Key::Char('q'),
                ..
            } = event
            {
                return Ok(());
            }
            outputs.extend(menu.handle_event(event, &mut root, &computed, now));
        }

        for output in outputs {
            match output {
                MenuEvent::Expanded => status = "expanded".to_string(),
                MenuEvent::Collapsed => status = "collapsed".to_string(),
                MenuEvent::Navigate { href, item, .. } => {
                    status = match href {
                        Some(href) => format!("navigate -> {href}"),
                        None => format!("navigate -> {item}"),
                    };
                }
            }
        }
    }
}

fn ui(mode: InputMode) -> Element {
    let title = match mode {
        InputMode::Mouse => "pin menu demo (mouse mode, q quits)",
        InputMode::Touch => "pin menu demo (touch mode, q quits)",
    };

    Element::col()
        .id("page")
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text(title).id("title"))
        .child(
            Element::col()
                .id("pin-menu")
                .class("pin-menu")
                .width(Size::Fixed(24))
                .child(
                    Element::text("[ pins ]")
                        .id("pin-toggle")
                        .class("pin-link")
                        .class("pin-toggle"),
                )
                .child(
                    Element::col()
                        .id("pin-items")
                        .class("pin-items")
                        .child(item("pin-home", "home", "/index"))
                        .child(item("pin-notes", "notes", "/notes"))
                        .child(item("pin-contact", "contact", "/contact")),
                ),
        )
        .child(Element::text("").id("status"))
}

fn item(id: &str, label: &str, href: &str) -> Element {
    Element::text(format!("  {label}"))
        .id(id)
        .class("pin-link")
        .attr("href", href)
}

fn stylesheet() -> Stylesheet {
    Stylesheet::new()
        .id("title", Style::new().bold())
        .class("pin-toggle", Style::new().foreground(Color::oklch(0.85, 0.12, 85.0)).bold())
        .class("pin-link", Style::new().foreground(Color::oklch(0.7, 0.05, 250.0)))
        .rule(
            Selector::attr_eq("aria-expanded", "true"),
            Style::new().underline(),
        )
        .id("status", Style::new().dim())
}

fn draw(
    session: &mut Session,
    root: &Element,
    computed: &LayoutResult,
    sheet: &Stylesheet,
    menu: &PinMenu,
    status: &str,
) -> std::io::Result<()> {
    session.clear()?;
    draw_element(session, root, computed, sheet, menu)?;

    if let Some(rect) = computed.get("status") {
        session.draw_text(rect.x, rect.y, status, &Style::new().dim())?;
    }

    session.flush()
}

fn draw_element(
    session: &mut Session,
    element: &Element,
    computed: &LayoutResult,
    sheet: &Stylesheet,
    menu: &PinMenu,
) -> std::io::Result<()> {
    // Collapsed menus show only the toggle row
    if !menu.is_expanded() && element.id == menu.wrapper_id() {
        return Ok(());
    }

    if let (Some(rect), Content::Text(text)) = (computed.get(&element.id), &element.content) {
        let mut style = sheet.resolve(element);
        if swept(menu, &element.id) {
            style = style.bold().underline();
        }
        session.draw_text(rect.x, rect.y, text, &style)?;
    }

    for child in element.content.children() {
        draw_element(session, child, computed, sheet, menu)?;
    }

    Ok(())
}

fn swept(menu: &PinMenu, id: &str) -> bool {
    menu.sweep()
        .and_then(|index| menu.item_ids().get(index))
        .is_some_and(|item| item == id)
}
