use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Size};

/// Maps element IDs to their computed rectangles.
pub type LayoutResult = HashMap<String, Rect>;

/// Compute rectangles for the whole tree within the available space.
///
/// Children stack along their parent's direction and may run past the
/// available rect; callers that render clip against their viewport instead.
pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(root, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    let (intrinsic_w, intrinsic_h) = intrinsic_size(element);

    let width = match element.width {
        Size::Fixed(w) => w,
        Size::Fill => available.width,
        Size::Auto => intrinsic_w,
    };
    let height = match element.height {
        Size::Fixed(h) => h,
        Size::Fill => available.height,
        Size::Auto => intrinsic_h,
    };

    let rect = Rect::new(available.x, available.y, width, height);
    result.insert(element.id.clone(), rect);

    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };
    if children.is_empty() {
        return;
    }

    let inner = rect.shrink(
        element.padding.top,
        element.padding.right,
        element.padding.bottom,
        element.padding.left,
    );
    let is_row = element.direction == Direction::Row;
    let main_total = if is_row { inner.width } else { inner.height };
    let gap_total = element.gap * (children.len() as u16 - 1);

    // First pass: space claimed by fixed and auto children; fills share the rest.
    let mut claimed = gap_total;
    let mut fill_count: u16 = 0;
    for child in children {
        match main_size(child, is_row) {
            Size::Fixed(n) => claimed += n,
            Size::Auto => claimed += intrinsic_main(child, is_row),
            Size::Fill => fill_count += 1,
        }
    }
    let fill_each = if fill_count > 0 {
        main_total.saturating_sub(claimed) / fill_count
    } else {
        0
    };

    // Second pass: place each child in its slot and recurse.
    let mut cursor = if is_row { inner.x } else { inner.y };
    for child in children {
        let extent = match main_size(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => intrinsic_main(child, is_row),
            Size::Fill => fill_each,
        };

        let slot = if is_row {
            Rect::new(cursor, inner.y, extent, inner.height)
        } else {
            Rect::new(inner.x, cursor, inner.width, extent)
        };
        layout_element(child, slot, result);

        cursor += extent + element.gap;
    }
}

fn main_size(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn intrinsic_main(element: &Element, is_row: bool) -> u16 {
    let (w, h) = intrinsic_size(element);
    if is_row {
        w
    } else {
        h
    }
}

/// Natural size of an element's content plus padding. Fill children count
/// as zero here since they only claim leftover space.
fn intrinsic_size(element: &Element) -> (u16, u16) {
    let (content_w, content_h) = match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => (display_width(text) as u16, 1),
        Content::Children(children) => {
            let mut w: u16 = 0;
            let mut h: u16 = 0;
            for child in children {
                let (cw, ch) = outer_size(child);
                if element.direction == Direction::Row {
                    w += cw;
                    h = h.max(ch);
                } else {
                    h += ch;
                    w = w.max(cw);
                }
            }
            if !children.is_empty() {
                let gap_total = element.gap * (children.len() as u16 - 1);
                if element.direction == Direction::Row {
                    w += gap_total;
                } else {
                    h += gap_total;
                }
            }
            (w, h)
        }
    };

    (
        content_w + element.padding.horizontal_total(),
        content_h + element.padding.vertical_total(),
    )
}

fn outer_size(element: &Element) -> (u16, u16) {
    let (intrinsic_w, intrinsic_h) = intrinsic_size(element);
    let w = match element.width {
        Size::Fixed(n) => n,
        Size::Auto => intrinsic_w,
        Size::Fill => 0,
    };
    let h = match element.height {
        Size::Fixed(n) => n,
        Size::Auto => intrinsic_h,
        Size::Fill => 0,
    };
    (w, h)
}
