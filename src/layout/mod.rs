mod rect;
mod stack;

pub use rect::Rect;
pub use stack::{layout, LayoutResult};
