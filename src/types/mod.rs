mod color;
mod edges;
mod enums;
mod style;
mod stylesheet;

pub use color::{Color, Rgb};
pub use edges::Edges;
pub use enums::{Direction, Size, TextStyle};
pub use style::Style;
pub use stylesheet::{Selector, Stylesheet};
