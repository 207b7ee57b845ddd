pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod hit;
pub mod layout;
pub mod menu;
pub mod reveal;
pub mod terminal;
pub mod text;
pub mod timer;
pub mod types;

pub use element::{find_element, find_element_mut, for_each_class_mut, query_class, Content, Element};
pub use error::MountError;
pub use event::{Event, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, FocusState};
pub use hit::{hit_test, hit_test_any, hit_test_focusable};
pub use layout::{layout, LayoutResult, Rect};
pub use menu::{InputMode, MenuEvent, PinMenu};
pub use reveal::RevealObserver;
pub use terminal::Session;
pub use timer::{TimerHandle, Timers};
pub use types::*;
