//! Expandable pin menu.
//!
//! A [`PinMenu`] binds to a container element holding a toggle button and a
//! list of pin links. It owns the expand/collapse state machine and mirrors
//! every state change back into the tree: the `expanded` class on the
//! container, `aria-expanded` on the toggle, focusability of the items, and
//! the active-pin attribute on the items wrapper. Rendering picks all of
//! that up through stylesheet rules; the widget itself never styles.
//!
//! Input arrives as page [`Event`]s plus an explicit `now`, and outputs come
//! back as [`MenuEvent`]s. Hover expansion runs on short debounce timers so
//! a pointer skimming across the menu doesn't flap it open and shut; tap
//! input instead toggles directly and uses a brief just-expanded window to
//! keep the opening tap from also activating a link.

use std::time::{Duration, Instant};

use crate::element::{find_element, find_element_mut, query_class, Element};
use crate::error::MountError;
use crate::event::{Event, Key, MouseButton};
use crate::layout::{LayoutResult, Rect};
use crate::timer::{TimerHandle, Timers};

pub const TOGGLE_CLASS: &str = "pin-toggle";
pub const ITEM_CLASS: &str = "pin-link";
pub const ITEMS_CLASS: &str = "pin-items";
pub const EXPANDED_CLASS: &str = "expanded";
pub const ARIA_EXPANDED_ATTR: &str = "aria-expanded";
pub const ACTIVE_PIN_ATTR: &str = "data-active-pin";
pub const HREF_ATTR: &str = "href";

/// Hover must rest this long before the menu opens.
const EXPAND_DELAY: Duration = Duration::from_millis(50);
/// The pointer must stay away this long before the menu closes.
const COLLAPSE_DELAY: Duration = Duration::from_millis(100);
/// After a tap expands the menu, link activation stays suppressed this long.
const JUST_EXPANDED_WINDOW: Duration = Duration::from_millis(300);

/// Input capability the menu is driven by. Fixed at mount; a page knows
/// what kind of input it serves and the two schemes never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Pointer with hover reporting. Expansion follows hover, debounced.
    #[default]
    Mouse,
    /// Tap-only input. First tap opens, a later tap follows a link.
    Touch,
}

impl InputMode {
    pub fn is_touch(self) -> bool {
        matches!(self, InputMode::Touch)
    }
}

/// What the embedding application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Expanded,
    Collapsed,
    /// A pin link was activated and navigation should proceed.
    Navigate {
        index: usize,
        item: String,
        href: Option<String>,
    },
}

/// Deferred state changes carried by the timer wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Expand,
    Collapse,
    ClearGuard,
}

/// Expand/collapse state machine for one pin menu.
#[derive(Debug)]
pub struct PinMenu {
    container: String,
    toggle: String,
    items: Vec<String>,
    wrapper: String,
    mode: InputMode,

    expanded: bool,
    just_expanded: bool,
    sweep: Option<usize>,

    timers: Timers<Transition>,
    expand_timer: Option<TimerHandle>,
    collapse_timer: Option<TimerHandle>,
    guard_timer: Option<TimerHandle>,

    pointer_inside: bool,
    swallow_toggle_click: bool,
}

impl PinMenu {
    /// Bind to the container with the given ID. On failure this logs a
    /// warning and returns `None`; the page simply keeps working without
    /// menu behavior.
    pub fn mount(root: &mut Element, container_id: &str, mode: InputMode) -> Option<Self> {
        match Self::try_mount(root, container_id, mode) {
            Ok(menu) => Some(menu),
            Err(err) => {
                log::warn!("[pin-menu] setup skipped: {err}");
                None
            }
        }
    }

    /// Bind to the container with the given ID, reporting what is missing.
    ///
    /// The toggle is the first `pin-toggle` descendant. Items are the
    /// `pin-link` descendants that are not themselves the toggle, in tree
    /// order. Sweep state lands on the first `pin-items` descendant, or on
    /// the container itself when the tree has no dedicated wrapper.
    pub fn try_mount(
        root: &mut Element,
        container_id: &str,
        mode: InputMode,
    ) -> Result<Self, MountError> {
        let container = find_element(root, container_id).ok_or_else(|| {
            MountError::MissingContainer {
                id: container_id.to_string(),
            }
        })?;

        let toggle = query_class(container, TOGGLE_CLASS)
            .into_iter()
            .next()
            .ok_or_else(|| MountError::MissingToggle {
                container: container_id.to_string(),
            })?;

        let items: Vec<String> = query_class(container, ITEM_CLASS)
            .into_iter()
            .filter(|id| {
                find_element(container, id).is_some_and(|el| !el.has_class(TOGGLE_CLASS))
            })
            .collect();

        let wrapper = query_class(container, ITEMS_CLASS)
            .into_iter()
            .next()
            .unwrap_or_else(|| container_id.to_string());

        // Hit testing only routes clicks to elements flagged clickable.
        if let Some(el) = find_element_mut(root, &toggle) {
            el.clickable = true;
            el.set_attr(ARIA_EXPANDED_ATTR, "false");
        }
        for id in &items {
            if let Some(el) = find_element_mut(root, id) {
                el.clickable = true;
            }
        }

        log::debug!(
            "[pin-menu] mounted `{container_id}` ({mode:?}, {} items)",
            items.len()
        );

        Ok(Self {
            container: container_id.to_string(),
            toggle,
            items,
            wrapper,
            mode,
            expanded: false,
            just_expanded: false,
            sweep: None,
            timers: Timers::new(),
            expand_timer: None,
            collapse_timer: None,
            guard_timer: None,
            pointer_inside: false,
            swallow_toggle_click: false,
        })
    }

    pub fn container_id(&self) -> &str {
        &self.container
    }

    pub fn toggle_id(&self) -> &str {
        &self.toggle
    }

    pub fn item_ids(&self) -> &[String] {
        &self.items
    }

    pub fn wrapper_id(&self) -> &str {
        &self.wrapper
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True while the just-expanded window is open and link activation is
    /// suppressed.
    pub fn just_expanded(&self) -> bool {
        self.just_expanded
    }

    /// Index of the item currently carrying the sweep highlight.
    pub fn sweep(&self) -> Option<usize> {
        self.sweep
    }

    /// When the next pending transition is due, for event loop timeouts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fire every transition due at or before `now`.
    pub fn tick(&mut self, root: &mut Element, now: Instant) -> Vec<MenuEvent> {
        let mut out = Vec::new();
        for transition in self.timers.poll(now) {
            match transition {
                Transition::Expand => {
                    self.expand_timer = None;
                    self.apply_expand(root, &mut out);
                }
                Transition::Collapse => {
                    self.collapse_timer = None;
                    self.apply_collapse(root, &mut out);
                }
                Transition::ClearGuard => {
                    self.guard_timer = None;
                    self.just_expanded = false;
                }
            }
        }
        out
    }

    /// Feed one page event through the state machine. Transitions due at
    /// `now` are applied first, so a stale event cannot observe an expired
    /// timer as still pending.
    pub fn handle_event(
        &mut self,
        event: &Event,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
    ) -> Vec<MenuEvent> {
        let mut out = self.tick(root, now);

        match event {
            Event::MouseMove { x, y } if !self.mode.is_touch() => {
                self.on_mouse_move(*x, *y, root, layout, now);
            }
            Event::Press {
                target,
                x,
                y,
                button: MouseButton::Left,
            } if self.mode.is_touch() => {
                self.on_touch_press(target.as_deref(), *x, *y, root, layout, now, &mut out);
            }
            Event::Click {
                target: Some(target),
                button: MouseButton::Left,
                ..
            } => {
                self.on_click(target, root, &mut out);
            }
            Event::Key { target, key, .. } => {
                self.on_key(target.as_deref(), *key, root, &mut out);
            }
            _ => {}
        }

        out
    }

    /// Expand now, skipping the hover debounce. No-op when already open.
    pub fn expand(&mut self, root: &mut Element) -> Vec<MenuEvent> {
        let mut out = Vec::new();
        self.apply_expand(root, &mut out);
        out
    }

    /// Collapse now. No-op when already closed.
    pub fn collapse(&mut self, root: &mut Element) -> Vec<MenuEvent> {
        let mut out = Vec::new();
        self.apply_collapse(root, &mut out);
        out
    }

    fn on_mouse_move(
        &mut self,
        x: u16,
        y: u16,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
    ) {
        let inside = self
            .container_rect(layout)
            .is_some_and(|rect| rect.contains(x, y));

        if inside && !self.pointer_inside {
            self.pointer_inside = true;
            self.schedule_expand(now);
        } else if !inside && self.pointer_inside {
            self.pointer_inside = false;
            self.schedule_collapse(now);
        }

        if self.expanded && inside {
            let over = self.item_at(layout, x, y);
            self.set_sweep(root, over);
        } else if !inside && self.sweep.is_some() {
            // Pointer exit clears the highlight; collapse alone does not.
            self.set_sweep(root, None);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_touch_press(
        &mut self,
        target: Option<&str>,
        x: u16,
        y: u16,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
        out: &mut Vec<MenuEvent>,
    ) {
        if target == Some(self.toggle.as_str()) {
            // The release pairs with this press; it must not toggle again.
            self.swallow_toggle_click = true;
            if self.expanded {
                self.apply_collapse(root, out);
            } else {
                self.apply_expand(root, out);
                self.arm_guard(now);
            }
            return;
        }

        if let Some(index) = target.and_then(|id| self.item_index(id)) {
            if self.expanded {
                self.set_sweep(root, Some(index));
            } else {
                self.apply_expand(root, out);
                self.set_sweep(root, Some(index));
                self.arm_guard(now);
            }
            return;
        }

        let inside = self
            .container_rect(layout)
            .is_some_and(|rect| rect.contains(x, y));
        if !inside && self.expanded {
            log::debug!("[pin-menu] touch outside `{}`", self.container);
            self.apply_collapse(root, out);
        }
    }

    fn on_click(&mut self, target: &str, root: &mut Element, out: &mut Vec<MenuEvent>) {
        if target == self.toggle {
            if self.mode.is_touch() {
                if std::mem::take(&mut self.swallow_toggle_click) {
                    return;
                }
                if self.just_expanded {
                    log::trace!("[pin-menu] toggle click within just-expanded window");
                    return;
                }
            }
            self.toggle_now(root, out);
            return;
        }

        if let Some(index) = self.item_index(target) {
            if self.mode.is_touch() {
                if self.just_expanded {
                    log::debug!("[pin-menu] navigation suppressed (just expanded)");
                    return;
                }
                if !self.expanded {
                    self.apply_expand(root, out);
                    return;
                }
            }
            self.navigate(index, root, out);
        }
    }

    fn on_key(&mut self, target: Option<&str>, key: Key, root: &mut Element, out: &mut Vec<MenuEvent>) {
        match key {
            Key::Escape => {
                if self.expanded {
                    log::debug!("[pin-menu] escape collapses `{}`", self.container);
                    self.apply_collapse(root, out);
                }
            }
            Key::Enter | Key::Char(' ') if target == Some(self.toggle.as_str()) => {
                self.toggle_now(root, out);
            }
            Key::Enter => {
                if self.expanded {
                    if let Some(index) = target.and_then(|id| self.item_index(id)) {
                        self.navigate(index, root, out);
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_now(&mut self, root: &mut Element, out: &mut Vec<MenuEvent>) {
        if self.expanded {
            self.apply_collapse(root, out);
        } else {
            self.apply_expand(root, out);
        }
    }

    fn apply_expand(&mut self, root: &mut Element, out: &mut Vec<MenuEvent>) {
        if self.expanded {
            return;
        }
        self.expanded = true;

        if let Some(container) = find_element_mut(root, &self.container) {
            container.add_class(EXPANDED_CLASS);
        }
        if let Some(toggle) = find_element_mut(root, &self.toggle) {
            toggle.set_attr(ARIA_EXPANDED_ATTR, "true");
        }
        for id in &self.items {
            if let Some(item) = find_element_mut(root, id) {
                item.focusable = true;
            }
        }

        log::debug!("[pin-menu] `{}` expanded", self.container);
        out.push(MenuEvent::Expanded);
    }

    fn apply_collapse(&mut self, root: &mut Element, out: &mut Vec<MenuEvent>) {
        if !self.expanded {
            return;
        }
        self.expanded = false;

        if let Some(container) = find_element_mut(root, &self.container) {
            container.remove_class(EXPANDED_CLASS);
        }
        if let Some(toggle) = find_element_mut(root, &self.toggle) {
            toggle.set_attr(ARIA_EXPANDED_ATTR, "false");
        }
        for id in &self.items {
            if let Some(item) = find_element_mut(root, id) {
                item.focusable = false;
            }
        }

        log::debug!("[pin-menu] `{}` collapsed", self.container);
        out.push(MenuEvent::Collapsed);
    }

    fn schedule_expand(&mut self, now: Instant) {
        if let Some(handle) = self.collapse_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.expand_timer.take() {
            self.timers.cancel(handle);
        }
        self.expand_timer = Some(self.timers.schedule(now, EXPAND_DELAY, Transition::Expand));
        log::trace!("[pin-menu] expand in {EXPAND_DELAY:?}");
    }

    fn schedule_collapse(&mut self, now: Instant) {
        if let Some(handle) = self.expand_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.collapse_timer.take() {
            self.timers.cancel(handle);
        }
        self.collapse_timer = Some(self
            .timers
            .schedule(now, COLLAPSE_DELAY, Transition::Collapse));
        log::trace!("[pin-menu] collapse in {COLLAPSE_DELAY:?}");
    }

    fn arm_guard(&mut self, now: Instant) {
        self.just_expanded = true;
        if let Some(handle) = self.guard_timer.take() {
            self.timers.cancel(handle);
        }
        self.guard_timer = Some(self
            .timers
            .schedule(now, JUST_EXPANDED_WINDOW, Transition::ClearGuard));
    }

    fn navigate(&mut self, index: usize, root: &Element, out: &mut Vec<MenuEvent>) {
        let item = self.items[index].clone();
        let href = find_element(root, &item)
            .and_then(|el| el.get_attr(HREF_ATTR))
            .map(str::to_string);
        log::debug!("[pin-menu] navigate to {item} ({href:?})");
        out.push(MenuEvent::Navigate { index, item, href });
    }

    fn set_sweep(&mut self, root: &mut Element, index: Option<usize>) {
        if self.sweep == index {
            return;
        }
        self.sweep = index;

        if let Some(wrapper) = find_element_mut(root, &self.wrapper) {
            match index {
                Some(i) => wrapper.set_attr(ACTIVE_PIN_ATTR, i.to_string()),
                None => {
                    wrapper.remove_attr(ACTIVE_PIN_ATTR);
                }
            }
        }
        log::trace!("[pin-menu] sweep {:?}", index);
    }

    fn item_index(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item == id)
    }

    fn item_at(&self, layout: &LayoutResult, x: u16, y: u16) -> Option<usize> {
        self.items
            .iter()
            .position(|id| layout.get(id).is_some_and(|rect| rect.contains(x, y)))
    }

    fn container_rect(&self, layout: &LayoutResult) -> Option<Rect> {
        layout.get(&self.container).copied()
    }
}
