//! Scroll-triggered reveals.
//!
//! [`RevealObserver`] watches marked elements and permanently tags each one
//! with a visible class the first time enough of it scrolls into the
//! viewport. A stylesheet rule keyed on that class then switches the
//! element from its hidden presentation to its revealed one, so the
//! one-time transition is pure data: the observer never touches styling.

use std::collections::HashSet;

use crate::element::{find_element_mut, query_class, Element};
use crate::layout::{LayoutResult, Rect};

pub const DEFAULT_MARKER_CLASS: &str = "reveal";
pub const DEFAULT_VISIBLE_CLASS: &str = "visible";

/// Watches marked elements and reveals each at most once.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f32,
    marker_class: String,
    visible_class: String,
    pending: Vec<String>,
    revealed: HashSet<String>,
}

impl RevealObserver {
    /// Create an observer that reveals an element once at least `threshold`
    /// of its area is inside the viewport. The threshold is clamped to
    /// `0.0..=1.0`; zero means any overlap at all.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            visible_class: DEFAULT_VISIBLE_CLASS.to_string(),
            pending: Vec::new(),
            revealed: HashSet::new(),
        }
    }

    /// Use a different class to select which elements are watched.
    pub fn marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Use a different class to tag revealed elements.
    pub fn visible_class(mut self, class: impl Into<String>) -> Self {
        self.visible_class = class.into();
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start watching every element in the tree that carries the marker
    /// class. Elements already watched or already revealed are skipped, so
    /// calling this again after a tree change is safe.
    pub fn observe_all(&mut self, root: &Element) {
        for id in query_class(root, &self.marker_class) {
            if !self.revealed.contains(&id) && !self.pending.iter().any(|p| *p == id) {
                self.pending.push(id);
            }
        }
        log::debug!("[reveal] watching {} elements", self.pending.len());
    }

    /// IDs still waiting to come into view.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Check every watched element against the viewport and reveal those
    /// that cross the threshold. Returns the IDs revealed by this call.
    ///
    /// Revealed elements stop being watched; scrolling them back out does
    /// not undo anything. Elements missing from the layout stay watched.
    pub fn update(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        viewport: Rect,
    ) -> Vec<String> {
        let mut newly = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for id in std::mem::take(&mut self.pending) {
            let Some(rect) = layout.get(&id) else {
                still_pending.push(id);
                continue;
            };

            let fraction = rect.visible_fraction(&viewport);
            let crossed = if self.threshold == 0.0 {
                fraction > 0.0
            } else {
                fraction >= self.threshold
            };

            if crossed {
                self.mark_visible(root, &id);
                newly.push(id);
            } else {
                still_pending.push(id);
            }
        }

        self.pending = still_pending;
        newly
    }

    /// Reveal every watched element immediately, regardless of visibility.
    /// This is the degraded path for hosts that cannot report a viewport.
    pub fn reveal_all(&mut self, root: &mut Element) -> Vec<String> {
        let pending = std::mem::take(&mut self.pending);
        for id in &pending {
            self.mark_visible(root, id);
        }
        pending
    }

    fn mark_visible(&mut self, root: &mut Element, id: &str) {
        if let Some(element) = find_element_mut(root, id) {
            element.add_class(&self.visible_class);
        }
        self.revealed.insert(id.to_string());
        log::debug!("[reveal] {id} -> {}", self.visible_class);
    }
}
