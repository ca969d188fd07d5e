//! Screen regions of board elements, used for mouse hit testing and hover tracking.
//!
//! Rects are registered after each layout pass. Mouse moves are resolved to
//! an element here and turned into pointer leave/enter pairs for the
//! activation dispatcher.

use ratatui::layout::{Position, Rect};

use crate::activation::ElementId;

/// One element's clickable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    /// Screen rectangle
    pub rect: Rect,
    /// Element drawn in the rectangle
    pub element: ElementId,
}

/// Result of a hover update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    /// Element the pointer left, if any
    pub left: Option<ElementId>,
    /// Element the pointer entered, if any
    pub entered: Option<ElementId>,
}

impl HoverChange {
    /// Returns `true` when hover did not change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Registered hit areas plus the currently hovered element.
#[derive(Debug, Clone, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    hovered: Option<ElementId>,
}

impl HitAreaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            areas: Vec::new(),
            hovered: None,
        }
    }

    /// Replaces every area. Later areas win on overlap.
    ///
    /// If the hovered element is not among the new areas, hover is cleared
    /// and the element is returned so the caller can send it a pointer leave.
    pub fn replace(&mut self, areas: impl IntoIterator<Item = HitArea>) -> Option<ElementId> {
        self.areas = areas.into_iter().collect();
        match self.hovered {
            Some(id) if !self.contains(id) => self.hovered.take(),
            _ => None,
        }
    }

    /// Element at the given cell.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        let point = Position::new(column, row);
        self.areas
            .iter()
            .rev()
            .find(|area| area.rect.contains(point))
            .map(|area| area.element)
    }

    /// Moves the pointer to the given cell.
    pub fn update_hover(&mut self, column: u16, row: u16) -> HoverChange {
        let target = self.hit_test(column, row);
        if target == self.hovered {
            return HoverChange::default();
        }
        let left = self.hovered;
        self.hovered = target;
        HoverChange {
            left,
            entered: target,
        }
    }

    /// Forgets the hovered element and returns it.
    pub fn clear_hover(&mut self) -> Option<ElementId> {
        self.hovered.take()
    }

    /// Currently hovered element.
    #[must_use]
    pub const fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Returns `true` if `element` has a registered region.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.areas.iter().any(|area| area.element == element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(x: u16, element: u64) -> HitArea {
        HitArea {
            rect: Rect::new(x, 0, 10, 3),
            element: ElementId(element),
        }
    }

    fn registry() -> HitAreaRegistry {
        let mut registry = HitAreaRegistry::new();
        registry.replace([area(0, 1), area(10, 2)]);
        registry
    }

    #[test]
    fn test_hit_test() {
        let registry = registry();
        assert_eq!(registry.hit_test(0, 0), Some(ElementId(1)));
        assert_eq!(registry.hit_test(9, 2), Some(ElementId(1)));
        assert_eq!(registry.hit_test(10, 1), Some(ElementId(2)));
        assert_eq!(registry.hit_test(25, 1), None);
        assert_eq!(registry.hit_test(5, 3), None);
    }

    #[test]
    fn test_later_area_wins() {
        let mut registry = HitAreaRegistry::new();
        registry.replace([area(0, 1), area(5, 3)]);
        assert_eq!(registry.hit_test(6, 1), Some(ElementId(3)));
        assert_eq!(registry.hit_test(2, 1), Some(ElementId(1)));
    }

    #[test]
    fn test_hover_leave_then_enter() {
        let mut registry = registry();

        let change = registry.update_hover(1, 1);
        assert_eq!(change.left, None);
        assert_eq!(change.entered, Some(ElementId(1)));

        assert!(registry.update_hover(2, 1).is_empty());

        let change = registry.update_hover(12, 1);
        assert_eq!(change.left, Some(ElementId(1)));
        assert_eq!(change.entered, Some(ElementId(2)));

        let change = registry.update_hover(40, 20);
        assert_eq!(change.left, Some(ElementId(2)));
        assert_eq!(change.entered, None);
        assert_eq!(registry.hovered(), None);
    }

    #[test]
    fn test_replace_drops_vanished_hover() {
        let mut registry = registry();
        registry.update_hover(1, 1);

        let kept = [HitArea {
            rect: Rect::new(30, 0, 5, 3),
            element: ElementId(1),
        }];
        assert_eq!(registry.replace(kept), None);
        assert_eq!(registry.hovered(), Some(ElementId(1)));

        let gone = [HitArea {
            rect: Rect::new(0, 0, 10, 3),
            element: ElementId(9),
        }];
        assert_eq!(registry.replace(gone), Some(ElementId(1)));
        assert_eq!(registry.hovered(), None);
    }
}
