//! Viewport visibility: overlap predicate and transition classification.

#[cfg(target_arch = "wasm32")]
use web_sys::Element;

/// An element overlaps the vertical viewport iff its top edge is above the
/// viewport's bottom edge and its bottom edge is below the viewport's top.
pub fn overlaps_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

/// What happened to an element's visibility between two checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Hidden on the previous check, visible now.
    Appeared,
    /// Visible on the previous check, hidden now.
    Disappeared,
    /// No transition.
    Unchanged,
}

pub fn visibility_change(was_visible: bool, is_visible: bool) -> VisibilityChange {
    match (was_visible, is_visible) {
        (false, true) => VisibilityChange::Appeared,
        (true, false) => VisibilityChange::Disappeared,
        _ => VisibilityChange::Unchanged,
    }
}

/// Check the element's bounding rect against the current window height.
/// An unreadable window height counts as not visible.
#[cfg(target_arch = "wasm32")]
pub fn is_element_in_viewport(element: &Element) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(viewport_height) = window.inner_height().ok().and_then(|v| v.as_f64()) else {
        return false;
    };
    let rect = element.get_bounding_client_rect();
    overlaps_viewport(rect.top(), rect.bottom(), viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_fully_inside_viewport_overlaps() {
        assert!(overlaps_viewport(100.0, 400.0, 800.0));
    }

    #[test]
    fn element_partially_above_viewport_overlaps() {
        assert!(overlaps_viewport(-150.0, 50.0, 800.0));
    }

    #[test]
    fn element_partially_below_viewport_overlaps() {
        assert!(overlaps_viewport(750.0, 1100.0, 800.0));
    }

    #[test]
    fn element_taller_than_viewport_overlaps() {
        assert!(overlaps_viewport(-200.0, 1200.0, 800.0));
    }

    #[test]
    fn element_entirely_above_viewport_does_not_overlap() {
        assert!(!overlaps_viewport(-500.0, -100.0, 800.0));
    }

    #[test]
    fn element_entirely_below_viewport_does_not_overlap() {
        assert!(!overlaps_viewport(900.0, 1300.0, 800.0));
    }

    #[test]
    fn element_touching_viewport_bottom_edge_does_not_overlap() {
        // top == viewport height means no overlap yet
        assert!(!overlaps_viewport(800.0, 1200.0, 800.0));
    }

    #[test]
    fn element_touching_viewport_top_edge_does_not_overlap() {
        // bottom == 0 means the element has fully scrolled past
        assert!(!overlaps_viewport(-400.0, 0.0, 800.0));
    }

    #[test]
    fn transitions_are_classified_by_edge() {
        assert_eq!(visibility_change(false, true), VisibilityChange::Appeared);
        assert_eq!(visibility_change(true, false), VisibilityChange::Disappeared);
        assert_eq!(visibility_change(true, true), VisibilityChange::Unchanged);
        assert_eq!(visibility_change(false, false), VisibilityChange::Unchanged);
    }
}
