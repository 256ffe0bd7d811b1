//! Horizontal stacking geometry for slide panels.
//!
//! Open panels fan out from the right edge of the viewport. A fixed budget of
//! [`STACK_BUDGET`] pixels is shared between all visible "tabs": the newest
//! panel sits flush against the edge and older panels recede by an even share
//! of the budget. The spacing shrinks as more panels open, so the budget is
//! always fully subdivided.

/// Total pixel allowance shared by the visible tabs of stacked panels.
pub const STACK_BUDGET: f32 = 120.0;

/// Panel width as a fraction of the viewport width.
pub const PANEL_WIDTH_FRACTION: f32 = 0.40;

/// Panels beyond this count stack visually but no longer push page content.
pub const MAX_PUSH_PANELS: usize = 3;

/// Offset from the right viewport edge for the panel at `index` (0-based,
/// oldest first) when `total` panels are rendered.
///
/// # Examples
/// ```
/// use rpress::panels::stacking::{panel_offset, STACK_BUDGET};
///
/// assert_eq!(panel_offset(0, 1), 0.0);
/// assert_eq!(panel_offset(0, 2), STACK_BUDGET);
/// assert_eq!(panel_offset(1, 2), 0.0);
/// ```
pub fn panel_offset(index: usize, total: usize) -> f32 {
    if total <= 1 {
        return 0.0;
    }
    // Clamp a stale index (panel mid-exit) instead of underflowing.
    let index = index.min(total - 1);
    let gap = STACK_BUDGET / (total - 1) as f32;
    (total - index - 1) as f32 * gap
}

/// Width of a single panel for the given viewport width.
pub fn panel_width(viewport_width: f32) -> f32 {
    viewport_width * PANEL_WIDTH_FRACTION
}

/// Number of open panels that push the main content aside.
pub fn pushing_panels(open: usize) -> usize {
    open.min(MAX_PUSH_PANELS)
}

/// How far the main content shifts to make room for the open panels.
///
/// Zero when nothing is open, otherwise one panel width plus the stacking
/// budget regardless of how many panels are open.
pub fn content_shift(open: usize, viewport_width: f32) -> f32 {
    if pushing_panels(open) > 0 {
        panel_width(viewport_width) + STACK_BUDGET
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_or_no_panel_is_flush() {
        assert_eq!(panel_offset(0, 0), 0.0);
        assert_eq!(panel_offset(0, 1), 0.0);
    }

    #[test]
    fn test_newest_is_flush_and_offsets_strictly_decrease() {
        for total in 2..=12 {
            assert_eq!(panel_offset(total - 1, total), 0.0);
            assert!((panel_offset(0, total) - STACK_BUDGET).abs() < 1e-3);
            for index in 1..total {
                assert!(
                    panel_offset(index - 1, total) > panel_offset(index, total),
                    "offset must shrink toward newer panels (index {index}, total {total})"
                );
            }
        }
    }

    #[test]
    fn test_even_spacing() {
        assert_eq!(panel_offset(0, 3), 120.0);
        assert_eq!(panel_offset(1, 3), 60.0);
        assert_eq!(panel_offset(2, 3), 0.0);
        assert_eq!(panel_offset(1, 5), 90.0);
    }

    #[test]
    fn test_stale_index_is_clamped() {
        assert_eq!(panel_offset(7, 3), 0.0);
    }

    #[test]
    fn test_content_shift() {
        assert_eq!(content_shift(0, 1000.0), 0.0);
        assert_eq!(content_shift(1, 1000.0), 400.0 + STACK_BUDGET);
        assert_eq!(content_shift(5, 1000.0), content_shift(3, 1000.0));
        assert_eq!(pushing_panels(5), MAX_PUSH_PANELS);
    }
}
