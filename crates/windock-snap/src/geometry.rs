//! Pure edge-snapping arithmetic.

use windock_common::Rect;

/// Snap parameters applied to pairs of rectangles. Stateless; every
/// method is a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SnapGeometry {
    pub threshold: f64,
    pub offset: f64,
}

impl SnapGeometry {
    pub fn new(threshold: f64, offset: f64) -> Self {
        Self { threshold, offset }
    }

    /// Whether `r1` and `r2` overlap on the vertical axis, making
    /// their left/right edges candidates for snapping.
    pub fn horizontally_aligned(r1: &Rect, r2: &Rect) -> bool {
        (r1.y >= r2.y && r1.y <= r2.bottom())
            || (r1.bottom() >= r2.y && r1.bottom() <= r2.bottom())
            || (r1.y <= r2.y && r1.bottom() >= r2.bottom())
    }

    /// Whether `r1` and `r2` overlap on the horizontal axis, making
    /// their top/bottom edges candidates for snapping.
    pub fn vertically_aligned(r1: &Rect, r2: &Rect) -> bool {
        (r1.x >= r2.x && r1.x <= r2.right())
            || (r1.right() >= r2.x && r1.right() <= r2.right())
            || (r1.x <= r2.x && r1.right() >= r2.right())
    }

    /// Compute where `r1` (the dragged rect) would land if it snapped
    /// against `r2`. `None` when no left/right edge pair is within
    /// the threshold: top/bottom alignment alone never snaps, it only
    /// rides along with a horizontal match. The returned rect keeps
    /// `r1`'s size.
    ///
    /// The vertical tests use half the offset, floored. That matches
    /// the observed behavior this module reproduces; do not "fix" the
    /// asymmetry without revisiting the callers' expectations.
    pub fn snap_bounds(&self, r1: &Rect, r2: &Rect) -> Option<Rect> {
        let mut left_to_right = false;
        let mut left_to_left = false;
        let mut right_to_left = false;
        let mut right_to_right = false;
        if Self::horizontally_aligned(r1, r2) {
            left_to_right = (r1.x - (r2.right() - self.offset)).abs() < self.threshold;
            left_to_left = (r1.x - r2.x).abs() < self.threshold;
            right_to_left = (r1.right() - self.offset - r2.x).abs() < self.threshold;
            right_to_right = (r1.right() - r2.right()).abs() < self.threshold;
        }

        let half_offset = (self.offset / 2.0).floor();
        let mut top_to_bottom = false;
        let mut top_to_top = false;
        let mut bottom_to_top = false;
        let mut bottom_to_bottom = false;
        if Self::vertically_aligned(r1, r2) {
            top_to_bottom = (r1.y - (r2.bottom() - half_offset)).abs() < self.threshold;
            top_to_top = (r1.y - r2.y).abs() < self.threshold;
            bottom_to_top = (r1.bottom() - half_offset - r2.y).abs() < self.threshold;
            bottom_to_bottom = (r1.bottom() - r2.bottom()).abs() < self.threshold;
        }

        if !left_to_right && !left_to_left && !right_to_left && !right_to_right {
            return None;
        }

        // Later assignments win: r1's right-edge tests override its
        // left-edge tests when both match.
        let mut x = r1.x;
        if left_to_right {
            x = r2.right() - self.offset;
        }
        if left_to_left {
            x = r2.x;
        }
        if right_to_left {
            x = r2.x - r1.width + self.offset;
        }
        if right_to_right {
            x = r2.right() - r1.width;
        }

        let mut y = r1.y;
        if top_to_bottom {
            y = r2.bottom() - half_offset;
        }
        if top_to_top {
            y = r2.y;
        }
        if bottom_to_top {
            y = r2.y - r1.height + half_offset;
        }
        if bottom_to_bottom {
            y = r2.bottom() - r1.height;
        }

        Some(Rect::new(x, y, r1.width, r1.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(threshold: f64, offset: f64) -> SnapGeometry {
        SnapGeometry::new(threshold, offset)
    }

    #[test]
    fn left_to_right_snap_is_exact() {
        let g = geo(20.0, 15.0);
        let r1 = Rect::new(100.0, 0.0, 50.0, 50.0);
        let r2 = Rect::new(20.0, 0.0, 80.0, 50.0);
        // r1.x = 100, r2.right - offset = 85, distance 15 < 20.
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.x, r2.right() - g.offset);
        assert_eq!(snapped.x, 85.0);
        assert_eq!(snapped.width, r1.width);
        assert_eq!(snapped.height, r1.height);
    }

    #[test]
    fn right_to_left_snap_leaves_the_offset() {
        let g = geo(20.0, 15.0);
        let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
        let r2 = Rect::new(52.0, 0.0, 50.0, 50.0);
        // |r1.right - offset - r2.x| = |50 - 15 - 52| = 17 < 20.
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.x, 17.0);
        // Snapped right edge minus the offset sits exactly on r2's
        // left edge.
        assert_eq!(snapped.right() - g.offset, r2.x);
        assert_eq!(snapped.y, 0.0);
    }

    #[test]
    fn vertical_only_alignment_does_not_snap() {
        let g = geo(15.0, 15.0);
        let r1 = Rect::new(0.0, 50.0, 50.0, 50.0);
        let r2 = Rect::new(200.0, 100.0, 50.0, 50.0);
        assert!(g.snap_bounds(&r1, &r2).is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let g = geo(20.0, 15.0);
        let r2 = Rect::new(0.0, 0.0, 50.0, 50.0);
        // left-to-right distance: |x - (50 - 15)|.
        let just_inside = Rect::new(54.9, 0.0, 50.0, 50.0);
        assert!(g.snap_bounds(&just_inside, &r2).is_some());
        // Distance exactly 20: no snap.
        let at_threshold = Rect::new(55.0, 0.0, 50.0, 50.0);
        assert!(g.snap_bounds(&at_threshold, &r2).is_none());
    }

    #[test]
    fn no_alignment_no_snap() {
        let g = geo(20.0, 15.0);
        // Within threshold horizontally but no vertical overlap.
        let r1 = Rect::new(52.0, 200.0, 50.0, 50.0);
        let r2 = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(g.snap_bounds(&r1, &r2).is_none());
    }

    #[test]
    fn top_snap_rides_along_with_horizontal_snap() {
        let g = geo(20.0, 15.0);
        let r1 = Rect::new(100.0, 8.0, 50.0, 50.0);
        let r2 = Rect::new(20.0, 0.0, 80.0, 50.0);
        // Horizontal: left-to-right matches. Vertical: top-to-top
        // (|8 - 0| < 20) pulls y flush.
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.x, 85.0);
        assert_eq!(snapped.y, 0.0);
    }

    #[test]
    fn vertical_tests_use_half_offset_floored() {
        let g = geo(20.0, 15.0);
        // floor(15 / 2) = 7.
        let r1 = Rect::new(100.0, 95.0, 50.0, 50.0);
        let r2 = Rect::new(20.0, 0.0, 80.0, 100.0);
        // top-to-bottom target: r2.bottom - 7 = 93, |95 - 93| = 2.
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.y, 93.0);
    }

    #[test]
    fn right_edge_tests_override_left_edge_tests() {
        // A narrow r2 inside the threshold of both of r1's edges: the
        // right-edge result wins.
        let g = geo(30.0, 0.0);
        let r1 = Rect::new(0.0, 0.0, 20.0, 50.0);
        let r2 = Rect::new(10.0, 0.0, 20.0, 50.0);
        // left-to-left: |0 - 10| = 10; right-to-left: |20 - 10| = 10;
        // right-to-right: |20 - 30| = 10. All match; last wins.
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.x, r2.right() - r1.width);
        assert_eq!(snapped.x, 10.0);
    }

    #[test]
    fn size_is_never_altered() {
        let g = geo(20.0, 15.0);
        let r1 = Rect::new(100.0, 0.0, 37.0, 91.0);
        let r2 = Rect::new(20.0, 0.0, 80.0, 50.0);
        let snapped = g.snap_bounds(&r1, &r2).unwrap();
        assert_eq!(snapped.width, 37.0);
        assert_eq!(snapped.height, 91.0);
    }

    #[test]
    fn alignment_includes_spanning_rects() {
        // r1 taller than r2 and spanning it completely.
        let r1 = Rect::new(0.0, 0.0, 50.0, 300.0);
        let r2 = Rect::new(60.0, 100.0, 50.0, 50.0);
        assert!(SnapGeometry::horizontally_aligned(&r1, &r2));
        assert!(SnapGeometry::horizontally_aligned(&r2, &r1));
    }
}
