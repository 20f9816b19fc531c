use bitflags::bitflags;

bitflags! {
    /// Which minimize/restore propagation policies are active. Both
    /// flags may be set; the policies fire independently for the same
    /// event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowStateTracking: u32 {
        /// Minimizing/restoring the container's main window applies
        /// the same change to every open window.
        const MAIN = 1 << 0;
        /// Minimizing/restoring a grouped window applies the same
        /// change to every window in its group.
        const GROUP = 1 << 1;
    }
}

impl Default for WindowStateTracking {
    fn default() -> Self {
        Self::empty()
    }
}

/// Configuration for [`crate::GroupWindowManager`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupOptions {
    pub tracking: WindowStateTracking,
}

/// Configuration for [`crate::SnapAssistWindowManager`].
#[derive(Debug, Clone, Copy)]
pub struct SnapOptions {
    /// Maximum pixel distance between edges for a snap to trigger
    /// (strict: a distance equal to the threshold does not snap).
    pub snap_threshold: f64,
    /// Gap left between two snapped windows' edges.
    pub snap_offset: f64,
    /// Whether releasing a drag over highlighted snap targets joins
    /// the windows into one group.
    pub auto_grouping: bool,
    pub tracking: WindowStateTracking,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            snap_threshold: 15.0,
            snap_offset: 15.0,
            auto_grouping: true,
            tracking: WindowStateTracking::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_defaults_to_none() {
        let tracking = WindowStateTracking::default();
        assert!(tracking.is_empty());
        assert!(!tracking.contains(WindowStateTracking::MAIN));
    }

    #[test]
    fn tracking_flags_combine() {
        let tracking = WindowStateTracking::MAIN | WindowStateTracking::GROUP;
        assert!(tracking.contains(WindowStateTracking::MAIN));
        assert!(tracking.contains(WindowStateTracking::GROUP));
    }

    #[test]
    fn snap_defaults() {
        let opts = SnapOptions::default();
        assert_eq!(opts.snap_threshold, 15.0);
        assert_eq!(opts.snap_offset, 15.0);
        assert!(opts.auto_grouping);
        assert!(opts.tracking.is_empty());
    }
}
