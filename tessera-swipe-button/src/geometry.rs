//! Rail measurements and the offset/progress conversions derived from them.
//!
//! All values are logical pixels. Offsets are measured from the side the
//! thumb starts on, so the same numbers describe both left-to-right and
//! mirrored layouts.

/// Geometry of a measured rail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailGeometry {
    /// Outer width of the rail as reported by layout.
    pub width: f32,
    /// Padding between the rail edge and the thumb.
    pub container_padding: f32,
    /// Width of the thumb icon.
    pub thumb_width: f32,
}

impl RailGeometry {
    /// Creates a geometry from a measured width and the configured sizes.
    pub fn new(width: f32, container_padding: f32, thumb_width: f32) -> Self {
        Self {
            width,
            container_padding,
            thumb_width,
        }
    }

    /// Width available to the fill, inside the padding.
    pub fn inner_width(&self) -> f32 {
        (self.width - 2.0 * self.container_padding).max(0.0)
    }

    /// Maximum distance the thumb may travel.
    ///
    /// Collapses to `0.0` when the thumb does not fit; the rail is then inert.
    pub fn travel_range(&self) -> f32 {
        let range = self.inner_width() - self.thumb_width;
        if range.is_finite() { range.max(0.0) } else { 0.0 }
    }

    /// Whether the thumb has any room to move.
    pub fn is_inert(&self) -> bool {
        self.travel_range() <= 0.0
    }

    /// Clamps `offset` into `[0, travel_range]`.
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.travel_range())
    }

    /// Converts an offset into a percentage in `[0, 100]`.
    ///
    /// An inert rail reports `0.0`.
    pub fn progress(&self, offset: f32) -> f32 {
        let range = self.travel_range();
        if range <= 0.0 {
            return 0.0;
        }
        (self.clamp_offset(offset) / range * 100.0).clamp(0.0, 100.0)
    }

    /// Width of the rail fill trailing the thumb at `offset`.
    pub fn fill_width(&self, offset: f32) -> f32 {
        (self.thumb_width + self.clamp_offset(offset)).min(self.inner_width())
    }
}

/// Whether a release at `progress` counts as a success.
///
/// The boundary is inclusive: releasing exactly on the threshold succeeds.
pub(crate) fn crosses_threshold(progress: f32, threshold: f32) -> bool {
    progress >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> RailGeometry {
        RailGeometry::new(300.0, 4.0, 50.0)
    }

    #[test]
    fn travel_range_subtracts_thumb_and_padding() {
        assert_eq!(reference().travel_range(), 242.0);
        assert_eq!(reference().inner_width(), 292.0);
    }

    #[test]
    fn oversized_thumb_collapses_travel_range() {
        let geometry = RailGeometry::new(60.0, 4.0, 80.0);
        assert_eq!(geometry.travel_range(), 0.0);
        assert!(geometry.is_inert());
        assert_eq!(geometry.progress(30.0), 0.0);
        assert_eq!(geometry.clamp_offset(30.0), 0.0);
    }

    #[test]
    fn progress_is_clamped_to_percent_range() {
        let geometry = reference();
        assert_eq!(geometry.progress(-50.0), 0.0);
        assert_eq!(geometry.progress(10_000.0), 100.0);
        assert_eq!(geometry.progress(f32::NAN), 0.0);
        let mid = geometry.progress(121.0);
        assert!((mid - 50.0).abs() < 1e-4);
    }

    #[test]
    fn scenario_offsets_land_on_expected_side_of_threshold() {
        let geometry = reference();
        let success = geometry.progress(170.0);
        let fail = geometry.progress(150.0);
        assert!((success - 70.247_93).abs() < 1e-3);
        assert!(crosses_threshold(success, 70.0));
        assert!(!crosses_threshold(fail, 70.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(crosses_threshold(70.0, 70.0));
        assert!(!crosses_threshold(70.0 - 1e-3, 70.0));
    }

    #[test]
    fn fill_never_exceeds_inner_width() {
        let geometry = reference();
        assert_eq!(geometry.fill_width(0.0), 50.0);
        assert_eq!(geometry.fill_width(242.0), 292.0);
        assert_eq!(geometry.fill_width(999.0), 292.0);
    }
}
