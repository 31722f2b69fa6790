//! # Angular layout for Rotunda Core
//!
//! Pure placement math for arranging views on circular arcs around the
//! viewer. An arc is described by an [`ArcSpec`] (elevation, spacing,
//! optional azimuth offset); laying out `n` views produces `n` evenly
//! spaced azimuths symmetric about azimuth 0, so the arc is always
//! centered in front of the viewer.
//!
//! Everything here is deterministic and side-effect free; the mode
//! controller and the drag engine both derive their targets from these
//! functions.
//!
//! # Example
//!
//! ```rust
//! use rotunda_core::layout::arc_placements;
//!
//! let arc = arc_placements(3, 60.0, 0.0, 0.0);
//! let azimuths: Vec<f32> = arc.iter().map(|p| p.azimuth).collect();
//! assert_eq!(azimuths, vec![-60.0, 0.0, 60.0]);
//! ```

use rotunda_view_api::Placement;
use serde::{Deserialize, Serialize};

/// Geometry of a single layout arc.
///
/// `spacing` is the angular distance between adjacent slots in degrees;
/// `offset` shifts the whole arc around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    /// Elevation of every slot on this arc, in degrees
    pub elevation: f32,
    /// Angular distance between adjacent slots, in degrees
    pub spacing: f32,
    /// Azimuth offset applied to the whole arc, in degrees
    pub offset: f32,
}

impl ArcSpec {
    /// Create an arc centered on azimuth 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::layout::ArcSpec;
    ///
    /// let arc = ArcSpec::new(-22.0, 20.0);
    /// assert_eq!(arc.offset, 0.0);
    /// ```
    pub fn new(elevation: f32, spacing: f32) -> Self {
        Self {
            elevation,
            spacing,
            offset: 0.0,
        }
    }

    /// Evenly spaced placements for `count` slots on this arc.
    pub fn placements(&self, count: usize) -> Vec<Placement> {
        arc_placements(count, self.spacing, self.elevation, self.offset)
    }

    /// Placement of a single slot on this arc within a `slots`-wide grid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::layout::ArcSpec;
    ///
    /// let arc = ArcSpec::new(27.0, 20.0);
    /// // middle slot of a 3-slot grid sits straight ahead
    /// assert_eq!(arc.slot_placement(1, 3).azimuth, 0.0);
    /// ```
    pub fn slot_placement(&self, slot: usize, slots: usize) -> Placement {
        let first = first_azimuth(slots, self.spacing) + self.offset;
        Placement::new(self.elevation, first + slot as f32 * self.spacing)
    }

    /// Nearest slot of a `slots`-wide grid for a live azimuth.
    ///
    /// The result is the rounded projection onto the centered grid and
    /// is *not* clamped; callers clamp into whatever range their
    /// operation allows. Ties round half away from zero.
    pub fn slot_index(&self, azimuth: f32, slots: usize) -> i32 {
        if slots == 0 {
            return 0;
        }
        let first = first_azimuth(slots, self.spacing) + self.offset;
        ((azimuth - first) / self.spacing).round() as i32
    }
}

/// Compute evenly spaced placements for `count` items on one arc.
///
/// The first azimuth is `-(count - 1) / 2 * delta + offset` and each
/// subsequent item advances by `delta`, so the sequence is symmetric
/// about `offset`. `count == 0` yields an empty sequence.
pub fn arc_placements(count: usize, delta: f32, elevation: f32, offset: f32) -> Vec<Placement> {
    let mut angle = first_azimuth(count, delta) + offset;
    let mut placements = Vec::with_capacity(count);
    for _ in 0..count {
        placements.push(Placement::new(elevation, angle));
        angle += delta;
    }
    placements
}

/// Azimuth of the first slot in a centered `count`-wide grid.
fn first_azimuth(count: usize, delta: f32) -> f32 {
    -(count.saturating_sub(1) as f32) / 2.0 * delta
}

/// Signed shortest angular difference from `from` to `to`, in degrees.
///
/// The result is normalized into `[-180, 180)`, so interpolating by it
/// always rotates along the shorter way around the circle.
///
/// # Example
///
/// ```rust
/// use rotunda_core::layout::shortest_arc;
///
/// assert_eq!(shortest_arc(170.0, -170.0), 20.0);
/// assert_eq!(shortest_arc(-170.0, 170.0), -20.0);
/// assert_eq!(shortest_arc(0.0, 90.0), 90.0);
/// ```
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_arc() {
        assert!(arc_placements(0, 60.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_single_item_centered() {
        let arc = arc_placements(1, 60.0, 10.0, 0.0);
        assert_eq!(arc.len(), 1);
        assert_eq!(arc[0].azimuth, 0.0);
        assert_eq!(arc[0].elevation, 10.0);
    }

    #[test]
    fn test_three_views_full_circle_spacing() {
        // 3 views with the arranged-mode spacing of 360/6 = 60 degrees
        let arc = arc_placements(3, 60.0, 0.0, 0.0);
        let azimuths: Vec<f32> = arc.iter().map(|p| p.azimuth).collect();
        assert_eq!(azimuths, vec![-60.0, 0.0, 60.0]);
        assert!(arc.iter().all(|p| p.elevation == 0.0));
    }

    #[test]
    fn test_management_arc_scenarios() {
        // 6 displayed views at elevation -22, spacing 20
        let displayed = arc_placements(6, 20.0, -22.0, 0.0);
        let azimuths: Vec<f32> = displayed.iter().map(|p| p.azimuth).collect();
        assert_eq!(azimuths, vec![-50.0, -30.0, -10.0, 10.0, 30.0, 50.0]);
        assert!(displayed.iter().all(|p| p.elevation == -22.0));

        // 2 hidden views at elevation 27, spacing 20
        let hidden = arc_placements(2, 20.0, 27.0, 0.0);
        let azimuths: Vec<f32> = hidden.iter().map(|p| p.azimuth).collect();
        assert_eq!(azimuths, vec![-10.0, 10.0]);
        assert!(hidden.iter().all(|p| p.elevation == 27.0));
    }

    #[test]
    fn test_offset_shifts_whole_arc() {
        let arc = arc_placements(2, 20.0, 0.0, 15.0);
        assert_eq!(arc[0].azimuth, 5.0);
        assert_eq!(arc[1].azimuth, 25.0);
    }

    #[test]
    fn test_arc_spec_slot_placement_matches_layout() {
        let spec = ArcSpec::new(-22.0, 20.0);
        let arc = spec.placements(6);
        for (i, p) in arc.iter().enumerate() {
            assert_eq!(spec.slot_placement(i, 6), *p);
        }
    }

    #[test]
    fn test_slot_index_projection() {
        let spec = ArcSpec::new(27.0, 20.0);
        // 4-slot grid: slots at -30, -10, 10, 30
        assert_eq!(spec.slot_index(-30.0, 4), 0);
        assert_eq!(spec.slot_index(-12.0, 4), 1);
        assert_eq!(spec.slot_index(9.0, 4), 2);
        assert_eq!(spec.slot_index(31.0, 4), 3);
        // past the arc ends the projection keeps going; callers clamp
        assert_eq!(spec.slot_index(-90.0, 4), -3);
        assert_eq!(spec.slot_index(90.0, 4), 6);
    }

    #[test]
    fn test_slot_index_rounds_half_away_from_zero() {
        let spec = ArcSpec::new(0.0, 20.0);
        // 3-slot grid: slots at -20, 0, 20; boundary at exactly +10
        assert_eq!(spec.slot_index(10.0, 3), 2);
        assert_eq!(spec.slot_index(9.999, 3), 1);
    }

    #[test]
    fn test_shortest_arc_wraps() {
        assert_eq!(shortest_arc(170.0, -170.0), 20.0);
        assert_eq!(shortest_arc(-170.0, 170.0), -20.0);
        assert_eq!(shortest_arc(50.0, 50.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_arc_symmetric_about_zero(count in 0usize..=12, delta in 1.0f32..90.0) {
            let arc = arc_placements(count, delta, 0.0, 0.0);
            prop_assert_eq!(arc.len(), count);
            for (p, q) in arc.iter().zip(arc.iter().rev()) {
                prop_assert!((p.azimuth + q.azimuth).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_adjacent_slots_differ_by_delta(count in 2usize..=12, delta in 1.0f32..90.0) {
            let arc = arc_placements(count, delta, 0.0, 0.0);
            for pair in arc.windows(2) {
                prop_assert!((pair[1].azimuth - pair[0].azimuth - delta).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_shortest_arc_in_range(from in -720.0f32..720.0, to in -720.0f32..720.0) {
            let d = shortest_arc(from, to);
            prop_assert!((-180.0..180.0).contains(&d));
        }

        #[test]
        fn prop_slot_index_recovers_slot(slots in 1usize..=12, slot in 0usize..12) {
            prop_assume!(slot < slots);
            let spec = ArcSpec::new(0.0, 20.0);
            let placement = spec.slot_placement(slot, slots);
            prop_assert_eq!(spec.slot_index(placement.azimuth, slots), slot as i32);
        }
    }
}
