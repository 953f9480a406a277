use chrono::NaiveDate;
use tracing::debug;

use crate::model::timeline::TimeRange;

/// Measured pixel extents of the chart area.
///
/// `scrollable_width` is the total pannable extent; `visible_width` is
/// the window currently on screen. Both come from the hosting panel and
/// are zero until the first layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportGeometry {
    pub scrollable_width: f32,
    pub visible_width: f32,
}

impl ViewportGeometry {
    pub fn new(scrollable_width: f32, visible_width: f32) -> Self {
        Self {
            scrollable_width: scrollable_width.max(0.0),
            visible_width: visible_width.max(0.0),
        }
    }

    /// False until the hosting panel has been laid out at least once.
    pub fn is_measurable(&self) -> bool {
        self.scrollable_width > 0.0
    }
}

/// Fraction of the range elapsed at `date`. Unclamped: dates before the
/// range go negative, dates after it exceed 1.
fn elapsed_fraction(date: NaiveDate, range: &TimeRange) -> f32 {
    let total = range.total_days();
    if total == 0 {
        return 0.0;
    }
    (date - range.start).num_days() as f32 / total as f32
}

/// Map a date to a pixel offset within the scrollable extent.
///
/// The fraction is clamped into `[0, 1]` so out-of-range dates pin to
/// the nearest edge instead of producing offsets past the chart.
pub fn date_to_offset(date: NaiveDate, range: &TimeRange, geometry: &ViewportGeometry) -> f32 {
    elapsed_fraction(date, range).clamp(0.0, 1.0) * geometry.scrollable_width
}

/// Scroll offset that brings `date` to the visual center of the viewport,
/// clamped into the scrollable extent.
pub fn centered_offset(date: NaiveDate, range: &TimeRange, geometry: &ViewportGeometry) -> f32 {
    let raw = date_to_offset(date, range, geometry) - geometry.visible_width / 2.0;
    raw.clamp(0.0, geometry.scrollable_width)
}

/// Duration of an animated scroll, in seconds.
const SMOOTH_SCROLL_SECS: f32 = 0.3;

#[derive(Debug, Clone, Copy)]
struct ScrollTransition {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// Owns the horizontal scroll position of the timeline.
///
/// All targets are clamped into `[0, scrollable_width]`. Smooth scrolls
/// are fire-and-forget: issuing a new command while one is in flight
/// silently supersedes it, so rapid successive calls are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    geometry: ViewportGeometry,
    offset: f32,
    transition: Option<ScrollTransition>,
    pending_jump: bool,
}

impl ViewportController {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    /// Adopt freshly measured extents and re-clamp any stored positions.
    pub fn set_geometry(&mut self, geometry: ViewportGeometry) {
        self.geometry = geometry;
        self.offset = self.offset.clamp(0.0, geometry.scrollable_width);
        if let Some(t) = &mut self.transition {
            t.to = t.to.clamp(0.0, geometry.scrollable_width);
        }
    }

    /// Move the viewport to `target`, clamped into the scrollable extent.
    ///
    /// With `smooth` the move animates over a fixed duration and cannot
    /// be awaited; without it the jump applies on the next frame.
    pub fn scroll_to(&mut self, target: f32, smooth: bool) {
        let target = target.clamp(0.0, self.geometry.scrollable_width);
        if smooth {
            self.transition = Some(ScrollTransition {
                from: self.offset,
                to: target,
                elapsed: 0.0,
            });
            self.pending_jump = false;
        } else {
            self.offset = target;
            self.transition = None;
            self.pending_jump = true;
        }
    }

    /// Scroll so that `date` sits at the center of the visible window.
    ///
    /// No-ops when the viewport has not been measured yet; that is a
    /// startup ordering artifact, not an error.
    pub fn center_on_date(&mut self, date: NaiveDate, range: &TimeRange, smooth: bool) {
        if !self.geometry.is_measurable() {
            debug!(%date, "viewport not measurable yet, ignoring center request");
            return;
        }
        self.scroll_to(centered_offset(date, range, &self.geometry), smooth);
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Step the in-flight transition by `dt` seconds.
    ///
    /// Returns the offset to force onto the scroll area this frame, or
    /// `None` when the viewport is at rest and user scrolling rules.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.pending_jump {
            self.pending_jump = false;
            return Some(self.offset);
        }
        let t = self.transition.as_mut()?;
        t.elapsed += dt.max(0.0);
        let progress = (t.elapsed / SMOOTH_SCROLL_SECS).min(1.0);
        // Cubic ease-out.
        let eased = 1.0 - (1.0 - progress).powi(3);
        self.offset = t.from + (t.to - t.from) * eased;
        if progress >= 1.0 {
            self.offset = t.to;
            self.transition = None;
        }
        Some(self.offset)
    }

    /// Record an offset the user scrolled to manually. Ignored while an
    /// animation is in flight so it cannot fight the transition.
    pub fn sync(&mut self, observed: f32) {
        if self.transition.is_none() && !self.pending_jump {
            self.offset = observed.clamp(0.0, self.geometry.scrollable_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn january() -> TimeRange {
        TimeRange::new(d(2026, 1, 1), d(2026, 1, 31))
    }

    fn geometry() -> ViewportGeometry {
        ViewportGeometry::new(3000.0, 500.0)
    }

    /// Drive the controller until its animation settles.
    fn settle(controller: &mut ViewportController) {
        for _ in 0..100 {
            controller.advance(1.0 / 60.0);
            if !controller.is_animating() {
                break;
            }
        }
    }

    #[test]
    fn mid_january_maps_to_mid_chart() {
        let range = january();
        let geo = geometry();
        assert_eq!(range.total_days(), 30);
        let raw = date_to_offset(d(2026, 1, 16), &range, &geo);
        assert_eq!(raw, 1500.0);
        assert_eq!(centered_offset(d(2026, 1, 16), &range, &geo), 1250.0);
    }

    #[test]
    fn range_start_centers_clamp_to_zero() {
        let range = january();
        let geo = geometry();
        assert_eq!(date_to_offset(d(2026, 1, 1), &range, &geo), 0.0);
        assert_eq!(centered_offset(d(2026, 1, 1), &range, &geo), 0.0);
    }

    #[test]
    fn offsets_are_monotonic_within_range() {
        let range = january();
        let geo = geometry();
        let mut prev = f32::MIN;
        let mut date = range.start;
        while date <= range.end {
            let offset = date_to_offset(date, &range, &geo);
            assert!(offset >= prev, "offset regressed at {date}");
            prev = offset;
            date += chrono::Duration::days(1);
        }
    }

    #[test]
    fn degenerate_range_maps_everything_to_zero() {
        let range = TimeRange::new(d(2026, 6, 1), d(2026, 6, 1));
        let geo = geometry();
        for probe in [d(2020, 1, 1), d(2026, 6, 1), d(2030, 12, 31)] {
            assert_eq!(date_to_offset(probe, &range, &geo), 0.0);
        }
    }

    #[test]
    fn out_of_range_dates_pin_to_edges() {
        let range = january();
        let geo = geometry();
        assert_eq!(date_to_offset(d(2025, 12, 1), &range, &geo), 0.0);
        assert_eq!(date_to_offset(d(2026, 3, 1), &range, &geo), 3000.0);
    }

    #[test]
    fn scroll_targets_clamp_into_extent() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.scroll_to(-400.0, false);
        assert_eq!(c.offset(), 0.0);
        c.scroll_to(9999.0, false);
        assert_eq!(c.offset(), 3000.0);
        c.scroll_to(3000.0, false);
        assert_eq!(c.offset(), 3000.0);
    }

    #[test]
    fn smooth_scroll_settles_on_target() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.scroll_to(1200.0, true);
        assert!(c.is_animating());
        settle(&mut c);
        assert!(!c.is_animating());
        assert_eq!(c.offset(), 1200.0);
    }

    #[test]
    fn rapid_scrolls_are_last_write_wins() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.scroll_to(2500.0, true);
        c.advance(0.05);
        c.scroll_to(100.0, true);
        settle(&mut c);
        assert_eq!(c.offset(), 100.0);
    }

    #[test]
    fn center_request_before_layout_is_ignored() {
        let mut c = ViewportController::default();
        c.center_on_date(d(2026, 1, 16), &january(), true);
        assert!(!c.is_animating());
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn center_on_date_matches_centered_offset() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.center_on_date(d(2026, 1, 16), &january(), false);
        c.advance(0.0);
        assert_eq!(c.offset(), 1250.0);
    }

    #[test]
    fn manual_sync_ignored_while_animating() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.scroll_to(2000.0, true);
        c.sync(50.0);
        settle(&mut c);
        assert_eq!(c.offset(), 2000.0);
        c.sync(50.0);
        assert_eq!(c.offset(), 50.0);
    }

    #[test]
    fn shrinking_geometry_reclamps_offset() {
        let mut c = ViewportController::default();
        c.set_geometry(geometry());
        c.scroll_to(2800.0, false);
        c.advance(0.0);
        c.set_geometry(ViewportGeometry::new(1000.0, 500.0));
        assert_eq!(c.offset(), 1000.0);
    }
}
