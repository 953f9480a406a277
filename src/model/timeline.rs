use chrono::NaiveDate;

/// Date granularity shown on the timeline header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Days,
    Weeks,
    Months,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Days, ViewMode::Weeks, ViewMode::Months];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Days => "Days",
            ViewMode::Weeks => "Weeks",
            ViewMode::Months => "Months",
        }
    }

    /// Horizontal density of the chart at this granularity.
    pub fn pixels_per_day(self) -> f32 {
        match self {
            ViewMode::Days => 24.0,
            ViewMode::Weeks => 10.0,
            ViewMode::Months => 3.0,
        }
    }

    /// Label rules for task bars at this granularity.
    pub fn render_policy(self) -> RenderPolicy {
        match self {
            ViewMode::Days => RenderPolicy {
                text_length: 32,
                font_size: 11.5,
                show_text: true,
            },
            ViewMode::Weeks => RenderPolicy {
                text_length: 18,
                font_size: 11.0,
                show_text: true,
            },
            // At month density bar labels are illegible; the task table
            // carries the row identity instead.
            ViewMode::Months => RenderPolicy {
                text_length: 10,
                font_size: 10.0,
                show_text: false,
            },
        }
    }
}

/// How bar labels render in a given view mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPolicy {
    /// Maximum characters of the title before truncation.
    pub text_length: usize,
    pub font_size: f32,
    pub show_text: bool,
}

/// Bars narrower than this get no label regardless of mode.
pub const MIN_LABEL_WIDTH: f32 = 40.0;

/// Label text for a bar of the given pixel width, or `None` when the
/// bar is too narrow or the active mode suppresses text.
pub fn bar_label(title: &str, bar_width: f32, policy: RenderPolicy) -> Option<String> {
    if !policy.show_text || bar_width <= MIN_LABEL_WIDTH {
        return None;
    }
    let mut label: String = title.chars().take(policy.text_length).collect();
    if title.chars().count() > policy.text_length {
        label.push('…');
    }
    Some(label)
}

/// The full date span of the schedule, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    /// Build a range, swapping the endpoints if they arrive reversed so
    /// that `start <= end` always holds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Number of whole days spanned. Zero for a single-day range.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_normalizes_reversed_endpoints() {
        let r = TimeRange::new(d(2026, 3, 10), d(2026, 3, 1));
        assert_eq!(r.start, d(2026, 3, 1));
        assert_eq!(r.end, d(2026, 3, 10));
        assert_eq!(r.total_days(), 9);
    }

    #[test]
    fn degenerate_range_spans_zero_days() {
        let r = TimeRange::new(d(2026, 5, 5), d(2026, 5, 5));
        assert_eq!(r.total_days(), 0);
        assert!(r.contains(d(2026, 5, 5)));
        assert!(!r.contains(d(2026, 5, 6)));
    }

    #[test]
    fn render_policy_is_total_and_deterministic() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.render_policy(), mode.render_policy());
        }
        assert!(ViewMode::Days.render_policy().show_text);
        assert!(ViewMode::Weeks.render_policy().show_text);
        assert!(!ViewMode::Months.render_policy().show_text);
    }

    #[test]
    fn bar_label_truncates_with_ellipsis() {
        let policy = RenderPolicy {
            text_length: 5,
            font_size: 11.0,
            show_text: true,
        };
        assert_eq!(bar_label("Pour", 100.0, policy).as_deref(), Some("Pour"));
        assert_eq!(
            bar_label("Excavation", 100.0, policy).as_deref(),
            Some("Excav…")
        );
        // Exactly at the limit: no ellipsis.
        assert_eq!(bar_label("Frame", 100.0, policy).as_deref(), Some("Frame"));
    }

    #[test]
    fn bar_label_gated_by_width_and_mode() {
        let policy = ViewMode::Days.render_policy();
        assert!(bar_label("Roofing", MIN_LABEL_WIDTH, policy).is_none());
        assert!(bar_label("Roofing", MIN_LABEL_WIDTH + 1.0, policy).is_some());
        assert!(bar_label("Roofing", 500.0, ViewMode::Months.render_policy()).is_none());
    }
}
