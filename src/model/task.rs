use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Construction trade responsible for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trade {
    Sitework,
    Concrete,
    Framing,
    Roofing,
    Electrical,
    Plumbing,
    Hvac,
    Finishes,
    General,
}

impl Trade {
    pub const ALL: [Trade; 9] = [
        Trade::Sitework,
        Trade::Concrete,
        Trade::Framing,
        Trade::Roofing,
        Trade::Electrical,
        Trade::Plumbing,
        Trade::Hvac,
        Trade::Finishes,
        Trade::General,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Trade::Sitework => "Sitework",
            Trade::Concrete => "Concrete",
            Trade::Framing => "Framing",
            Trade::Roofing => "Roofing",
            Trade::Electrical => "Electrical",
            Trade::Plumbing => "Plumbing",
            Trade::Hvac => "HVAC",
            Trade::Finishes => "Finishes",
            Trade::General => "General",
        }
    }

    /// Default bar color for the trade.
    pub fn color(self) -> Color32 {
        match self {
            Trade::Sitework => Color32::from_rgb(141, 110, 99),
            Trade::Concrete => Color32::from_rgb(120, 124, 136),
            Trade::Framing => Color32::from_rgb(205, 145, 60),
            Trade::Roofing => Color32::from_rgb(171, 71, 188),
            Trade::Electrical => Color32::from_rgb(251, 192, 45),
            Trade::Plumbing => Color32::from_rgb(66, 133, 244),
            Trade::Hvac => Color32::from_rgb(0, 172, 193),
            Trade::Finishes => Color32::from_rgb(102, 187, 106),
            Trade::General => Color32::from_rgb(70, 130, 180),
        }
    }

    /// Parse a CSV/user string, tolerant of case and whitespace.
    pub fn parse(s: &str) -> Option<Trade> {
        match s.trim().to_lowercase().as_str() {
            "sitework" | "site" | "earthwork" | "civil" => Some(Trade::Sitework),
            "concrete" | "foundation" | "foundations" => Some(Trade::Concrete),
            "framing" | "structure" | "structural" | "steel" => Some(Trade::Framing),
            "roofing" | "roof" => Some(Trade::Roofing),
            "electrical" | "electric" | "elec" => Some(Trade::Electrical),
            "plumbing" | "plumb" => Some(Trade::Plumbing),
            "hvac" | "mechanical" | "mech" => Some(Trade::Hvac),
            "finishes" | "finish" | "interior" | "paint" => Some(Trade::Finishes),
            "general" | "gc" | "misc" => Some(Trade::General),
            _ => None,
        }
    }
}

/// A finish-to-start link: the successor cannot begin until the
/// predecessor is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub predecessor: Uuid,
    pub successor: Uuid,
}

/// A single construction task or milestone on the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    /// Planned first day on site. Milestones and not-yet-scheduled work
    /// leave this empty and sit on their due date.
    pub start: Option<NaiveDate>,
    /// Contractual completion date.
    pub due: NaiveDate,
    pub trade: Trade,
    pub crew: Option<String>,
    /// Equipment tag (crane, excavator, lift) this task reserves.
    pub equipment: Option<String>,
    /// Progress from 0.0 (not started) to 1.0 (complete).
    pub progress: f32,
    /// Work that cannot proceed in bad weather (pours, roofing).
    pub weather_sensitive: bool,
    pub is_milestone: bool,
    #[serde(with = "color_serde")]
    pub color: Color32,
    pub notes: String,
}

impl Task {
    pub fn new(title: impl Into<String>, start: NaiveDate, due: NaiveDate) -> Self {
        let trade = Trade::General;
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: Some(start),
            due: due.max(start),
            trade,
            crew: None,
            equipment: None,
            progress: 0.0,
            weather_sensitive: false,
            is_milestone: false,
            color: trade.color(),
            notes: String::new(),
        }
    }

    pub fn milestone(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: None,
            due: date,
            trade: Trade::General,
            crew: None,
            equipment: None,
            progress: 0.0,
            weather_sensitive: false,
            is_milestone: true,
            color: Color32::from_rgb(255, 167, 38),
            notes: String::new(),
        }
    }

    /// Rendered span. Tasks without a start collapse onto their due date;
    /// a start past the due date is treated as a single day at the start.
    pub fn span(&self) -> (NaiveDate, NaiveDate) {
        let start = self.start.unwrap_or(self.due);
        (start.min(self.due), start.max(self.due))
    }

    pub fn duration_days(&self) -> i64 {
        let (start, due) = self.span();
        (due - start).num_days()
    }

    /// Whether the rendered spans of two tasks share at least one day.
    pub fn overlaps(&self, other: &Task) -> bool {
        let (a0, a1) = self.span();
        let (b0, b1) = other.span();
        a0 <= b1 && b0 <= a1
    }
}

/// Serde helper storing `Color32` as a `#rrggbbaa` hex string.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r(),
            color.g(),
            color.b(),
            color.a()
        ))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let hex = s.trim_start_matches('#');
        if hex.len() != 8 {
            return Err(serde::de::Error::custom("expected #rrggbbaa color"));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| serde::de::Error::custom("invalid hex digit in color"))
        };
        Ok(Color32::from_rgba_premultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn span_collapses_missing_start_onto_due() {
        let mut task = Task::new("Punch list", d(2026, 4, 1), d(2026, 4, 10));
        task.start = None;
        assert_eq!(task.span(), (d(2026, 4, 10), d(2026, 4, 10)));
        assert_eq!(task.duration_days(), 0);
    }

    #[test]
    fn span_orders_inverted_dates() {
        let mut task = Task::new("Backfill", d(2026, 4, 1), d(2026, 4, 10));
        task.start = Some(d(2026, 4, 20));
        let (start, due) = task.span();
        assert!(start <= due);
    }

    #[test]
    fn overlap_is_inclusive_of_shared_edge_day() {
        let a = Task::new("Excavate", d(2026, 4, 1), d(2026, 4, 5));
        let b = Task::new("Pour", d(2026, 4, 5), d(2026, 4, 9));
        let c = Task::new("Frame", d(2026, 4, 10), d(2026, 4, 20));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn color_round_trips_through_hex() {
        let task = Task::new("Paint", d(2026, 4, 1), d(2026, 4, 3));
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.color, task.color);
    }

    #[test]
    fn trade_parse_accepts_common_aliases() {
        assert_eq!(Trade::parse(" HVAC "), Some(Trade::Hvac));
        assert_eq!(Trade::parse("foundations"), Some(Trade::Concrete));
        assert_eq!(Trade::parse("basketweaving"), None);
    }
}
