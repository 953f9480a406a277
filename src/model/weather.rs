use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily site weather outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Overcast,
    Rain,
    Snow,
    HighWind,
}

impl WeatherCondition {
    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::HighWind => "High wind",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WeatherCondition::Clear => egui_phosphor::regular::SUN,
            WeatherCondition::Overcast => egui_phosphor::regular::CLOUD,
            WeatherCondition::Rain => egui_phosphor::regular::CLOUD_RAIN,
            WeatherCondition::Snow => egui_phosphor::regular::CLOUD_SNOW,
            WeatherCondition::HighWind => egui_phosphor::regular::WIND,
        }
    }

    /// Conditions that stop pours, roofing, and crane picks.
    pub fn blocks_outdoor_work(self) -> bool {
        matches!(
            self,
            WeatherCondition::Rain | WeatherCondition::Snow | WeatherCondition::HighWind
        )
    }
}

/// One day of forecast or observed weather attached to the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
}
