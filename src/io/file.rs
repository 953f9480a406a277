use std::path::Path;

use thiserror::Error;

use crate::model::Schedule;

/// Errors from reading or writing schedule files.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid schedule file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Save a schedule to a pretty-printed JSON file.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(schedule)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a schedule from a JSON file.
pub fn load_schedule(path: &Path) -> Result<Schedule, FileError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;

    #[test]
    fn schedule_round_trips_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tower.siteline.json");

        let mut schedule = Schedule::new("Tower Block A");
        schedule.tasks.push(Task::new(
            "Excavation",
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
        ));

        save_schedule(&schedule, &path).unwrap();
        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.name, "Tower Block A");
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].title, "Excavation");
    }

    #[test]
    fn loading_garbage_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_schedule(&path), Err(FileError::Format(_))));
    }

    #[test]
    fn loading_missing_file_reports_io_error() {
        let path = Path::new("/definitely/not/here.json");
        assert!(matches!(load_schedule(path), Err(FileError::Io(_))));
    }
}
