use std::path::Path;

use thiserror::Error;

use crate::model::Task;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Map progress back to a human-readable status string.
fn progress_to_status(progress: f32) -> &'static str {
    if progress >= 1.0 {
        "Finished"
    } else if progress >= 0.5 {
        "In Progress"
    } else if progress >= 0.25 {
        "Mobilizing"
    } else {
        "Not Started"
    }
}

/// Export tasks to a semicolon-delimited CSV file matching the import
/// format. Dates are formatted as YYYY-MM-DD; an unscheduled task has an
/// empty start column. Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record([
        "Title",
        "Start Date",
        "Due Date",
        "Status",
        "Trade",
        "Crew",
        "Equipment",
        "Milestone",
        "Notes",
    ])?;

    for task in tasks {
        let start = task
            .start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let due = task.due.format("%Y-%m-%d").to_string();
        wtr.write_record([
            task.title.as_str(),
            start.as_str(),
            due.as_str(),
            progress_to_status(task.progress),
            task.trade.label(),
            task.crew.as_deref().unwrap_or(""),
            task.equipment.as_deref().unwrap_or(""),
            if task.is_milestone { "yes" } else { "no" },
            task.notes.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_import::import_tasks_from_str;
    use crate::model::Trade;
    use chrono::NaiveDate;

    #[test]
    fn exported_file_reimports_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut task = Task::new(
            "Roofing membrane",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 14).unwrap(),
        );
        task.trade = Trade::Roofing;
        task.progress = 0.5;
        task.crew = Some("Crew C".into());

        let written = export_csv(&[task], &path).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let (tasks, skipped) = import_tasks_from_str(&content).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(tasks[0].title, "Roofing membrane");
        assert_eq!(tasks[0].trade, Trade::Roofing);
        assert_eq!(tasks[0].progress, 0.5);
        assert_eq!(tasks[0].crew.as_deref(), Some("Crew C"));
    }
}
