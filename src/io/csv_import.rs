use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use crate::model::task::{Task, Trade};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read CSV headers: {0}")]
    Headers(#[from] csv::Error),
    #[error(
        "CSV is missing required columns. Found headers: {found:?}. \
         Need columns for: task title and due date."
    )]
    MissingColumns { found: Vec<String> },
    #[error("no valid tasks found in CSV ({skipped} rows skipped)")]
    NoTasks { skipped: usize },
    #[error("CSV file is empty or has no data rows")]
    Empty,
}

/// Map a status string to a progress value (0.0 – 1.0).
fn status_to_progress(status: &str) -> f32 {
    match status.trim().to_lowercase().as_str() {
        "finished" | "done" | "complete" | "completed" => 1.0,
        "in progress" | "in-progress" | "active" | "started" => 0.5,
        "mobilizing" | "planned" => 0.25,
        "not started" | "not-started" | "new" | "pending" => 0.0,
        _ => 0.0,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%m-%d-%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = start, 2 = due, 3 = status, 4 = trade, 5 = crew,
///   6 = equipment, 7 = milestone, 8 = notes
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "task" | "taskname" | "name" | "activity" | "workitem" => Some(0),

        "start" | "startdate" | "from" | "begin" | "mobilize" => Some(1),

        "due" | "duedate" | "end" | "enddate" | "finish" | "finishdate" | "completion" => Some(2),

        "status" | "state" | "progress" | "stage" => Some(3),

        "trade" | "discipline" | "csi" | "division" => Some(4),

        "crew" | "foreman" | "subcontractor" | "sub" | "assignee" => Some(5),

        "equipment" | "plant" | "machine" | "rig" => Some(6),

        "milestone" | "ismilestone" | "type" => Some(7),

        "notes" | "note" | "description" | "details" | "comment" | "comments" => Some(8),

        _ => None,
    }
}

/// Import tasks from CSV text.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column
/// headers flexibly ("Due Date", "Completion", etc.). Only a title and a
/// due date are required per row; a missing start date leaves the task
/// unscheduled. Returns `(tasks, skipped_count)` on success.
pub fn import_tasks_from_str(content: &str) -> Result<(Vec<Task>, usize), ImportError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has_title = col_map.iter().any(|c| *c == Some(0));
    let has_due = col_map.iter().any(|c| *c == Some(2));
    if !has_title || !has_due {
        return Err(ImportError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = i + 2, error = %e, "skipping malformed CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<&str>; 9] = [None; 9];
        for (col_idx, field) in record.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim());
            }
        }

        let title = match fields[0] {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let due = match fields[2].and_then(parse_date) {
            Some(d) => d,
            None => {
                warn!(
                    row = i + 2,
                    value = fields[2].unwrap_or(""),
                    "skipping row with invalid due date"
                );
                skipped += 1;
                continue;
            }
        };

        // An unparseable start is dropped rather than failing the row.
        let start = fields[1].filter(|s| !s.is_empty()).and_then(parse_date);

        let trade = fields[4].and_then(Trade::parse).unwrap_or(Trade::General);

        let is_milestone = fields[7]
            .map(|s| {
                matches!(
                    s.to_lowercase().as_str(),
                    "true" | "yes" | "1" | "milestone"
                )
            })
            .unwrap_or(false)
            || start == Some(due);

        let mut task = Task::new(title, start.unwrap_or(due), due);
        task.start = start;
        task.trade = trade;
        task.color = trade.color();
        task.progress = fields[3].map(status_to_progress).unwrap_or(0.0);
        task.crew = fields[5].filter(|s| !s.is_empty()).map(str::to_string);
        task.equipment = fields[6].filter(|s| !s.is_empty()).map(str::to_string);
        task.notes = fields[8].unwrap_or("").to_string();
        if is_milestone {
            task.is_milestone = true;
            task.start = None;
        }
        tasks.push(task);
    }

    if tasks.is_empty() {
        return if skipped > 0 {
            Err(ImportError::NoTasks { skipped })
        } else {
            Err(ImportError::Empty)
        };
    }

    Ok((tasks, skipped))
}

/// Import tasks from a CSV file on disk.
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize), ImportError> {
    let content = std::fs::read_to_string(path)?;
    import_tasks_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_construction_columns() {
        let csv = "Task;Start Date;Due Date;Status;Trade;Crew;Equipment\n\
                   Excavation;01/02/2026;20/02/2026;In Progress;Sitework;Crew A;Excavator EX-200\n\
                   Foundation pour;21/02/2026;10/03/2026;Not Started;Concrete;Crew B;\n\
                   Dry-in;;15/04/2026;Not Started;;;";
        let (tasks, skipped) = import_tasks_from_str(csv).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 3);

        assert_eq!(tasks[0].title, "Excavation");
        assert_eq!(tasks[0].trade, Trade::Sitework);
        assert_eq!(tasks[0].progress, 0.5);
        assert_eq!(tasks[0].crew.as_deref(), Some("Crew A"));
        assert_eq!(tasks[0].equipment.as_deref(), Some("Excavator EX-200"));

        // No start date: unscheduled, sits on its due date.
        assert!(tasks[2].start.is_none());
        assert_eq!(
            tasks[2].due,
            NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()
        );
    }

    #[test]
    fn same_day_start_and_due_becomes_milestone() {
        let csv = "Title,Due\nTopping out,2026-06-01\n";
        let (tasks, _) = import_tasks_from_str(csv).unwrap();
        assert!(!tasks[0].is_milestone);

        let csv = "Title,Start,Due\nTopping out,2026-06-01,2026-06-01\n";
        let (tasks, _) = import_tasks_from_str(csv).unwrap();
        assert!(tasks[0].is_milestone);
    }

    #[test]
    fn rows_with_bad_dates_are_skipped_not_fatal() {
        let csv = "Title,Due\nGood,2026-06-01\nBad,someday\n";
        let (tasks, skipped) = import_tasks_from_str(csv).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn missing_due_column_is_an_error() {
        let csv = "Title,Start\nExcavation,2026-02-01\n";
        let err = import_tasks_from_str(csv).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumns { .. }));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let csv = "Title,Due\n,2026-06-01\nBad,nope\n";
        assert!(matches!(
            import_tasks_from_str(csv),
            Err(ImportError::NoTasks { skipped: 2 })
        ));
    }
}
