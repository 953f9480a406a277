use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{Dependency, Task};
use super::timeline::TimeRange;
use super::weather::{WeatherCondition, WeatherRecord};

/// A construction schedule: tasks, their finish-to-start links, the
/// site weather log, and file metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub tasks: Vec<Task>,
    pub dependencies: Vec<Dependency>,
    pub weather: Vec<WeatherRecord>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            name: "Untitled Schedule".to_string(),
            tasks: Vec::new(),
            dependencies: Vec::new(),
            weather: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Schedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Overall date bounds of the schedule, padded with a week of lead-in
    /// and a month of tail for context. None for an empty schedule.
    pub fn time_range(&self) -> Option<TimeRange> {
        let start = self.tasks.iter().map(|t| t.span().0).min()?;
        let end = self.tasks.iter().map(|t| t.span().1).max()?;
        Some(TimeRange::new(
            start - chrono::Duration::days(7),
            end + chrono::Duration::days(30),
        ))
    }

    pub fn weather_on(&self, date: chrono::NaiveDate) -> Option<WeatherCondition> {
        self.weather
            .iter()
            .find(|r| r.date == date)
            .map(|r| r.condition)
    }

    /// Pairs of tasks that double-book a piece of equipment: same tag,
    /// overlapping spans.
    pub fn equipment_conflicts(&self) -> Vec<(Uuid, Uuid)> {
        let mut pairs = Vec::new();
        for (i, a) in self.tasks.iter().enumerate() {
            let Some(tag_a) = a.equipment.as_deref().map(str::trim) else {
                continue;
            };
            if tag_a.is_empty() {
                continue;
            }
            for b in &self.tasks[i + 1..] {
                let Some(tag_b) = b.equipment.as_deref().map(str::trim) else {
                    continue;
                };
                if tag_a.eq_ignore_ascii_case(tag_b) && a.overlaps(b) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }

    /// Ids of every task involved in an equipment conflict.
    pub fn conflicted_task_ids(&self) -> HashSet<Uuid> {
        self.equipment_conflicts()
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect()
    }

    /// Ids of the tasks on the longest finish-to-start chain, weighted
    /// by task duration. Empty when the schedule has no dependencies.
    ///
    /// Links pointing at deleted tasks are skipped, and a dependency
    /// cycle terminates the walk instead of recursing forever.
    pub fn critical_path(&self) -> HashSet<Uuid> {
        if self.dependencies.is_empty() {
            return HashSet::new();
        }

        let known: HashSet<Uuid> = self.tasks.iter().map(|t| t.id).collect();
        // Count each task as at least one working day so zero-length
        // milestones still extend the chain they terminate.
        let weight: HashMap<Uuid, i64> = self
            .tasks
            .iter()
            .map(|t| (t.id, t.duration_days() + 1))
            .collect();

        let mut preds: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for dep in &self.dependencies {
            if known.contains(&dep.predecessor) && known.contains(&dep.successor) {
                preds.entry(dep.successor).or_default().push(dep.predecessor);
            }
        }
        if preds.is_empty() {
            return HashSet::new();
        }

        fn chain_length(
            id: Uuid,
            preds: &HashMap<Uuid, Vec<Uuid>>,
            weight: &HashMap<Uuid, i64>,
            memo: &mut HashMap<Uuid, i64>,
            visiting: &mut HashSet<Uuid>,
        ) -> i64 {
            if let Some(&len) = memo.get(&id) {
                return len;
            }
            if !visiting.insert(id) {
                // Cycle: treat this task as a chain start.
                return 0;
            }
            let longest_pred = preds
                .get(&id)
                .into_iter()
                .flatten()
                .map(|&p| chain_length(p, preds, weight, memo, visiting))
                .max()
                .unwrap_or(0);
            visiting.remove(&id);
            let len = longest_pred + weight.get(&id).copied().unwrap_or(1);
            memo.insert(id, len);
            len
        }

        let mut memo = HashMap::new();
        let mut visiting = HashSet::new();
        let end = self
            .tasks
            .iter()
            .map(|t| t.id)
            .max_by_key(|&id| chain_length(id, &preds, &weight, &mut memo, &mut visiting));
        let Some(mut current) = end else {
            return HashSet::new();
        };

        // Walk back along the predecessors that realize the longest chain.
        let mut path = HashSet::new();
        loop {
            path.insert(current);
            let expected = memo.get(&current).copied().unwrap_or(0)
                - weight.get(&current).copied().unwrap_or(1);
            if expected <= 0 {
                break;
            }
            let next = preds
                .get(&current)
                .into_iter()
                .flatten()
                .find(|p| memo.get(*p).copied().unwrap_or(0) == expected && !path.contains(*p));
            match next {
                Some(&p) => current = p,
                None => break,
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn link(from: &Task, to: &Task) -> Dependency {
        Dependency {
            predecessor: from.id,
            successor: to.id,
        }
    }

    #[test]
    fn time_range_pads_task_bounds() {
        let mut schedule = Schedule::new("Test");
        assert!(schedule.time_range().is_none());
        schedule
            .tasks
            .push(Task::new("Excavate", d(2026, 3, 10), d(2026, 3, 20)));
        let range = schedule.time_range().unwrap();
        assert_eq!(range.start, d(2026, 3, 3));
        assert_eq!(range.end, d(2026, 4, 19));
    }

    #[test]
    fn conflicts_require_same_tag_and_overlap() {
        let mut schedule = Schedule::new("Test");
        let mut a = Task::new("Steel erection", d(2026, 3, 1), d(2026, 3, 10));
        a.equipment = Some("Tower Crane TC-1".into());
        let mut b = Task::new("Precast set", d(2026, 3, 8), d(2026, 3, 15));
        b.equipment = Some("tower crane tc-1".into());
        let mut c = Task::new("Roof trusses", d(2026, 3, 20), d(2026, 3, 25));
        c.equipment = Some("Tower Crane TC-1".into());
        let mut e = Task::new("Trenching", d(2026, 3, 8), d(2026, 3, 12));
        e.equipment = Some("Excavator EX-200".into());
        let (a_id, b_id) = (a.id, b.id);
        schedule.tasks = vec![a, b, c, e];

        let pairs = schedule.equipment_conflicts();
        assert_eq!(pairs, vec![(a_id, b_id)]);
        let ids = schedule.conflicted_task_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a_id) && ids.contains(&b_id));
    }

    #[test]
    fn critical_path_picks_longest_branch_of_diamond() {
        let mut schedule = Schedule::new("Test");
        let a = Task::new("Foundations", d(2026, 3, 1), d(2026, 3, 10));
        let b = Task::new("Framing", d(2026, 3, 11), d(2026, 3, 30));
        let c = Task::new("Site fencing", d(2026, 3, 11), d(2026, 3, 13));
        let e = Task::new("Roofing", d(2026, 4, 1), d(2026, 4, 10));
        let deps = vec![link(&a, &b), link(&a, &c), link(&b, &e), link(&c, &e)];
        let (a_id, b_id, c_id, e_id) = (a.id, b.id, c.id, e.id);
        schedule.tasks = vec![a, b, c, e];
        schedule.dependencies = deps;

        let path = schedule.critical_path();
        assert!(path.contains(&a_id));
        assert!(path.contains(&b_id));
        assert!(path.contains(&e_id));
        assert!(!path.contains(&c_id));
    }

    #[test]
    fn critical_path_empty_without_dependencies() {
        let mut schedule = Schedule::new("Test");
        schedule
            .tasks
            .push(Task::new("Long solo task", d(2026, 1, 1), d(2026, 6, 1)));
        assert!(schedule.critical_path().is_empty());
    }

    #[test]
    fn critical_path_survives_cycles_and_dangling_links() {
        let mut schedule = Schedule::new("Test");
        let a = Task::new("A", d(2026, 3, 1), d(2026, 3, 5));
        let b = Task::new("B", d(2026, 3, 6), d(2026, 3, 10));
        let mut deps = vec![link(&a, &b), link(&b, &a)];
        deps.push(Dependency {
            predecessor: Uuid::new_v4(),
            successor: a.id,
        });
        schedule.tasks = vec![a, b];
        schedule.dependencies = deps;
        // Must terminate; exact contents are unimportant under a cycle.
        let _ = schedule.critical_path();
    }

    #[test]
    fn weather_lookup_by_date() {
        let mut schedule = Schedule::new("Test");
        schedule.weather.push(WeatherRecord {
            date: d(2026, 3, 4),
            condition: WeatherCondition::Rain,
        });
        assert_eq!(
            schedule.weather_on(d(2026, 3, 4)),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(schedule.weather_on(d(2026, 3, 5)), None);
    }
}
