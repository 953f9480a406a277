use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::io::{self, Settings};
use crate::model::{
    OverlayRegistry, Schedule, Task, TimeRange, Trade, ViewMode, ViewportController,
    WeatherCondition, WeatherRecord,
};
use crate::ui;

/// Main application state.
pub struct SitelineApp {
    pub schedule: Schedule,
    pub range: TimeRange,
    pub viewport: ViewportController,
    pub view_mode: ViewMode,
    pub overlays: OverlayRegistry,
    pub settings: Settings,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<Uuid>,

    // Dialog state
    pub show_add_task: bool,
    pub show_about: bool,
    pub show_csv_help: bool,
    pub new_task_title: String,
    pub new_task_start: NaiveDate,
    pub new_task_due: NaiveDate,
    pub new_task_trade: Trade,
    pub new_task_is_milestone: bool,

    // Status message
    pub status_message: String,

    // Filter / search
    pub search_query: String,

    // Pending actions from nested UI closures
    pub pending_add_dependency: Option<crate::model::Dependency>,
}

impl SitelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = Settings::load();
        let mut file_path = None;
        let schedule = match settings.last_schedule.as_deref() {
            Some(path) => match io::load_schedule(path) {
                Ok(schedule) => {
                    file_path = Some(path.to_path_buf());
                    schedule
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "could not reopen last schedule");
                    Self::sample_schedule()
                }
            },
            None => Self::sample_schedule(),
        };

        let range = schedule.time_range().unwrap_or_else(Self::fallback_range);
        let today = chrono::Local::now().date_naive();

        Self {
            schedule,
            range,
            viewport: ViewportController::default(),
            view_mode: ViewMode::Weeks,
            overlays: OverlayRegistry::default(),
            settings,
            file_path,
            selected_task: None,
            show_add_task: false,
            show_about: false,
            show_csv_help: false,
            new_task_title: String::new(),
            new_task_start: today,
            new_task_due: today + chrono::Duration::days(7),
            new_task_trade: Trade::General,
            new_task_is_milestone: false,
            status_message: "Ready".to_string(),
            search_query: String::new(),
            pending_add_dependency: None,
        }
    }

    fn fallback_range() -> TimeRange {
        let today = chrono::Local::now().date_naive();
        TimeRange::new(
            today - chrono::Duration::days(7),
            today + chrono::Duration::days(30),
        )
    }

    /// Generate a sample schedule for demonstration.
    fn sample_schedule() -> Schedule {
        let today = chrono::Local::now().date_naive();
        let day = |n: i64| today + chrono::Duration::days(n);
        let mut schedule = Schedule::new("Ridgeline Business Park — Building A");

        let mut mobilization = Task::new("Mobilization", day(-10), day(-6));
        mobilization.trade = Trade::Sitework;
        mobilization.color = Trade::Sitework.color();
        mobilization.progress = 1.0;

        let mut clearing = Task::new("Site clearing & grubbing", day(-6), day(-1));
        clearing.trade = Trade::Sitework;
        clearing.color = Trade::Sitework.color();
        clearing.progress = 1.0;
        clearing.equipment = Some("Dozer D6".to_string());

        let mut excavation = Task::new("Bulk excavation", day(-2), day(6));
        excavation.trade = Trade::Sitework;
        excavation.color = Trade::Sitework.color();
        excavation.progress = 0.4;
        excavation.crew = Some("Crew A".to_string());
        excavation.equipment = Some("Excavator EX-200".to_string());

        let mut footings = Task::new("Footings & foundation pour", day(4), day(16));
        footings.trade = Trade::Concrete;
        footings.color = Trade::Concrete.color();
        footings.crew = Some("Crew B".to_string());
        footings.equipment = Some("Concrete Pump CP-2".to_string());
        footings.weather_sensitive = true;

        let mut crane = Task::new("Tower crane erection", day(8), day(10));
        crane.trade = Trade::General;
        crane.equipment = Some("Tower Crane TC-1".to_string());

        let mut steel = Task::new("Structural steel", day(12), day(34));
        steel.trade = Trade::Framing;
        steel.color = Trade::Framing.color();
        steel.crew = Some("Ironworks Co".to_string());
        steel.equipment = Some("Tower Crane TC-1".to_string());

        // Double-books the tower crane against structural steel.
        let mut precast = Task::new("Precast panel set", day(30), day(40));
        precast.trade = Trade::Framing;
        precast.color = Trade::Framing.color();
        precast.equipment = Some("Tower Crane TC-1".to_string());

        let mut roofing = Task::new("Roofing membrane", day(36), day(48));
        roofing.trade = Trade::Roofing;
        roofing.color = Trade::Roofing.color();
        roofing.crew = Some("Crew C".to_string());
        roofing.weather_sensitive = true;

        let mut electrical = Task::new("Electrical rough-in", day(38), day(55));
        electrical.trade = Trade::Electrical;
        electrical.color = Trade::Electrical.color();
        electrical.crew = Some("Sparks Ltd".to_string());

        let mut plumbing = Task::new("Plumbing rough-in", day(38), day(52));
        plumbing.trade = Trade::Plumbing;
        plumbing.color = Trade::Plumbing.color();

        let mut hvac = Task::new("HVAC ducting", day(42), day(58));
        hvac.trade = Trade::Hvac;
        hvac.color = Trade::Hvac.color();

        let mut finishes = Task::new("Interior finishes", day(58), day(80));
        finishes.trade = Trade::Finishes;
        finishes.color = Trade::Finishes.color();

        let m_foundations = Task::milestone("Foundations complete", day(16));
        let m_dryin = Task::milestone("Dry-in", day(48));
        let m_completion = Task::milestone("Substantial completion", day(85));

        let link = |from: &Task, to: &Task| crate::model::Dependency {
            predecessor: from.id,
            successor: to.id,
        };
        schedule.dependencies = vec![
            link(&mobilization, &clearing),
            link(&clearing, &excavation),
            link(&excavation, &footings),
            link(&footings, &m_foundations),
            link(&footings, &crane),
            link(&crane, &steel),
            link(&steel, &roofing),
            link(&roofing, &m_dryin),
            link(&roofing, &electrical),
            link(&electrical, &finishes),
            link(&finishes, &m_completion),
        ];

        schedule.weather = vec![
            WeatherRecord {
                date: day(2),
                condition: WeatherCondition::Rain,
            },
            WeatherRecord {
                date: day(3),
                condition: WeatherCondition::Rain,
            },
            WeatherRecord {
                date: day(5),
                condition: WeatherCondition::Clear,
            },
            WeatherRecord {
                date: day(9),
                condition: WeatherCondition::HighWind,
            },
            WeatherRecord {
                date: day(11),
                condition: WeatherCondition::Overcast,
            },
        ];

        schedule.tasks = vec![
            mobilization,
            clearing,
            excavation,
            footings,
            m_foundations,
            crane,
            steel,
            precast,
            roofing,
            m_dryin,
            electrical,
            plumbing,
            hvac,
            finishes,
            m_completion,
        ];
        schedule
    }

    // --- File operations ---

    pub fn new_schedule(&mut self) {
        self.schedule = Schedule::default();
        self.file_path = None;
        self.selected_task = None;
        self.recalculate_range();
        self.status_message = "New schedule created".to_string();
    }

    pub fn open_schedule(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Siteline Schedule", &["siteline.json", "json"])
            .pick_file()
        {
            match io::load_schedule(&path) {
                Ok(schedule) => {
                    self.schedule = schedule;
                    self.remember_file(path);
                    self.selected_task = None;
                    self.recalculate_range();
                    self.status_message = "Schedule loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_schedule(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.schedule.touch();
            match io::save_schedule(&self.schedule, &path) {
                Ok(()) => self.status_message = "Schedule saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_schedule_as();
        }
    }

    pub fn save_schedule_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Siteline Schedule", &["siteline.json", "json"])
            .set_file_name(&format!("{}.siteline.json", self.schedule.name))
            .save_file()
        {
            self.schedule.touch();
            match io::save_schedule(&self.schedule, &path) {
                Ok(()) => {
                    self.remember_file(path);
                    self.status_message = "Schedule saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    fn remember_file(&mut self, path: PathBuf) {
        self.settings.last_schedule = Some(path.clone());
        self.file_path = Some(path);
        if let Err(e) = self.settings.save() {
            debug!(error = %e, "could not persist settings");
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if current schedule has tasks, confirm before replacing
        if !self.schedule.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current schedule. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::csv_import::import_csv(&path) {
                Ok((tasks, skipped)) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Schedule")
                        .to_string();

                    let count = tasks.len();
                    self.schedule = Schedule::new(name);
                    self.schedule.tasks = tasks;
                    self.file_path = None;
                    self.selected_task = None;
                    self.recalculate_range();

                    self.status_message = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.schedule.tasks.is_empty() {
            self.status_message = "Nothing to export — schedule has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.schedule.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match io::csv_export::export_csv(&self.schedule.tasks, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Task operations ---

    pub fn create_task_from_dialog(&mut self) {
        let title = if self.new_task_title.is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_title.clone()
        };

        let start = self.new_task_start;
        let due = if self.new_task_due >= start {
            self.new_task_due
        } else {
            start + chrono::Duration::days(7)
        };

        let task = if self.new_task_is_milestone {
            Task::milestone(title, due)
        } else {
            let mut t = Task::new(title, start, due);
            t.trade = self.new_task_trade;
            t.color = self.new_task_trade.color();
            t
        };

        self.selected_task = Some(task.id);
        self.schedule.tasks.push(task);
        self.schedule.touch();
        self.recalculate_range();
        self.reset_dialog_fields();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: Uuid) {
        self.schedule.tasks.retain(|t| t.id != id);
        self.schedule
            .dependencies
            .retain(|d| d.predecessor != id && d.successor != id);
        self.schedule.touch();
        self.recalculate_range();
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        self.status_message = "Task deleted".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_task_title = String::new();
        self.new_task_start = today;
        self.new_task_due = today + chrono::Duration::days(7);
        self.new_task_trade = Trade::General;
        self.new_task_is_milestone = false;
    }

    pub fn recalculate_range(&mut self) {
        self.range = self
            .schedule
            .time_range()
            .unwrap_or_else(Self::fallback_range);
    }

    // --- Navigation ---

    pub fn go_to_today(&mut self, smooth: bool) {
        let today = chrono::Local::now().date_naive();
        self.viewport.center_on_date(today, &self.range, smooth);
        self.status_message = "Centered on today".to_string();
    }

    pub fn go_to_schedule_start(&mut self) {
        self.viewport.scroll_to(0.0, true);
        self.status_message = "Scrolled to schedule start".to_string();
    }

    pub fn go_to_next_milestone(&mut self) {
        let today = chrono::Local::now().date_naive();
        let next = self
            .schedule
            .tasks
            .iter()
            .filter(|t| t.is_milestone && t.due >= today)
            .min_by_key(|t| t.due);
        match next {
            Some(milestone) => {
                let (id, due, title) = (milestone.id, milestone.due, milestone.title.clone());
                self.viewport.center_on_date(due, &self.range, true);
                self.selected_task = Some(id);
                self.status_message = format!("Next milestone: {}", title);
            }
            None => {
                self.status_message = "No upcoming milestones".to_string();
            }
        }
    }
}

impl eframe::App for SitelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let should_go_today = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::T));
        if should_save {
            self.save_schedule();
        }
        if should_go_today {
            self.go_to_today(true);
        }

        if let Some(dep) = self.pending_add_dependency.take() {
            let exists = self.schedule.dependencies.iter().any(|d| {
                d.predecessor == dep.predecessor && d.successor == dep.successor
            });
            if !exists {
                let pred = self
                    .schedule
                    .task(dep.predecessor)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                let succ = self
                    .schedule
                    .task(dep.successor)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.schedule.dependencies.push(dep);
                self.schedule.touch();
                self.status_message = format!("Linked '{}' → '{}'", pred, succ);
            }
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.schedule.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(self.view_mode.label())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task editor + table
        let mut task_action = ui::task_table::TaskTableAction::None;
        let mut editor_changed = false;
        let mut dep_remove: Option<(Uuid, Uuid)> = None;
        egui::SidePanel::left("task_panel")
            .default_width(ui::theme::SIDE_PANEL_DEFAULT_WIDTH)
            .min_width(ui::theme::SIDE_PANEL_MIN_WIDTH)
            .max_width(ui::theme::SIDE_PANEL_DEFAULT_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected_task {
                    let deps_snapshot: Vec<_> = self.schedule.dependencies.clone();
                    let tasks_snapshot: Vec<_> = self.schedule.tasks.clone();
                    if let Some(task) =
                        self.schedule.tasks.iter_mut().find(|t| t.id == sel_id)
                    {
                        let result = ui::task_editor::show_task_editor(
                            task,
                            &tasks_snapshot,
                            &deps_snapshot,
                            ui,
                        );
                        match result {
                            ui::task_editor::EditorAction::Changed => {
                                editor_changed = true;
                            }
                            ui::task_editor::EditorAction::RemoveDependency(from, to) => {
                                dep_remove = Some((from, to));
                            }
                            ui::task_editor::EditorAction::AddDependency(dep) => {
                                self.pending_add_dependency = Some(dep);
                            }
                            ui::task_editor::EditorAction::None => {}
                        }
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                task_action = ui::task_table::show_task_table(
                    &self.schedule.tasks,
                    self.selected_task,
                    &mut self.search_query,
                    ui,
                );
            });

        match task_action {
            ui::task_table::TaskTableAction::Select(id) => {
                self.selected_task = Some(id);
            }
            ui::task_table::TaskTableAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::task_table::TaskTableAction::Add => {
                self.show_add_task = true;
            }
            ui::task_table::TaskTableAction::None => {}
        }

        if editor_changed {
            self.schedule.touch();
            self.recalculate_range();
            self.status_message = "Task updated".to_string();
        }
        if let Some((from, to)) = dep_remove {
            self.schedule
                .dependencies
                .retain(|d| !(d.predecessor == from && d.successor == to));
            self.schedule.touch();
            self.status_message = "Link removed".to_string();
        }

        // Central panel: the schedule chart
        let conflicted = self.schedule.conflicted_task_ids();
        let critical = self.schedule.critical_path();
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::gantt_chart::show_gantt_chart(
                &mut self.schedule.tasks,
                &self.schedule.weather,
                &conflicted,
                &critical,
                &self.range,
                &mut self.viewport,
                self.view_mode,
                &self.overlays,
                &mut self.selected_task,
                ui,
            );
            if interaction.changed {
                self.schedule.touch();
                if let Some(selected) = self.selected_task {
                    if let Some(task) = self.schedule.task(selected) {
                        let (start, due) = task.span();
                        self.status_message = format!(
                            "Updated '{}' ({} → {})",
                            task.title,
                            start.format("%Y-%m-%d"),
                            due.format("%Y-%m-%d")
                        );
                    } else {
                        self.status_message = "Schedule updated".to_string();
                    }
                } else {
                    self.status_message = "Schedule updated".to_string();
                }
            }
        });

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
