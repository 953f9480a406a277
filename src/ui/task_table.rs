use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::Task;
use crate::ui::theme;

/// Actions that the task table can request.
pub enum TaskTableAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Case-insensitive match against title, crew, and equipment.
fn matches_query(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query)
        || task.trade.label().to_lowercase().contains(&query)
        || task
            .crew
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query))
        || task
            .equipment
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(&query))
}

/// Render the left-side task list panel.
pub fn show_task_table(
    tasks: &[Task],
    selected_task: Option<Uuid>,
    search_query: &mut String,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TaskTableAction::Add;
    }

    ui.add_space(4.0);

    // Search / filter box
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                .size(12.0)
                .color(theme::TEXT_DIM),
        );
        let search = egui::TextEdit::singleline(search_query)
            .hint_text("Filter by title, trade, crew...")
            .desired_width(ui.available_width() - 22.0);
        ui.add(search);
        if !search_query.is_empty() {
            let clear = ui.add(
                egui::Button::new(
                    RichText::new(egui_phosphor::regular::X)
                        .size(10.0)
                        .color(theme::TEXT_DIM),
                )
                .frame(false),
            );
            if clear.clicked() {
                search_query.clear();
            }
        }
    });

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches_query(t, search_query))
        .collect();

    if visible.is_empty() {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(if tasks.is_empty() {
                    "No tasks yet"
                } else {
                    "No tasks match the filter"
                })
                .size(11.0)
                .color(theme::TEXT_DIM),
            );
        });
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in visible.iter().enumerate() {
                let is_selected = selected_task == Some(task.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Trade color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, task.color);

                        let title = if task.is_milestone {
                            format!("◆ {}", task.title)
                        } else {
                            task.title.clone()
                        };
                        let title_text =
                            RichText::new(title).size(12.0).color(if is_selected {
                                Color32::WHITE
                            } else {
                                theme::TEXT_PRIMARY
                            });
                        ui.add(egui::Label::new(title_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                let del = ui.add(
                                    egui::Button::new(
                                        RichText::new(egui_phosphor::regular::X)
                                            .size(10.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del.on_hover_text("Delete task").clicked() {
                                    action = TaskTableAction::Delete(task.id);
                                }
                                ui.label(
                                    RichText::new(task.due.format("%d %b").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(
                                    RichText::new(task.trade.label())
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                );
                            },
                        );
                    });
                });

                if frame_resp
                    .response
                    .interact(egui::Sense::click())
                    .clicked()
                {
                    action = TaskTableAction::Select(task.id);
                }
            }
        });

    action
}
