use egui::{Color32, Id, RichText, Ui};
use uuid::Uuid;

use crate::model::task::{Dependency, Task, Trade};
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    RemoveDependency(Uuid, Uuid),
    AddDependency(Dependency),
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Render an inline editor for the selected task, including its
/// predecessor links.
pub fn show_task_editor(
    task: &mut Task,
    all_tasks: &[Task],
    dependencies: &[Dependency],
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let task_id = task.id;

    ui.add_space(6.0);
    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(5.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "Title");
        let title_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut task.title)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if title_edit.changed() {
            action = EditorAction::Changed;
        }

        ui.add_space(2.0);

        field_label(ui, "Trade");
        egui::ComboBox::from_id_salt("trade_combo")
            .selected_text(RichText::new(task.trade.label()).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for trade in Trade::ALL {
                    if ui
                        .selectable_value(&mut task.trade, trade, trade.label())
                        .changed()
                    {
                        task.color = trade.color();
                        action = EditorAction::Changed;
                    }
                }
            });

        ui.add_space(2.0);

        // ── Dates ───────────────────────────────────────────────────
        if task.is_milestone {
            field_label(ui, "Date");
            let resp = ui.add(egui_extras::DatePickerButton::new(&mut task.due).id_salt("dp_due"));
            if resp.changed() {
                action = EditorAction::Changed;
            }
        } else {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Start");
                    match task.start {
                        Some(mut start) => {
                            let resp = ui.add(
                                egui_extras::DatePickerButton::new(&mut start).id_salt("dp_start"),
                            );
                            if resp.changed() {
                                if start > task.due {
                                    task.due = start;
                                }
                                task.start = Some(start);
                                action = EditorAction::Changed;
                            }
                        }
                        None => {
                            if ui.button("Schedule...").clicked() {
                                task.start = Some(task.due);
                                action = EditorAction::Changed;
                            }
                        }
                    }
                });

                ui.add_space(8.0);

                ui.vertical(|ui| {
                    field_label(ui, "Due");
                    let resp =
                        ui.add(egui_extras::DatePickerButton::new(&mut task.due).id_salt("dp_due"));
                    if resp.changed() {
                        if let Some(start) = task.start {
                            if task.due < start {
                                task.start = Some(task.due);
                            }
                        }
                        action = EditorAction::Changed;
                    }
                });
            });
        }

        ui.add_space(2.0);

        if !task.is_milestone {
            field_label(ui, "Progress");
            let slider = egui::Slider::new(&mut task.progress, 0.0..=1.0)
                .custom_formatter(|v, _| format!("{:.0}%", v * 100.0))
                .custom_parser(|s| {
                    let s = s.trim().trim_end_matches('%');
                    s.parse::<f64>().ok().map(|v| v / 100.0)
                });
            if ui.add_sized([ui.available_width(), 20.0], slider).changed() {
                action = EditorAction::Changed;
            }
            ui.add_space(2.0);
        }

        // ── Crew / equipment ──────────────────────────────────────────
        field_label(ui, "Crew");
        let mut crew = task.crew.clone().unwrap_or_default();
        let crew_resp = ui.add_sized(
            [ui.available_width(), 22.0],
            egui::TextEdit::singleline(&mut crew).hint_text("Unassigned"),
        );
        if crew_resp.changed() {
            task.crew = (!crew.is_empty()).then_some(crew);
            action = EditorAction::Changed;
        }

        field_label(ui, "Equipment");
        let mut equipment = task.equipment.clone().unwrap_or_default();
        let equip_resp = ui.add_sized(
            [ui.available_width(), 22.0],
            egui::TextEdit::singleline(&mut equipment).hint_text("None reserved"),
        );
        if equip_resp.changed() {
            task.equipment = (!equipment.is_empty()).then_some(equipment);
            action = EditorAction::Changed;
        }

        ui.add_space(2.0);

        ui.horizontal(|ui| {
            if ui
                .checkbox(&mut task.weather_sensitive, "Weather sensitive")
                .changed()
            {
                action = EditorAction::Changed;
            }
        });
        ui.horizontal(|ui| {
            let mut is_milestone = task.is_milestone;
            if ui.checkbox(&mut is_milestone, "Milestone").changed() {
                task.is_milestone = is_milestone;
                if is_milestone {
                    task.start = None;
                }
                action = EditorAction::Changed;
            }
        });

        ui.add_space(2.0);

        field_label(ui, "Notes");
        let notes_resp = ui.add_sized(
            [ui.available_width(), 50.0],
            egui::TextEdit::multiline(&mut task.notes)
                .font(egui::FontId::proportional(11.0))
                .text_color(theme::TEXT_SECONDARY)
                .hint_text("Site notes, RFIs, hold points..."),
        );
        if notes_resp.changed() {
            action = EditorAction::Changed;
        }

        ui.add_space(2.0);

        field_label(ui, "Color");
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for color in theme::task_palette() {
                let is_current = task.color == color;
                let size = if is_current { 20.0 } else { 16.0 };
                let (rect, resp) =
                    ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

                ui.painter()
                    .rect_filled(rect, egui::Rounding::same(3.0), color);
                if is_current {
                    ui.painter().rect_stroke(
                        rect.expand(1.0),
                        egui::Rounding::same(4.0),
                        egui::Stroke::new(2.0, Color32::WHITE),
                    );
                }

                if resp.clicked() {
                    task.color = color;
                    action = EditorAction::Changed;
                }
            }
        });

        ui.add_space(4.0);
        ui.separator();
        ui.add_space(2.0);

        // ── Predecessors ─────────────────────────────────────────────
        field_label(ui, "Predecessors");
        ui.add_space(2.0);

        let incoming: Vec<&Dependency> = dependencies
            .iter()
            .filter(|d| d.successor == task_id)
            .collect();
        if incoming.is_empty() {
            ui.label(
                RichText::new("Starts independently")
                    .size(9.5)
                    .color(theme::TEXT_DIM),
            );
        } else {
            for dep in &incoming {
                let pred_title = all_tasks
                    .iter()
                    .find(|t| t.id == dep.predecessor)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| "?".to_string());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            egui_phosphor::regular::ARROW_RIGHT,
                            pred_title
                        ))
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let del = ui.add(
                            egui::Button::new(
                                RichText::new(egui_phosphor::regular::X)
                                    .size(9.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .frame(false),
                        );
                        if del.on_hover_text("Remove link").clicked() {
                            action =
                                EditorAction::RemoveDependency(dep.predecessor, dep.successor);
                        }
                    });
                });
            }
        }

        // Candidates: any other task not already linked as a predecessor.
        let linked: Vec<Uuid> = incoming.iter().map(|d| d.predecessor).collect();
        let candidates: Vec<(Uuid, String)> = all_tasks
            .iter()
            .filter(|t| t.id != task_id && !linked.contains(&t.id))
            .map(|t| (t.id, t.title.clone()))
            .collect();

        if !candidates.is_empty() {
            let picker_id = Id::new(("pred-picker", task_id));
            let mut picked: Option<Uuid> =
                ui.ctx().data_mut(|d| d.get_temp(picker_id)).flatten();

            let picked_label = picked
                .and_then(|id| candidates.iter().find(|(cid, _)| *cid == id))
                .map(|(_, title)| title.clone())
                .unwrap_or_else(|| "— pick task —".to_string());

            ui.horizontal(|ui| {
                let combo_w = (ui.available_width() - 30.0).clamp(60.0, 220.0);
                egui::ComboBox::from_id_salt("new-pred")
                    .selected_text(RichText::new(&picked_label).size(11.0))
                    .width(combo_w)
                    .show_ui(ui, |ui| {
                        for (cid, ctitle) in &candidates {
                            if ui
                                .selectable_label(picked == Some(*cid), ctitle.as_str())
                                .clicked()
                            {
                                picked = Some(*cid);
                            }
                        }
                    });

                let can_add = picked.is_some();
                let btn = egui::Button::new(
                    RichText::new(egui_phosphor::regular::PLUS)
                        .size(12.0)
                        .color(Color32::WHITE),
                )
                .fill(if can_add { theme::ACCENT } else { theme::BG_FIELD })
                .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(can_add, btn).clicked() {
                    if let Some(predecessor) = picked {
                        action = EditorAction::AddDependency(Dependency {
                            predecessor,
                            successor: task_id,
                        });
                        picked = None;
                    }
                }
            });

            ui.ctx().data_mut(|d| d.insert_temp(picker_id, picked));
        }
    });

    action
}
