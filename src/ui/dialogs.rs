use egui::{Color32, Context, RichText, Window};

use crate::app::SitelineApp;
use crate::model::Trade;
use crate::ui::theme;

/// Render the "Add Task" dialog.
pub fn show_add_task_dialog(app: &mut SitelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_task_title)
                            .hint_text("Task title...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Trade").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_trade")
                        .selected_text(app.new_task_trade.label())
                        .show_ui(ui, |ui| {
                            for trade in Trade::ALL {
                                ui.selectable_value(&mut app.new_task_trade, trade, trade.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_start)
                            .id_salt("dlg_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Due").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_due)
                            .id_salt("dlg_dp_due"),
                    );
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut app.new_task_is_milestone, "Milestone");
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_task_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut SitelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Siteline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A construction schedule planner");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut SitelineApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Required Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_required")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.end_row();

                        ui.label(RichText::new("Title").strong());
                        ui.label("Title, Task, Task Name, Name, Activity, Work Item");
                        ui.end_row();

                        ui.label(RichText::new("Due Date").strong());
                        ui.label("Due, Due Date, End, End Date, Finish, Completion");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Optional Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_optional")
                    .num_columns(3)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers").underline());
                        ui.label(RichText::new("Accepted values").underline());
                        ui.end_row();

                        ui.label(RichText::new("Start Date").strong());
                        ui.label("Start, Start Date, From, Begin, Mobilize");
                        ui.label("Empty = unscheduled (task sits on its due date)");
                        ui.end_row();

                        ui.label(RichText::new("Status").strong());
                        ui.label("Status, State, Progress, Stage");
                        ui.label("Finished / Done / In Progress / Mobilizing / Not Started");
                        ui.end_row();

                        ui.label(RichText::new("Trade").strong());
                        ui.label("Trade, Discipline, Division");
                        ui.label("Sitework / Concrete / Framing / Roofing / Electrical / ...");
                        ui.end_row();

                        ui.label(RichText::new("Crew").strong());
                        ui.label("Crew, Foreman, Subcontractor, Assignee");
                        ui.label("Any text");
                        ui.end_row();

                        ui.label(RichText::new("Equipment").strong());
                        ui.label("Equipment, Plant, Machine, Rig");
                        ui.label("Tag shared by tasks reserving the same unit");
                        ui.end_row();

                        ui.label(RichText::new("Milestone").strong());
                        ui.label("Milestone, Is Milestone, Type");
                        ui.label("true / false / yes / no / 1 / milestone");
                        ui.end_row();

                        ui.label(RichText::new("Notes").strong());
                        ui.label("Notes, Description, Details, Comment");
                        ui.label("Any text");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Supported Date Formats").strong());
                ui.add_space(2.0);
                for fmt in &[
                    "YYYY-MM-DD   (e.g. 2026-06-15)",
                    "DD/MM/YYYY   (e.g. 15/06/2026)",
                    "MM/DD/YYYY   (e.g. 06/15/2026)",
                    "DD-MM-YYYY   (e.g. 15-06-2026)",
                    "DD.MM.YYYY   (e.g. 15.06.2026)",
                    "YYYY/MM/DD   (e.g. 2026/06/15)",
                ] {
                    ui.label(RichText::new(*fmt).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Header matching is case-insensitive and ignores spaces, hyphens and underscores.",
                    "• A task whose start date equals its due date is imported as a milestone.",
                    "• Tasks sharing an equipment tag with overlapping dates light up the conflict overlay.",
                    "• Rows with a missing title or an invalid due date are skipped.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Minimal Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Title;Start Date;Due Date;Status;Trade;Equipment\n\
                               Excavation;01/02/2026;20/02/2026;In Progress;Sitework;Excavator EX-200\n\
                               Foundation pour;21/02/2026;10/03/2026;Not Started;Concrete;\n\
                               Dry-in;;15/04/2026;Not Started;;";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
