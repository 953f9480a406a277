use egui::{menu, RichText, Ui};

use crate::app::SitelineApp;
use crate::model::{OverlayKind, ViewMode};
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut SitelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Schedule").clicked() {
                app.new_schedule();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_schedule();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_schedule();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_schedule_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Config Folder").clicked() {
                if let Some(dir) = crate::io::Settings::config_dir() {
                    let _ = open::that(&dir);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Granularity").small().weak());
            for mode in ViewMode::ALL {
                if ui
                    .radio_value(&mut app.view_mode, mode, mode.label())
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui
                .button(format!(
                    "  {}  Go to Today      Ctrl+T",
                    egui_phosphor::regular::CROSSHAIR
                ))
                .clicked()
            {
                app.go_to_today(true);
                ui.close_menu();
            }
            if ui
                .button(format!(
                    "  {}  Next Milestone",
                    egui_phosphor::regular::FLAG
                ))
                .clicked()
            {
                app.go_to_next_milestone();
                ui.close_menu();
            }
            if ui.button("  Schedule Start").clicked() {
                app.go_to_schedule_start();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Overlays  ").font(theme::font_menu()), |ui| {
            let states: Vec<(OverlayKind, bool)> = app.overlays.iter().collect();
            for (kind, enabled) in states {
                let mut on = enabled;
                let label = format!("{}  {}", kind.icon(), kind.label());
                if ui.checkbox(&mut on, label).changed() {
                    app.overlays.toggle(kind);
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
            if ui.button("CSV Import Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
        });

        // Right-aligned schedule name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.schedule.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
