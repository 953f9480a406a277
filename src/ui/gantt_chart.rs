use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::timeline::{bar_label, TimeRange, ViewMode};
use crate::model::viewport::{date_to_offset, ViewportController, ViewportGeometry};
use crate::model::{OverlayKind, OverlayRegistry, Task, WeatherRecord};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

#[derive(Debug, Clone)]
struct DragSnapshot {
    start: Option<NaiveDate>,
    due: NaiveDate,
    start_pointer_x: f32,
}

/// Span and crew/equipment of the task currently being dragged, for the
/// collision-hint pass.
struct ActiveDrag {
    id: Uuid,
    row: usize,
    span: (NaiveDate, NaiveDate),
    crew: Option<String>,
    equipment: Option<String>,
}

/// Result details from interactions in the chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub changed: bool,
}

/// Render the schedule chart (central panel).
#[allow(clippy::too_many_arguments)]
pub fn show_gantt_chart(
    tasks: &mut [Task],
    weather: &[WeatherRecord],
    conflicted: &HashSet<Uuid>,
    critical: &HashSet<Uuid>,
    range: &TimeRange,
    controller: &mut ViewportController,
    view_mode: ViewMode,
    overlays: &OverlayRegistry,
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();

    let chart_width = (range.total_days() as f32 * view_mode.pixels_per_day()).max(available.x);
    controller.set_geometry(ViewportGeometry::new(chart_width, available.x));
    let geometry = controller.geometry();
    let day_width = chart_width / range.total_days().max(1) as f32;

    let chart_height = HEADER_HEIGHT + (tasks.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    let dt = ui.input(|i| i.stable_dt).min(0.1);
    let mut scroll_area = egui::ScrollArea::both().auto_shrink([false, false]);
    if let Some(x) = controller.advance(dt) {
        scroll_area = scroll_area.horizontal_scroll_offset(x);
    }
    if controller.is_animating() {
        ui.ctx().request_repaint();
    }

    let output = scroll_area.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(chart_width, chart_height.max(available.y)),
            Sense::click(),
        );
        let origin = response.rect.min;
        let mut consumed_click = false;
        let mut active_drag: Option<ActiveDrag> = None;

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        if overlays.is_enabled(OverlayKind::Weather) {
            draw_weather_bands(&painter, origin, range, &geometry, day_width, weather, chart_height);
        }

        draw_timeline_header(&painter, origin, range, &geometry, view_mode, chart_width);
        draw_today_line(&painter, origin, range, &geometry, chart_height);

        // Alternating row backgrounds
        for (i, _task) in tasks.iter().enumerate() {
            let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
            let row_bg = if i % 2 == 0 {
                theme::BG_PANEL
            } else {
                theme::BG_DARK
            };
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                ),
                0.0,
                row_bg,
            );
            painter.line_segment(
                [
                    Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                    Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                ],
                Stroke::new(0.5, theme::BORDER_SUBTLE),
            );
        }

        for (i, task) in tasks.iter_mut().enumerate() {
            let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
            let is_selected = *selected_task == Some(task.id);

            if task.is_milestone {
                // The row keeps its slot even when the layer is hidden.
                if !overlays.is_enabled(OverlayKind::Milestones) {
                    continue;
                }
                let marker_rect =
                    draw_milestone(&painter, origin, range, &geometry, task, y, is_selected);
                let response = ui.interact(
                    marker_rect.expand(6.0),
                    ui.make_persistent_id(("milestone", task.id)),
                    Sense::click_and_drag(),
                );

                if response.clicked() {
                    *selected_task = Some(task.id);
                    consumed_click = true;
                }

                if response.drag_started() {
                    let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    ui.ctx().data_mut(|data| {
                        data.insert_temp(
                            drag_id(task.id, "milestone"),
                            DragSnapshot {
                                start: task.start,
                                due: task.due,
                                start_pointer_x: ptr_x,
                            },
                        );
                    });
                }

                if response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                    let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    let snapshot = ui
                        .ctx()
                        .data_mut(|data| data.get_temp::<DragSnapshot>(drag_id(task.id, "milestone")));
                    if let Some(snapshot) = snapshot {
                        let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, day_width);
                        task.due = snapshot.due + chrono::Duration::days(day_delta);
                        interaction.changed = true;
                        *selected_task = Some(task.id);
                    }
                }

                if response.drag_stopped() {
                    ui.ctx().data_mut(|data| {
                        data.remove::<DragSnapshot>(drag_id(task.id, "milestone"));
                    });
                }

                if response.hovered() {
                    show_task_tooltip(ui, task);
                }
                continue;
            }

            let bar_rect = draw_task_bar(
                &painter, origin, range, &geometry, task, y, is_selected, view_mode,
            );

            if overlays.is_enabled(OverlayKind::CriticalPath) && critical.contains(&task.id) {
                painter.rect_stroke(
                    bar_rect.expand(2.5),
                    Rounding::same(theme::BAR_ROUNDING + 2.5),
                    Stroke::new(2.0, theme::CRITICAL_STROKE),
                );
            }
            if overlays.is_enabled(OverlayKind::Conflicts) && conflicted.contains(&task.id) {
                painter.rect_stroke(
                    bar_rect.expand(1.0),
                    Rounding::same(theme::BAR_ROUNDING),
                    Stroke::new(2.0, theme::CONFLICT_STROKE),
                );
                painter.text(
                    Pos2::new(bar_rect.right() + 6.0, bar_rect.center().y),
                    egui::Align2::LEFT_CENTER,
                    egui_phosphor::regular::WARNING,
                    theme::font_sub(),
                    theme::CONFLICT_STROKE,
                );
            }

            let bar_response = ui.interact(
                bar_rect,
                ui.make_persistent_id(("task-bar", task.id)),
                Sense::click_and_drag(),
            );
            let left_handle_rect = Rect::from_min_max(
                Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
            );
            let right_handle_rect = Rect::from_min_max(
                Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
            );

            let left_response = ui.interact(
                left_handle_rect.expand(4.0),
                ui.make_persistent_id(("task-resize-left", task.id)),
                Sense::drag(),
            );
            let right_response = ui.interact(
                right_handle_rect.expand(4.0),
                ui.make_persistent_id(("task-resize-right", task.id)),
                Sense::drag(),
            );

            if bar_response.clicked() {
                *selected_task = Some(task.id);
                consumed_click = true;
            }

            for (response, mode) in [
                (&left_response, "left"),
                (&right_response, "right"),
                (&bar_response, "move"),
            ] {
                if response.drag_started() {
                    let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    ui.ctx().data_mut(|data| {
                        data.insert_temp(
                            drag_id(task.id, mode),
                            DragSnapshot {
                                start: task.start,
                                due: task.due,
                                start_pointer_x: ptr_x,
                            },
                        );
                    });
                }
            }
            if bar_response.drag_started()
                || left_response.drag_started()
                || right_response.drag_started()
            {
                *selected_task = Some(task.id);
                consumed_click = true;
            }

            if left_response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                let ptr_x = left_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                let snapshot = ui
                    .ctx()
                    .data_mut(|data| data.get_temp::<DragSnapshot>(drag_id(task.id, "left")));
                if let Some(snapshot) = snapshot {
                    let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, day_width);
                    let anchor = snapshot.start.unwrap_or(snapshot.due);
                    task.start = Some((anchor + chrono::Duration::days(day_delta)).min(snapshot.due));
                    interaction.changed = true;
                }
            } else if right_response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                let ptr_x = right_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                let snapshot = ui
                    .ctx()
                    .data_mut(|data| data.get_temp::<DragSnapshot>(drag_id(task.id, "right")));
                if let Some(snapshot) = snapshot {
                    let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, day_width);
                    let floor = snapshot.start.unwrap_or(snapshot.due);
                    task.due = (snapshot.due + chrono::Duration::days(day_delta)).max(floor);
                    interaction.changed = true;
                }
            } else if bar_response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                let ptr_x = bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                let snapshot = ui
                    .ctx()
                    .data_mut(|data| data.get_temp::<DragSnapshot>(drag_id(task.id, "move")));
                if let Some(snapshot) = snapshot {
                    let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, day_width);
                    task.start = snapshot.start.map(|s| s + chrono::Duration::days(day_delta));
                    task.due = snapshot.due + chrono::Duration::days(day_delta);
                    interaction.changed = true;
                }
            }

            if left_response.dragged() || right_response.dragged() || bar_response.dragged() {
                active_drag = Some(ActiveDrag {
                    id: task.id,
                    row: i,
                    span: task.span(),
                    crew: task.crew.clone(),
                    equipment: task.equipment.clone(),
                });
            }

            for mode in ["left", "right", "move"] {
                let stopped = match mode {
                    "left" => left_response.drag_stopped(),
                    "right" => right_response.drag_stopped(),
                    _ => bar_response.drag_stopped(),
                };
                if stopped {
                    ui.ctx().data_mut(|data| {
                        data.remove::<DragSnapshot>(drag_id(task.id, mode));
                    });
                }
            }

            if is_selected || left_response.hovered() || right_response.hovered() {
                if left_response.hovered() || right_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                let handle_h = bar_rect.height() * 0.55;
                let handle_y = bar_rect.center().y - handle_h / 2.0;
                let lh = Rect::from_min_size(
                    Pos2::new(bar_rect.left() - 1.5, handle_y),
                    Vec2::new(4.0, handle_h),
                );
                let rh = Rect::from_min_size(
                    Pos2::new(bar_rect.right() - 2.5, handle_y),
                    Vec2::new(4.0, handle_h),
                );
                painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
            }

            if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                show_task_tooltip(ui, task);
            }
        }

        if let Some(drag) = &active_drag {
            if overlays.is_enabled(OverlayKind::DropZones) {
                let y = origin.y + HEADER_HEIGHT + drag.row as f32 * (ROW_HEIGHT + ROW_PADDING);
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    theme::DROP_ZONE_BG,
                );
            }
            if overlays.is_enabled(OverlayKind::SmartCollisions) {
                draw_collision_hints(&painter, origin, range, &geometry, tasks, drag);
            }
        }

        if overlays.is_enabled(OverlayKind::Performance) {
            let text = format!("{:.1} ms · {} tasks", dt * 1000.0, tasks.len());
            painter.text(
                Pos2::new(
                    origin.x + controller.offset() + available.x - 10.0,
                    origin.y + chart_height.max(available.y) - 12.0,
                ),
                egui::Align2::RIGHT_CENTER,
                text,
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }

        // Empty click on background clears selection
        if response.clicked() && !consumed_click {
            *selected_task = None;
        }
    });

    controller.sync(output.state.offset.x);

    interaction
}

fn drag_id(task_id: Uuid, mode: &'static str) -> Id {
    Id::new(("drag", task_id, mode))
}

fn drag_days(delta_x: f32, day_width: f32) -> i64 {
    if day_width <= 0.0 {
        return 0;
    }
    (delta_x / day_width).round() as i64
}

fn show_task_tooltip(ui: &Ui, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id)),
        |ui| {
            ui.strong(&task.title);
            let (start, due) = task.span();
            if task.is_milestone {
                ui.label(due.format("%d/%m/%Y").to_string());
            } else {
                ui.label(format!(
                    "{} → {}",
                    start.format("%d/%m/%Y"),
                    due.format("%d/%m/%Y"),
                ));
            }
            ui.label(task.trade.label());
            if let Some(crew) = &task.crew {
                ui.label(format!("Crew: {}", crew));
            }
            if let Some(equipment) = &task.equipment {
                ui.label(format!("Equipment: {}", equipment));
            }
            if task.weather_sensitive {
                ui.label(format!(
                    "{} Weather sensitive",
                    egui_phosphor::regular::CLOUD_RAIN
                ));
            }
            ui.label(format!("Progress: {}%", (task.progress * 100.0) as i32));
        },
    );
}

fn draw_weather_bands(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    day_width: f32,
    weather: &[WeatherRecord],
    height: f32,
) {
    for record in weather {
        if !range.contains(record.date) {
            continue;
        }
        let x = origin.x + date_to_offset(record.date, range, geometry);
        if record.condition.blocks_outdoor_work() {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Vec2::new(day_width, height - HEADER_HEIGHT),
                ),
                0.0,
                theme::WEATHER_BAND,
            );
        }
        painter.text(
            Pos2::new(x + day_width / 2.0, origin.y + HEADER_HEIGHT - 7.0),
            egui::Align2::CENTER_CENTER,
            record.condition.icon(),
            theme::font_sub(),
            theme::WEATHER_ICON,
        );
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    view_mode: ViewMode,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut date = range.start;
    let end = range.end;

    match view_mode {
        ViewMode::Days => {
            while date <= end {
                let x = origin.x + date_to_offset(date, range, geometry);

                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + HEADER_HEIGHT),
                        Pos2::new(x, origin.y + 2000.0),
                    ],
                    Stroke::new(0.5, theme::GRID_LINE),
                );

                let is_weekend = date.weekday().num_days_from_monday() >= 5;
                let day_color = if is_weekend {
                    theme::TEXT_DIM
                } else {
                    theme::TEXT_SECONDARY
                };
                painter.text(
                    Pos2::new(x + 3.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%d").to_string(),
                    theme::font_sub(),
                    day_color,
                );

                if date.day() == 1 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }

                date += chrono::Duration::days(1);
            }
        }
        ViewMode::Weeks => {
            let weekday = date.weekday().num_days_from_monday();
            date -= chrono::Duration::days(weekday as i64);

            while date <= end {
                let x = origin.x + date_to_offset(date, range, geometry);

                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + HEADER_HEIGHT),
                        Pos2::new(x, origin.y + 2000.0),
                    ],
                    Stroke::new(0.5, theme::GRID_LINE),
                );

                painter.text(
                    Pos2::new(x + 3.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("W%V").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );

                if date.day() <= 7 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }

                date += chrono::Duration::days(7);
            }
        }
        ViewMode::Months => {
            date = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);

            while date <= end {
                let x = origin.x + date_to_offset(date, range, geometry);

                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + HEADER_HEIGHT),
                        Pos2::new(x, origin.y + 2000.0),
                    ],
                    Stroke::new(0.5, theme::GRID_LINE),
                );

                painter.text(
                    Pos2::new(x + 5.0, origin.y + 18.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%b %Y").to_string(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );

                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                date = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(30));
            }
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    if !range.contains(today) {
        return;
    }
    let x = origin.x + date_to_offset(today, range, geometry);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    task: &Task,
    y: f32,
    is_selected: bool,
    view_mode: ViewMode,
) -> Rect {
    let (span_start, span_due) = task.span();
    let x_start = origin.x + date_to_offset(span_start, range, geometry);
    let x_end = origin.x + date_to_offset(span_due, range, geometry);
    let bar_width = (x_end - x_start).max(6.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, task.color);
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Progress fill (darkened overlay)
    if task.progress > 0.0 {
        let progress_width = bar_width * task.progress.clamp(0.0, 1.0);
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);

        if task.progress < 0.98 {
            let tick_x = bar_rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Bar label, gated by the active mode's policy and the bar width
    let policy = view_mode.render_policy();
    if let Some(label) = bar_label(&task.title, bar_width, policy) {
        let galley = painter.layout_no_wrap(
            label,
            theme::font_bar(policy.font_size),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

fn draw_milestone(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    task: &Task,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x = origin.x + date_to_offset(task.due, range, geometry);
    let center = Pos2::new(x, y + ROW_HEIGHT / 2.0);
    let size = (ROW_HEIGHT / 2.0 - 3.0).max(6.0);

    let shadow_offset = Vec2::new(1.0, 1.5);
    let shadow_pts = vec![
        center + shadow_offset + Vec2::new(0.0, -size),
        center + shadow_offset + Vec2::new(size, 0.0),
        center + shadow_offset + Vec2::new(0.0, size),
        center + shadow_offset + Vec2::new(-size, 0.0),
    ];
    painter.add(egui::Shape::convex_polygon(
        shadow_pts,
        Color32::from_black_alpha(40),
        Stroke::NONE,
    ));

    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        points.clone(),
        task.color,
        Stroke::NONE,
    ));

    if is_selected {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        ));
    }

    painter.text(
        Pos2::new(x + size + 6.0, y + ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &task.title,
        theme::font_bar(11.5),
        theme::TEXT_SECONDARY,
    );

    Rect::from_center_size(center, Vec2::splat(size * 2.0 + 2.0))
}

/// Tint bars that would contend with the dragged task for the same crew
/// or equipment at its new dates.
fn draw_collision_hints(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimeRange,
    geometry: &ViewportGeometry,
    tasks: &[Task],
    drag: &ActiveDrag,
) {
    let same_resource = |task: &Task| {
        let crew_clash = matches!((&task.crew, &drag.crew), (Some(a), Some(b)) if a.eq_ignore_ascii_case(b));
        let equipment_clash = matches!(
            (&task.equipment, &drag.equipment),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b)
        );
        crew_clash || equipment_clash
    };

    for (i, task) in tasks.iter().enumerate() {
        if task.id == drag.id || task.is_milestone || !same_resource(task) {
            continue;
        }
        let (t0, t1) = task.span();
        if t0 > drag.span.1 || drag.span.0 > t1 {
            continue;
        }
        let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
        let x_start = origin.x + date_to_offset(t0, range, geometry);
        let x_end = origin.x + date_to_offset(t1, range, geometry);
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(x_start, y + theme::BAR_INSET),
                Vec2::new(
                    (x_end - x_start).max(6.0),
                    ROW_HEIGHT - theme::BAR_INSET * 2.0,
                ),
            ),
            Rounding::same(theme::BAR_ROUNDING),
            theme::COLLISION_TINT,
        );
    }
}
