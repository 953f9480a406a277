use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(23, 25, 30);
pub const BG_PANEL: Color32 = Color32::from_rgb(29, 31, 38);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 46);
pub const BG_FIELD: Color32 = Color32::from_rgb(19, 21, 26);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(230, 140, 50, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 51, 62);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(230, 140, 50);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 230, 236);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(152, 158, 174);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 104, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(230, 140, 50);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(42, 45, 56);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);

pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 55);

// Overlay layers.
pub const WEATHER_BAND: Color32 = Color32::from_rgba_premultiplied(60, 90, 140, 38);
pub const WEATHER_ICON: Color32 = Color32::from_rgb(120, 160, 220);
pub const CONFLICT_STROKE: Color32 = Color32::from_rgb(235, 80, 70);
pub const CRITICAL_STROKE: Color32 = Color32::from_rgb(255, 112, 67);
pub const COLLISION_TINT: Color32 = Color32::from_rgba_premultiplied(255, 190, 60, 50);
pub const DROP_ZONE_BG: Color32 = Color32::from_rgba_premultiplied(230, 140, 50, 18);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch row edges

pub const SIDE_PANEL_DEFAULT_WIDTH: f32 = 330.0;
pub const SIDE_PANEL_MIN_WIDTH: f32 = 240.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DIALOG_WIDTH: f32 = 300.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar(size: f32) -> FontId {
    FontId::proportional(size)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Task color palette ───────────────────────────────────────────────────────

pub const TASK_COLORS: &[Color32] = &[
    Color32::from_rgb(141, 110, 99),  // Earth brown
    Color32::from_rgb(120, 124, 136), // Concrete grey
    Color32::from_rgb(205, 145, 60),  // Lumber
    Color32::from_rgb(171, 71, 188),  // Purple
    Color32::from_rgb(251, 192, 45),  // Safety yellow
    Color32::from_rgb(66, 133, 244),  // Blue
    Color32::from_rgb(0, 172, 193),   // Cyan
    Color32::from_rgb(102, 187, 106), // Green
    Color32::from_rgb(229, 57, 53),   // Red
];

pub fn task_palette() -> Vec<Color32> {
    TASK_COLORS.to_vec()
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = Color32::from_rgba_premultiplied(255, 255, 255, 6);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(41, 44, 54);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(51, 54, 66);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(59, 62, 74);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(49, 52, 64);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(6.0);

    ctx.set_visuals(visuals);
}
