use eframe::egui::Color32;

use crate::board::Priority;

pub const PROJECT_COLOR: Color32 = Color32::from_rgb(0xff, 0x6f, 0x00);
pub const LIST_COLOR: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const NOTE_COLOR: Color32 = Color32::from_rgb(0x9b, 0x59, 0xb6);
pub const HIGH_PRIORITY_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
pub const MEDIUM_PRIORITY_COLOR: Color32 = Color32::from_rgb(0xf3, 0x9c, 0x12);
pub const LOW_PRIORITY_COLOR: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);

/// `#999` at 60% opacity, premultiplied.
pub const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(92, 92, 92, 153);
pub const EDGE_HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(0xff, 0xd1, 0x80);
pub const NODE_OUTLINE_COLOR: Color32 = Color32::WHITE;
pub const SEARCH_MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);

pub const LEGEND: [(&str, Color32); 6] = [
    ("Project", PROJECT_COLOR),
    ("List", LIST_COLOR),
    ("High Priority", HIGH_PRIORITY_COLOR),
    ("Medium Priority", MEDIUM_PRIORITY_COLOR),
    ("Low Priority", LOW_PRIORITY_COLOR),
    ("Note", NOTE_COLOR),
];

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::High => HIGH_PRIORITY_COLOR,
        Priority::Medium => MEDIUM_PRIORITY_COLOR,
        Priority::Low => LOW_PRIORITY_COLOR,
    }
}

pub fn edge_width(weight: f32) -> f32 {
    weight.max(0.0).sqrt()
}

pub fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.25 + (factor * 0.75))) as u8,
    )
}
