use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use board_graph::graph::ViewportTransform;

const BACKGROUND_COLOR: Color32 = Color32::from_rgb(19, 23, 29);
const GRID_STEP: f32 = 56.0;

/// Surface-local pixels (origin at the canvas corner) to window pixels.
pub(super) fn to_screen(rect: Rect, local: Pos2) -> Pos2 {
    rect.min + local.to_vec2()
}

pub(super) fn to_local(rect: Rect, screen: Pos2) -> Pos2 {
    Pos2::ZERO + (screen - rect.min)
}

/// Grid that pans and zooms with the graph.
pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: ViewportTransform) {
    painter.rect_filled(rect, 0.0, BACKGROUND_COLOR);

    let step = (GRID_STEP * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.min + transform.translate;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

/// Offset a tooltip box so it stays inside the canvas.
pub(super) fn keep_inside(rect: Rect, anchor: Pos2, size: Vec2) -> Pos2 {
    let max_x = (rect.right() - size.x).max(rect.left());
    let max_y = (rect.bottom() - size.y).max(rect.top());
    Pos2::new(anchor.x.clamp(rect.left(), max_x), anchor.y.clamp(rect.top(), max_y))
}
