use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Painter, Rect, Sense, Stroke, Ui, vec2,
};

use board_graph::graph::scene::{Emphasis, Scene, Tooltip};
use board_graph::graph::style::{
    EDGE_HIGHLIGHT_COLOR, NODE_OUTLINE_COLOR, SEARCH_MATCH_COLOR, blend_color,
};

use super::super::render_utils::{
    circle_visible, draw_background, edge_visible, keep_inside, to_screen,
};
use super::super::{GraphPane, ViewModel};
use super::interaction::{feed_pointer, handle_pan, handle_zoom};

const LABEL_FONT_SIZE: f32 = 12.0;
const ICON_FONT_SIZE: f32 = 14.0;
const DASH_LENGTH: f32 = 5.0;
const TOOLTIP_PADDING: f32 = 8.0;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let GraphPane::Open(session) = &mut self.graph else {
            return;
        };

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        session.resize(rect.size());

        handle_zoom(ui, rect, &response, session);
        if let Some(action) = feed_pointer(ui, rect, &response, session) {
            action.dispatch(&mut self.dialogs);
        }
        handle_pan(&response, session);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        if session.frame(frame_delta_seconds) || response.dragged() {
            ui.ctx().request_repaint();
        }

        let cursor = if session.interaction().dragging().is_some() {
            Some(CursorIcon::Grabbing)
        } else if session.interaction().hovered().is_some() {
            Some(CursorIcon::PointingHand)
        } else {
            None
        };
        if let Some(cursor) = cursor {
            ui.output_mut(|output| output.cursor_icon = cursor);
        }

        let painter = ui.painter_at(rect);
        let scene = session.scene();
        draw_background(&painter, rect, scene.transform);
        draw_edges(&painter, rect, &scene);
        draw_nodes(&painter, rect, &scene);
        if let Some(tooltip) = &scene.tooltip {
            draw_tooltip(&painter, rect, tooltip);
        }
    }
}

fn draw_edges(painter: &Painter, rect: Rect, scene: &Scene<'_>) {
    for edge in &scene.edges {
        let start = to_screen(rect, edge.from);
        let end = to_screen(rect, edge.to);
        if !edge_visible(rect, start, end, edge.width) {
            continue;
        }

        let stroke = Stroke::new(edge.width, edge.color);
        if edge.dashed {
            let dash = DASH_LENGTH * scene.transform.scale;
            painter.extend(egui::Shape::dashed_line(&[start, end], stroke, dash, dash));
        } else {
            painter.line_segment([start, end], stroke);
        }
    }
}

fn draw_nodes(painter: &Painter, rect: Rect, scene: &Scene<'_>) {
    let scale = scene.transform.scale;
    for node in &scene.nodes {
        let center = to_screen(rect, node.position);
        let label_height = node.label_lines.len() as f32 * LABEL_FONT_SIZE * scale;
        if !circle_visible(rect, center, node.radius + label_height) {
            continue;
        }

        let fill = if node.emphasis == Emphasis::Focused {
            blend_color(node.fill, EDGE_HIGHLIGHT_COLOR, 0.25)
        } else {
            node.fill
        };
        painter.circle_filled(center, node.radius, fill);

        let outline = match node.emphasis {
            Emphasis::Matched => Stroke::new(3.0, SEARCH_MATCH_COLOR),
            Emphasis::Focused => Stroke::new(3.0, EDGE_HIGHLIGHT_COLOR),
            Emphasis::Dimmed => Stroke::new(1.0, Color32::from_white_alpha(60)),
            Emphasis::Normal | Emphasis::Related => Stroke::new(2.0, NODE_OUTLINE_COLOR),
        };
        painter.circle_stroke(center, node.radius, outline);

        let text_color = if node.emphasis == Emphasis::Dimmed {
            Color32::from_gray(120)
        } else {
            Color32::from_gray(238)
        };
        painter.text(
            center,
            Align2::CENTER_CENTER,
            node.kind.icon(),
            FontId::proportional((ICON_FONT_SIZE * scale).max(6.0)),
            Color32::WHITE,
        );

        let line_height = (LABEL_FONT_SIZE * scale).max(6.0);
        let mut baseline = center.y + node.radius + 4.0;
        for line in node.label_lines {
            painter.text(
                egui::pos2(center.x, baseline),
                Align2::CENTER_TOP,
                line,
                FontId::proportional(line_height),
                text_color,
            );
            baseline += line_height + 1.0;
        }
    }
}

fn draw_tooltip(painter: &Painter, rect: Rect, tooltip: &Tooltip) {
    let title_font = FontId::proportional(13.0);
    let body_font = FontId::proportional(12.0);
    let title = painter.layout_no_wrap(tooltip.title.clone(), title_font, Color32::WHITE);
    let lines = tooltip
        .lines
        .iter()
        .map(|line| {
            painter.layout_no_wrap(line.clone(), body_font.clone(), Color32::from_gray(210))
        })
        .collect::<Vec<_>>();

    let width = lines
        .iter()
        .map(|galley| galley.size().x)
        .fold(title.size().x, f32::max);
    let height = title.size().y + lines.iter().map(|galley| galley.size().y + 2.0).sum::<f32>();
    let size = vec2(width, height) + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING) * 2.0;

    let origin = keep_inside(rect, to_screen(rect, tooltip.anchor), size);
    let frame = Rect::from_min_size(origin, size);
    painter.rect_filled(frame, 6.0, Color32::from_rgba_unmultiplied(12, 14, 18, 235));
    painter.rect_stroke(
        frame,
        6.0,
        Stroke::new(1.0, Color32::from_gray(70)),
        egui::StrokeKind::Inside,
    );

    let mut cursor = origin + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING);
    let title_height = title.size().y;
    painter.galley(cursor, title, Color32::WHITE);
    cursor.y += title_height + 2.0;
    for galley in lines {
        let line_height = galley.size().y;
        painter.galley(cursor, galley, Color32::from_gray(210));
        cursor.y += line_height + 2.0;
    }
}
