use eframe::egui::{self, PointerButton, Rect, Ui};

use board_graph::graph::{GraphAction, GraphSession, PointerEvent};

use super::super::render_utils::to_local;

const SCROLL_ZOOM_RATE: f32 = 0.0018;

/// Translates this frame's egui pointer input into graph pointer events, in
/// surface-local pixels. Returns the action of a completed click, if any.
pub(super) fn feed_pointer(
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
    session: &mut GraphSession,
) -> Option<GraphAction> {
    let (latest, pressed, released) = ui.input(|input| {
        (
            input.pointer.latest_pos(),
            input.pointer.button_pressed(PointerButton::Primary),
            input.pointer.button_released(PointerButton::Primary),
        )
    });
    let dragging_node = session.interaction().dragging().is_some();

    let Some(pointer) = latest else {
        session.handle_pointer(PointerEvent::Left);
        return None;
    };
    let inside = response.contains_pointer();
    if !inside && !dragging_node {
        if session.interaction().state().focus().is_some() {
            session.handle_pointer(PointerEvent::Left);
        }
        return None;
    }

    let local = to_local(rect, pointer);
    // Nodes keep moving under a still pointer, so hover is refreshed every frame.
    session.handle_pointer(PointerEvent::Moved(local));
    if pressed && inside {
        session.handle_pointer(PointerEvent::Pressed(local));
    }
    if released {
        return session.handle_pointer(PointerEvent::Released(local));
    }
    None
}

/// Scroll wheel and pinch zoom about the pointer.
pub(super) fn handle_zoom(
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
    session: &mut GraphSession,
) {
    if !response.hovered() {
        return;
    }

    let (scroll, pinch, hover) = ui.input(|input| {
        (
            input.raw_scroll_delta.y,
            input.zoom_delta(),
            input.pointer.hover_pos(),
        )
    });
    let anchor = to_local(rect, hover.unwrap_or_else(|| rect.center()));

    if scroll.abs() > f32::EPSILON {
        let factor = (1.0 + (scroll * SCROLL_ZOOM_RATE)).clamp(0.85, 1.15);
        session.zoom_at(factor, anchor);
    }
    if (pinch - 1.0).abs() > f32::EPSILON {
        session.zoom_at(pinch, anchor);
    }
}

/// Dragging empty canvas with the primary button, or anywhere with the
/// secondary or middle button, pans the view.
pub(super) fn handle_pan(response: &egui::Response, session: &mut GraphSession) {
    let primary_pan =
        response.dragged_by(PointerButton::Primary) && session.interaction().dragging().is_none();
    if primary_pan
        || response.dragged_by(PointerButton::Secondary)
        || response.dragged_by(PointerButton::Middle)
    {
        session.pan_by(response.drag_delta());
    }
}
