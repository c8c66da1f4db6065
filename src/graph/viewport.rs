use eframe::egui::{Pos2, Vec2, pos2};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 4.0;
pub const FIT_SCALE: f32 = 0.8;
pub const ZOOM_DURATION_SECS: f32 = 0.3;
pub const RESET_DURATION_SECS: f32 = 0.4;

pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Maps model coordinates to surface pixels: `screen = model * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Scaled to 0.8 about the surface center.
    pub fn fit(size: Vec2) -> Self {
        let center = size * 0.5;
        Self {
            translate: center * (1.0 - FIT_SCALE),
            scale: FIT_SCALE,
        }
    }

    pub fn apply(self, model: Vec2) -> Pos2 {
        (model * self.scale + self.translate).to_pos2()
    }

    pub fn invert(self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.translate) / self.scale
    }

    /// Scale multiplied by `factor` (then clamped) while the model point
    /// under `anchor` stays put.
    pub fn scaled_about(self, factor: f32, anchor: Pos2) -> Self {
        let scale = clamp_scale(self.scale * factor);
        let model = self.invert(anchor);
        Self {
            translate: anchor.to_vec2() - model * scale,
            scale,
        }
    }

    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            translate: self.translate + delta,
            scale: self.scale,
        }
    }
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: ViewportTransform,
    to: ViewportTransform,
    elapsed: f32,
    duration: f32,
}

/// Owns the pan/zoom transform of one open graph view.
///
/// Button zooms and resets animate; pointer gestures apply immediately and
/// cancel any running animation.
#[derive(Clone, Debug)]
pub struct ViewportController {
    size: Vec2,
    current: ViewportTransform,
    transition: Option<Transition>,
}

impl ViewportController {
    pub fn new(size: Vec2) -> Self {
        Self::from_transform(size, ViewportTransform::fit(size))
    }

    pub fn from_transform(size: Vec2, transform: ViewportTransform) -> Self {
        Self {
            size,
            current: ViewportTransform {
                translate: transform.translate,
                scale: clamp_scale(transform.scale),
            },
            transition: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn transform(&self) -> ViewportTransform {
        self.current
    }

    /// Where the running animation ends, or the current transform.
    pub fn target(&self) -> ViewportTransform {
        self.transition
            .map(|transition| transition.to)
            .unwrap_or(self.current)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    fn center(&self) -> Pos2 {
        pos2(self.size.x * 0.5, self.size.y * 0.5)
    }

    fn animate_to(&mut self, to: ViewportTransform, duration: f32) {
        self.transition = Some(Transition {
            from: self.current,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    /// Multiplies the scale by `factor` about the surface center. Successive
    /// calls compound on the pending target, so the scale saturates at the
    /// bounds however fast they arrive.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            tracing::debug!(factor, "ignoring zoom factor");
            return;
        }
        let to = self.target().scaled_about(factor, self.center());
        self.animate_to(to, ZOOM_DURATION_SECS);
    }

    pub fn reset_view(&mut self) {
        self.animate_to(ViewportTransform::fit(self.size), RESET_DURATION_SECS);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.transition = None;
        self.current = self.current.translated(delta);
    }

    /// Scroll or pinch zoom about `anchor`, without animation.
    pub fn zoom_at(&mut self, factor: f32, anchor: Pos2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.transition = None;
        self.current = self.current.scaled_about(factor, anchor);
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Steps the running animation. Returns whether the transform changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(mut transition) = self.transition else {
            return false;
        };

        transition.elapsed += dt.max(0.0);
        if transition.elapsed >= transition.duration {
            self.current = transition.to;
            self.transition = None;
            return true;
        }

        let t = ease_in_out_cubic(transition.elapsed / transition.duration);
        // Interpolate the model point under the surface center and the scale
        // separately, so zooming about the center keeps it fixed throughout.
        let center = self.center();
        let from_focus = transition.from.invert(center);
        let to_focus = transition.to.invert(center);
        let focus = from_focus + (to_focus - from_focus) * t;
        let scale = transition.from.scale * (transition.to.scale / transition.from.scale).powf(t);

        self.current = ViewportTransform {
            translate: center.to_vec2() - focus * scale,
            scale,
        };
        self.transition = Some(transition);
        true
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn identity_controller() -> ViewportController {
        ViewportController::from_transform(vec2(800.0, 600.0), ViewportTransform::IDENTITY)
    }

    fn finish(controller: &mut ViewportController) {
        while controller.advance(0.05) {}
    }

    #[test]
    fn zoom_in_from_unit_scale() {
        let mut controller = identity_controller();
        controller.zoom(1.2);
        assert_eq!(controller.target().scale, 1.2);
        assert_eq!(controller.transform().scale, 1.0);

        finish(&mut controller);
        assert_eq!(controller.transform().scale, 1.2);
        assert!(!controller.is_animating());
    }

    #[test]
    fn zoom_saturates_at_both_ends() {
        let mut controller = identity_controller();
        for _ in 0..40 {
            controller.zoom(1.2);
            assert!(controller.target().scale <= MAX_SCALE);
        }
        finish(&mut controller);
        assert_eq!(controller.transform().scale, MAX_SCALE);

        for _ in 0..40 {
            controller.zoom(0.1);
            assert!(controller.target().scale >= MIN_SCALE);
        }
        finish(&mut controller);
        assert_eq!(controller.transform().scale, MIN_SCALE);
    }

    #[test]
    fn button_zoom_keeps_surface_center_fixed() {
        let mut controller = identity_controller();
        let center = pos2(400.0, 300.0);
        let before = controller.transform().invert(center);

        controller.zoom(2.0);
        controller.advance(0.1);
        let during = controller.transform().invert(center);
        finish(&mut controller);
        let after = controller.transform().invert(center);

        assert!((before - during).length() < 1e-3);
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn reset_animates_back_to_fit() {
        let mut controller = identity_controller();
        controller.pan_by(vec2(120.0, -40.0));
        controller.reset_view();
        assert!(controller.advance(0.2));
        assert_ne!(controller.transform(), ViewportTransform::fit(vec2(800.0, 600.0)));

        finish(&mut controller);
        let fit = controller.transform();
        assert_eq!(fit.scale, FIT_SCALE);
        assert!((fit.apply(vec2(400.0, 300.0)) - pos2(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn gestures_are_immediate_and_cancel_animation() {
        let mut controller = identity_controller();
        controller.zoom(2.0);
        controller.pan_by(vec2(10.0, 5.0));
        assert!(!controller.is_animating());
        assert_eq!(controller.transform().translate, vec2(10.0, 5.0));

        let anchor = pos2(100.0, 100.0);
        let model = controller.transform().invert(anchor);
        controller.zoom_at(1.5, anchor);
        assert_eq!(controller.transform().scale, 1.5);
        assert!((controller.transform().apply(model) - anchor).length() < 1e-3);
    }

    #[test]
    fn invalid_factors_are_ignored() {
        let mut controller = identity_controller();
        controller.zoom(f32::NAN);
        controller.zoom(0.0);
        controller.zoom_at(-1.0, pos2(0.0, 0.0));
        assert_eq!(controller.target(), ViewportTransform::IDENTITY);
    }

    #[test]
    fn apply_and_invert_agree() {
        let transform = ViewportTransform {
            translate: vec2(40.0, -12.0),
            scale: 2.5,
        };
        let model = vec2(13.0, 7.5);
        assert!((transform.invert(transform.apply(model)) - model).length() < 1e-4);
    }
}
