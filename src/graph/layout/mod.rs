mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};

use super::interaction::InteractionState;
use super::model::{Graph, Pin};
use crate::util::stable_pair;

pub use forces::{CenterForce, CollisionForce, Force, ForceField, Link, LinkForce, ManyBodyForce};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub link_distance: f32,
    /// Multiplied by the edge weight.
    pub link_strength: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    pub collision_strength: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub drag_alpha_target: f32,
    pub margin: f32,
    pub theta: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            link_distance: 100.0,
            link_strength: 0.5,
            charge_strength: -400.0,
            center_strength: 0.1,
            collision_strength: 0.7,
            velocity_decay: 0.4,
            alpha_min,
            // Cools from 1 to `alpha_min` in 300 ticks.
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            drag_alpha_target: 0.3,
            margin: 30.0,
            theta: 0.9,
        }
    }
}

/// The drawing surface in model units, with the margin nodes must keep from
/// every edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBounds {
    pub size: Vec2,
    pub margin: f32,
}

impl LayoutBounds {
    pub fn new(size: Vec2, margin: f32) -> Self {
        Self {
            size: vec2(size.x.max(0.0), size.y.max(0.0)),
            margin: margin.max(0.0),
        }
    }

    pub fn center(self) -> Vec2 {
        self.size * 0.5
    }

    fn axis_range(extent: f32, margin: f32) -> (f32, f32) {
        let half = extent * 0.5;
        // A surface narrower than two margins collapses to its middle line.
        (margin.min(half), (extent - margin).max(half))
    }

    pub fn clamp(self, position: Vec2) -> Vec2 {
        let (min_x, max_x) = Self::axis_range(self.size.x, self.margin);
        let (min_y, max_y) = Self::axis_range(self.size.y, self.margin);
        let center = self.center();
        let x = if position.x.is_finite() { position.x } else { center.x };
        let y = if position.y.is_finite() { position.y } else { center.y };
        vec2(x.clamp(min_x, max_x), y.clamp(min_y, max_y))
    }

    pub fn contains(self, position: Vec2) -> bool {
        self.clamp(position) == position
    }
}

/// Force-directed layout over a [`Graph`], advanced one tick per frame.
///
/// Forces are an open list; each contributes velocity deltas which are then
/// integrated with `velocity_decay` friction. Pins are taken from the
/// interaction state on every tick, so a released node is free again on the
/// tick after the release.
pub struct Simulation {
    config: LayoutConfig,
    forces: Vec<Box<dyn Force>>,
    bounds: LayoutBounds,
    alpha: f32,
    alpha_target: f32,
    settled_logged: bool,
    scratch: SimulationScratch,
}

#[derive(Default)]
struct SimulationScratch {
    positions: Vec<Vec2>,
    radii: Vec<f32>,
    velocities: Vec<Vec2>,
    links: Vec<Link>,
}

impl Simulation {
    pub fn new(config: LayoutConfig, bounds: LayoutBounds) -> Self {
        let forces = Self::standard_forces(&config);
        Self::with_forces(config, bounds, forces)
    }

    pub fn with_forces(
        config: LayoutConfig,
        bounds: LayoutBounds,
        forces: Vec<Box<dyn Force>>,
    ) -> Self {
        Self {
            config,
            forces,
            bounds,
            alpha: 1.0,
            alpha_target: 0.0,
            settled_logged: false,
            scratch: SimulationScratch::default(),
        }
    }

    /// Link, many-body, center and collision, in that order.
    pub fn standard_forces(config: &LayoutConfig) -> Vec<Box<dyn Force>> {
        vec![
            Box::new(LinkForce::new(config.link_distance, config.link_strength)),
            Box::new(ManyBodyForce::new(config.charge_strength, config.theta)),
            Box::new(CenterForce {
                strength: config.center_strength,
            }),
            Box::new(CollisionForce {
                strength: config.collision_strength,
            }),
        ]
    }

    pub fn add_force(&mut self, force: Box<dyn Force>) {
        self.forces.push(force);
    }

    pub fn force_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forces.iter().map(|force| force.name())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn bounds(&self) -> LayoutBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, size: Vec2) {
        self.bounds = LayoutBounds::new(size, self.config.margin);
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min && self.alpha_target <= 0.0
    }

    /// Spreads nodes on a sunflower spiral around the surface center. A small
    /// per-id offset keeps different graphs from starting identically.
    pub fn seed_positions(&self, graph: &mut Graph) {
        let center = self.bounds.center();
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

        for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
            let radius = 10.0 * (0.5 + index as f32).sqrt();
            let angle = index as f32 * golden_angle;
            let (jitter_x, jitter_y) = stable_pair(&node.id);
            let offset = vec2(angle.cos(), angle.sin()) * radius + vec2(jitter_x, jitter_y) * 2.0;

            node.position = self.bounds.clamp(center + offset);
            node.velocity = Vec2::ZERO;
            node.pin.clear();
        }
    }

    /// Advances the layout by one step. Returns whether anything moved.
    ///
    /// Every node ends the tick inside [`Simulation::bounds`], settled or not.
    pub fn tick(&mut self, graph: &mut Graph, interaction: &InteractionState) -> bool {
        let drag = interaction.drag_target();
        for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
            match drag {
                Some((dragged, pointer)) if dragged == index => node.pin = Pin::at(pointer),
                _ => node.pin.clear(),
            }
        }

        self.alpha_target = if drag.is_some() {
            self.config.drag_alpha_target
        } else {
            0.0
        };

        if self.is_settled() {
            if !self.settled_logged {
                tracing::debug!(nodes = graph.nodes().len(), "layout settled");
                self.settled_logged = true;
            }
            self.clamp_positions(graph);
            return false;
        }
        self.settled_logged = false;

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        self.apply_forces(graph);
        self.integrate(graph);
        true
    }

    fn apply_forces(&mut self, graph: &Graph) {
        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.radii.clear();
        scratch.velocities.clear();
        for node in graph.nodes() {
            scratch.positions.push(node.position);
            scratch.radii.push(node.kind.collision_radius());
            scratch.velocities.push(node.velocity);
        }

        scratch.links.clear();
        for (edge, &(source, target)) in graph.edges().iter().zip(graph.endpoints()) {
            scratch.links.push(Link {
                source,
                target,
                weight: edge.weight,
            });
        }

        let mut field = ForceField {
            positions: &scratch.positions,
            radii: &scratch.radii,
            links: &scratch.links,
            center: self.bounds.center(),
            velocities: &mut scratch.velocities,
        };
        for force in &mut self.forces {
            force.apply(&mut field, self.alpha);
        }
    }

    fn integrate(&self, graph: &mut Graph) {
        let friction = 1.0 - self.config.velocity_decay.clamp(0.0, 1.0);
        for (node, &velocity) in graph.nodes_mut().iter_mut().zip(&self.scratch.velocities) {
            node.velocity = velocity;

            match node.pin.fx {
                Some(fx) => {
                    node.position.x = fx;
                    node.velocity.x = 0.0;
                }
                None => {
                    node.velocity.x *= friction;
                    node.position.x += node.velocity.x;
                }
            }
            match node.pin.fy {
                Some(fy) => {
                    node.position.y = fy;
                    node.velocity.y = 0.0;
                }
                None => {
                    node.velocity.y *= friction;
                    node.position.y += node.velocity.y;
                }
            }

            if !node.velocity.x.is_finite() || !node.velocity.y.is_finite() {
                node.velocity = Vec2::ZERO;
            }
            node.position = self.bounds.clamp(node.position);
        }
    }

    fn clamp_positions(&self, graph: &mut Graph) {
        for node in graph.nodes_mut() {
            node.position = self.bounds.clamp(node.position);
        }
    }
}
