use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

/// A graph edge resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
}

/// Per-tick view of the layout handed to every force.
///
/// Forces read positions and write velocity deltas; integration happens after
/// all forces ran.
pub struct ForceField<'a> {
    pub positions: &'a [Vec2],
    pub radii: &'a [f32],
    pub links: &'a [Link],
    pub center: Vec2,
    pub velocities: &'a mut [Vec2],
}

pub trait Force {
    fn name(&self) -> &'static str;

    fn apply(&mut self, field: &mut ForceField<'_>, alpha: f32);
}

fn fallback_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Springs every link toward `distance`, stronger for heavier edges and
/// weaker around busy nodes.
pub struct LinkForce {
    pub distance: f32,
    pub strength: f32,
    degrees: Vec<usize>,
}

impl LinkForce {
    pub fn new(distance: f32, strength: f32) -> Self {
        Self {
            distance,
            strength,
            degrees: Vec::new(),
        }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&mut self, field: &mut ForceField<'_>, alpha: f32) {
        let node_count = field.positions.len();
        self.degrees.clear();
        self.degrees.resize(node_count, 0);
        for link in field.links {
            if link.source < node_count && link.target < node_count {
                self.degrees[link.source] += 1;
                self.degrees[link.target] += 1;
            }
        }

        for link in field.links {
            let (source, target) = (link.source, link.target);
            if source >= node_count || target >= node_count || source == target {
                continue;
            }

            let predicted_source = field.positions[source] + field.velocities[source];
            let predicted_target = field.positions[target] + field.velocities[target];
            let mut delta = predicted_target - predicted_source;
            let mut distance = delta.length();
            if distance <= 0.0001 {
                delta = fallback_direction(source, target) * 0.01;
                distance = delta.length();
            }

            let source_degree = self.degrees[source];
            let target_degree = self.degrees[target];
            let busiest = source_degree.min(target_degree).max(1) as f32;
            let strength = (self.strength * link.weight.max(0.0) / busiest).min(1.0);
            let bias = source_degree as f32 / (source_degree + target_degree) as f32;

            let correction = delta * ((distance - self.distance) / distance * alpha * strength);
            field.velocities[target] -= correction * bias;
            field.velocities[source] += correction * (1.0 - bias);
        }
    }
}

/// Charge between every pair of nodes; negative strength repels. Far groups
/// are approximated by their centroid (Barnes-Hut).
pub struct ManyBodyForce {
    pub strength: f32,
    pub theta: f32,
}

impl ManyBodyForce {
    pub fn new(strength: f32, theta: f32) -> Self {
        Self { strength, theta }
    }
}

fn charge_between(point: Vec2, other: Vec2, scaled_strength: f32, a: usize, b: usize) -> Vec2 {
    let delta = other - point;
    let distance_sq = delta.length_sq();
    if distance_sq <= 0.0001 * 0.0001 {
        return fallback_direction(a, b) * scaled_strength;
    }
    delta * (scaled_strength / distance_sq.max(1.0))
}

fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    scaled_strength: f32,
    theta: f32,
    velocity: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.bodies {
            if other_index == index {
                continue;
            }
            *velocity += charge_between(
                point,
                positions[other_index],
                scaled_strength,
                index,
                other_index,
            );
        }
        return;
    }

    let delta = node.centroid - point;
    let distance_sq = delta.length_sq().max(1.0);
    let distance = distance_sq.sqrt();
    let can_approximate = !node.square.contains(point)
        && ((node.square.side() / distance) < theta)
        && node.mass > 1.0;

    if can_approximate {
        *velocity += delta * (scaled_strength * node.mass / distance_sq);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_node(child, index, positions, scaled_strength, theta, velocity);
    }
}

impl Force for ManyBodyForce {
    fn name(&self) -> &'static str {
        "many-body"
    }

    fn apply(&mut self, field: &mut ForceField<'_>, alpha: f32) {
        if field.positions.len() < 2 {
            return;
        }
        let Some(quadtree) = QuadNode::build(field.positions, field.radii) else {
            return;
        };

        let scaled_strength = self.strength * alpha;
        for (index, velocity) in field.velocities.iter_mut().enumerate() {
            accumulate_charge_for_node(
                &quadtree,
                index,
                field.positions,
                scaled_strength,
                self.theta,
                velocity,
            );
        }
    }
}

/// Nudges every node so the layout's centroid drifts to the surface center.
pub struct CenterForce {
    pub strength: f32,
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&mut self, field: &mut ForceField<'_>, _alpha: f32) {
        if field.positions.is_empty() {
            return;
        }

        let mut centroid = Vec2::ZERO;
        for position in field.positions {
            centroid += *position;
        }
        centroid /= field.positions.len() as f32;

        let shift = (field.center - centroid) * self.strength;
        for velocity in field.velocities.iter_mut() {
            *velocity += shift;
        }
    }
}

/// Pushes apart circles closer than the sum of their radii. Smaller circles
/// move more.
pub struct CollisionForce {
    pub strength: f32,
}

fn separate_pair(
    from: usize,
    to: usize,
    positions: &[Vec2],
    radii: &[f32],
    strength: f32,
    velocities: &mut [Vec2],
) {
    let delta = positions[from] - positions[to];
    let distance = delta.length();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        fallback_direction(from, to)
    };

    let min_distance = radii[from] + radii[to];
    if distance >= min_distance {
        return;
    }

    let from_area = radii[from] * radii[from];
    let to_area = radii[to] * radii[to];
    let total_area = (from_area + to_area).max(f32::EPSILON);
    let push = direction * ((min_distance - distance) * strength);
    velocities[from] += push * (to_area / total_area);
    velocities[to] -= push * (from_area / total_area);
}

fn accumulate_collision_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    positions: &[Vec2],
    radii: &[f32],
    strength: f32,
    velocities: &mut [Vec2],
) {
    if !node_a.may_collide(node_b) {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for (offset, &from) in node_a.bodies.iter().enumerate() {
                for &to in &node_a.bodies[offset + 1..] {
                    separate_pair(from, to, positions, radii, strength, velocities);
                }
            }
        } else {
            for &from in &node_a.bodies {
                for &to in &node_b.bodies {
                    separate_pair(from, to, positions, radii, strength, velocities);
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_deref() else {
                continue;
            };

            accumulate_collision_pairs(
                child_a, child_a, true, positions, radii, strength, velocities,
            );

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_deref() else {
                    continue;
                };
                accumulate_collision_pairs(
                    child_a, child_b, false, positions, radii, strength, velocities,
                );
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.square.half >= node_b.square.half
    };

    if split_a {
        for child in node_a.children.iter().flatten() {
            accumulate_collision_pairs(
                child, node_b, false, positions, radii, strength, velocities,
            );
        }
    } else {
        for child in node_b.children.iter().flatten() {
            accumulate_collision_pairs(
                node_a, child, false, positions, radii, strength, velocities,
            );
        }
    }
}

impl Force for CollisionForce {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn apply(&mut self, field: &mut ForceField<'_>, _alpha: f32) {
        if field.positions.len() < 2 {
            return;
        }
        let Some(quadtree) = QuadNode::build(field.positions, field.radii) else {
            return;
        };

        accumulate_collision_pairs(
            &quadtree,
            &quadtree,
            true,
            field.positions,
            field.radii,
            self.strength,
            field.velocities,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::NodeKind;

    fn run(force: &mut dyn Force, positions: &[Vec2], radii: &[f32], links: &[Link]) -> Vec<Vec2> {
        let mut velocities = vec![Vec2::ZERO; positions.len()];
        let mut field = ForceField {
            positions,
            radii,
            links,
            center: vec2(100.0, 100.0),
            velocities: &mut velocities,
        };
        force.apply(&mut field, 1.0);
        velocities
    }

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let positions = [vec2(0.0, 0.0), vec2(300.0, 0.0)];
        let links = [Link {
            source: 0,
            target: 1,
            weight: 1.0,
        }];
        let velocities = run(&mut LinkForce::new(100.0, 0.5), &positions, &[30.0, 30.0], &links);
        assert!(velocities[0].x > 0.0);
        assert!(velocities[1].x < 0.0);
    }

    #[test]
    fn compressed_link_pushes_endpoints_apart() {
        let positions = [vec2(0.0, 0.0), vec2(20.0, 0.0)];
        let links = [Link {
            source: 0,
            target: 1,
            weight: 2.0,
        }];
        let velocities = run(&mut LinkForce::new(100.0, 0.5), &positions, &[30.0, 30.0], &links);
        assert!(velocities[0].x < 0.0);
        assert!(velocities[1].x > 0.0);
    }

    #[test]
    fn negative_charge_repels_and_weakens_with_distance() {
        let near = run(
            &mut ManyBodyForce::new(-400.0, 0.9),
            &[vec2(0.0, 0.0), vec2(10.0, 0.0)],
            &[30.0, 30.0],
            &[],
        );
        let far = run(
            &mut ManyBodyForce::new(-400.0, 0.9),
            &[vec2(0.0, 0.0), vec2(100.0, 0.0)],
            &[30.0, 30.0],
            &[],
        );
        assert!(near[0].x < 0.0 && near[1].x > 0.0);
        assert!(near[1].x > far[1].x);
        assert!(far[1].x > 0.0);
    }

    #[test]
    fn barnes_hut_matches_direct_sum_for_distant_cluster() {
        let mut positions = vec![vec2(0.0, 0.0)];
        for index in 0..40 {
            positions.push(vec2(
                2_000.0 + (index % 8) as f32 * 3.0,
                (index / 8) as f32 * 3.0,
            ));
        }
        let radii = vec![30.0; positions.len()];
        let approximate = run(&mut ManyBodyForce::new(-400.0, 0.9), &positions, &radii, &[]);
        let exact = run(&mut ManyBodyForce::new(-400.0, 0.0), &positions, &radii, &[]);
        let error = (approximate[0] - exact[0]).length() / exact[0].length();
        assert!(error < 0.05, "relative error {error}");
    }

    #[test]
    fn center_force_moves_everyone_toward_center() {
        let velocities = run(
            &mut CenterForce { strength: 0.5 },
            &[vec2(0.0, 0.0), vec2(20.0, 0.0)],
            &[30.0, 30.0],
            &[],
        );
        assert_eq!(velocities[0], vec2(45.0, 50.0));
        assert_eq!(velocities[0], velocities[1]);
    }

    #[test]
    fn collision_separates_overlapping_circles_only() {
        let overlapping = run(
            &mut CollisionForce { strength: 1.0 },
            &[vec2(0.0, 0.0), vec2(40.0, 0.0)],
            &[30.0, 30.0],
            &[],
        );
        assert_eq!(overlapping[0], vec2(-10.0, 0.0));
        assert_eq!(overlapping[1], vec2(10.0, 0.0));

        let apart = run(
            &mut CollisionForce { strength: 1.0 },
            &[vec2(0.0, 0.0), vec2(61.0, 0.0)],
            &[30.0, 30.0],
            &[],
        );
        assert!(apart.iter().all(|velocity| *velocity == Vec2::ZERO));
    }

    #[test]
    fn smaller_circle_yields_more_in_a_collision() {
        let velocities = run(
            &mut CollisionForce { strength: 1.0 },
            &[vec2(0.0, 0.0), vec2(50.0, 0.0)],
            &[50.0, 30.0],
            &[],
        );
        assert!(velocities[1].x.abs() > velocities[0].x.abs());
    }

    #[test]
    fn collision_reach_depends_on_both_kinds() {
        let card = NodeKind::Card.collision_radius();
        let project = NodeKind::Project.collision_radius();
        // Cards 65 apart clear each other (reach 60); the project 75 from the
        // last card does not (reach 80).
        let mut positions = (0..12)
            .map(|index| vec2(index as f32 * 65.0, 0.0))
            .collect::<Vec<_>>();
        let mut radii = vec![card; positions.len()];
        positions.push(vec2(11.0 * 65.0 + 75.0, 0.0));
        radii.push(project);

        let velocities = run(&mut CollisionForce { strength: 1.0 }, &positions, &radii, &[]);
        assert!(velocities[..11].iter().all(|velocity| *velocity == Vec2::ZERO));
        assert!(velocities[11].x < 0.0);
        assert!(velocities[12].x > 0.0);
    }
}
