use eframe::egui::{Vec2, vec2};

const BODIES_PER_LEAF: usize = 8;
const MAX_DEPTH: usize = 10;
const MIN_HALF_SIDE: f32 = 0.5;

/// Axis-aligned square of the layout plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Square {
    pub(super) center: Vec2,
    pub(super) half: f32,
}

impl Square {
    /// Smallest square around every point, or `None` when there is no finite
    /// point to enclose.
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), &point| (min.min(point), max.max(point)),
        );
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }

        Some(Self {
            center: (min + max) * 0.5,
            half: ((max - min).max_elem() * 0.5).max(MIN_HALF_SIDE),
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point - self.center).abs().max_elem() <= self.half
    }

    pub(super) fn side(self) -> f32 {
        self.half * 2.0
    }

    /// Bit 0 is the right half, bit 1 the lower half.
    fn quadrant_of(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }

    fn quadrant(self, quadrant: usize) -> Self {
        let half = self.half * 0.5;
        let sign = |bit: usize| if quadrant & bit == 0 { -1.0 } else { 1.0 };
        Self {
            center: self.center + vec2(sign(1), sign(2)) * half,
            half,
        }
    }

    /// Squared distance between the closest points of two squares; zero when
    /// they touch or overlap.
    fn gap_sq(self, other: Self) -> f32 {
        let gap = ((self.center - other.center).abs() - Vec2::splat(self.half + other.half))
            .max(Vec2::ZERO);
        gap.length_sq()
    }
}

/// One cell of the Barnes-Hut tree over the layout's bodies.
///
/// Every cell knows how many bodies it holds, where their centroid is and the
/// largest collision radius among them. Only leaves list their bodies.
pub(super) struct QuadNode {
    pub(super) square: Square,
    pub(super) centroid: Vec2,
    pub(super) mass: f32,
    pub(super) max_radius: f32,
    pub(super) bodies: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    /// `radii` holds the collision radius of each body, by index.
    pub(super) fn build(positions: &[Vec2], radii: &[f32]) -> Option<Self> {
        let square = Square::enclosing(positions)?;
        Some(Self::subdivide(square, (0..positions.len()).collect(), positions, radii, 0))
    }

    fn leaf(square: Square, bodies: Vec<usize>, positions: &[Vec2], radii: &[f32]) -> Self {
        let mass = bodies.len() as f32;
        let sum = bodies.iter().fold(Vec2::ZERO, |sum, &body| sum + positions[body]);
        let max_radius = bodies
            .iter()
            .map(|&body| radii.get(body).copied().unwrap_or(0.0))
            .fold(0.0, f32::max);
        Self {
            square,
            centroid: if bodies.is_empty() { square.center } else { sum / mass },
            mass,
            max_radius,
            bodies,
            children: Default::default(),
        }
    }

    fn subdivide(
        square: Square,
        bodies: Vec<usize>,
        positions: &[Vec2],
        radii: &[f32],
        depth: usize,
    ) -> Self {
        if depth >= MAX_DEPTH || bodies.len() <= BODIES_PER_LEAF {
            return Self::leaf(square, bodies, positions, radii);
        }

        let mut buckets: [Vec<usize>; 4] = Default::default();
        for &body in &bodies {
            buckets[square.quadrant_of(positions[body])].push(body);
        }
        // Coincident bodies never separate.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() < 2 {
            return Self::leaf(square, bodies, positions, radii);
        }

        let mut node = Self::leaf(square, Vec::new(), positions, radii);
        let mut weighted = Vec2::ZERO;
        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let child =
                Self::subdivide(square.quadrant(quadrant), bucket, positions, radii, depth + 1);
            node.mass += child.mass;
            node.max_radius = node.max_radius.max(child.max_radius);
            weighted += child.centroid * child.mass;
            node.children[quadrant] = Some(Box::new(child));
        }
        node.centroid = weighted / node.mass;
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Whether any body here could overlap any body in `other`: the gap
    /// between the cells is below the sum of their largest radii.
    pub(super) fn may_collide(&self, other: &Self) -> bool {
        let reach = self.max_radius + other.max_radius;
        self.square.gap_sq(other.square) < reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::NodeKind;

    fn bodies_of(node: &QuadNode, out: &mut Vec<usize>) {
        out.extend_from_slice(&node.bodies);
        for child in node.children.iter().flatten() {
            bodies_of(child, out);
        }
    }

    #[test]
    fn every_body_lands_in_exactly_one_leaf() {
        let positions = (0..100)
            .map(|index| vec2((index % 10) as f32 * 13.0, (index / 10) as f32 * 7.0))
            .collect::<Vec<_>>();
        let radii = vec![30.0; positions.len()];
        let tree = QuadNode::build(&positions, &radii).unwrap();

        let mut seen = Vec::new();
        bodies_of(&tree, &mut seen);
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
        assert_eq!(tree.mass, 100.0);
        assert!(!tree.is_leaf());
        assert!(positions.iter().all(|&point| tree.square.contains(point)));
    }

    #[test]
    fn cells_carry_their_largest_radius() {
        let mut positions = (0..20)
            .map(|index| vec2(index as f32 * 10.0, 0.0))
            .collect::<Vec<_>>();
        positions.push(vec2(500.0, 500.0));
        let mut radii = vec![NodeKind::Card.collision_radius(); 20];
        radii.push(NodeKind::Project.collision_radius());
        let tree = QuadNode::build(&positions, &radii).unwrap();

        assert_eq!(tree.max_radius, 50.0);
        let project_cell = tree.children[3].as_deref().unwrap();
        assert_eq!(project_cell.bodies, [20]);
        assert_eq!(project_cell.max_radius, 50.0);
        assert_eq!(tree.children[0].as_deref().unwrap().max_radius, 30.0);
    }

    #[test]
    fn cell_pairs_are_pruned_by_their_own_radii() {
        let project = NodeKind::Project.collision_radius();
        let card = NodeKind::Card.collision_radius();
        // A lone body sits in a unit square, so cells are one unit closer
        // than their bodies.
        let cell = |x: f32, radius: f32| QuadNode::build(&[vec2(x, 0.0)], &[radius]).unwrap();

        let project_cell = cell(0.0, project);
        assert!(project_cell.may_collide(&cell(80.5, card)));
        assert!(!project_cell.may_collide(&cell(81.5, card)));

        let card_cell = cell(0.0, card);
        assert!(card_cell.may_collide(&cell(60.5, card)));
        assert!(!card_cell.may_collide(&cell(61.5, card)));
    }

    #[test]
    fn coincident_bodies_stay_in_a_leaf() {
        let positions = vec![vec2(5.0, 5.0); 20];
        let tree = QuadNode::build(&positions, &[15.0; 20]).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.bodies.len(), 20);
        assert_eq!(tree.centroid, vec2(5.0, 5.0));
    }

    #[test]
    fn empty_or_non_finite_input_builds_nothing() {
        assert!(QuadNode::build(&[], &[]).is_none());
        assert!(QuadNode::build(&[vec2(f32::NAN, 0.0)], &[30.0]).is_none());
    }
}
