// Obstacles and the ray/segment intersection test.
// Visual: obstacles are the white rectangles; their edges are what stops a ray.

use vek::Vec2;

/// One straight edge between two fixed endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2<f32>,
    pub b: Vec2<f32>,
}

impl Segment {
    pub fn new(a: Vec2<f32>, b: Vec2<f32>) -> Self {
        Self { a, b }
    }
}

/// Axis-aligned rectangle that blocks rays. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    edges: [Segment; 4],
}

impl Obstacle {
    /// Corners are kept as given; the edges always close the loop
    /// top -> right -> bottom -> left, whatever the corner order.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let edges = [
            Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y1)),
            Segment::new(Vec2::new(x2, y1), Vec2::new(x2, y2)),
            Segment::new(Vec2::new(x2, y2), Vec2::new(x1, y2)),
            Segment::new(Vec2::new(x1, y2), Vec2::new(x1, y1)),
        ];
        Self { x1, y1, x2, y2, edges }
    }

    /// Resolve a rect given as fractions of the viewport, e.g. `[0.1, 0.1, 0.2, 0.2]`.
    pub fn from_fractions(rect: [f32; 4], width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self::new(rect[0] * w, rect[1] * h, rect[2] * w, rect[3] * h)
    }

    pub fn edges(&self) -> &[Segment; 4] {
        &self.edges
    }

    /// Inclusive point-in-rectangle test (used for click-to-swap).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (min_x, max_x) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (min_y, max_y) = (self.y1.min(self.y2), self.y1.max(self.y2));
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

/// Intersect the half-line `origin + u * dir` (u > 0) with `edge`.
///
/// `t` runs along the edge from `a` (0) to `b` (1); only hits strictly inside the
/// edge count. Parallel or coincident lines (`den == 0`, bit-exact) never hit.
/// Zero-length edges also give `den == 0`, so they are skipped too.
#[inline]
pub fn intersect(edge: &Segment, origin: Vec2<f32>, dir: Vec2<f32>) -> Option<Vec2<f32>> {
    let (x1, y1) = (edge.a.x, edge.a.y);
    let (x2, y2) = (edge.b.x, edge.b.y);
    let (x3, y3) = (origin.x, origin.y);
    let (x4, y4) = (origin.x + dir.x, origin.y + dir.y);

    let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if den == 0.0 {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / den;
    if t > 0.0 && t < 1.0 && u > 0.0 {
        Some(Vec2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn edges_form_closed_loop() {
        // Inverted corners still close the loop.
        for ob in [Obstacle::new(10.0, 10.0, 20.0, 30.0), Obstacle::new(20.0, 30.0, 10.0, 10.0)] {
            let e = ob.edges();
            for i in 0..4 {
                assert_eq!(e[i].b, e[(i + 1) % 4].a);
            }
        }
    }

    #[test]
    fn edge_order_is_top_right_bottom_left() {
        let ob = Obstacle::new(0.0, 0.0, 4.0, 2.0);
        let e = ob.edges();
        assert_eq!(e[0], Segment::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)));
        assert_eq!(e[1], Segment::new(Vec2::new(4.0, 0.0), Vec2::new(4.0, 2.0)));
        assert_eq!(e[2], Segment::new(Vec2::new(4.0, 2.0), Vec2::new(0.0, 2.0)));
        assert_eq!(e[3], Segment::new(Vec2::new(0.0, 2.0), Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_is_inclusive_and_order_independent() {
        let ob = Obstacle::new(20.0, 20.0, 10.0, 10.0);
        assert!(ob.contains(15.0, 15.0));
        assert!(ob.contains(10.0, 10.0));
        assert!(ob.contains(20.0, 20.0));
        assert!(!ob.contains(9.9, 15.0));
        assert!(!ob.contains(15.0, 20.1));
    }

    #[test]
    fn from_fractions_scales_to_viewport() {
        let ob = Obstacle::from_fractions([0.1, 0.2, 0.5, 0.4], 1000, 500);
        assert!(approx(ob.x1, 100.0, 1e-3));
        assert!(approx(ob.y1, 100.0, 1e-3));
        assert!(approx(ob.x2, 500.0, 1e-3));
        assert!(approx(ob.y2, 200.0, 1e-3));
    }

    #[test]
    fn near_corner_hit_at_45_degrees() {
        // Slightly below the exact diagonal so the hit lands inside the top edge.
        let ob = Obstacle::new(10.0, 10.0, 20.0, 20.0);
        let dir = Vec2::new(0.7072, 0.7070);
        let top = &ob.edges()[0];
        let p = intersect(top, Vec2::zero(), dir).expect("top edge hit");
        assert!(approx(p.x, 10.0, 0.01));
        assert!(approx(p.y, 10.0, 1e-4));
        assert!(approx(p.magnitude(), 14.14, 0.01));
    }

    #[test]
    fn exact_diagonal_through_corner_misses() {
        // t lands on 0 or 1 for every edge meeting at the corner; endpoints are excluded.
        let ob = Obstacle::new(10.0, 10.0, 20.0, 20.0);
        let dir = Vec2::new(0.707, 0.707);
        for edge in ob.edges() {
            assert_eq!(intersect(edge, Vec2::zero(), dir), None);
        }
    }

    #[test]
    fn parallel_ray_never_hits() {
        let edge = Segment::new(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0));
        assert_eq!(intersect(&edge, Vec2::new(-3.0, 5.0), Vec2::new(1.0, 0.0)), None);
        assert_eq!(intersect(&edge, Vec2::new(-3.0, 0.0), Vec2::new(1.0, 0.0)), None);
    }

    #[test]
    fn endpoints_and_behind_origin_are_excluded() {
        let edge = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
        // Through endpoint a (t == 0).
        assert_eq!(intersect(&edge, Vec2::new(-5.0, 0.0), Vec2::new(1.0, 0.0)), None);
        // Edge is behind the ray (u < 0).
        assert_eq!(intersect(&edge, Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0)), None);
        // Beyond the edge's far end.
        assert_eq!(intersect(&edge, Vec2::new(-5.0, 12.0), Vec2::new(1.0, 0.0)), None);
        // Straight hit.
        assert_eq!(
            intersect(&edge, Vec2::new(-5.0, 5.0), Vec2::new(1.0, 0.0)),
            Some(Vec2::new(0.0, 5.0))
        );
    }

    #[test]
    fn zero_area_obstacle_does_not_panic() {
        let ob = Obstacle::new(5.0, 5.0, 5.0, 5.0);
        for edge in ob.edges() {
            assert_eq!(intersect(edge, Vec2::zero(), Vec2::new(0.6, 0.8)), None);
        }
    }

    #[test]
    fn random_hits_lie_on_edge_and_ahead_of_ray() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut hits = 0;
        for _ in 0..2000 {
            let edge = Segment::new(
                Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)),
                Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)),
            );
            let origin = Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
            let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
            let dir = Vec2::new(angle.cos(), angle.sin());

            let Some(p) = intersect(&edge, origin, dir) else { continue };
            hits += 1;

            // On the segment: distance to both ends adds up to its length.
            let len = edge.a.distance(edge.b);
            assert!(approx(edge.a.distance(p) + p.distance(edge.b), len, 1e-2));
            // Ahead of the origin.
            assert!((p - origin).dot(dir) > -0.1);
        }
        assert!(hits > 100);
    }

    #[test]
    fn intersect_is_deterministic() {
        let edge = Segment::new(Vec2::new(3.0, -7.0), Vec2::new(11.0, 9.0));
        let origin = Vec2::new(-2.5, 1.25);
        let dir = Vec2::new(0.8, 0.6);
        assert_eq!(intersect(&edge, origin, dir), intersect(&edge, origin, dir));
    }
}
