// The pointer-tracked emitter and the per-frame visibility pass.
// Visual: every ray that reaches an obstacle edge becomes one bright stroke in the mask.

use crate::geometry::{intersect, Obstacle};
use vek::Vec2;

/// One ray for the current frame. Built fresh from the emitter every cast,
/// so it can never hold a stale position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec2<f32>,
    pub dir: Vec2<f32>, // unit length
}

/// Nearest edge crossing for one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Vec2<f32>,
    pub distance: f32,
}

/// Position + a fixed full-circle fan of directions.
pub struct Emitter {
    position: Vec2<f32>,
    directions: Vec<Vec2<f32>>,
}

impl Emitter {
    /// `ray_count` directions at `i * 360° / ray_count` (3600 -> 0.1° spacing).
    pub fn new(position: Vec2<f32>, ray_count: usize) -> Self {
        let step = 360.0_f64 / ray_count.max(1) as f64;
        let directions = (0..ray_count)
            .map(|i| {
                let a = (i as f64 * step).to_radians();
                Vec2::new(a.cos() as f32, a.sin() as f32)
            })
            .collect();
        Self { position, directions }
    }

    /// Move to the pointer. The only thing that ever changes.
    pub fn update(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn position(&self) -> Vec2<f32> {
        self.position
    }

    pub fn ray_count(&self) -> usize {
        self.directions.len()
    }

    /// Recompute this frame's rays from the current position.
    pub fn rays(&self) -> impl Iterator<Item = Ray> + '_ {
        let origin = self.position;
        self.directions.iter().map(move |&dir| Ray { origin, dir })
    }
}

/// Nearest hit of `ray` over every edge of every obstacle.
/// Strict `<`: on equal distance the first edge visited keeps the hit.
pub fn nearest_hit(ray: &Ray, obstacles: &[Obstacle]) -> Option<Hit> {
    let mut closest: Option<Hit> = None;
    let mut record = f32::INFINITY;

    for obstacle in obstacles {
        for edge in obstacle.edges() {
            let Some(point) = intersect(edge, ray.origin, ray.dir) else { continue };
            let d = ray.origin.distance(point);
            if d < record {
                record = d;
                closest = Some(Hit { point, distance: d });
            }
        }
    }
    closest
}

/// Per-frame visibility results: one slot per ray, reused between frames.
#[derive(Default)]
pub struct VisibilityPass {
    outcomes: Vec<Option<Hit>>,
}

impl VisibilityPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast every ray against every obstacle edge. O(rays × edges).
    /// Previous results are discarded first; nothing survives across frames.
    pub fn cast(&mut self, emitter: &Emitter, obstacles: &[Obstacle]) {
        self.outcomes.clear();
        self.outcomes
            .extend(emitter.rays().map(|ray| nearest_hit(&ray, obstacles)));
    }

    /// One entry per ray, in fan order.
    pub fn outcomes(&self) -> &[Option<Hit>] {
        &self.outcomes
    }

    /// Only the rays that hit something.
    pub fn hits(&self) -> impl Iterator<Item = &Hit> + '_ {
        self.outcomes.iter().flatten()
    }

    pub fn hit_count(&self) -> usize {
        self.hits().count()
    }
}
