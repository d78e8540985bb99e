// Everything one frame needs, owned in one place and passed by reference.
// Visual: one call to `render_frame` = one finished picture in `screen`.

use log::{info, trace};
use vek::Vec2;

use crate::composite::{reveal, Layers};
use crate::draw::draw_rect_outline;
use crate::emitter::{Emitter, VisibilityPass};
use crate::error::Error;
use crate::geometry::Obstacle;
use crate::mask::{clear_mask, render_hits, StrokeStyle};
use crate::types::{FrameBuffer, Mask};

pub const OUTLINE_COLOR: u32 = 0x00_FF_FF_FF;

/// What happened in one frame (for the HUD and the log).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub rays: usize,
    pub hits: usize,
}

pub struct Scene {
    pub obstacles: Vec<Obstacle>,
    pub emitter: Emitter,
    pub layers: Layers,
    pub stroke: StrokeStyle,
    pub show_outlines: bool,
    visibility: VisibilityPass,
    swapped: bool,
}

impl Scene {
    /// Emitter starts in the middle of the layers.
    pub fn new(
        obstacles: Vec<Obstacle>,
        ray_count: usize,
        layers: Layers,
        stroke: StrokeStyle,
    ) -> Self {
        let centre = Vec2::new(layers.base.width as f32 / 2.0, layers.base.height as f32 / 2.0);
        Self {
            obstacles,
            emitter: Emitter::new(centre, ray_count),
            layers,
            stroke,
            show_outlines: true,
            visibility: VisibilityPass::new(),
            swapped: false,
        }
    }

    pub fn swapped(&self) -> bool {
        self.swapped
    }

    /// Pointer press: the first obstacle containing (x, y) flips which image is revealed.
    /// Returns true if a swap happened.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let Some(index) = self.obstacles.iter().position(|o| o.contains(x, y)) else {
            return false;
        };
        self.swapped = !self.swapped;
        self.layers.swap();
        info!("obstacle {index} clicked at ({x:.0}, {y:.0}); swapped = {}", self.swapped);
        true
    }

    /// One frame, strictly in order: clear -> move emitter -> cast -> stroke -> composite -> outlines.
    /// `pointer == None` (cursor outside) keeps the emitter where it was.
    pub fn render_frame(
        &mut self,
        pointer: Option<(f32, f32)>,
        mask: &mut Mask,
        screen: &mut FrameBuffer,
    ) -> Result<FrameStats, Error> {
        clear_mask(mask);

        if let Some((x, y)) = pointer {
            self.emitter.update(x, y);
        }

        self.visibility.cast(&self.emitter, &self.obstacles);
        let hits = render_hits(mask, self.emitter.position(), self.visibility.hits(), &self.stroke);

        reveal(screen, &self.layers, mask)?;

        if self.show_outlines {
            for obstacle in &self.obstacles {
                draw_rect_outline(screen, obstacle, OUTLINE_COLOR);
            }
        }

        let stats = FrameStats { rays: self.emitter.ray_count(), hits };
        trace!("frame at {:?}: {:?}", self.emitter.position(), stats);
        Ok(stats)
    }
}
