//! Camera / viewport mapper.
//!
//! `height` is inverse zoom: world units per screen pixel. It chases
//! `goto_height` with a single-pole filter each frame.

use glam::DVec2;

use birdspace_core::constants::*;
use birdspace_core::state::{CameraView, CullBounds};
use birdspace_core::types::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World point at the center of the viewport.
    pub focus: Position,
    pub height: f64,
    pub goto_height: f64,
    half_width: f64,
    half_height: f64,
    cull: CullBounds,
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        let mut camera = Self {
            focus: Position::default(),
            height: CAMERA_START_HEIGHT,
            goto_height: CAMERA_START_GOTO_HEIGHT,
            half_width: width / 2.0,
            half_height: height / 2.0,
            cull: CullBounds::default(),
        };
        camera.cull = camera.cull_bounds();
        camera
    }

    /// Return to the scene-entry zoom, keeping the viewport size.
    pub fn reset(&mut self) {
        self.focus = Position::default();
        self.height = CAMERA_START_HEIGHT;
        self.goto_height = CAMERA_START_GOTO_HEIGHT;
        self.cull = self.cull_bounds();
    }

    pub fn world_to_screen(&self, p: &Position) -> DVec2 {
        DVec2::new(
            self.half_width + (p.x - self.focus.x) / self.height,
            self.half_height + (p.y - self.focus.y) / self.height,
        )
    }

    pub fn screen_to_world(&self, s: DVec2) -> Position {
        Position::new(
            (s.x - self.half_width) * self.height + self.focus.x,
            (s.y - self.half_height) * self.height + self.focus.y,
        )
    }

    pub fn scale_to_screen(&self, length: f64) -> f64 {
        length / self.height
    }

    pub fn scale_to_world(&self, pixels: f64) -> f64 {
        pixels * self.height
    }

    /// Wheel input: negative zooms out, positive zooms in.
    pub fn apply_scroll(&mut self, scroll: f64) {
        if scroll < 0.0 {
            self.goto_height *= CAMERA_ZOOM_OUT;
        } else if scroll > 0.0 {
            self.goto_height *= CAMERA_ZOOM_IN;
        }
    }

    /// Per-frame update: scroll, clamp the target to the controlled entity's
    /// limit and the global floor, smooth, then recompute the cull rectangle.
    pub fn update(&mut self, scroll: f64, max_height: Option<f64>) {
        self.apply_scroll(scroll);
        if let Some(max) = max_height {
            if self.goto_height > max {
                self.goto_height = max;
            }
        }
        if self.goto_height < CAMERA_MIN_HEIGHT {
            self.goto_height = CAMERA_MIN_HEIGHT;
        }
        self.height += (self.goto_height - self.height) * CAMERA_SMOOTHING;
        self.cull = self.cull_bounds();
    }

    /// Inverse-mapped viewport corners widened by the cull margin.
    pub fn cull_bounds(&self) -> CullBounds {
        let (left, top, right, bottom) = CULL_MARGIN;
        let min = self.screen_to_world(DVec2::ZERO);
        let max = self.screen_to_world(DVec2::new(self.half_width * 2.0, self.half_height * 2.0));
        CullBounds {
            min: Position::new(min.x - left, min.y - top),
            max: Position::new(max.x + right, max.y + bottom),
        }
    }

    /// Cull rectangle computed by the last `update`.
    pub fn cull(&self) -> CullBounds {
        self.cull
    }

    pub fn is_visible(&self, p: &Position) -> bool {
        self.cull.contains(p)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.half_width = width / 2.0;
        self.half_height = height / 2.0;
        self.cull = self.cull_bounds();
    }

    /// Free-camera pan by whole steps along each axis.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let step = CAMERA_PAN_STEP * self.height * self.half_width;
        self.focus.x += dx * step;
        self.focus.y += dy * step;
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.half_width * 2.0, self.half_height * 2.0)
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            focus: self.focus,
            height: self.height,
            goto_height: self.goto_height,
            cull: self.cull,
        }
    }
}
