/// Viewport that follows one target through the level.

use crate::geometry::{Rect, Vector2};

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World position of the viewport's top-left corner.
    pub pos: Vector2,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            width,
            height,
        }
    }

    /// Recenter on the target, no smoothing and no clamping to the level.
    pub fn update(&mut self, target_center: Vector2) {
        self.pos.x = target_center.x - self.width / 2.0;
        self.pos.y = target_center.y - self.height / 2.0;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        screen + self.pos
    }

    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        world - self.pos
    }
}
