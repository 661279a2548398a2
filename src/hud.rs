/// On-screen text: the FPS counter and the player stats block.

use crate::entities::World;

/// A line-oriented text entity anchored at a terminal cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub column: u16,
    pub row: u16,
    text: String,
}

impl Text {
    pub fn new(column: u16, row: u16) -> Self {
        Self {
            column,
            row,
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn update_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn height(&self) -> u16 {
        self.text.lines().count() as u16
    }
}

/// Frames per second averaged over the whole session.  Implausible values
/// (the first frames, before the clock has moved) read as 0.
pub fn average_fps(counted_frames: u64, elapsed_ms: u64) -> f32 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    let fps = counted_frames as f32 / (elapsed_ms as f32 / 1000.0);
    if fps > 20000.0 {
        0.0
    } else {
        fps
    }
}

pub fn fps_text(fps: f32) -> String {
    format!("FPS: {:.1}", fps)
}

pub fn stats_text(world: &World) -> String {
    let (pos, old) = world
        .player()
        .map(|p| (p.mimic.pos, p.mimic.old_pos))
        .unwrap_or_default();
    format!(
        "X: {:.1}\nY: {:.1}\noX: {:.1}\noY: {:.1}\nEnemies: {}\nKills: {}\nHits: {}",
        pos.x,
        pos.y,
        old.x,
        old.y,
        world.enemy_count(),
        world.kills,
        world.hits_taken,
    )
}

/// The two HUD entities, stacked in the top-left corner.
#[derive(Clone, Debug)]
pub struct Hud {
    pub fps: Text,
    pub stats: Text,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            fps: Text::new(1, 0),
            stats: Text::new(1, 2),
        }
    }

    pub fn refresh(&mut self, fps: f32, world: &World) {
        self.fps.update_text(fps_text(fps));
        self.stats.update_text(stats_text(world));
        self.stats.row = self.fps.row + self.fps.height() + 1;
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}
