/// Named drawable handles, built once at startup and handed to the render
/// stage by reference.

use crossterm::style::Color;

use crate::entities::{Actor, Bullet, BulletOwner};
use crate::level::Tile;

/// Arrows for the eight compass octants, starting at +x and turning
/// clockwise (screen y grows downward).
const ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

/// Octant index for an angle in degrees.
pub fn octant(angle: f32) -> usize {
    let a = angle.rem_euclid(360.0);
    (((a + 22.5) / 45.0) as usize) % 8
}

/// A block of glyph rows.  Rotating sprites carry one frame per octant;
/// static ones carry a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub color: Color,
    frames: Vec<Vec<String>>,
}

impl Sprite {
    pub fn fixed(color: Color, rows: &[&str]) -> Self {
        Self {
            color,
            frames: vec![rows.iter().map(|r| r.to_string()).collect()],
        }
    }

    pub fn rotating(color: Color, frame: impl Fn(char) -> Vec<String>) -> Self {
        Self {
            color,
            frames: ARROWS.iter().map(|&a| frame(a)).collect(),
        }
    }

    /// Rows to draw for a facing angle.
    pub fn frame(&self, angle: f32) -> &[String] {
        if self.frames.len() == 1 {
            return &self.frames[0];
        }
        &self.frames[octant(angle) % self.frames.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileStyle {
    pub glyph: char,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct Sprites {
    pub player: Sprite,
    pub enemy: Sprite,
    pub player_bullet: Sprite,
    pub enemy_bullet: Sprite,
    pub floor: TileStyle,
    pub grass: TileStyle,
    pub wall: TileStyle,
    pub water: TileStyle,
    /// Drawn where the camera sees past the level edge.
    pub void: TileStyle,
}

impl Sprites {
    pub fn load() -> Self {
        Self {
            player: Sprite::rotating(Color::White, |a| {
                vec![format!("╭{a}{a}╮"), "╰──╯".to_string()]
            }),
            enemy: Sprite::fixed(Color::Red, &["◢▆▆◣", "◥▀▀◤"]),
            player_bullet: Sprite::rotating(Color::Cyan, |a| vec![a.to_string()]),
            enemy_bullet: Sprite::fixed(Color::Magenta, &["•"]),
            floor: TileStyle { glyph: '·', color: Color::DarkGrey },
            grass: TileStyle { glyph: '"', color: Color::DarkGreen },
            wall: TileStyle { glyph: '█', color: Color::Grey },
            water: TileStyle { glyph: '≈', color: Color::DarkBlue },
            void: TileStyle { glyph: ' ', color: Color::Reset },
        }
    }

    pub fn for_actor(&self, actor: &Actor) -> &Sprite {
        match actor {
            Actor::Player(_) => &self.player,
            Actor::Enemy(_) => &self.enemy,
        }
    }

    pub fn for_bullet(&self, bullet: &Bullet) -> &Sprite {
        match bullet.owner {
            BulletOwner::Player => &self.player_bullet,
            BulletOwner::Enemy => &self.enemy_bullet,
        }
    }

    pub fn for_tile(&self, tile: Option<Tile>) -> TileStyle {
        match tile {
            Some(Tile::Floor) => self.floor,
            Some(Tile::Grass) => self.grass,
            Some(Tile::Wall) => self.wall,
            Some(Tile::Water) => self.water,
            None => self.void,
        }
    }
}
