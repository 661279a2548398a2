/// Static level layout, parsed once from a plain-text asset.
///
/// Format: one line per tile row, one glyph per tile.  Lines starting with
/// `//` are comments.  Blank lines are allowed only before the first row and
/// after the last one.
///
/// ```text
/// // arena
/// ##########
/// #..,,..~~#
/// ##########
/// ```

use std::fs;
use std::path::Path;

use crate::error::{GameError, Result};
use crate::geometry::{Rect, Vector2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Grass,
    Wall,
    Water,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Option<Tile> {
        match glyph {
            '.' => Some(Tile::Floor),
            ',' => Some(Tile::Grass),
            '#' => Some(Tile::Wall),
            '~' => Some(Tile::Water),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    columns: usize,
    rows: usize,
    tiles: Vec<Tile>,
    tile_width: u32,
    tile_height: u32,
    bounds: Rect,
}

impl Level {
    pub fn load(path: &Path, tile_width: u32, tile_height: u32) -> Result<Level> {
        let content = fs::read_to_string(path)?;
        Level::parse(&content, tile_width, tile_height)
    }

    pub fn parse(content: &str, tile_width: u32, tile_height: u32) -> Result<Level> {
        if tile_width == 0 || tile_height == 0 {
            return Err(GameError::LevelParse {
                line: 0,
                reason: format!("tile size {}x{} has no area", tile_width, tile_height),
            });
        }

        // (1-based line number, text) for every non-comment line
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end()))
            .filter(|(_, l)| !l.trim_start().starts_with("//"))
            .collect();

        let first = lines.iter().position(|(_, l)| !l.is_empty());
        let last = lines.iter().rposition(|(_, l)| !l.is_empty());
        let (first, last) = match (first, last) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                return Err(GameError::LevelParse {
                    line: 0,
                    reason: "level has no tile rows".to_string(),
                })
            }
        };

        let body = &lines[first..=last];
        let columns = body[0].1.chars().count();
        let mut tiles = Vec::with_capacity(columns * body.len());

        for &(line, text) in body {
            if text.is_empty() {
                return Err(GameError::LevelParse {
                    line,
                    reason: "blank line inside the tile layout".to_string(),
                });
            }
            let width = text.chars().count();
            if width != columns {
                return Err(GameError::LevelParse {
                    line,
                    reason: format!("row is {} tiles wide, expected {}", width, columns),
                });
            }
            for (col, glyph) in text.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).ok_or_else(|| GameError::LevelParse {
                    line,
                    reason: format!("unknown tile {:?} in column {}", glyph, col + 1),
                })?;
                tiles.push(tile);
            }
        }

        let rows = body.len();
        let (Some(width), Some(height)) = (extent(columns, tile_width), extent(rows, tile_height))
        else {
            return Err(GameError::LevelParse {
                line: 0,
                reason: format!(
                    "{}x{} tiles of {}x{} do not fit in world coordinates",
                    columns, rows, tile_width, tile_height
                ),
            });
        };

        Ok(Level {
            columns,
            rows,
            tiles,
            tile_width,
            tile_height,
            bounds: Rect::new(0, 0, width, height),
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile(&self, column: usize, row: usize) -> Option<Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles.get(row * self.columns + column).copied()
    }

    /// Tile under a world-space point, `None` outside the level.
    pub fn tile_at(&self, point: Vector2) -> Option<Tile> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.tile_width as f32) as usize;
        let row = (point.y / self.tile_height as f32) as usize;
        self.tile(column, row)
    }

    /// Playable area in world units.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// World length of `count` tiles, `None` when it overflows `i32`.
fn extent(count: usize, tile: u32) -> Option<i32> {
    i32::try_from(count).ok()?.checked_mul(i32::try_from(tile).ok()?)
}
