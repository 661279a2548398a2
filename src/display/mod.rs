/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// scene.  No game logic is performed; this module only translates world
/// state into terminal commands.

pub mod sprites;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::camera::Camera;
use crate::entities::{Mimic, World};
use crate::geometry::Vector2;
use crate::hud::{Hud, Text};
use crate::level::Level;

use self::sprites::{Sprite, Sprites};

const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str =
    "WASD/arrows: move  mouse: aim  click: shoot  q/o: spawn  x: clear  Esc: quit";

// ── Screen geometry ───────────────────────────────────────────────────────────

/// Terminal size and the world extent of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub columns: u16,
    pub rows: u16,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Screen {
    /// Viewport size in world units.
    pub fn viewport(&self) -> (f32, f32) {
        (
            self.columns as f32 * self.cell_width,
            self.rows as f32 * self.cell_height,
        )
    }

    /// Screen-space point (world units, origin top-left) at a cell's center.
    pub fn cell_center(&self, column: u16, row: u16) -> Vector2 {
        Vector2::new(
            (column as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }
}

/// Everything one frame draws.
pub struct Scene<'a> {
    pub world: &'a World,
    pub camera: &'a Camera,
    pub level: &'a Level,
    pub hud: &'a Hud,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  The background covers every cell, so no
/// clear is needed.
pub fn render<W: Write>(
    out: &mut W,
    scene: &Scene,
    screen: &Screen,
    sprites: &Sprites,
) -> std::io::Result<()> {
    draw_background(out, scene, screen, sprites)?;

    for actor in &scene.world.actors {
        draw_mimic(out, actor.mimic(), sprites.for_actor(actor), scene.camera, screen)?;
    }
    for bullet in &scene.world.bullets {
        draw_mimic(out, &bullet.mimic, sprites.for_bullet(bullet), scene.camera, screen)?;
    }

    draw_text(out, &scene.hud.fps, screen)?;
    draw_text(out, &scene.hud.stats, screen)?;
    draw_controls_hint(out, screen)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Level tiles under the camera, sampled at each cell's center.  A viewport
/// entirely past the level edge is filled with the void style.
fn draw_background<W: Write>(
    out: &mut W,
    scene: &Scene,
    screen: &Screen,
    sprites: &Sprites,
) -> std::io::Result<()> {
    if !scene.camera.rect().has_intersection(&scene.level.bounds()) {
        let void = sprites.for_tile(None);
        let blank: String = std::iter::repeat(void.glyph).take(screen.columns as usize).collect();
        out.queue(style::SetForegroundColor(void.color))?;
        for row in 0..screen.rows {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print(&blank))?;
        }
        return Ok(());
    }

    for row in 0..screen.rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut current: Option<Color> = None;
        let mut run = String::new();

        for column in 0..screen.columns {
            let world = scene.camera.screen_to_world(screen.cell_center(column, row));
            let tile = sprites.for_tile(scene.level.tile_at(world));
            if current != Some(tile.color) {
                if let Some(color) = current {
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                current = Some(tile.color);
            }
            run.push(tile.glyph);
        }

        if let Some(color) = current {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(&run))?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a sprite at the mimic's truncated position, clipped to the screen.
fn draw_mimic<W: Write>(
    out: &mut W,
    mimic: &Mimic,
    sprite: &Sprite,
    camera: &Camera,
    screen: &Screen,
) -> std::io::Result<()> {
    let pos = Vector2::new(mimic.pos.x.trunc(), mimic.pos.y.trunc());
    let origin = camera.world_to_screen(pos);
    let base_column = (origin.x / screen.cell_width).floor() as i32;
    let base_row = (origin.y / screen.cell_height).floor() as i32;

    out.queue(style::SetForegroundColor(sprite.color))?;
    for (dy, line) in sprite.frame(mimic.angle).iter().enumerate() {
        let row = base_row + dy as i32;
        if row < 0 || row >= screen.rows as i32 {
            continue;
        }
        for (dx, glyph) in line.chars().enumerate() {
            let column = base_column + dx as i32;
            if column < 0 || column >= screen.columns as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(column as u16, row as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(out: &mut W, text: &Text, screen: &Screen) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;
    for (i, line) in text.lines().enumerate() {
        let row = text.row + i as u16;
        if row >= screen.rows {
            break;
        }
        let room = screen.columns.saturating_sub(text.column) as usize;
        let clipped: String = line.chars().take(room).collect();
        out.queue(cursor::MoveTo(text.column, row))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let clipped: String = CONTROLS_HINT
        .chars()
        .take(screen.columns.saturating_sub(1) as usize)
        .collect();
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(clipped))?;
    Ok(())
}
