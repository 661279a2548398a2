/// Input model: terminal events in, game commands and held-key state out.
///
/// Instead of acting on each key event individually we record the frame of
/// the last press/repeat event for every key.  A key counts as held while
/// that record is fresher than the hold window, or until its release event
/// arrives on terminals that report releases.  This lets movement keys be
/// held together while the mouse aims and fires.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Movement keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// One-shot actions produced by an event.  Positions are terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Debug: enemy at the mouse cursor.
    SpawnEnemyAtMouse { column: u16, row: u16 },
    /// Debug: enemy at a random spot.
    SpawnRandomEnemy,
    /// Debug: drop every actor but the player.
    ClearMimics,
    Aim { column: u16, row: u16 },
    Fire { column: u16, row: u16 },
    Resize { columns: u16, rows: u16 },
}

#[derive(Clone, Debug)]
pub struct InputState {
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
    mouse: (u16, u16),
}

impl InputState {
    pub fn new(hold_window: u64) -> Self {
        Self {
            key_frame: HashMap::new(),
            hold_window,
            mouse: (0, 0),
        }
    }

    /// Returns true if `key` was seen within the last `hold_window` frames.
    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    pub fn controls(&self, frame: u64) -> Controls {
        Controls {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
        }
    }

    /// Record an event seen during `frame` and translate it.
    pub fn handle(&mut self, event: &Event, frame: u64) -> Option<Command> {
        match event {
            Event::Key(key) => self.handle_key(key, frame),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => Some(Command::Resize {
                columns: *columns,
                rows: *rows,
            }),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, frame: u64) -> Option<Command> {
        match key.kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, frame);
                let (column, row) = self.mouse;
                match key.code {
                    KeyCode::Esc => Some(Command::Quit),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Command::Quit)
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        Some(Command::SpawnEnemyAtMouse { column, row })
                    }
                    KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::ClearMimics),
                    KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::SpawnRandomEnemy),
                    _ => None,
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, frame);
                None
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
                None
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<Command> {
        self.mouse = (mouse.column, mouse.row);
        let (column, row) = self.mouse;
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Command::Aim { column, row }),
            MouseEventKind::Down(MouseButton::Left) => Some(Command::Fire { column, row }),
            _ => None,
        }
    }
}
