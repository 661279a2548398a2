use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{debug, error, info};

use topdown_shooter::camera::Camera;
use topdown_shooter::compute::{
    aim_player, clear_mimics, init_world, player_shoot, spawn_enemy, spawn_random_enemy,
    steer_player, tick,
};
use topdown_shooter::config::{GameConfig, CONFIG_PATH};
use topdown_shooter::display::{self, sprites::Sprites, Scene, Screen};
use topdown_shooter::entities::World;
use topdown_shooter::error::Result;
use topdown_shooter::geometry::Vector2;
use topdown_shooter::hud::{average_fps, Hud};
use topdown_shooter::input::{Command, InputState};
use topdown_shooter::level::Level;
use topdown_shooter::logging;
use topdown_shooter::timer::Timer;

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal: {}", e);
            eprintln!("topdown_shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Startup is all-or-nothing: settings, log file and level must load before
/// the terminal is touched.
fn run() -> Result<()> {
    let config = GameConfig::load(Path::new(CONFIG_PATH))?;
    logging::init(&config)?;
    info!("topdown_shooter starting");

    let level = Level::load(&config.level_path, config.tile_width, config.tile_height)?;
    info!(
        path = %config.level_path.display(),
        columns = level.columns(),
        rows = level.rows(),
        "level loaded"
    );
    let sprites = Sprites::load();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let result = match setup_terminal(&mut out) {
        Ok(keyboard_enhanced) => {
            let result = play(&mut out, &config, &level, &sprites);
            restore_terminal(&mut out, keyboard_enhanced);
            result
        }
        Err(e) => {
            restore_terminal(&mut out, false);
            Err(e.into())
        }
    };

    info!("topdown_shooter stopped");
    result
}

/// Returns whether key-release reporting was enabled.
fn setup_terminal<W: Write>(out: &mut W) -> std::io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(keyboard_enhanced)
}

fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn play<W: Write>(out: &mut W, config: &GameConfig, level: &Level, sprites: &Sprites) -> Result<()> {
    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    game_loop(out, &rx, config, level, sprites)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn cell_to_world(camera: &Camera, screen: &Screen, column: u16, row: u16) -> Vector2 {
    camera.screen_to_world(screen.cell_center(column, row))
}

fn follow_player(camera: &mut Camera, world: &World) {
    if let Some(player) = world.player() {
        camera.update(player.mimic.center());
    }
}

/// One iteration: spawn clock → input → update + collisions → camera →
/// render → sleep out the rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    level: &Level,
    sprites: &Sprites,
) -> Result<()> {
    let mut rng = thread_rng();

    let (columns, rows) = terminal::size()?;
    let mut screen = Screen {
        columns,
        rows,
        cell_width: config.cell_width,
        cell_height: config.cell_height,
    };
    let (view_w, view_h) = screen.viewport();
    let mut camera = Camera::new(0.0, 0.0, view_w, view_h);

    let mut world = init_world(config, level.bounds());
    follow_player(&mut camera, &world);

    let mut input = InputState::new(config.hold_window_frames);
    let mut hud = Hud::new();
    let frame_budget = Duration::from_millis(config.frame_millis);

    let mut fps_timer = Timer::new();
    let mut cap_timer = Timer::new();
    let mut delta_timer = Timer::new();
    fps_timer.start();
    delta_timer.start();

    let mut counted_frames: u64 = 0;
    let mut last_spawn: u64 = 0;
    let mut frame: u64 = 0;

    loop {
        cap_timer.start();
        frame += 1;

        // ── Enemy spawn clock ────────────────────────────────────────────────
        if fps_timer.ticks().saturating_sub(last_spawn) > config.spawn_interval_millis {
            last_spawn = fps_timer.ticks();
            world = spawn_random_enemy(&world, &mut rng);
        }

        // ── Drain all pending input events (non-blocking) ────────────────────
        while let Ok(event) = rx.try_recv() {
            let Some(command) = input.handle(&event, frame) else {
                continue;
            };
            match command {
                Command::Quit => {
                    info!(frames = counted_frames, kills = world.kills, "quit requested");
                    return Ok(());
                }
                Command::Aim { column, row } => {
                    world = aim_player(&world, cell_to_world(&camera, &screen, column, row));
                }
                Command::Fire { column, row } => {
                    world = player_shoot(&world, cell_to_world(&camera, &screen, column, row));
                }
                Command::SpawnEnemyAtMouse { column, row } => {
                    world = spawn_enemy(&world, cell_to_world(&camera, &screen, column, row));
                }
                Command::SpawnRandomEnemy => {
                    world = spawn_random_enemy(&world, &mut rng);
                }
                Command::ClearMimics => {
                    world = clear_mimics(&world);
                }
                Command::Resize { columns, rows } => {
                    screen.columns = columns;
                    screen.rows = rows;
                    let (w, h) = screen.viewport();
                    camera.resize(w, h);
                    debug!(columns, rows, "terminal resized");
                }
            }
        }
        world = steer_player(&world, &input.controls(frame));

        hud.refresh(average_fps(counted_frames, fps_timer.ticks()), &world);

        // ── Simulation ───────────────────────────────────────────────────────
        let dt = delta_timer.seconds();
        world = tick(&world, dt);
        follow_player(&mut camera, &world);
        delta_timer.start();

        // ── Render ───────────────────────────────────────────────────────────
        let scene = Scene {
            world: &world,
            camera: &camera,
            level,
            hud: &hud,
        };
        display::render(out, &scene, &screen, sprites)?;

        counted_frames += 1;
        let elapsed = cap_timer.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}
