pub mod camera;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod level;
pub mod logging;
pub mod timer;
