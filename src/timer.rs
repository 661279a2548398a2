/// Wall-clock stopwatch measured in milliseconds.
///
/// Used for the frame cap, delta time, the FPS average and the enemy spawn
/// clock.  A stopped timer reports 0 ticks; a paused one keeps reporting the
/// ticks it had when it was paused.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    paused_with: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start from zero.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.paused_with = None;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.paused_with = None;
    }

    pub fn pause(&mut self) {
        if let (Some(start), None) = (self.started_at, self.paused_with) {
            self.paused_with = Some(start.elapsed());
        }
    }

    pub fn unpause(&mut self) {
        if let Some(elapsed) = self.paused_with.take() {
            self.started_at = Instant::now().checked_sub(elapsed).or(Some(Instant::now()));
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_with.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.paused_with) {
            (_, Some(paused)) => paused,
            (Some(start), None) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Elapsed time in seconds, the unit entity updates consume.
    pub fn seconds(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}
