//! Time management utilities

use std::time::Instant;

/// Wall-clock frame timer
///
/// Each call to [`Clock::get_delta`] returns the time since the previous call
/// (or since the clock started) and moves the reference point forward.
/// Independent of the backend clock used for scheduling.
#[derive(Debug, Clone)]
pub struct Clock {
    start_time: Instant,
    old_time: Instant,
    elapsed: f32,
    running: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a new clock, already running
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            old_time: now,
            elapsed: 0.0,
            running: true,
        }
    }

    /// Restart the clock from zero
    pub fn start(&mut self) {
        let now = Instant::now();
        self.start_time = now;
        self.old_time = now;
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Stop the clock, accumulating the time since the last query
    pub fn stop(&mut self) {
        self.get_delta();
        self.running = false;
    }

    /// Check if the clock is currently running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the clock was started
    pub fn get_elapsed_time(&mut self) -> f32 {
        self.get_delta();
        self.elapsed
    }

    /// Seconds since the previous call, never negative
    ///
    /// A stopped clock is restarted by this call and reports zero.
    pub fn get_delta(&mut self) -> f32 {
        if !self.running {
            self.start();
            return 0.0;
        }

        let now = Instant::now();
        let diff = now.saturating_duration_since(self.old_time).as_secs_f32();
        self.old_time = now;
        self.elapsed += diff;
        diff
    }

    /// Instant the clock was last started
    pub fn start_time(&self) -> Instant {
        self.start_time
    }
}

/// Frames-per-second measurement against an external time source
///
/// Counts frames and publishes the count each time a full second of source
/// time has passed since the last boundary. The boundary advances by exactly
/// one second so long frames do not drift the measurement window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last_boundary: f64,
    frames: u32,
}

impl FpsCounter {
    /// Create a counter whose first measurement window starts at `now`
    pub fn new(now: f64) -> Self {
        Self {
            last_boundary: now,
            frames: 0,
        }
    }

    /// Record one frame at time `now`
    ///
    /// Returns the frame count of the window that just closed, if any.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        if now - self.last_boundary >= 1.0 {
            let fps = self.frames;
            self.frames = 0;
            self.last_boundary += 1.0;
            Some(fps)
        } else {
            None
        }
    }

    /// Frames counted in the current, still open window
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}
