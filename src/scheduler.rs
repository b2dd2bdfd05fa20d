//! Frame loop drivers
//!
//! A scheduler keeps calling `frame` while `keep_going` holds. The predicate is
//! checked before every frame, so stopping is just a state change seen on the
//! next iteration and the frame in flight always completes.
//!
//! The browser does not use these: its loop is a `requestAnimationFrame`
//! callback that checks the same predicate before rescheduling itself.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

pub trait Scheduler {
    /// Run frames until the predicate fails or a frame cap is hit.
    /// Returns the number of frames run.
    fn run_while<S, P, F>(&mut self, state: &mut S, keep_going: P, frame: F) -> u64
    where
        P: FnMut(&S) -> bool,
        F: FnMut(&mut S);
}

/// Runs frames back to back, for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled {
    pub max_frames: Option<u64>,
}

impl Unthrottled {
    pub fn capped(max_frames: u64) -> Self {
        Self {
            max_frames: Some(max_frames),
        }
    }
}

impl Scheduler for Unthrottled {
    fn run_while<S, P, F>(&mut self, state: &mut S, mut keep_going: P, mut frame: F) -> u64
    where
        P: FnMut(&S) -> bool,
        F: FnMut(&mut S),
    {
        let mut frames = 0;
        while keep_going(state) && self.max_frames.is_none_or(|max| frames < max) {
            frame(state);
            frames += 1;
        }
        frames
    }
}

/// Sleeps out the remainder of each frame period
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedRate {
    pub period: Duration,
    pub max_frames: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FixedRate {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            max_frames: None,
        }
    }

    /// Period for a target rate. Zero fps falls back to the default period.
    pub fn from_fps(fps: u32) -> Self {
        if fps == 0 {
            return Self::default();
        }
        Self::new(Duration::from_nanos(1_000_000_000 / u64::from(fps)))
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FixedRate {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::consts::FRAME_MILLIS))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for FixedRate {
    fn run_while<S, P, F>(&mut self, state: &mut S, mut keep_going: P, mut frame: F) -> u64
    where
        P: FnMut(&S) -> bool,
        F: FnMut(&mut S),
    {
        let mut frames = 0;
        while keep_going(state) && self.max_frames.is_none_or(|max| frames < max) {
            let started = Instant::now();
            frame(state);
            frames += 1;

            let elapsed = started.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            } else {
                log::trace!("Frame {} overran by {:?}", frames, elapsed - self.period);
            }
        }
        frames
    }
}
