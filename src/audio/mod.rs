//! Sound cues
//!
//! The game never waits on audio: a cue is handed to an [`AudioSink`] and
//! forgotten. A sink that cannot make sound just drops it.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ball bounced off the top or bottom edge
    WallHit,
    /// Ball rebounded off either paddle
    PaddleHit,
    /// A point was won
    Score,
}

impl From<GameEvent> for Cue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::WallHit => Cue::WallHit,
            GameEvent::PaddleHit(_) => Cue::PaddleHit,
            GameEvent::Scored(_) => Cue::Score,
        }
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Logs cues at debug level and keeps a count, for headless runs
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub wall_hits: u32,
    pub paddle_hits: u32,
    pub scores: u32,
}

impl CueLog {
    pub fn total(&self) -> u32 {
        self.wall_hits + self.paddle_hits + self.scores
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue: {:?}", cue);
        match cue {
            Cue::WallHit => self.wall_hits += 1,
            Cue::PaddleHit => self.paddle_hits += 1,
            Cue::Score => self.scores += 1,
        }
    }
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}
