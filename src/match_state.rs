//! Match lifecycle
//!
//! `Idle` (menu) -> `Playing` (ticking) -> `Finished` (scores frozen). A
//! restart goes straight back to `Playing` with a fully reset world.

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, check_difficulty};
use crate::names::{NameSource, PlayerNames};
use crate::settings::Tuning;
use crate::sim::{GameEvent, Side, TickInput, WorldState, tick};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Menu shown, no simulation
    Idle,
    /// Active gameplay
    Playing,
    /// Someone reached the win score
    Finished,
}

/// Owns the world for the duration of a match
#[derive(Debug, Clone)]
pub struct Match {
    tuning: Tuning,
    phase: MatchPhase,
    world: Option<WorldState>,
    names: PlayerNames,
    winner: Option<Side>,
    seed: u64,
}

impl Match {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            tuning,
            phase: MatchPhase::Idle,
            world: None,
            names: PlayerNames::default(),
            winner: None,
            seed,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    pub fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Begin a match. The difficulty is fixed until the next start.
    pub fn start(&mut self, difficulty: f32, names: PlayerNames) -> Result<(), CommandError> {
        if self.phase == MatchPhase::Playing {
            return Err(CommandError::AlreadyPlaying);
        }
        let difficulty = check_difficulty(difficulty)?;

        self.world = Some(WorldState::new(self.tuning, difficulty, self.seed));
        // Next match gets a different serve sequence
        self.seed = self.seed.wrapping_add(1);
        self.names = names;
        self.winner = None;
        self.phase = MatchPhase::Playing;
        log::info!(
            "Match started: {:?} vs {:?} at difficulty {}",
            self.names.a,
            self.names.b,
            difficulty
        );
        Ok(())
    }

    /// Reset scores, paddles and ball and resume, keeping difficulty and names
    pub fn restart(&mut self) -> Result<(), CommandError> {
        let Some(world) = self.world.as_mut() else {
            log::warn!("Restart ignored, no match has been started");
            return Err(CommandError::NotStarted);
        };
        world.reset();
        self.winner = None;
        self.phase = MatchPhase::Playing;
        log::info!("Match restarted");
        Ok(())
    }

    /// Back to the menu
    pub fn quit(&mut self) {
        self.world = None;
        self.winner = None;
        self.phase = MatchPhase::Idle;
        log::info!("Returned to menu");
    }

    /// Advance one tick if playing, then check for a winner.
    ///
    /// Outside `Playing` this does nothing and returns no events.
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if self.phase != MatchPhase::Playing {
            return Vec::new();
        }
        let Some(world) = self.world.as_mut() else {
            return Vec::new();
        };

        let events = tick(world, input);

        if let Some(side) = world.leader_at(self.tuning.win_score) {
            self.winner = Some(side);
            self.phase = MatchPhase::Finished;
            log::info!(
                "Match finished: {:?} wins {}-{}",
                side,
                world.score_a,
                world.score_b
            );
        }

        events
    }

    /// `"<name> wins!"` once the match is finished
    pub fn announcement(&self, names: &impl NameSource) -> Option<String> {
        self.winner.map(|side| format!("{} wins!", names.name(side)))
    }
}
