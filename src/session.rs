//! Session: one host-facing handle over match, input, audio and drawing
//!
//! Hosts forward input events and commands here and call [`Session::frame`]
//! once per display frame while [`Session::is_playing`] holds.

use crate::audio::{AudioSink, Cue};
use crate::error::{CommandError, ConfigError};
use crate::input::InputController;
use crate::match_state::{Match, MatchPhase};
use crate::names::{NameSource, PlayerNames};
use crate::render::{Presenter, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, TickInput};

pub struct Session<A: AudioSink> {
    game: Match,
    input: InputController,
    audio: A,
    presenter: Presenter,
    default_difficulty: f32,
    autoplay_difficulty: f32,
    autoplay: bool,
}

impl<A: AudioSink> Session<A> {
    pub fn new(settings: &Settings, audio: A, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            game: Match::new(settings.tuning, seed),
            input: InputController::new(settings.controls.clone()),
            audio,
            presenter: Presenter::default(),
            default_difficulty: settings.difficulty(),
            autoplay_difficulty: settings.autoplay_difficulty,
            autoplay: false,
        })
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn phase(&self) -> MatchPhase {
        self.game.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.game.is_playing()
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.autoplay != enabled {
            log::info!("Autoplay {}", if enabled { "on" } else { "off" });
        }
        self.autoplay = enabled;
    }

    pub fn toggle_autoplay(&mut self) {
        self.set_autoplay(!self.autoplay);
    }

    /// Start a match. `None` uses the configured difficulty.
    pub fn start(&mut self, difficulty: Option<f32>, names: PlayerNames) -> Result<(), CommandError> {
        let difficulty = difficulty.unwrap_or(self.default_difficulty);
        self.game.start(difficulty, names)?;
        self.input.reset();
        self.input.set_touch_enabled(true);
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), CommandError> {
        self.game.restart()?;
        self.input.reset();
        self.input.set_touch_enabled(true);
        Ok(())
    }

    pub fn quit(&mut self) {
        self.game.quit();
        self.input.reset();
        self.input.set_touch_enabled(false);
    }

    /// Sample input, run one match step and play the resulting cues
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            human: self.input.sample(),
            autoplay: self.autoplay.then_some(self.autoplay_difficulty),
        };
        let events = self.game.step(&input);
        for event in &events {
            self.audio.play(Cue::from(*event));
        }
        if !self.game.is_playing() && self.input.touch_enabled() {
            self.input.set_touch_enabled(false);
        }
        events
    }

    /// Draw the current world, if there is one
    pub fn render<S, N>(&self, surface: &mut S, names: &N)
    where
        S: Surface + ?Sized,
        N: NameSource + ?Sized,
    {
        if let Some(world) = self.game.world() {
            self.presenter.draw(surface, world, names);
        }
    }

    /// One display frame: step then draw. Returns whether to schedule another.
    pub fn frame<S, N>(&mut self, surface: &mut S, names: &N) -> bool
    where
        S: Surface + ?Sized,
        N: NameSource + ?Sized,
    {
        self.step();
        self.render(surface, names);
        self.is_playing()
    }

    pub fn announcement(&self, names: &impl NameSource) -> Option<String> {
        self.game.announcement(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueLog;
    use crate::render::recording::{DrawCall, RecordingSurface};
    use crate::sim::Side;

    fn session() -> Session<CueLog> {
        Session::new(&Settings::default(), CueLog::default(), 11).unwrap()
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.tuning.damping = 0.0;
        assert!(Session::new(&settings, CueLog::default(), 0).is_err());
    }

    #[test]
    fn test_idle_frame_draws_nothing() {
        let mut s = session();
        let mut surface = RecordingSurface::new(800.0, 400.0);
        assert!(!s.frame(&mut surface, &PlayerNames::default()));
        assert!(surface.calls.is_empty());
        assert!(!s.input_mut().touch_enabled());
    }

    #[test]
    fn test_start_uses_configured_difficulty() {
        let mut settings = Settings::default();
        settings.difficulty = crate::settings::DifficultyPreset::Hard;
        let mut s = Session::new(&settings, CueLog::default(), 0).unwrap();
        s.start(None, PlayerNames::default()).unwrap();
        assert_eq!(s.game().world().unwrap().difficulty, 1.5);
        assert!(s.input_mut().touch_enabled());
    }

    #[test]
    fn test_frame_steps_and_draws() {
        let mut s = session();
        s.start(Some(1.0), PlayerNames::new("Ada", "Bot")).unwrap();
        let mut surface = RecordingSurface::new(800.0, 400.0);
        let names = s.game().names().clone();

        assert!(s.frame(&mut surface, &names));

        assert_eq!(s.game().world().unwrap().time_ticks, 1);
        assert_eq!(surface.calls[0], DrawCall::Clear);
        assert_eq!(surface.calls.len(), 6);
    }

    #[test]
    fn test_keys_move_paddle() {
        let mut s = session();
        s.start(Some(1.0), PlayerNames::default()).unwrap();
        assert!(s.input_mut().key_down("ArrowDown"));
        s.step();
        assert_eq!(s.game().world().unwrap().paddle_a.y, 156.0);
        s.input_mut().key_up("ArrowDown");
        s.step();
        assert_eq!(s.game().world().unwrap().paddle_a.y, 156.0);
    }

    #[test]
    fn test_events_become_cues() {
        let mut s = session();
        s.start(Some(1.0), PlayerNames::default()).unwrap();
        let mut events = Vec::new();
        for _ in 0..400 {
            events.extend(s.step());
        }
        let log = s.audio();
        let walls = events.iter().filter(|e| **e == GameEvent::WallHit).count() as u32;
        let paddles = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit(_)))
            .count() as u32;
        assert_eq!(log.wall_hits, walls);
        assert_eq!(log.paddle_hits, paddles);
        assert_eq!(log.total() as usize, events.len());
        assert!(paddles > 0);
    }

    #[test]
    fn test_autoplay_finishes_match_and_disables_touch() {
        let mut s = session();
        s.set_autoplay(true);
        s.start(Some(1.0), PlayerNames::new("Ada", "Bot")).unwrap();

        let mut frames = 0;
        while s.is_playing() && frames < 200_000 {
            s.step();
            frames += 1;
        }

        assert_eq!(s.phase(), MatchPhase::Finished);
        assert!(!s.input_mut().touch_enabled());
        let world = s.game().world().unwrap();
        assert!(world.score_a == 5 || world.score_b == 5);
        assert_eq!(s.audio().scores, world.score_a + world.score_b);
        let winner = s.game().winner().unwrap();
        let expected = if winner == Side::A { "Ada wins!" } else { "Bot wins!" };
        assert_eq!(s.announcement(s.game().names()).unwrap(), expected);
    }

    #[test]
    fn test_quit_clears_input() {
        let mut s = session();
        s.start(Some(1.0), PlayerNames::default()).unwrap();
        s.input_mut().key_down("w");
        s.quit();
        assert_eq!(s.phase(), MatchPhase::Idle);
        assert!(!s.input_mut().touch_enabled());
        s.start(Some(1.0), PlayerNames::default()).unwrap();
        s.step();
        assert_eq!(s.game().world().unwrap().paddle_a.y, 150.0);
    }

    #[test]
    fn test_toggle_autoplay() {
        let mut s = session();
        assert!(!s.autoplay());
        s.toggle_autoplay();
        assert!(s.autoplay());
        s.toggle_autoplay();
        assert!(!s.autoplay());
    }
}
