//! End-to-end match scenarios through the public API

use glam::Vec2;
use volley_pong::audio::CueLog;
use volley_pong::names::PlayerNames;
use volley_pong::render::{Color, Surface};
use volley_pong::scheduler::{Scheduler, Unthrottled};
use volley_pong::sim::{GameEvent, Side, TickInput, WorldState, tick};
use volley_pong::{Match, MatchPhase, Session, Settings, Tuning};

/// Keeps only the text drawn, which is all these tests look at
#[derive(Default)]
struct TextSurface {
    clears: usize,
    texts: Vec<String>,
}

impl Surface for TextSurface {
    fn size(&self) -> (f32, f32) {
        (800.0, 400.0)
    }
    fn clear(&mut self) {
        self.clears += 1;
        self.texts.clear();
    }
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {}
    fn fill_circle(&mut self, _cx: f32, _cy: f32, _r: f32, _color: Color) {}
    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _font: &str, _color: Color) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn computer_paddle_returns_first_serve() {
    let mut game = Match::new(Tuning::default(), 42);
    game.start(1.0, PlayerNames::new("Ada", "Bot")).unwrap();

    let mut returned = false;
    for _ in 0..200 {
        let events = game.step(&TickInput::default());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored(_))));
        if events.contains(&GameEvent::PaddleHit(Side::B)) {
            returned = true;
            break;
        }
    }

    assert!(returned);
    let world = game.world().unwrap();
    assert_eq!(world.ball.vel.x, -4.0);
    assert_eq!((world.score_a, world.score_b), (0, 0));
}

#[test]
fn ball_leaving_left_scores_for_right() {
    let mut world = WorldState::new(Tuning::default(), 1.0, 3);
    world.paddle_a.y = 300.0;
    world.ball.pos = Vec2::new(3.0, 200.0);
    world.ball.vel = Vec2::new(-4.0, 2.0);

    let events = tick(&mut world, &TickInput::default());

    assert_eq!(events, vec![GameEvent::Scored(Side::B)]);
    assert_eq!((world.score_a, world.score_b), (0, 1));
    assert_eq!(world.ball.pos, Vec2::new(400.0, 200.0));
    assert_eq!(world.ball.vel.x, 4.0);
    assert_eq!(world.ball.vel.y.abs(), 2.0);
}

#[test]
fn autoplay_match_runs_to_completion() {
    let mut session = Session::new(&Settings::default(), CueLog::default(), 7).unwrap();
    session.set_autoplay(true);
    session
        .start(None, PlayerNames::new("Ada", "Bot"))
        .unwrap();

    let frames = Unthrottled::capped(500_000).run_while(
        &mut session,
        |s| s.is_playing(),
        |s| {
            s.step();
        },
    );

    assert!(frames > 0);
    assert_eq!(session.phase(), MatchPhase::Finished);
    let world = session.game().world().unwrap().clone();
    assert!(world.score_a.max(world.score_b) == 5);

    let winner = session.game().winner().unwrap();
    let name = if winner == Side::A { "Ada" } else { "Bot" };
    let announcement = session.announcement(session.game().names()).unwrap();
    assert!(announcement.contains(name));

    // Frozen until restart
    for _ in 0..50 {
        assert!(session.step().is_empty());
    }
    let after = session.game().world().unwrap();
    assert_eq!((after.score_a, after.score_b), (world.score_a, world.score_b));
    assert_eq!(after.ball, world.ball);

    session.restart().unwrap();
    assert!(session.is_playing());
    let fresh = session.game().world().unwrap();
    assert_eq!((fresh.score_a, fresh.score_b), (0, 0));
}

#[test]
fn frames_draw_live_names_and_scores() {
    let mut session = Session::new(&Settings::default(), CueLog::default(), 1).unwrap();
    session.start(Some(1.0), PlayerNames::new("Ada", "Bot")).unwrap();
    let mut surface = TextSurface::default();

    assert!(session.frame(&mut surface, &PlayerNames::new("Renamed", "")));

    assert_eq!(surface.clears, 1);
    assert_eq!(surface.texts, vec!["Renamed: 0".to_string(), ": 0".to_string()]);
}

#[test]
fn config_errors_surface_before_play() {
    let settings = Settings::from_json(r#"{ "tuning": { "paddle_height": 0.0 } }"#);
    assert!(settings.is_err());

    let mut session = Session::new(&Settings::default(), CueLog::default(), 1).unwrap();
    assert!(session.start(Some(-1.0), PlayerNames::default()).is_err());
    assert_eq!(session.phase(), MatchPhase::Idle);
    assert!(session.restart().is_err());
}
