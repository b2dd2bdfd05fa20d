//! Property tests over whole matches

use proptest::prelude::*;
use volley_pong::names::PlayerNames;
use volley_pong::sim::{Direction, GameEvent, HumanInput, TickInput};
use volley_pong::{Match, MatchPhase, Tuning};

fn human_input() -> impl Strategy<Value = HumanInput> {
    prop_oneof![
        Just(HumanInput::Keys(Direction::Up)),
        Just(HumanInput::Keys(Direction::Still)),
        Just(HumanInput::Keys(Direction::Down)),
        (-5000.0f32..5000.0).prop_map(HumanInput::Drag),
        Just(HumanInput::Drag(f32::NAN)),
        Just(HumanInput::Drag(f32::INFINITY)),
    ]
}

fn started(seed: u64, difficulty: f32) -> Match {
    let mut game = Match::new(Tuning::default(), seed);
    game.start(difficulty, PlayerNames::new("A", "B")).unwrap();
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn paddles_stay_on_court(
        seed in any::<u64>(),
        difficulty in 0.1f32..5.0,
        inputs in prop::collection::vec(human_input(), 1..600),
    ) {
        let mut game = started(seed, difficulty);
        let max_y = 300.0;
        for human in inputs {
            game.step(&TickInput { human, autoplay: None });
            let world = game.world().unwrap();
            prop_assert!(world.paddle_a.y >= 0.0 && world.paddle_a.y <= max_y);
            prop_assert!(world.paddle_b.y >= 0.0 && world.paddle_b.y <= max_y);
        }
    }

    #[test]
    fn ball_speed_components_keep_magnitude(
        seed in any::<u64>(),
        difficulty in 0.1f32..3.0,
        inputs in prop::collection::vec(human_input(), 1..1500),
    ) {
        let mut game = started(seed, difficulty);
        for human in inputs {
            game.step(&TickInput { human, autoplay: None });
            let vel = game.world().unwrap().ball.vel;
            prop_assert_eq!(vel.x.abs(), 4.0);
            prop_assert_eq!(vel.y.abs(), 2.0);
        }
    }

    #[test]
    fn scores_move_one_point_at_a_time(
        seed in any::<u64>(),
        difficulty in 0.1f32..3.0,
        inputs in prop::collection::vec(human_input(), 1..3000),
    ) {
        let mut game = started(seed, difficulty);
        let (mut a, mut b) = (0, 0);
        for human in inputs {
            let events = game.step(&TickInput { human, autoplay: None });
            let world = game.world().unwrap();
            let scored: Vec<_> = events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored(_)))
                .collect();

            prop_assert!(world.score_a >= a && world.score_b >= b);
            prop_assert!((world.score_a - a) + (world.score_b - b) <= 1);
            prop_assert_eq!(scored.len() as u32, (world.score_a - a) + (world.score_b - b));
            if !scored.is_empty() {
                prop_assert_eq!(world.ball.pos.x, 400.0);
                prop_assert_eq!(world.ball.pos.y, 200.0);
            }
            a = world.score_a;
            b = world.score_b;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn finished_exactly_when_someone_reaches_five(
        seed in any::<u64>(),
        difficulty in 0.5f32..2.0,
        skill in 0.1f32..0.6,
    ) {
        let mut game = started(seed, difficulty);
        let input = TickInput { autoplay: Some(skill), ..Default::default() };

        for _ in 0..100_000 {
            game.step(&input);
            let world = game.world().unwrap();
            let finished = game.phase() == MatchPhase::Finished;
            prop_assert_eq!(finished, world.score_a >= 5 || world.score_b >= 5);
            if finished {
                break;
            }
        }

        if game.phase() == MatchPhase::Finished {
            let world = game.world().unwrap().clone();
            for _ in 0..20 {
                game.step(&input);
            }
            let after = game.world().unwrap();
            prop_assert_eq!(after.score_a, world.score_a);
            prop_assert_eq!(after.score_b, world.score_b);
        }
    }
}
