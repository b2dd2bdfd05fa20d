//! Volley Pong entry point
//!
//! In the browser this wires the page (menu, canvas, restart, game-over
//! screen) to a [`Session`](volley_pong::Session) and drives it from
//! `requestAnimationFrame`. Natively it plays a computer-vs-computer match
//! headlessly and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use volley_pong::audio::WebAudio;
    use volley_pong::names::{NameSource, PlayerNames};
    use volley_pong::render::CanvasSurface;
    use volley_pong::settings::parse_difficulty;
    use volley_pong::sim::Side;
    use volley_pong::{Session, Settings};

    /// Reads the player name fields every time a name is needed
    struct DomNames {
        document: Document,
    }

    impl DomNames {
        fn snapshot(&self) -> PlayerNames {
            PlayerNames::new(self.name(Side::A), self.name(Side::B))
        }
    }

    impl NameSource for DomNames {
        fn name(&self, side: Side) -> String {
            let id = match side {
                Side::A => "player1-name",
                Side::B => "player2-name",
            };
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default()
        }
    }

    struct Game {
        session: Session<WebAudio>,
        surface: CanvasSurface,
        names: DomNames,
        loop_running: bool,
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} element", id);
            return;
        };
        let classes = el.class_list();
        let _ = if visible {
            classes.remove_1("hidden")
        } else {
            classes.add_1("hidden")
        };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Volley Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::default();
        canvas.set_width(settings.tuning.surface_width as u32);
        canvas.set_height(settings.tuning.surface_height as u32);
        let surface = CanvasSurface::new(&canvas).expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(&settings, WebAudio::new(&settings.audio), seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return;
            }
        };
        log::info!("Session ready with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            names: DomNames {
                document: document.clone(),
            },
            loop_running: false,
        }));

        setup_menu_buttons(&document, game.clone());
        setup_keyboard(game.clone());
        setup_touch(&canvas, game);

        log::info!("Volley Pong ready");
    }

    fn for_each_element(document: &Document, selector: &str, mut f: impl FnMut(Element)) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(el);
            }
        }
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start buttons carry their difficulty, e.g. data-difficulty="hard"
        for_each_element(document, "[data-difficulty]", |button| {
            let raw = button.get_attribute("data-difficulty").unwrap_or_default();
            let difficulty = parse_difficulty(&raw);
            if difficulty.is_none() {
                log::warn!("Unrecognised difficulty {:?}, using default", raw);
            }
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_match(&game, difficulty);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        });

        for_each_element(document, "[data-action=restart]", |button| {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let restarted = game.borrow_mut().session.restart();
                match restarted {
                    Ok(()) => enter_play(&game),
                    Err(e) => log::warn!("Restart ignored: {}", e),
                }
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        });

        for_each_element(document, "[data-action=menu]", |button| {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.quit();
                let document = &g.names.document;
                set_visible(document, "gameCanvas", false);
                set_visible(document, "restart", false);
                set_visible(document, "game-over", false);
                set_visible(document, "menu", true);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        });
    }

    fn start_match(game: &Rc<RefCell<Game>>, difficulty: Option<f32>) {
        let started = {
            let mut g = game.borrow_mut();
            let names = g.names.snapshot();
            // Clicking is the user gesture the audio context waits for
            g.session.audio().resume();
            g.session.start(difficulty, names)
        };
        match started {
            Ok(()) => enter_play(game),
            Err(e) => log::warn!("Start ignored: {}", e),
        }
    }

    fn enter_play(game: &Rc<RefCell<Game>>) {
        {
            let g = game.borrow();
            let document = &g.names.document;
            set_visible(document, "menu", false);
            set_visible(document, "game-over", false);
            set_visible(document, "gameCanvas", true);
            set_visible(document, "restart", true);
        }
        ensure_loop(game);
    }

    /// At most one frame loop at a time, even if restart is pressed mid-match
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running {
                return;
            }
            g.loop_running = true;
        }
        request_animation_frame(game.clone());
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Keys typed into the name fields are not paddle input
                if !g.session.is_playing() {
                    return;
                }
                let key = event.key();
                if key == "i" || key == "I" {
                    g.session.toggle_autoplay();
                } else if g.session.input_mut().key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.input_mut().key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn first_touch_y(event: &TouchEvent) -> Option<f32> {
        event.touches().get(0).map(|touch| touch.client_y() as f32)
    }

    // Always attached; the input controller ignores touches unless a match is live
    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                game.borrow_mut()
                    .session
                    .input_mut()
                    .touch_start(first_touch_y(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut()
                    .session
                    .input_mut()
                    .touch_move(first_touch_y(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().session.input_mut().touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Game {
                session,
                surface,
                names,
                ..
            } = &mut *g;
            session.frame(surface, &*names)
        };

        if keep_going {
            request_animation_frame(game);
            return;
        }

        let mut g = game.borrow_mut();
        g.loop_running = false;
        // Quitting to the menu also stops the loop, but has no winner to show
        if let Some(text) = g.session.announcement(&g.names) {
            let document = &g.names.document;
            if let Some(el) = document.get_element_by_id("winner-message") {
                el.set_text_content(Some(&text));
            }
            set_visible(document, "gameCanvas", false);
            set_visible(document, "game-over", true);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use serde::Serialize;

    use volley_pong::audio::CueLog;
    use volley_pong::names::PlayerNames;
    use volley_pong::scheduler::{FixedRate, Scheduler, Unthrottled};
    use volley_pong::settings::parse_difficulty;
    use volley_pong::sim::WorldState;
    use volley_pong::{CommandError, MatchPhase, Session, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "volley-pong")]
    #[command(about = "Play a computer-vs-computer volley match headlessly and print the result")]
    pub struct Args {
        /// JSON settings file; missing fields take defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Serve RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Opponent difficulty: easy, normal, hard or a multiplier
        #[arg(long, value_parser = difficulty_arg)]
        difficulty: Option<f32>,

        /// Stop after this many frames even if nobody has won
        #[arg(long)]
        max_frames: Option<u64>,

        /// Pace frames at this rate; 0 runs as fast as possible
        #[arg(long, default_value_t = 0)]
        fps: u32,

        /// Display names for the left and right players
        #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"], default_values = ["Left", "Right"])]
        names: Vec<String>,
    }

    fn difficulty_arg(s: &str) -> Result<f32, String> {
        parse_difficulty(s).ok_or_else(|| format!("expected easy, normal, hard or a number, got {s:?}"))
    }

    #[derive(Serialize)]
    struct Summary<'a> {
        frames: u64,
        phase: MatchPhase,
        winner: Option<String>,
        names: &'a PlayerNames,
        paddle_hits: u32,
        wall_hits: u32,
        world: &'a WorldState,
    }

    fn play<S: Scheduler>(mut scheduler: S, session: &mut Session<CueLog>) -> u64 {
        scheduler.run_while(session, |s| s.is_playing(), |s| {
            s.step();
        })
    }

    pub fn run(args: Args) -> Result<(), CommandError> {
        let settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Seed: {}", seed);

        let mut session = Session::new(&settings, CueLog::default(), seed)?;
        session.set_autoplay(true);

        let mut names = args.names.into_iter();
        let names = PlayerNames::new(
            names.next().unwrap_or_default(),
            names.next().unwrap_or_default(),
        );
        session.start(args.difficulty, names)?;

        let frames = if args.fps == 0 {
            play(Unthrottled { max_frames: args.max_frames }, &mut session)
        } else {
            play(
                FixedRate::from_fps(args.fps).with_max_frames(args.max_frames),
                &mut session,
            )
        };

        let game = session.game();
        let Some(world) = game.world() else {
            return Err(CommandError::NotStarted);
        };

        match game.announcement(game.names()) {
            Some(text) => println!("{} ({}-{})", text, world.score_a, world.score_b),
            None => println!(
                "Stopped after {} frames at {}-{}",
                frames, world.score_a, world.score_b
            ),
        }

        let cues = session.audio();
        let summary = Summary {
            frames,
            phase: game.phase(),
            winner: game.announcement(game.names()),
            names: game.names(),
            paddle_hits: cues.paddle_hits,
            wall_hits: cues.wall_hits,
            world,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    log::info!("Volley Pong (native, headless) starting...");

    let args = native::Args::parse();
    match native::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
