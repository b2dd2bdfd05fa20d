//! Keyboard and touch handling for the human paddle
//!
//! The host forwards raw events as they arrive; the game samples the latest
//! state once at the start of each tick. Nothing is queued except the touch
//! drag distance accumulated since the last sample.

use crate::settings::KeyBindings;
use crate::sim::{Direction, HumanInput};

/// Which input device currently drives the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Keyboard,
    Touch,
}

#[derive(Debug, Clone)]
pub struct InputController {
    bindings: KeyBindings,
    direction: Direction,
    mode: InputMode,
    touch_enabled: bool,
    /// Previous touch Y, the baseline for the next drag delta
    last_touch_y: Option<f32>,
    /// Drag distance not yet consumed by a tick
    pending_drag: f32,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            direction: Direction::Still,
            mode: InputMode::Keyboard,
            touch_enabled: false,
            last_touch_y: None,
            pending_drag: 0.0,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    fn is_up(&self, key: &str) -> bool {
        self.bindings.up.iter().any(|k| k == key)
    }

    fn is_down(&self, key: &str) -> bool {
        self.bindings.down.iter().any(|k| k == key)
    }

    /// Key pressed. Returns true if the key is one of ours.
    pub fn key_down(&mut self, key: &str) -> bool {
        let direction = if self.is_up(key) {
            Direction::Up
        } else if self.is_down(key) {
            Direction::Down
        } else {
            return false;
        };
        self.direction = direction;
        if self.mode == InputMode::Touch {
            self.mode = InputMode::Keyboard;
            self.last_touch_y = None;
            self.pending_drag = 0.0;
        }
        true
    }

    /// Key released. Releasing either mapped key stops the paddle.
    pub fn key_up(&mut self, key: &str) -> bool {
        if self.is_up(key) || self.is_down(key) {
            self.direction = Direction::Still;
            true
        } else {
            false
        }
    }

    /// Touch listeners are only live while a match is being played
    pub fn set_touch_enabled(&mut self, enabled: bool) {
        self.touch_enabled = enabled;
        if !enabled {
            self.last_touch_y = None;
            self.pending_drag = 0.0;
        }
    }

    pub fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    /// Finger down: record the baseline, switch to touch mode
    pub fn touch_start(&mut self, y: Option<f32>) {
        let Some(y) = y.filter(|y| y.is_finite()) else {
            return;
        };
        if !self.touch_enabled {
            return;
        }
        self.mode = InputMode::Touch;
        self.direction = Direction::Still;
        self.last_touch_y = Some(y);
    }

    /// Finger moved: accumulate the change since the previous touch
    pub fn touch_move(&mut self, y: Option<f32>) {
        let Some(y) = y.filter(|y| y.is_finite()) else {
            return;
        };
        if !self.touch_enabled {
            return;
        }
        // A move without a start still establishes the baseline
        if let Some(prev) = self.last_touch_y {
            self.pending_drag += y - prev;
        }
        self.mode = InputMode::Touch;
        self.last_touch_y = Some(y);
    }

    pub fn touch_end(&mut self) {
        self.last_touch_y = None;
    }

    /// Latest keyboard signal
    pub fn sample_human_control(&self) -> Direction {
        self.direction
    }

    /// Drag distance since the last sample, if touch is driving the paddle
    pub fn sample_touch_delta(&mut self) -> Option<f32> {
        match self.mode {
            InputMode::Touch => Some(std::mem::take(&mut self.pending_drag)),
            InputMode::Keyboard => None,
        }
    }

    /// Input for the next tick: touch when active, keyboard otherwise
    pub fn sample(&mut self) -> HumanInput {
        match self.sample_touch_delta() {
            Some(dy) => HumanInput::Drag(dy),
            None => HumanInput::Keys(self.sample_human_control()),
        }
    }

    /// Forget held keys and touches (new match)
    pub fn reset(&mut self) {
        self.direction = Direction::Still;
        self.mode = InputMode::Keyboard;
        self.last_touch_y = None;
        self.pending_drag = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_set_and_clear_signal() {
        let mut input = InputController::default();
        assert_eq!(input.sample_human_control(), Direction::Still);

        assert!(input.key_down("w"));
        assert_eq!(input.sample_human_control().signal(), -1);

        assert!(input.key_down("S"));
        assert_eq!(input.sample_human_control().signal(), 1);

        // Releasing the other key still stops the paddle
        assert!(input.key_up("w"));
        assert_eq!(input.sample_human_control(), Direction::Still);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut input = InputController::default();
        input.key_down("ArrowDown");
        assert!(!input.key_down("x"));
        assert!(!input.key_up("Shift"));
        assert_eq!(input.sample_human_control(), Direction::Down);
    }

    #[test]
    fn test_custom_bindings() {
        let mut input = InputController::new(KeyBindings {
            up: vec!["k".into()],
            down: vec!["j".into()],
        });
        assert!(!input.key_down("w"));
        assert!(input.key_down("k"));
        assert_eq!(input.sample(), HumanInput::Keys(Direction::Up));
    }

    #[test]
    fn test_touch_drag_accumulates_and_drains() {
        let mut input = InputController::default();
        input.set_touch_enabled(true);

        input.touch_start(Some(100.0));
        assert_eq!(input.sample_touch_delta(), Some(0.0));

        input.touch_move(Some(110.0));
        input.touch_move(Some(125.0));
        assert_eq!(input.sample(), HumanInput::Drag(25.0));
        assert_eq!(input.sample(), HumanInput::Drag(0.0));

        input.touch_move(Some(120.0));
        assert_eq!(input.sample(), HumanInput::Drag(-5.0));
    }

    #[test]
    fn test_touch_overrides_keys_until_key_pressed() {
        let mut input = InputController::default();
        input.set_touch_enabled(true);
        input.key_down("s");

        input.touch_start(Some(50.0));
        assert_eq!(input.mode(), InputMode::Touch);
        assert_eq!(input.sample(), HumanInput::Drag(0.0));

        input.key_down("w");
        assert_eq!(input.mode(), InputMode::Keyboard);
        assert_eq!(input.sample_touch_delta(), None);
        assert_eq!(input.sample(), HumanInput::Keys(Direction::Up));
    }

    #[test]
    fn test_malformed_touch_is_noop() {
        let mut input = InputController::default();
        input.set_touch_enabled(true);
        input.touch_start(None);
        input.touch_move(Some(f32::NAN));
        assert_eq!(input.mode(), InputMode::Keyboard);
        assert_eq!(input.sample(), HumanInput::Keys(Direction::Still));
    }

    #[test]
    fn test_touch_ignored_while_disabled() {
        let mut input = InputController::default();
        input.touch_start(Some(10.0));
        input.touch_move(Some(90.0));
        assert_eq!(input.sample_touch_delta(), None);

        input.set_touch_enabled(true);
        input.touch_start(Some(10.0));
        input.touch_move(Some(20.0));
        input.set_touch_enabled(false);
        assert_eq!(input.sample_touch_delta(), Some(0.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut input = InputController::default();
        input.set_touch_enabled(true);
        input.touch_start(Some(10.0));
        input.touch_move(Some(40.0));
        input.reset();
        assert_eq!(input.mode(), InputMode::Keyboard);
        assert_eq!(input.sample(), HumanInput::Keys(Direction::Still));
        assert!(input.touch_enabled());
    }
}
