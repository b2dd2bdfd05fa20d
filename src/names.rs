//! Player display names
//!
//! Names come from outside the game (form fields in the browser). They are
//! looked up when drawn, and a missing name is an empty string.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Anything that can supply a display name for a side
pub trait NameSource {
    fn name(&self, side: Side) -> String;
}

/// Names captured once, e.g. from the start command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    pub a: String,
    pub b: String,
}

impl PlayerNames {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

impl NameSource for PlayerNames {
    fn name(&self, side: Side) -> String {
        match side {
            Side::A => self.a.clone(),
            Side::B => self.b.clone(),
        }
    }
}

impl<N: NameSource + ?Sized> NameSource for &N {
    fn name(&self, side: Side) -> String {
        (**self).name(side)
    }
}
