//! Input intent handed to the simulation by the input layer.
//!
//! Device handling (keys, mouse, touch joystick) happens upstream; by the time
//! input reaches the core it is a set of held directions, an aim point and a trigger.

use serde::{Deserialize, Serialize};

use crate::constants::PLAYER_SPEED;
use crate::types::Vec2;

/// Currently held movement directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Player velocity for these keys. Each axis is independent, so diagonals are faster.
    pub fn velocity(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= PLAYER_SPEED;
        }
        if self.down {
            v.y += PLAYER_SPEED;
        }
        if self.left {
            v.x -= PLAYER_SPEED;
        }
        if self.right {
            v.x += PLAYER_SPEED;
        }
        v
    }
}

/// Logical player input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub moves: MoveKeys,
    /// World-space point the player faces.
    pub aim: Vec2,
    /// Trigger held.
    pub fire: bool,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            moves: MoveKeys::default(),
            aim: Vec2::new(400.0, 300.0),
            fire: false,
        }
    }
}
