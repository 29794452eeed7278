use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Sprint,
}

#[derive(Default, Resource)]
pub struct ActionState {
    pressed: HashMap<PlayerAction, bool>,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, is_pressed: bool) {
        self.pressed.insert(action, is_pressed);
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        *self.pressed.get(&action).unwrap_or(&false)
    }

    /// Unit-less movement intent in camera space: x = right, y = up, z = forward.
    pub fn move_axis(&self) -> Vec3 {
        let axis = |pos: PlayerAction, neg: PlayerAction| {
            self.pressed(pos) as i8 as f32 - self.pressed(neg) as i8 as f32
        };
        Vec3::new(
            axis(PlayerAction::MoveRight, PlayerAction::MoveLeft),
            axis(PlayerAction::MoveUp, PlayerAction::MoveDown),
            axis(PlayerAction::MoveForward, PlayerAction::MoveBackward),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut s = ActionState::default();
        s.set(PlayerAction::MoveForward, true);
        s.set(PlayerAction::MoveBackward, true);
        s.set(PlayerAction::MoveUp, true);
        assert_eq!(s.move_axis(), Vec3::new(0.0, 1.0, 0.0));
    }
}
