//! Keyboard input mapping
//!
//! Host event handlers translate raw key codes into commands and queue them
//! for the game loop; nothing here touches game state directly.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    AdjustPower(i32),
    AdjustAngle(i32),
    Fire,
}

/// DOM-style key codes for the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub fire: u32,
    pub angle_down: u32,
    pub power_up: u32,
    pub angle_up: u32,
    pub power_down: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: 32,       // Space
            angle_down: 37, // ArrowLeft
            power_up: 38,   // ArrowUp
            angle_up: 39,   // ArrowRight
            power_down: 40, // ArrowDown
        }
    }
}

impl KeyBindings {
    /// Command for a released key, `None` for unbound keys
    pub fn command_for(&self, key_code: u32, config: &Config) -> Option<InputCommand> {
        let command = match key_code {
            k if k == self.fire => InputCommand::Fire,
            k if k == self.angle_down => InputCommand::AdjustAngle(-config.angle_step()),
            k if k == self.angle_up => InputCommand::AdjustAngle(config.angle_step()),
            k if k == self.power_up => InputCommand::AdjustPower(config.power_step()),
            k if k == self.power_down => InputCommand::AdjustPower(-config.power_step()),
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let config = Config::default();
        let keys = KeyBindings::default();
        assert_eq!(keys.command_for(32, &config), Some(InputCommand::Fire));
        assert_eq!(keys.command_for(37, &config), Some(InputCommand::AdjustAngle(-1)));
        assert_eq!(keys.command_for(39, &config), Some(InputCommand::AdjustAngle(1)));
        assert_eq!(keys.command_for(38, &config), Some(InputCommand::AdjustPower(10)));
        assert_eq!(keys.command_for(40, &config), Some(InputCommand::AdjustPower(-10)));
    }

    #[test]
    fn test_unbound_key_ignored() {
        assert_eq!(KeyBindings::default().command_for(65, &Config::default()), None);
    }
}
