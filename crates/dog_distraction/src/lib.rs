pub mod config;
pub mod scene_loading;
pub mod ui;
pub mod utils;

use bevy::prelude::*;

/// Game state tracking where we are in the application flow.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Campaign,
    Endless,
}
