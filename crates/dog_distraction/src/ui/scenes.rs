mod in_game;
pub mod main_menu;

use crate::config::MenuConfig;
use bevy::prelude::*;

pub use in_game::InGameScenePlugin;
pub use main_menu::MainMenuScenePlugin;

/// Main scene plugin that coordinates all scene sub-plugins
pub struct ScenePlugin {
    config: MenuConfig,
}

impl ScenePlugin {
    pub fn new(config: MenuConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MainMenuScenePlugin::new(self.config.clone()),
            InGameScenePlugin,
        ));
    }
}
