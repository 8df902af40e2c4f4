pub mod components;
pub mod scaling;
pub mod scenes;

use crate::config::MenuConfig;
use bevy::prelude::*;
use scenes::ScenePlugin;

/// Main UI plugin that coordinates the camera, scaling and scene UIs
#[derive(Default)]
pub struct UIPlugin {
    config: MenuConfig,
}

impl UIPlugin {
    pub fn new(config: MenuConfig) -> Self {
        Self { config }
    }
}

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ScenePlugin::new(self.config.clone()))
            .add_systems(Startup, spawn_ui_camera)
            .add_systems(
                Update,
                (
                    components::update_button_colors,
                    scaling::fit_ui_to_reference_resolution,
                ),
            );
    }
}

fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Name::new("UI Camera")));
}
