use app::{AppBuilder, Application, LOG_MAIN};
use bevy::{log::LogPlugin, prelude::*};
use dog_distraction::GameState;
use dog_distraction::scene_loading::{AssetSceneLoaderPlugin, SceneLoadingPlugin};
use dog_distraction::ui::UIPlugin;

struct DogDistraction;

impl Application for DogDistraction {
    const APP_ID: &'static str = "dog_distraction";
}

fn main() -> anyhow::Result<()> {
    let mut game = AppBuilder::<DogDistraction>::new(env!("CARGO_PKG_VERSION"))?.build_with_bevy(
        |mut app, _ctx| {
            app.add_plugins(
                DefaultPlugins
                    .build()
                    .disable::<LogPlugin>()
                    .set(WindowPlugin {
                        primary_window: Some(Window {
                            title: "Dog Distraction".to_string(),
                            ..default()
                        }),
                        ..default()
                    }),
            );

            app.init_state::<GameState>();
            app.add_plugins((SceneLoadingPlugin, AssetSceneLoaderPlugin, UIPlugin::default()));
            app
        },
    );

    match game.run() {
        AppExit::Success => {
            info!(target: LOG_MAIN, "Dog Distraction v{} closed", game.context().version());
            Ok(())
        }
        AppExit::Error(code) => anyhow::bail!("Dog Distraction exited with code {code}"),
    }
}
