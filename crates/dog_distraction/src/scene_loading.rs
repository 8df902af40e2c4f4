//! Scene Loading
//!
//! Asynchronous scene transitions requested from the main menu:
//! - Transition: the single-slot `Idle -> Loading -> Done | Aborted` state machine
//! - Loader: the host loading facility behind the `SceneLoader` trait
//! - Asset loader: production loader backed by Bevy's `AssetServer`
//! - Manual loader: deterministic loader driven by hand, used by headless tests
//!
//! Once a transition reports `Done`, `activate_loaded_scene` switches the
//! `GameState` registered for the target.

mod asset_loader;
mod loader;
mod manual;
mod transition;

use std::collections::HashMap;

use crate::GameState;
use app::LOG_SCENE;
use bevy::prelude::*;

pub use asset_loader::AssetSceneLoader;
pub use loader::{LoadOperation, LoadStatus, SceneLoadError, SceneLoader, SceneLoaderHandle};
pub use manual::{ManualLoad, ManualSceneLoader};
pub use transition::{
    ACTIVATION_THRESHOLD, LoadProgress, SceneTransition, TransitionError, TransitionPhase,
    TransitionUpdate, normalize_progress,
};

/// Registers transition state, the scene registry and scene activation.
pub struct SceneLoadingPlugin;

impl Plugin for SceneLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneTransition>()
            .init_resource::<SceneRegistry>()
            .add_message::<SceneTransitionFinished>()
            .add_systems(Update, activate_loaded_scene);
    }
}

/// Installs the `AssetServer` backed loader unless another loader is already present.
pub struct AssetSceneLoaderPlugin;

impl Plugin for AssetSceneLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, install_asset_scene_loader);
    }
}

/// Written once when a transition reaches `Done`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SceneTransitionFinished {
    pub target: String,
}

/// What a scene identifier resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEntry {
    pub state: GameState,
    /// Asset paths that must be loaded before the scene is activated.
    pub assets: Vec<String>,
}

/// Scene identifiers known to the game.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SceneRegistry {
    scenes: HashMap<String, SceneEntry>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::empty()
            .with_scene("Game_Scene", GameState::Campaign, Vec::<String>::new())
            .with_scene("Endless_Scene", GameState::Endless, Vec::<String>::new())
    }
}

impl SceneRegistry {
    pub fn empty() -> Self {
        Self {
            scenes: HashMap::new(),
        }
    }

    pub fn with_scene(
        mut self,
        id: impl Into<String>,
        state: GameState,
        assets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.register(id, state, assets);
        self
    }

    pub fn register(
        &mut self,
        id: impl Into<String>,
        state: GameState,
        assets: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let entry = SceneEntry {
            state,
            assets: assets.into_iter().map(Into::into).collect(),
        };
        self.scenes.insert(id.into(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&SceneEntry> {
        self.scenes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }
}

fn install_asset_scene_loader(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    existing: Option<Res<SceneLoaderHandle>>,
) {
    if existing.is_some() {
        debug!(target: LOG_SCENE, "Scene loader already installed, keeping it");
        return;
    }

    commands.insert_resource(SceneLoaderHandle::new(AssetSceneLoader::new(
        asset_server.clone(),
    )));
    info!(target: LOG_SCENE, "Asset scene loader installed");
}

/// Switches to the state registered for a finished transition's target.
fn activate_loaded_scene(
    mut finished: MessageReader<SceneTransitionFinished>,
    registry: Res<SceneRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for message in finished.read() {
        match registry.get(&message.target) {
            Some(entry) => {
                info!(
                    target: LOG_SCENE,
                    "Scene '{}' ready, activating {:?}", message.target, entry.state
                );
                next_state.set(entry.state);
            }
            None => {
                error!(
                    target: LOG_SCENE,
                    "Scene '{}' finished loading but has no registered state", message.target
                );
            }
        }
    }
}
