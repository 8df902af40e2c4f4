use super::loader::{LoadOperation, LoadStatus, SceneLoadError, SceneLoader};
use super::transition::ACTIVATION_THRESHOLD;
use super::{SceneEntry, SceneRegistry};
use app::LOG_SCENE;
use bevy::asset::{LoadState, LoadedUntypedAsset};
use bevy::prelude::*;

/// Loads the assets registered for a scene through the `AssetServer`.
///
/// Progress is the share of assets loaded with their dependencies, scaled to
/// `ACTIVATION_THRESHOLD`. The load is done once every asset is in memory.
pub struct AssetSceneLoader {
    asset_server: AssetServer,
}

impl AssetSceneLoader {
    pub fn new(asset_server: AssetServer) -> Self {
        Self { asset_server }
    }

    fn start(&self, entry: &SceneEntry) -> AssetLoadOperation {
        let handles = entry
            .assets
            .iter()
            .map(|path| (path.clone(), self.asset_server.load_untyped(path.clone())))
            .collect();

        AssetLoadOperation {
            asset_server: self.asset_server.clone(),
            handles,
        }
    }
}

impl SceneLoader for AssetSceneLoader {
    fn begin(
        &mut self,
        target: &str,
        registry: &SceneRegistry,
    ) -> Result<Box<dyn LoadOperation>, SceneLoadError> {
        let entry = registry
            .get(target)
            .ok_or_else(|| SceneLoadError::UnknownScene(target.to_string()))?;

        let operation = self.start(entry);
        debug!(
            target: LOG_SCENE,
            "Loading {} asset(s) for scene '{}'", operation.handles.len(), target
        );
        Ok(Box::new(operation))
    }
}

/// Share of `total` assets that are loaded. An empty scene counts as loaded.
fn loaded_fraction(loaded: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    loaded as f32 / total as f32
}

struct AssetLoadOperation {
    asset_server: AssetServer,
    /// Strong handles keep the assets alive until the operation is dropped.
    handles: Vec<(String, Handle<LoadedUntypedAsset>)>,
}

impl LoadOperation for AssetLoadOperation {
    fn poll(&mut self) -> Result<LoadStatus, SceneLoadError> {
        let mut loaded = 0;
        for (path, handle) in &self.handles {
            if let LoadState::Failed(error) = self.asset_server.load_state(handle.id()) {
                return Err(SceneLoadError::AssetFailed {
                    path: path.clone(),
                    reason: error.to_string(),
                });
            }
            if self.asset_server.is_loaded_with_dependencies(handle.id()) {
                loaded += 1;
            }
        }

        if loaded == self.handles.len() {
            Ok(LoadStatus::finished())
        } else {
            let fraction = loaded_fraction(loaded, self.handles.len());
            Ok(LoadStatus::in_progress(fraction * ACTIVATION_THRESHOLD))
        }
    }

    fn cancel(&mut self) {
        self.handles.clear();
    }
}
