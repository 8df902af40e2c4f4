use super::SceneRegistry;
use super::loader::{LoadOperation, LoadStatus, SceneLoadError, SceneLoader};
use super::transition::ACTIVATION_THRESHOLD;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ManualLoadState {
    raw_progress: f32,
    done: bool,
    failure: Option<SceneLoadError>,
    cancelled: bool,
}

/// Control handle for one load started by a `ManualSceneLoader`.
///
/// Progress only moves when the holder says so, which makes polling
/// deterministic without a frame loop or real assets.
#[derive(Debug, Clone)]
pub struct ManualLoad {
    target: String,
    state: Arc<Mutex<ManualLoadState>>,
}

impl ManualLoad {
    fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            state: Arc::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, ManualLoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Sets the raw fraction. Values above the activation threshold saturate.
    pub fn set_progress(&self, raw_progress: f32) {
        self.state().raw_progress = raw_progress.min(ACTIVATION_THRESHOLD);
    }

    pub fn finish(&self) {
        self.state().done = true;
    }

    pub fn fail(&self, reason: impl Into<String>) {
        self.state().failure = Some(SceneLoadError::AssetFailed {
            path: self.target.clone(),
            reason: reason.into(),
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.state().cancelled
    }
}

struct ManualOperation {
    load: ManualLoad,
}

impl LoadOperation for ManualOperation {
    fn poll(&mut self) -> Result<LoadStatus, SceneLoadError> {
        let state = self.load.state();
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        if state.done {
            Ok(LoadStatus::finished())
        } else {
            Ok(LoadStatus::in_progress(state.raw_progress))
        }
    }

    fn cancel(&mut self) {
        self.load.state().cancelled = true;
    }
}

/// Scene loader whose loads are advanced by hand through `ManualLoad` handles.
///
/// Clones share the same load list, so a test can keep one clone while the
/// app owns another inside `SceneLoaderHandle`.
#[derive(Debug, Clone, Default)]
pub struct ManualSceneLoader {
    known_scenes: Option<Arc<[String]>>,
    loads: Arc<Mutex<Vec<ManualLoad>>>,
}

impl ManualSceneLoader {
    /// Accepts every target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects targets outside `scenes` with `SceneLoadError::UnknownScene`.
    pub fn with_scenes(scenes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            known_scenes: Some(scenes.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every load started so far, oldest first.
    pub fn loads(&self) -> Vec<ManualLoad> {
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_load(&self) -> Option<ManualLoad> {
        self.loads().pop()
    }
}

impl SceneLoader for ManualSceneLoader {
    fn begin(
        &mut self,
        target: &str,
        _registry: &SceneRegistry,
    ) -> Result<Box<dyn LoadOperation>, SceneLoadError> {
        if let Some(known) = &self.known_scenes {
            if !known.iter().any(|scene| scene == target) {
                return Err(SceneLoadError::UnknownScene(target.to_string()));
            }
        }

        let load = ManualLoad::new(target);
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(load.clone());
        Ok(Box::new(ManualOperation { load }))
    }
}
