use super::SceneRegistry;
use bevy::prelude::*;

/// Why the loading facility could not start or finish a scene load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneLoadError {
    #[error("scene '{0}' is not registered")]
    UnknownScene(String),
    #[error("asset '{path}' failed to load: {reason}")]
    AssetFailed { path: String, reason: String },
    #[error("scene loader unavailable: {0}")]
    Unavailable(String),
}

/// One poll of an in-flight load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadStatus {
    /// Raw completion fraction, saturating at `ACTIVATION_THRESHOLD` until activation.
    pub raw_progress: f32,
    pub done: bool,
}

impl LoadStatus {
    pub fn in_progress(raw_progress: f32) -> Self {
        Self {
            raw_progress,
            done: false,
        }
    }

    pub fn finished() -> Self {
        Self {
            raw_progress: 1.0,
            done: true,
        }
    }
}

/// A scene load started by a `SceneLoader`.
pub trait LoadOperation: Send + Sync + 'static {
    fn poll(&mut self) -> Result<LoadStatus, SceneLoadError>;

    /// Stops the load. No further polls follow.
    fn cancel(&mut self);
}

/// Host facility that starts asynchronous scene loads.
pub trait SceneLoader: Send + Sync + 'static {
    /// Starts loading `target`, resolved against the current `registry`.
    fn begin(
        &mut self,
        target: &str,
        registry: &SceneRegistry,
    ) -> Result<Box<dyn LoadOperation>, SceneLoadError>;
}

/// The installed scene loader.
#[derive(Resource)]
pub struct SceneLoaderHandle(Box<dyn SceneLoader>);

impl SceneLoaderHandle {
    pub fn new(loader: impl SceneLoader) -> Self {
        Self(Box::new(loader))
    }

    pub fn loader_mut(&mut self) -> &mut dyn SceneLoader {
        self.0.as_mut()
    }
}
