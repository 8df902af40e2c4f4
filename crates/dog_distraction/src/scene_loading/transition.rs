use super::SceneRegistry;
use super::loader::{LoadOperation, SceneLoadError, SceneLoader};
use bevy::prelude::*;
use std::fmt;

/// Raw fraction at which a load is ready to activate.
pub const ACTIVATION_THRESHOLD: f32 = 0.9;

/// Maps a raw loader fraction onto displayed progress in `[0, 1]`.
///
/// Raw progress saturates at `ACTIVATION_THRESHOLD`, so the display reaches
/// 100% exactly when the load can be activated.
pub fn normalize_progress(raw: f32) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }
    (raw / ACTIVATION_THRESHOLD).clamp(0.0, 1.0)
}

/// Displayed progress of the current transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadProgress(f32);

impl LoadProgress {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub fn complete() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= 1.0
    }

    /// `"Ready"` once complete, otherwise `"Loading... N%"`.
    pub fn label(&self) -> String {
        if self.is_complete() {
            "Ready".to_string()
        } else {
            format!("Loading... {}%", self.percent())
        }
    }

    /// Never moves backwards within one transition.
    fn advance(self, next: f32) -> Self {
        Self(self.0.max(next))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Loading {
        target: String,
    },
    Done {
        target: String,
    },
    Aborted {
        target: String,
        error: SceneLoadError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Rejected before any state change.
    #[error("scene transition requested with an empty scene name")]
    BlankTarget,
    /// The transition entered `Aborted`.
    #[error("failed to load scene '{target}': {source}")]
    Load {
        target: String,
        #[source]
        source: SceneLoadError,
    },
}

/// Outcome of one polling tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionUpdate {
    Progress(LoadProgress),
    Finished { target: String },
    Aborted { target: String, error: SceneLoadError },
}

/// Single-slot scene transition: at most one load is in flight.
#[derive(Resource, Default)]
pub struct SceneTransition {
    phase: TransitionPhase,
    progress: LoadProgress,
    /// In-flight load, or the finished one kept alive until the next request.
    operation: Option<Box<dyn LoadOperation>>,
}

impl fmt::Debug for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneTransition")
            .field("phase", &self.phase)
            .field("progress", &self.progress)
            .field("has_operation", &self.operation.is_some())
            .finish()
    }
}

impl SceneTransition {
    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, TransitionPhase::Loading { .. })
    }

    /// Target of the in-flight transition.
    pub fn loading_target(&self) -> Option<&str> {
        match &self.phase {
            TransitionPhase::Loading { target } => Some(target),
            _ => None,
        }
    }

    /// Starts a transition to `target`, cancelling any in-flight one first.
    ///
    /// A blank target leaves the state untouched. A loader that cannot begin
    /// leaves the transition `Aborted`.
    pub fn request(
        &mut self,
        target: &str,
        loader: &mut dyn SceneLoader,
        registry: &SceneRegistry,
    ) -> Result<(), TransitionError> {
        if target.trim().is_empty() {
            return Err(TransitionError::BlankTarget);
        }

        self.cancel();
        self.operation = None;
        self.phase = TransitionPhase::Loading {
            target: target.to_string(),
        };
        self.progress = LoadProgress::default();

        match loader.begin(target, registry) {
            Ok(operation) => {
                self.operation = Some(operation);
                Ok(())
            }
            Err(error) => {
                self.abort(target, error.clone());
                Err(TransitionError::Load {
                    target: target.to_string(),
                    source: error,
                })
            }
        }
    }

    /// Cancels the in-flight load and returns to `Idle`.
    ///
    /// Returns the cancelled target, or `None` if nothing was loading.
    pub fn cancel(&mut self) -> Option<String> {
        if !self.is_loading() {
            return None;
        }
        let TransitionPhase::Loading { target } = std::mem::take(&mut self.phase) else {
            return None;
        };
        if let Some(mut operation) = self.operation.take() {
            operation.cancel();
        }
        self.progress = LoadProgress::default();
        Some(target)
    }

    /// Polls the in-flight load once. Does nothing unless `Loading`.
    pub fn tick(&mut self) -> Option<TransitionUpdate> {
        let target = self.loading_target()?.to_string();
        let status = self.operation.as_mut()?.poll();

        match status {
            Ok(status) if status.done => {
                self.progress = LoadProgress::complete();
                self.phase = TransitionPhase::Done {
                    target: target.clone(),
                };
                Some(TransitionUpdate::Finished { target })
            }
            Ok(status) => {
                self.progress = self
                    .progress
                    .advance(normalize_progress(status.raw_progress));
                Some(TransitionUpdate::Progress(self.progress))
            }
            Err(error) => {
                self.abort(&target, error.clone());
                Some(TransitionUpdate::Aborted { target, error })
            }
        }
    }

    fn abort(&mut self, target: &str, error: SceneLoadError) {
        if let Some(mut operation) = self.operation.take() {
            operation.cancel();
        }
        self.phase = TransitionPhase::Aborted {
            target: target.to_string(),
            error,
        };
        self.progress = LoadProgress::default();
    }
}
