//! Writable locations for the game: project root and log files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Folder name below the platform data directory in production builds.
const DATA_FOLDER: &str = "One_Finger_Lullaby";

/// Where the binary was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Started through `cargo run` or from a `target/` directory
    Development,
    /// Installed binary
    Production,
}

/// Resolves directories below `<base>/<studio>/<project_id>`.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    studio: String,
    project_id: String,
    app_id: &'static str,
}

impl PathContext {
    /// Creates a context rooted in the directory matching the detected environment.
    pub fn new(
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        let environment = Self::detect_environment();
        Self::with_environment(
            environment,
            Self::default_base_path(environment),
            studio,
            project_id,
            app_id,
        )
    }

    /// Creates a context with an explicit base path (debug builds and tests).
    pub fn with_base_path(
        base_path: PathBuf,
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self::with_environment(
            Self::detect_environment(),
            base_path,
            studio,
            project_id,
            app_id,
        )
    }

    fn with_environment(
        environment: RuntimeEnvironment,
        base_path: PathBuf,
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment,
            base_path: base_path.into(),
            studio: studio.into(),
            project_id: project_id.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        let in_target_dir = std::env::current_exe()
            .map(|exe| exe.components().any(|c| c.as_os_str() == "target"))
            .unwrap_or(false);

        if in_target_dir || std::env::var_os("CARGO_MANIFEST_DIR").is_some() {
            RuntimeEnvironment::Development
        } else {
            RuntimeEnvironment::Production
        }
    }

    fn default_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::var_os("CARGO_MANIFEST_DIR")
                .map(PathBuf::from)
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            RuntimeEnvironment::Production => dirs::data_local_dir()
                .map(|dir| dir.join(DATA_FOLDER))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn studio(&self) -> &str {
        &self.studio
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<studio>/<project_id>`
    pub fn project_root(&self) -> PathBuf {
        self.base_path.join(&self.studio).join(&self.project_id)
    }

    /// `<project_root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.project_root().join("logs")
    }

    /// `<project_root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    /// Log file path stamped with the current local time.
    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Creates the project root and the logs directory if they are missing.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [self.project_root(), self.logs_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
