use paths::PathContext;
use std::marker::PhantomData;
#[cfg(debug_assertions)]
use std::path::PathBuf;
use tracing_subscriber::{
    Layer, filter::LevelFilter, filter::filter_fn, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_MAIN: &str = "main";
pub const LOG_MENU: &str = "menu";
pub const LOG_SCENE: &str = "scene";

/// Failures while bootstrapping the application infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create application directories: {0}")]
    Directories(#[from] std::io::Error),
    #[error("log file path {0:?} has no parent directory or file name")]
    LogPath(std::path::PathBuf),
    #[error("failed to install the tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Application infrastructure context.
///
/// Holds the version info and the logging guard.
pub struct AppContext {
    version: &'static str,
    /// Must outlive the application so buffered log lines get flushed.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn version(&self) -> &'static str {
        self.version
    }
}

/// Application identity. Pure constants, no logic.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const STUDIO: &'static str = "one_finger_lullaby";
    const PROJECT_ID: &'static str = "dog_distraction";
}

/// Builder performing the shared bootstrap before the game is configured.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Creates the builder.
    ///
    /// - resolves the platform directories and creates them
    /// - installs the file + console tracing subscriber
    pub fn new(version: &'static str) -> Result<Self, AppError> {
        #[cfg(debug_assertions)]
        let path_context = PathContext::with_base_path(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join(".out"),
            A::STUDIO,
            A::PROJECT_ID,
            A::APP_ID,
        );
        #[cfg(not(debug_assertions))]
        let path_context = PathContext::new(A::STUDIO, A::PROJECT_ID, A::APP_ID);

        path_context.ensure_directories()?;

        let log_file_path = path_context.log_file_now();
        let (Some(log_dir), Some(log_filename)) = (log_file_path.parent(), log_file_path.file_name())
        else {
            return Err(AppError::LogPath(log_file_path));
        };

        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        #[cfg(debug_assertions)]
        let level = LevelFilter::INFO;

        #[cfg(not(debug_assertions))]
        let level = LevelFilter::WARN;

        let file_layer = fmt::Layer::default()
            .with_target(true)
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

        let console_layer = fmt::Layer::default()
            .with_target(true)
            .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init()?;

        tracing::info!(
            target: LOG_MAIN,
            "{} v{} logging to {}",
            A::APP_ID,
            version,
            log_file_path.display()
        );

        Ok(Self {
            context: AppContext {
                version,
                _log_guard: guard,
            },
            _marker: PhantomData,
        })
    }

    /// Builds a Bevy application.
    ///
    /// `configure` receives a fresh `App` by value plus the context and returns
    /// the configured app, following Bevy's builder style.
    ///
    /// ```ignore
    /// let mut game = AppBuilder::<MyGame>::new("1.0.0")?
    ///     .build_with_bevy(|mut app, _ctx| {
    ///         app.add_plugins(DefaultPlugins);
    ///         app
    ///     });
    /// game.run();
    /// ```
    #[cfg(feature = "bevy")]
    pub fn build_with_bevy(
        self,
        configure: impl FnOnce(bevy::prelude::App, &AppContext) -> bevy::prelude::App,
    ) -> BevyApp<A> {
        let app = configure(bevy::prelude::App::new(), &self.context);

        BevyApp {
            context: self.context,
            app,
            _marker: PhantomData,
        }
    }
}

/// Bevy app bundled with the context that keeps logging alive.
#[cfg(feature = "bevy")]
pub struct BevyApp<A: Application> {
    context: AppContext,
    app: bevy::prelude::App,
    _marker: PhantomData<A>,
}

#[cfg(feature = "bevy")]
impl<A: Application> BevyApp<A> {
    pub fn run(&mut self) -> bevy::app::AppExit {
        self.app.run()
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }
}
