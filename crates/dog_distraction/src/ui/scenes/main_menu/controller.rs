use super::builder::MenuHandles;
use super::panels::{PanelKind, PanelVisibility};
use super::widgets::{MASTER_VOLUME_STEP, MenuDropdown, MenuSlider, MenuToggle, SENSITIVITY_STEP};
use crate::config::{MASTER_VOLUME_RANGE, MenuConfig, MenuSettings, RenderScale, SENSITIVITY_RANGE};
use crate::scene_loading::{
    SceneLoadError, SceneLoaderHandle, SceneRegistry, SceneTransition, SceneTransitionFinished,
    TransitionError, TransitionUpdate,
};
use app::{LOG_MENU, LOG_SCENE};
use bevy::prelude::*;

/// Everything the menu can be asked to do.
///
/// Buttons carry their command as a component; other code may write the
/// command as a message directly.
#[derive(Component, Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    PlayCampaign,
    PlayEndless,
    OpenSettings,
    OpenCredits,
    Quit,
    CloseSettings,
    CloseCredits,
}

/// Whether the platform lets the game quit itself.
pub fn quit_supported() -> bool {
    !cfg!(any(target_os = "ios", target_arch = "wasm32"))
}

/// Hides all panels, applies the configured settings defaults and adjusts the
/// quit button for the platform.
#[allow(clippy::too_many_arguments)]
pub(super) fn configure_menu(
    config: Option<Res<MenuConfig>>,
    handles: Option<Res<MenuHandles>>,
    mut panels: ResMut<PanelVisibility>,
    mut settings: ResMut<MenuSettings>,
    mut visibilities: Query<&mut Visibility>,
    mut sliders: Query<&mut MenuSlider>,
    mut dropdowns: Query<&mut MenuDropdown>,
    mut toggles: Query<&mut MenuToggle>,
) {
    let Some(config) = config else {
        error!(target: LOG_MENU, "MenuConfig missing, main menu stays unconfigured");
        return;
    };
    let Some(handles) = handles else {
        error!(target: LOG_MENU, "MenuHandles missing, main menu stays unconfigured");
        return;
    };

    *panels = PanelVisibility::default();
    for panel in [
        handles.settings_panel,
        handles.credits_panel,
        handles.loading_panel,
    ] {
        if let Ok(mut visibility) = visibilities.get_mut(panel) {
            *visibility = Visibility::Hidden;
        }
    }

    let defaults = &config.settings;
    if let Ok(mut slider) = sliders.get_mut(handles.master_volume) {
        *slider = MenuSlider::new(MASTER_VOLUME_RANGE, MASTER_VOLUME_STEP)
            .with_value(defaults.master_volume);
    }
    if let Ok(mut slider) = sliders.get_mut(handles.sensitivity) {
        *slider =
            MenuSlider::new(SENSITIVITY_RANGE, SENSITIVITY_STEP).with_value(defaults.sensitivity);
    }
    if let Ok(mut dropdown) = dropdowns.get_mut(handles.render_scale) {
        dropdown.set_options(RenderScale::options());
        dropdown.select(defaults.render_scale.index());
    }
    if let Ok(mut toggle) = toggles.get_mut(handles.pixel_perfect) {
        toggle.on = defaults.pixel_perfect;
    }
    *settings = MenuSettings::from(defaults);

    let quit = if quit_supported() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if let Ok(mut visibility) = visibilities.get_mut(handles.quit_button) {
        *visibility = quit;
    }

    info!(target: LOG_MENU, "Main menu configured: {:?}", *settings);
}

pub(super) fn emit_button_commands(
    buttons: Query<(&Interaction, &MenuCommand), (Changed<Interaction>, With<Button>)>,
    mut commands: MessageWriter<MenuCommand>,
) {
    for (interaction, command) in &buttons {
        if *interaction == Interaction::Pressed {
            commands.write(*command);
        }
    }
}

pub(super) fn handle_menu_commands(
    mut commands: MessageReader<MenuCommand>,
    config: Res<MenuConfig>,
    registry: Res<SceneRegistry>,
    mut panels: ResMut<PanelVisibility>,
    mut transition: ResMut<SceneTransition>,
    mut loader: Option<ResMut<SceneLoaderHandle>>,
    mut exit: MessageWriter<AppExit>,
) {
    for command in commands.read() {
        debug!(target: LOG_MENU, "Menu command: {command:?}");
        let target = match command {
            MenuCommand::PlayCampaign => &config.scenes.campaign,
            MenuCommand::PlayEndless => &config.scenes.endless,
            MenuCommand::OpenSettings => {
                panels.open(PanelKind::Settings);
                continue;
            }
            MenuCommand::OpenCredits => {
                panels.open(PanelKind::Credits);
                continue;
            }
            MenuCommand::CloseSettings => {
                panels.close(PanelKind::Settings);
                continue;
            }
            MenuCommand::CloseCredits => {
                panels.close(PanelKind::Credits);
                continue;
            }
            MenuCommand::Quit => {
                info!(target: LOG_MENU, "Quit requested from main menu");
                exit.write(AppExit::Success);
                continue;
            }
        };

        match request_transition(target, &mut transition, loader.as_deref_mut(), &registry) {
            Ok(()) => {
                info!(target: LOG_SCENE, "Loading scene '{target}'");
                panels.open(PanelKind::Loading);
            }
            Err(TransitionError::BlankTarget) => {
                warn!(target: LOG_SCENE, "Ignoring scene transition without a scene name");
            }
            Err(error) => {
                panels.close(PanelKind::Loading);
                error!(target: LOG_SCENE, "{error}");
            }
        }
    }
}

/// Requests `target` from the installed loader. Without a loader the request
/// fails with `SceneLoadError::Unavailable` and the transition is untouched.
fn request_transition(
    target: &str,
    transition: &mut SceneTransition,
    loader: Option<&mut SceneLoaderHandle>,
    registry: &SceneRegistry,
) -> Result<(), TransitionError> {
    let Some(loader) = loader else {
        return Err(TransitionError::Load {
            target: target.to_string(),
            source: SceneLoadError::Unavailable("no scene loader installed".to_string()),
        });
    };
    transition.request(target, loader.loader_mut(), registry)
}

pub(super) fn poll_scene_transition(
    mut transition: ResMut<SceneTransition>,
    mut panels: ResMut<PanelVisibility>,
    mut finished: MessageWriter<SceneTransitionFinished>,
) {
    if !transition.is_loading() {
        return;
    }

    match transition.tick() {
        Some(TransitionUpdate::Finished { target }) => {
            info!(target: LOG_SCENE, "Scene '{target}' loaded");
            finished.write(SceneTransitionFinished { target });
        }
        Some(TransitionUpdate::Aborted { target, error }) => {
            panels.close(PanelKind::Loading);
            error!(target: LOG_SCENE, "Loading scene '{target}' aborted: {error}");
        }
        Some(TransitionUpdate::Progress(_)) | None => {}
    }
}

/// Mirrors transition progress onto the loading bar and its label.
pub(super) fn sync_loading_indicator(
    transition: Res<SceneTransition>,
    handles: Option<Res<MenuHandles>>,
    mut nodes: Query<&mut Node>,
    mut texts: Query<&mut Text>,
) {
    let Some(handles) = handles else {
        return;
    };
    if !transition.is_changed() && !handles.is_added() {
        return;
    }

    let progress = transition.progress();
    if let Ok(mut bar) = nodes.get_mut(handles.loading_bar) {
        bar.width = Val::Percent(progress.value() * 100.0);
    }
    if let Ok(mut text) = texts.get_mut(handles.loading_text) {
        text.0 = progress.label();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_loading::{ManualSceneLoader, TransitionPhase};

    #[test]
    fn quit_follows_platform_support() {
        let restricted = cfg!(any(target_os = "ios", target_arch = "wasm32"));
        assert_eq!(quit_supported(), !restricted);
    }

    #[test]
    fn missing_loader_reports_unavailable_without_touching_transition() {
        let mut transition = SceneTransition::default();

        let result = request_transition(
            "Game_Scene",
            &mut transition,
            None,
            &SceneRegistry::default(),
        );

        assert!(matches!(
            result,
            Err(TransitionError::Load {
                ref target,
                source: SceneLoadError::Unavailable(_),
            }) if target == "Game_Scene"
        ));
        assert_eq!(transition.phase(), &TransitionPhase::Idle);
    }

    #[test]
    fn installed_loader_starts_the_transition() {
        let loader = ManualSceneLoader::new();
        let mut handle = SceneLoaderHandle::new(loader.clone());
        let mut transition = SceneTransition::default();

        request_transition(
            "Endless_Scene",
            &mut transition,
            Some(&mut handle),
            &SceneRegistry::default(),
        )
        .unwrap();

        assert_eq!(transition.loading_target(), Some("Endless_Scene"));
        assert_eq!(loader.loads().len(), 1);
    }
}
