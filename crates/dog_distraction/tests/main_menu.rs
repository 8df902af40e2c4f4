use bevy::{prelude::*, state::app::StatesPlugin};
use dog_distraction::GameState;
use dog_distraction::config::{MenuConfig, MenuSettings, RenderScale, SettingsDefaults};
use dog_distraction::scene_loading::{
    ManualSceneLoader, SceneLoaderHandle, SceneLoadingPlugin, SceneTransition, TransitionPhase,
};
use dog_distraction::ui::scenes::InGameScenePlugin;
use dog_distraction::ui::scenes::main_menu::{
    DropdownCaption, MainMenuScenePlugin, MainMenuUI, MenuCommand, MenuHandles, MenuPanel,
    PanelKind, SliderNudge, SliderReadout, ToggleMark,
};
use test_log::test;

fn menu_app(config: MenuConfig, loader: Option<ManualSceneLoader>) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_state::<GameState>()
        .add_plugins((
            SceneLoadingPlugin,
            MainMenuScenePlugin::new(config),
            InGameScenePlugin,
        ));
    if let Some(loader) = loader {
        app.insert_resource(SceneLoaderHandle::new(loader));
    }

    // Enters `GameState::MainMenu` and builds the menu.
    app.update();
    app
}

fn send(app: &mut App, command: MenuCommand) {
    app.world_mut().write_message(command);
    app.update();
}

fn press(app: &mut App, entity: Entity) {
    app.world_mut().entity_mut(entity).insert(Interaction::Pressed);
    app.update();
    app.world_mut().entity_mut(entity).insert(Interaction::None);
    app.update();
}

fn panel_visible(app: &mut App, kind: PanelKind) -> bool {
    let mut panels = app.world_mut().query::<(&MenuPanel, &Visibility)>();
    panels
        .iter(app.world())
        .find(|(panel, _)| panel.0 == kind)
        .is_some_and(|(_, visibility)| *visibility != Visibility::Hidden)
}

fn loading_label(app: &App) -> String {
    let text = handles(app).loading_text;
    app.world().get::<Text>(text).unwrap().0.clone()
}

fn loading_bar_percent(app: &App) -> f32 {
    let bar = handles(app).loading_bar;
    match app.world().get::<Node>(bar).unwrap().width {
        Val::Percent(percent) => percent,
        other => panic!("loading bar width should be a percentage, got {other:?}"),
    }
}

fn phase(app: &App) -> TransitionPhase {
    app.world().resource::<SceneTransition>().phase().clone()
}

fn game_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn handles(app: &App) -> MenuHandles {
    *app.world().resource::<MenuHandles>()
}

fn settings(app: &App) -> MenuSettings {
    *app.world().resource::<MenuSettings>()
}

#[test]
fn menu_starts_with_panels_hidden_and_defaults_applied() {
    let mut app = menu_app(MenuConfig::default(), Some(ManualSceneLoader::new()));

    for kind in [PanelKind::Settings, PanelKind::Credits, PanelKind::Loading] {
        assert!(!panel_visible(&mut app, kind), "{kind:?} should start hidden");
    }

    let settings = settings(&app);
    assert_eq!(settings.master_volume, 0.8);
    assert_eq!(settings.sensitivity, 1.0);
    assert_eq!(settings.render_scale, RenderScale::X100);
    assert!(settings.pixel_perfect);

    let mut readouts = app.world_mut().query::<(&SliderReadout, &Text)>();
    let mut shown: Vec<String> = readouts
        .iter(app.world())
        .map(|(_, text)| text.0.clone())
        .collect();
    shown.sort();
    assert_eq!(shown, vec!["0.80", "1.00"]);

    let mut captions = app.world_mut().query::<(&DropdownCaption, &Text)>();
    let (_, caption) = captions.single(app.world()).unwrap();
    assert_eq!(caption.0, "100%");

    let mut marks = app.world_mut().query::<(&ToggleMark, &Visibility)>();
    let (_, mark) = marks.single(app.world()).unwrap();
    assert_ne!(*mark, Visibility::Hidden);

    let quit = handles(&app).quit_button;
    let quit_visibility = *app.world().get::<Visibility>(quit).unwrap();
    assert_eq!(quit_visibility, Visibility::Inherited);
}

#[test]
fn configured_defaults_are_clamped_and_published() {
    let config = MenuConfig::default().with_settings(SettingsDefaults {
        master_volume: 0.3,
        sensitivity: 5.0,
        render_scale: RenderScale::X200,
        pixel_perfect: false,
    });
    let app = menu_app(config, Some(ManualSceneLoader::new()));

    let settings = settings(&app);
    assert_eq!(settings.master_volume, 0.3);
    assert_eq!(settings.sensitivity, 2.0);
    assert_eq!(settings.render_scale, RenderScale::X200);
    assert!(!settings.pixel_perfect);
}

#[test]
fn loading_panel_shows_before_any_progress() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));

    send(&mut app, MenuCommand::PlayCampaign);

    assert!(panel_visible(&mut app, PanelKind::Loading));
    assert_eq!(loading_label(&app), "Loading... 0%");
    assert_eq!(loading_bar_percent(&app), 0.0);
    assert_eq!(
        phase(&app),
        TransitionPhase::Loading {
            target: "Game_Scene".to_string()
        }
    );
    assert_eq!(loader.last_load().unwrap().target(), "Game_Scene");
}

#[test]
fn progress_is_normalized_against_activation_threshold() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));
    send(&mut app, MenuCommand::PlayEndless);
    let load = loader.last_load().unwrap();

    load.set_progress(0.45);
    app.update();
    assert_eq!(loading_label(&app), "Loading... 50%");
    assert!((loading_bar_percent(&app) - 50.0).abs() < 1e-3);

    // Lower raw progress never moves the bar back.
    load.set_progress(0.2);
    app.update();
    assert_eq!(loading_label(&app), "Loading... 50%");

    load.set_progress(0.9);
    app.update();
    assert_eq!(loading_label(&app), "Ready");
    assert!((loading_bar_percent(&app) - 100.0).abs() < 1e-3);
    assert_eq!(game_state(&app), GameState::MainMenu);
}

#[test]
fn finished_load_activates_registered_scene() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));
    send(&mut app, MenuCommand::PlayCampaign);

    loader.last_load().unwrap().finish();
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(game_state(&app), GameState::Campaign);
    assert_eq!(
        phase(&app),
        TransitionPhase::Done {
            target: "Game_Scene".to_string()
        }
    );

    let mut menu = app.world_mut().query_filtered::<Entity, With<MainMenuUI>>();
    assert_eq!(menu.iter(app.world()).count(), 0);
    assert!(app.world().get_resource::<MenuHandles>().is_none());
}

#[test]
fn second_request_cancels_the_first() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));

    send(&mut app, MenuCommand::PlayCampaign);
    let first = loader.last_load().unwrap();
    first.set_progress(0.45);
    app.update();
    assert_eq!(loading_label(&app), "Loading... 50%");

    send(&mut app, MenuCommand::PlayEndless);
    assert!(first.is_cancelled());
    assert_eq!(loading_label(&app), "Loading... 0%");

    first.set_progress(0.9);
    first.finish();
    app.update();

    assert_eq!(loading_label(&app), "Loading... 0%");
    assert_eq!(
        phase(&app),
        TransitionPhase::Loading {
            target: "Endless_Scene".to_string()
        }
    );
    assert_eq!(loader.loads().len(), 2);
}

#[test]
fn blank_target_never_shows_loading() {
    let loader = ManualSceneLoader::new();
    let config = MenuConfig::default().with_scenes("   ", "Endless_Scene");
    let mut app = menu_app(config, Some(loader.clone()));

    send(&mut app, MenuCommand::PlayCampaign);

    assert!(!panel_visible(&mut app, PanelKind::Loading));
    assert_eq!(phase(&app), TransitionPhase::Idle);
    assert!(loader.loads().is_empty());
}

#[test]
fn unknown_target_aborts_with_loading_hidden() {
    let loader = ManualSceneLoader::with_scenes(["Game_Scene"]);
    let config = MenuConfig::default().with_scenes("Game_Scene", "Missing_Scene");
    let mut app = menu_app(config, Some(loader));

    send(&mut app, MenuCommand::PlayEndless);

    assert!(!panel_visible(&mut app, PanelKind::Loading));
    assert!(matches!(
        phase(&app),
        TransitionPhase::Aborted { target, .. } if target == "Missing_Scene"
    ));
    assert_eq!(game_state(&app), GameState::MainMenu);
}

#[test]
fn failure_while_loading_hides_loading_panel() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));
    send(&mut app, MenuCommand::PlayCampaign);
    assert!(panel_visible(&mut app, PanelKind::Loading));

    loader.last_load().unwrap().fail("missing texture");
    app.update();

    assert!(!panel_visible(&mut app, PanelKind::Loading));
    assert!(matches!(phase(&app), TransitionPhase::Aborted { .. }));
}

#[test]
fn missing_loader_leaves_menu_idle() {
    let mut app = menu_app(MenuConfig::default(), None);

    send(&mut app, MenuCommand::PlayCampaign);

    assert!(!panel_visible(&mut app, PanelKind::Loading));
    assert_eq!(phase(&app), TransitionPhase::Idle);
}

#[test]
fn settings_and_credits_panels_are_exclusive() {
    let mut app = menu_app(MenuConfig::default(), Some(ManualSceneLoader::new()));

    send(&mut app, MenuCommand::OpenCredits);
    send(&mut app, MenuCommand::OpenSettings);
    assert!(panel_visible(&mut app, PanelKind::Settings));
    assert!(!panel_visible(&mut app, PanelKind::Credits));

    send(&mut app, MenuCommand::OpenCredits);
    send(&mut app, MenuCommand::OpenCredits);
    assert!(panel_visible(&mut app, PanelKind::Credits));
    assert!(!panel_visible(&mut app, PanelKind::Settings));

    send(&mut app, MenuCommand::CloseCredits);
    assert!(!panel_visible(&mut app, PanelKind::Credits));
    assert!(!panel_visible(&mut app, PanelKind::Settings));
}

#[test]
fn pressing_buttons_dispatches_their_commands() {
    let mut app = menu_app(MenuConfig::default(), Some(ManualSceneLoader::new()));

    let mut buttons = app.world_mut().query::<(Entity, &MenuCommand)>();
    let settings_button = buttons
        .iter(app.world())
        .find(|(_, command)| **command == MenuCommand::OpenSettings)
        .map(|(entity, _)| entity)
        .unwrap();
    let close_button = buttons
        .iter(app.world())
        .find(|(_, command)| **command == MenuCommand::CloseSettings)
        .map(|(entity, _)| entity)
        .unwrap();

    press(&mut app, settings_button);
    assert!(panel_visible(&mut app, PanelKind::Settings));

    press(&mut app, close_button);
    assert!(!panel_visible(&mut app, PanelKind::Settings));
}

#[test]
fn settings_widgets_publish_their_values() {
    let mut app = menu_app(MenuConfig::default(), Some(ManualSceneLoader::new()));
    let handles = handles(&app);

    let mut nudges = app.world_mut().query::<(Entity, &SliderNudge)>();
    let volume_up = nudges
        .iter(app.world())
        .find(|(_, nudge)| nudge.slider == handles.master_volume && nudge.steps > 0)
        .map(|(entity, _)| entity)
        .unwrap();

    press(&mut app, volume_up);
    assert!((settings(&app).master_volume - 0.85).abs() < 1e-5);

    for _ in 0..5 {
        press(&mut app, volume_up);
    }
    assert_eq!(settings(&app).master_volume, 1.0);

    press(&mut app, handles.render_scale);
    assert_eq!(settings(&app).render_scale, RenderScale::X150);
    let mut captions = app.world_mut().query::<(&DropdownCaption, &Text)>();
    let (_, caption) = captions.single(app.world()).unwrap();
    assert_eq!(caption.0, "150%");

    press(&mut app, handles.pixel_perfect);
    assert!(!settings(&app).pixel_perfect);
    let mut marks = app.world_mut().query::<(&ToggleMark, &Visibility)>();
    let (_, mark) = marks.single(app.world()).unwrap();
    assert_eq!(*mark, Visibility::Hidden);
}

#[test]
fn quit_requests_app_exit() {
    let mut app = menu_app(MenuConfig::default(), Some(ManualSceneLoader::new()));
    assert_eq!(app.should_exit(), None);

    send(&mut app, MenuCommand::Quit);

    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn returning_from_a_scene_rebuilds_the_menu() {
    let loader = ManualSceneLoader::new();
    let mut app = menu_app(MenuConfig::default(), Some(loader.clone()));
    send(&mut app, MenuCommand::OpenCredits);
    send(&mut app, MenuCommand::PlayCampaign);
    loader.last_load().unwrap().finish();
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(game_state(&app), GameState::Campaign);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::MainMenu);
    app.update();

    assert_eq!(game_state(&app), GameState::MainMenu);
    assert!(app.world().get_resource::<MenuHandles>().is_some());
    for kind in [PanelKind::Settings, PanelKind::Credits, PanelKind::Loading] {
        assert!(!panel_visible(&mut app, kind), "{kind:?} should be hidden again");
    }
}
