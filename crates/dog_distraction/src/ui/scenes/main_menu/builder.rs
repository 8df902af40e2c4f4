//! Main Menu UI Tree
//!
//! Spawns the background, title, navigation buttons and the three panels in
//! one pass. The entities the controller needs are handed over through
//! `MenuHandles`.

use super::controller::MenuCommand;
use super::layout::{
    BUTTON_FONT_SIZE, BUTTON_SIZE, CREDITS, LOADING_BAR_SIZE, LOADING_PANEL_COLOR,
    LOADING_PANEL_SIZE, PANEL_HEADER_FONT_SIZE, PANEL_SIZE, PANEL_TEXT_FONT_SIZE, TITLE,
    TITLE_FONT_SIZE, TITLE_TOP, TRACK_COLOR, button_offset, centered, menu_buttons,
};
use super::panels::{MenuPanel, PanelKind};
use super::widgets::{
    MASTER_VOLUME_STEP, MenuDropdown, MenuSlider, MenuToggle, SENSITIVITY_STEP, SettingField,
    spawn_dropdown_row, spawn_slider_row, spawn_toggle_row,
};
use crate::config::{MASTER_VOLUME_RANGE, MenuConfig, RenderScale, SENSITIVITY_RANGE};
use crate::ui::components::{MenuButton, NORMAL_BUTTON, label};
use app::LOG_MENU;
use bevy::prelude::*;

const CLOSE_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
const CORNER_RADIUS: f32 = 8.0;

/// Marker component for main menu UI entities
#[derive(Component)]
pub struct MainMenuUI;

/// Entities spawned by the builder that the controller drives.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuHandles {
    pub settings_panel: Entity,
    pub credits_panel: Entity,
    pub loading_panel: Entity,
    pub loading_bar: Entity,
    pub loading_text: Entity,
    pub master_volume: Entity,
    pub sensitivity: Entity,
    pub render_scale: Entity,
    pub pixel_perfect: Entity,
    pub quit_button: Entity,
}

pub(super) fn build_main_menu(mut commands: Commands, config: Option<Res<MenuConfig>>) {
    let Some(config) = config else {
        error!(target: LOG_MENU, "MenuConfig missing, main menu not built");
        return;
    };

    let handles = spawn_menu(&mut commands, &config);
    commands.insert_resource(handles);
    info!(target: LOG_MENU, "Main menu spawned");
}

/// Spawns the complete main menu tree. Every panel starts hidden.
pub fn spawn_menu(commands: &mut Commands, config: &MenuConfig) -> MenuHandles {
    let palette = config.palette;

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(palette.background),
            MainMenuUI,
            Name::new("Main Menu UI Root"),
        ))
        .id();

    // Title
    let title = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(TITLE_TOP),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            ChildOf(root),
        ))
        .id();
    commands.spawn((label(TITLE, TITLE_FONT_SIZE), ChildOf(title)));

    let buttons = menu_buttons();
    let mut quit_button = Entity::PLACEHOLDER;
    for (index, (command, text)) in buttons.iter().enumerate() {
        let offset = Vec2::new(0.0, button_offset(index, buttons.len()));
        let button = spawn_button(commands, root, centered(BUTTON_SIZE, offset), *command, text);
        if *command == MenuCommand::Quit {
            quit_button = button;
        }
    }

    // Settings
    let settings_panel = spawn_panel(commands, root, PanelKind::Settings, PANEL_SIZE, palette.panel);
    spawn_header(commands, settings_panel, "SETTINGS");
    let defaults = &config.settings;
    let master_volume = spawn_slider_row(
        commands,
        settings_panel,
        "Master Volume",
        SettingField::MasterVolume,
        MenuSlider::new(MASTER_VOLUME_RANGE, MASTER_VOLUME_STEP).with_value(defaults.master_volume),
        palette.accent,
    );
    let sensitivity = spawn_slider_row(
        commands,
        settings_panel,
        "Sensitivity",
        SettingField::Sensitivity,
        MenuSlider::new(SENSITIVITY_RANGE, SENSITIVITY_STEP).with_value(defaults.sensitivity),
        palette.accent,
    );
    let mut dropdown = MenuDropdown::new(RenderScale::options());
    dropdown.select(defaults.render_scale.index());
    let render_scale = spawn_dropdown_row(
        commands,
        settings_panel,
        "Render Scale",
        SettingField::RenderScale,
        dropdown,
    );
    let pixel_perfect = spawn_toggle_row(
        commands,
        settings_panel,
        "Pixel Perfect",
        SettingField::PixelPerfect,
        MenuToggle {
            on: defaults.pixel_perfect,
        },
        palette.accent,
    );
    spawn_close_button(commands, settings_panel, MenuCommand::CloseSettings);

    // Credits
    let credits_panel = spawn_panel(commands, root, PanelKind::Credits, PANEL_SIZE, palette.panel);
    spawn_header(commands, credits_panel, "CREDITS");
    commands.spawn((label(CREDITS, PANEL_TEXT_FONT_SIZE), ChildOf(credits_panel)));
    spawn_close_button(commands, credits_panel, MenuCommand::CloseCredits);

    // Loading
    let loading_panel = spawn_panel(
        commands,
        root,
        PanelKind::Loading,
        LOADING_PANEL_SIZE,
        LOADING_PANEL_COLOR,
    );
    let loading_text = commands
        .spawn((label("Loading...", PANEL_TEXT_FONT_SIZE), ChildOf(loading_panel)))
        .id();
    let track = commands
        .spawn((
            Node {
                width: Val::Px(LOADING_BAR_SIZE.x),
                height: Val::Px(LOADING_BAR_SIZE.y),
                ..default()
            },
            BackgroundColor(TRACK_COLOR),
            ChildOf(loading_panel),
        ))
        .id();
    let loading_bar = commands
        .spawn((
            Node {
                width: Val::Percent(0.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(palette.accent),
            ChildOf(track),
        ))
        .id();

    MenuHandles {
        settings_panel,
        credits_panel,
        loading_panel,
        loading_bar,
        loading_text,
        master_volume,
        sensitivity,
        render_scale,
        pixel_perfect,
        quit_button,
    }
}

fn spawn_button(
    commands: &mut Commands,
    parent: Entity,
    node: Node,
    command: MenuCommand,
    text: &str,
) -> Entity {
    let button = commands
        .spawn((
            Button,
            MenuButton,
            command,
            node,
            BackgroundColor(NORMAL_BUTTON),
            BorderRadius::all(Val::Px(CORNER_RADIUS)),
            Name::new(format!("{text} Button")),
            ChildOf(parent),
        ))
        .id();
    commands.spawn((label(text, BUTTON_FONT_SIZE), ChildOf(button)));
    button
}

fn spawn_close_button(commands: &mut Commands, panel: Entity, command: MenuCommand) {
    let node = Node {
        width: Val::Px(CLOSE_BUTTON_SIZE.x),
        height: Val::Px(CLOSE_BUTTON_SIZE.y),
        margin: UiRect::top(Val::Auto),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    };
    spawn_button(commands, panel, node, command, "CLOSE");
}

fn spawn_panel(
    commands: &mut Commands,
    root: Entity,
    kind: PanelKind,
    size: Vec2,
    color: Color,
) -> Entity {
    commands
        .spawn((
            MenuPanel(kind),
            Node {
                flex_direction: FlexDirection::Column,
                justify_content: match kind {
                    PanelKind::Loading => JustifyContent::Center,
                    PanelKind::Settings | PanelKind::Credits => JustifyContent::FlexStart,
                },
                padding: UiRect::all(Val::Px(24.0)),
                row_gap: Val::Px(12.0),
                ..centered(size, Vec2::ZERO)
            },
            BackgroundColor(color),
            BorderRadius::all(Val::Px(CORNER_RADIUS)),
            Visibility::Hidden,
            Name::new(format!("{kind:?} Panel")),
            ChildOf(root),
        ))
        .id()
}

fn spawn_header(commands: &mut Commands, panel: Entity, text: &str) {
    commands.spawn((label(text, PANEL_HEADER_FONT_SIZE), ChildOf(panel)));
}
