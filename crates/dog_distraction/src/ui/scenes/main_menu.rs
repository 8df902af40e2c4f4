//! Main Menu Scene
//!
//! This module contains all components for the main menu scene:
//! - Builder: spawns the fixed UI tree and hands its handles over once
//! - Controller: settings defaults, command dispatch and scene transitions
//! - Panels: settings/credits exclusivity and the independent loading overlay
//! - Widgets: sliders, the render scale dropdown and the pixel perfect toggle
//! - Layout: sizes, offsets and texts of the fixed menu layout
//!
//! Everything spawned here is despawned when the game leaves `GameState::MainMenu`.

mod builder;
mod controller;
mod layout;
mod panels;
mod widgets;

use crate::GameState;
use crate::config::{MenuConfig, MenuSettings};
use crate::utils::{cleanup, remove, reset};
use bevy::prelude::*;

pub use builder::{MainMenuUI, MenuHandles, spawn_menu};
pub use controller::{MenuCommand, quit_supported};
pub use layout::{BUTTON_SIZE, BUTTON_SPACING, button_offset, menu_buttons};
pub use panels::{MenuPanel, PanelKind, PanelVisibility};
pub use widgets::{
    DropdownCaption, MenuDropdown, MenuSlider, MenuToggle, SettingField, SliderFill, SliderNudge,
    SliderReadout, ToggleMark,
};

/// Main plugin for the main menu scene
///
/// Builds the menu on entry, drives it while in `GameState::MainMenu` and
/// cleans up on exit.
pub struct MainMenuScenePlugin {
    config: MenuConfig,
}

impl MainMenuScenePlugin {
    pub fn new(config: MenuConfig) -> Self {
        Self { config }
    }
}

impl Default for MainMenuScenePlugin {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl Plugin for MainMenuScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<PanelVisibility>()
            .init_resource::<MenuSettings>()
            .add_message::<MenuCommand>()
            .add_systems(
                OnEnter(GameState::MainMenu),
                (builder::build_main_menu, controller::configure_menu).chain(),
            )
            .add_systems(
                Update,
                (
                    controller::emit_button_commands,
                    widgets::nudge_sliders,
                    widgets::cycle_dropdowns,
                    widgets::flip_toggles,
                    controller::handle_menu_commands,
                    controller::poll_scene_transition,
                    panels::sync_panel_visibility,
                    controller::sync_loading_indicator,
                    widgets::refresh_slider_visuals,
                    widgets::refresh_dropdown_captions,
                    widgets::refresh_toggle_marks,
                    widgets::publish_settings,
                )
                    .chain()
                    .run_if(in_state(GameState::MainMenu)),
            )
            .add_systems(
                OnExit(GameState::MainMenu),
                (
                    cleanup::<MainMenuUI>,
                    remove::<MenuHandles>,
                    reset::<PanelVisibility>,
                ),
            );
    }
}
