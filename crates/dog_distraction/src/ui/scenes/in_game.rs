//! Placeholder gameplay scenes reached through a finished scene transition.

use crate::GameState;
use crate::ui::components::{MenuButton, NORMAL_BUTTON, label};
use crate::utils::cleanup;
use app::LOG_MENU;
use bevy::prelude::*;

pub struct InGameScenePlugin;

impl Plugin for InGameScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Campaign), spawn_in_game_ui)
            .add_systems(OnEnter(GameState::Endless), spawn_in_game_ui)
            .add_systems(
                Update,
                back_to_menu.run_if(in_state(GameState::Campaign).or(in_state(GameState::Endless))),
            )
            .add_systems(OnExit(GameState::Campaign), cleanup::<InGameUI>)
            .add_systems(OnExit(GameState::Endless), cleanup::<InGameUI>);
    }
}

/// Marker component for in-game UI entities
#[derive(Component)]
pub struct InGameUI;

#[derive(Component)]
pub struct BackToMenuButton;

fn spawn_in_game_ui(mut commands: Commands, state: Res<State<GameState>>) {
    let title = match state.get() {
        GameState::Campaign => "CAMPAIGN",
        GameState::Endless => "ENDLESS",
        GameState::MainMenu => return,
    };
    info!(target: LOG_MENU, "Entered {title}");

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(40.0),
                ..default()
            },
            InGameUI,
            Name::new("In Game UI Root"),
        ))
        .id();
    commands.spawn((label(title, 72.0), ChildOf(root)));

    let button = commands
        .spawn((
            Button,
            MenuButton,
            BackToMenuButton,
            Node {
                width: Val::Px(320.0),
                height: Val::Px(60.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NORMAL_BUTTON),
            BorderRadius::all(Val::Px(8.0)),
            ChildOf(root),
        ))
        .id();
    commands.spawn((label("MENU", 32.0), ChildOf(button)));
}

fn back_to_menu(
    buttons: Query<&Interaction, (Changed<Interaction>, With<BackToMenuButton>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if buttons.iter().any(|interaction| *interaction == Interaction::Pressed) {
        info!(target: LOG_MENU, "Returning to main menu");
        next_state.set(GameState::MainMenu);
    }
}
