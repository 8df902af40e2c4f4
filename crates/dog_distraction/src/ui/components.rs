use bevy::prelude::*;

/// UI color constants for buttons
pub const NORMAL_BUTTON: Color = Color::srgb(0.25, 0.44, 0.64);
pub const HOVERED_BUTTON: Color = Color::srgb(0.31, 0.52, 0.73);
pub const PRESSED_BUTTON: Color = Color::srgb(0.20, 0.37, 0.56);

pub const TEXT_COLOR: Color = Color::srgb(0.96, 0.96, 0.96);

/// Marker for buttons that use the shared hover/press colors
#[derive(Component, Default)]
pub struct MenuButton;

/// Text in the menu font color.
pub fn label(text: impl Into<String>, font_size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
    )
}

pub fn update_button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<MenuButton>)>,
) {
    for (interaction, mut color) in &mut buttons {
        *color = match *interaction {
            Interaction::Pressed => PRESSED_BUTTON,
            Interaction::Hovered => HOVERED_BUTTON,
            Interaction::None => NORMAL_BUTTON,
        }
        .into();
    }
}
