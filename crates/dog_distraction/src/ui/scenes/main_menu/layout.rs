//! Fixed layout of the main menu.

use super::controller::MenuCommand;
use bevy::prelude::*;

pub const TITLE: &str = "DOG DISTRACTION";
pub const TITLE_FONT_SIZE: f32 = 72.0;
pub const TITLE_TOP: f32 = 60.0;

pub const BUTTON_SIZE: Vec2 = Vec2::new(320.0, 60.0);
/// Vertical distance between the centers of two stacked menu buttons.
pub const BUTTON_SPACING: f32 = 70.0;
pub const BUTTON_FONT_SIZE: f32 = 32.0;

pub const PANEL_SIZE: Vec2 = Vec2::new(640.0, 480.0);
pub const PANEL_HEADER_FONT_SIZE: f32 = 48.0;
pub const PANEL_TEXT_FONT_SIZE: f32 = 28.0;

pub const LOADING_PANEL_SIZE: Vec2 = Vec2::new(480.0, 200.0);
pub const LOADING_PANEL_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
pub const LOADING_BAR_SIZE: Vec2 = Vec2::new(420.0, 30.0);

pub const TRACK_COLOR: Color = Color::srgb(0.07, 0.07, 0.09);

pub const CREDITS: &str = "Design & Code: One Finger Lullaby\nMusic: Your Name Here\nSpecial Thanks: One Finger Lullaby Team";

/// Navigation buttons from top to bottom.
pub fn menu_buttons() -> [(MenuCommand, &'static str); 5] {
    [
        (MenuCommand::PlayCampaign, "PLAY"),
        (MenuCommand::PlayEndless, "ENDLESS"),
        (MenuCommand::OpenSettings, "SETTINGS"),
        (MenuCommand::OpenCredits, "CREDITS"),
        (MenuCommand::Quit, "QUIT"),
    ]
}

/// Offset above the screen center of the `index`-th of `count` stacked buttons.
pub fn button_offset(index: usize, count: usize) -> f32 {
    let middle = count.saturating_sub(1) as f32 / 2.0;
    (middle - index as f32) * BUTTON_SPACING
}

/// Absolutely positioned node of `size`, centered in its parent and moved by
/// `offset` (positive y is up).
pub fn centered(size: Vec2, offset: Vec2) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(50.0),
        top: Val::Percent(50.0),
        width: Val::Px(size.x),
        height: Val::Px(size.y),
        margin: UiRect {
            left: Val::Px(offset.x - size.x / 2.0),
            top: Val::Px(-offset.y - size.y / 2.0),
            ..default()
        },
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_stacked_at_fixed_spacing_around_center() {
        let offsets: Vec<f32> = (0..5).map(|index| button_offset(index, 5)).collect();
        assert_eq!(offsets, vec![140.0, 70.0, 0.0, -70.0, -140.0]);
    }

    #[test]
    fn button_order_matches_commands() {
        let labels: Vec<&str> = menu_buttons().iter().map(|(_, label)| *label).collect();
        assert_eq!(labels, vec!["PLAY", "ENDLESS", "SETTINGS", "CREDITS", "QUIT"]);
        assert_eq!(menu_buttons()[4].0, MenuCommand::Quit);
    }

    #[test]
    fn centered_node_offsets_by_half_size() {
        let node = centered(BUTTON_SIZE, Vec2::new(0.0, 140.0));
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.margin.left, Val::Px(-160.0));
        assert_eq!(node.margin.top, Val::Px(-170.0));
        assert_eq!(node.width, Val::Px(320.0));
    }
}
