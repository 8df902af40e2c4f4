//! Scales the UI with the window relative to the menu's reference resolution.

use crate::config::MenuConfig;
use app::LOG_MENU;
use bevy::{prelude::*, window::PrimaryWindow};

/// Blend between matching width (0.0) and matching height (1.0).
pub const MATCH_WIDTH_OR_HEIGHT: f32 = 0.5;

/// UI scale for `window` given the `reference` resolution the layout was made for.
///
/// Width and height ratios are blended in log2 space, so a window twice as
/// wide and half as tall keeps a scale of 1.0 at the default weight.
pub fn reference_scale(window: Vec2, reference: Vec2, match_width_or_height: f32) -> f32 {
    if window.min_element() <= 0.0 || reference.min_element() <= 0.0 {
        return 1.0;
    }

    let log_width = (window.x / reference.x).log2();
    let log_height = (window.y / reference.y).log2();
    let weight = match_width_or_height.clamp(0.0, 1.0);
    2f32.powf(log_width + (log_height - log_width) * weight)
}

pub(super) fn fit_ui_to_reference_resolution(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    config: Res<MenuConfig>,
    mut ui_scale: ResMut<UiScale>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let scale = reference_scale(
        Vec2::new(window.width(), window.height()),
        config.reference_resolution,
        MATCH_WIDTH_OR_HEIGHT,
    );
    if (ui_scale.0 - scale).abs() > f32::EPSILON {
        debug!(target: LOG_MENU, "UI scale set to {scale:.3}");
        ui_scale.0 = scale;
    }
}
