//! Build-time configuration of the main menu and the settings values it exposes.

use bevy::prelude::*;
use strum::{Display, EnumIter, IntoEnumIterator};

pub const MASTER_VOLUME_RANGE: SettingRange = SettingRange::new(0.0, 1.0);
pub const SENSITIVITY_RANGE: SettingRange = SettingRange::new(0.5, 2.0);

/// Inclusive bounds of a numeric setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingRange {
    pub min: f32,
    pub max: f32,
}

impl SettingRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Render scale choices offered by the settings dropdown, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display)]
pub enum RenderScale {
    #[default]
    #[strum(to_string = "100%")]
    X100,
    #[strum(to_string = "150%")]
    X150,
    #[strum(to_string = "200%")]
    X200,
}

impl RenderScale {
    /// Dropdown labels, one per variant.
    pub fn options() -> Vec<String> {
        Self::iter().map(|scale| scale.to_string()).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn index(self) -> usize {
        Self::iter().position(|scale| scale == self).unwrap_or(0)
    }
}

/// Values the settings widgets start with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsDefaults {
    pub master_volume: f32,
    pub sensitivity: f32,
    pub render_scale: RenderScale,
    pub pixel_perfect: bool,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sensitivity: 1.0,
            render_scale: RenderScale::X100,
            pixel_perfect: true,
        }
    }
}

/// Current settings as shown by the widgets.
///
/// Written by the menu whenever a widget changes. Audio and rendering code
/// reads it; the menu itself never acts on these values.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MenuSettings {
    pub master_volume: f32,
    pub sensitivity: f32,
    pub render_scale: RenderScale,
    pub pixel_perfect: bool,
}

impl From<&SettingsDefaults> for MenuSettings {
    fn from(defaults: &SettingsDefaults) -> Self {
        Self {
            master_volume: MASTER_VOLUME_RANGE.clamp(defaults.master_volume),
            sensitivity: SENSITIVITY_RANGE.clamp(defaults.sensitivity),
            render_scale: defaults.render_scale,
            pixel_perfect: defaults.pixel_perfect,
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self::from(&SettingsDefaults::default())
    }
}

/// Scene identifiers the two play buttons request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneTargets {
    pub campaign: String,
    pub endless: String,
}

impl Default for SceneTargets {
    fn default() -> Self {
        Self {
            campaign: "Game_Scene".to_string(),
            endless: "Endless_Scene".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPalette {
    pub background: Color,
    pub panel: Color,
    /// Loading bar, slider fills and the toggle check mark.
    pub accent: Color,
}

impl Default for MenuPalette {
    fn default() -> Self {
        Self {
            background: Color::srgb(0.101, 0.110, 0.161),
            panel: Color::srgba(0.125, 0.145, 0.204, 0.92),
            accent: Color::srgb(0.26, 0.54, 0.69),
        }
    }
}

/// Immutable main menu configuration, inserted once by the UI plugin.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub scenes: SceneTargets,
    pub palette: MenuPalette,
    pub reference_resolution: Vec2,
    pub settings: SettingsDefaults,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            scenes: SceneTargets::default(),
            palette: MenuPalette::default(),
            reference_resolution: Vec2::new(1280.0, 720.0),
            settings: SettingsDefaults::default(),
        }
    }
}

impl MenuConfig {
    pub fn with_scenes(mut self, campaign: impl Into<String>, endless: impl Into<String>) -> Self {
        self.scenes = SceneTargets {
            campaign: campaign.into(),
            endless: endless.into(),
        };
        self
    }

    pub fn with_settings(mut self, settings: SettingsDefaults) -> Self {
        self.settings = settings;
        self
    }
}
