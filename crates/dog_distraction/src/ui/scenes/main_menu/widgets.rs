//! Settings widgets built from plain UI nodes.
//!
//! Sliders step with `-`/`+` buttons, the dropdown cycles through its options
//! on click and the toggle flips on click. Widget state lives in components;
//! `publish_settings` mirrors it into `MenuSettings`.

use super::layout::{PANEL_TEXT_FONT_SIZE, TRACK_COLOR};
use crate::config::{MenuSettings, RenderScale, SettingRange};
use crate::ui::components::{MenuButton, NORMAL_BUTTON, label};
use app::LOG_MENU;
use bevy::prelude::*;

pub const MASTER_VOLUME_STEP: f32 = 0.05;
pub const SENSITIVITY_STEP: f32 = 0.1;

const ROW_HEIGHT: f32 = 56.0;
const NUDGE_SIZE: f32 = 40.0;
const SLIDER_TRACK: Vec2 = Vec2::new(200.0, 16.0);
const READOUT_WIDTH: f32 = 72.0;
const DROPDOWN_SIZE: Vec2 = Vec2::new(160.0, 40.0);
const TOGGLE_SIZE: f32 = 40.0;
const TOGGLE_MARK_SIZE: f32 = 24.0;

/// Which setting a widget edits.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    MasterVolume,
    Sensitivity,
    RenderScale,
    PixelPerfect,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MenuSlider {
    range: SettingRange,
    step: f32,
    value: f32,
}

impl MenuSlider {
    /// Slider over `range` moving `step` per nudge, starting at the minimum.
    pub fn new(range: SettingRange, step: f32) -> Self {
        Self {
            range,
            step: step.abs(),
            value: range.min,
        }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Clamps into the slider's range. Non-finite values are ignored.
    pub fn set_value(&mut self, value: f32) {
        if value.is_finite() {
            self.value = self.range.clamp(value);
        }
    }

    pub fn nudge(&mut self, steps: i32) {
        self.set_value(self.value + self.step * steps as f32);
    }

    /// Position of the value inside the range, `0.0` to `1.0`.
    pub fn fraction(&self) -> f32 {
        let span = self.range.max - self.range.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.range.min) / span).clamp(0.0, 1.0)
    }
}

/// Button moving `slider` by `steps` when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct SliderNudge {
    pub slider: Entity,
    pub steps: i32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SliderFill {
    pub slider: Entity,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SliderReadout {
    pub slider: Entity,
}

#[derive(Component, Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuDropdown {
    options: Vec<String>,
    selected: usize,
}

impl MenuDropdown {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    /// Replaces the options, keeping the selection in bounds.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.select(self.selected);
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.options.len().saturating_sub(1));
    }

    /// Moves to the next option, wrapping around after the last one.
    pub fn cycle(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct DropdownCaption {
    pub dropdown: Entity,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuToggle {
    pub on: bool,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ToggleMark {
    pub toggle: Entity,
}

fn spawn_row(commands: &mut Commands, parent: Entity, caption: &str) -> Entity {
    let row = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(ROW_HEIGHT),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                column_gap: Val::Px(12.0),
                ..default()
            },
            ChildOf(parent),
        ))
        .id();
    commands.spawn((label(caption, PANEL_TEXT_FONT_SIZE), ChildOf(row)));
    row
}

fn spawn_small_button(commands: &mut Commands, parent: Entity, text: &str, marker: impl Bundle) {
    let button = commands
        .spawn((
            Button,
            MenuButton,
            marker,
            Node {
                width: Val::Px(NUDGE_SIZE),
                height: Val::Px(NUDGE_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NORMAL_BUTTON),
            ChildOf(parent),
        ))
        .id();
    commands.spawn((label(text, PANEL_TEXT_FONT_SIZE), ChildOf(button)));
}

/// Captioned slider row: `-` button, track with fill, `+` button and readout.
///
/// Returns the entity carrying the `MenuSlider`.
pub fn spawn_slider_row(
    commands: &mut Commands,
    parent: Entity,
    caption: &str,
    field: SettingField,
    slider: MenuSlider,
    accent: Color,
) -> Entity {
    let row = spawn_row(commands, parent, caption);
    let track = commands.spawn_empty().id();

    spawn_small_button(
        commands,
        row,
        "-",
        SliderNudge {
            slider: track,
            steps: -1,
        },
    );
    commands.entity(track).insert((
        slider,
        field,
        Node {
            width: Val::Px(SLIDER_TRACK.x),
            height: Val::Px(SLIDER_TRACK.y),
            ..default()
        },
        BackgroundColor(TRACK_COLOR),
        ChildOf(row),
    ));
    commands.spawn((
        SliderFill { slider: track },
        Node {
            width: Val::Percent(slider.fraction() * 100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(accent),
        ChildOf(track),
    ));
    spawn_small_button(
        commands,
        row,
        "+",
        SliderNudge {
            slider: track,
            steps: 1,
        },
    );
    commands.spawn((
        SliderReadout { slider: track },
        label(format!("{:.2}", slider.value()), PANEL_TEXT_FONT_SIZE),
        Node {
            width: Val::Px(READOUT_WIDTH),
            ..default()
        },
        ChildOf(row),
    ));

    track
}

/// Captioned dropdown row. Returns the entity carrying the `MenuDropdown`.
pub fn spawn_dropdown_row(
    commands: &mut Commands,
    parent: Entity,
    caption: &str,
    field: SettingField,
    dropdown: MenuDropdown,
) -> Entity {
    let row = spawn_row(commands, parent, caption);
    let shown = dropdown.selected_label().unwrap_or_default().to_string();

    let entity = commands
        .spawn((
            Button,
            MenuButton,
            dropdown,
            field,
            Node {
                width: Val::Px(DROPDOWN_SIZE.x),
                height: Val::Px(DROPDOWN_SIZE.y),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NORMAL_BUTTON),
            ChildOf(row),
        ))
        .id();
    commands.spawn((
        DropdownCaption { dropdown: entity },
        label(shown, PANEL_TEXT_FONT_SIZE),
        ChildOf(entity),
    ));

    entity
}

/// Captioned check box row. Returns the entity carrying the `MenuToggle`.
pub fn spawn_toggle_row(
    commands: &mut Commands,
    parent: Entity,
    caption: &str,
    field: SettingField,
    toggle: MenuToggle,
    accent: Color,
) -> Entity {
    let row = spawn_row(commands, parent, caption);

    let entity = commands
        .spawn((
            Button,
            toggle,
            field,
            Node {
                width: Val::Px(TOGGLE_SIZE),
                height: Val::Px(TOGGLE_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(TRACK_COLOR),
            ChildOf(row),
        ))
        .id();
    commands.spawn((
        ToggleMark { toggle: entity },
        Node {
            width: Val::Px(TOGGLE_MARK_SIZE),
            height: Val::Px(TOGGLE_MARK_SIZE),
            ..default()
        },
        BackgroundColor(accent),
        mark_visibility(toggle),
        ChildOf(entity),
    ));

    entity
}

fn mark_visibility(toggle: MenuToggle) -> Visibility {
    if toggle.on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub(super) fn nudge_sliders(
    buttons: Query<(&Interaction, &SliderNudge), Changed<Interaction>>,
    mut sliders: Query<&mut MenuSlider>,
) {
    for (interaction, nudge) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Ok(mut slider) = sliders.get_mut(nudge.slider) else {
            continue;
        };
        let mut next = *slider;
        next.nudge(nudge.steps);
        slider.set_if_neq(next);
    }
}

pub(super) fn cycle_dropdowns(
    mut dropdowns: Query<(&Interaction, &mut MenuDropdown), Changed<Interaction>>,
) {
    for (interaction, mut dropdown) in &mut dropdowns {
        if *interaction == Interaction::Pressed {
            dropdown.cycle();
        }
    }
}

pub(super) fn flip_toggles(
    mut toggles: Query<(&Interaction, &mut MenuToggle), Changed<Interaction>>,
) {
    for (interaction, mut toggle) in &mut toggles {
        if *interaction == Interaction::Pressed {
            toggle.on = !toggle.on;
        }
    }
}

pub(super) fn refresh_slider_visuals(
    sliders: Query<&MenuSlider, Changed<MenuSlider>>,
    mut fills: Query<(&SliderFill, &mut Node)>,
    mut readouts: Query<(&SliderReadout, &mut Text)>,
) {
    if sliders.is_empty() {
        return;
    }

    for (fill, mut node) in &mut fills {
        if let Ok(slider) = sliders.get(fill.slider) {
            node.width = Val::Percent(slider.fraction() * 100.0);
        }
    }
    for (readout, mut text) in &mut readouts {
        if let Ok(slider) = sliders.get(readout.slider) {
            text.0 = format!("{:.2}", slider.value());
        }
    }
}

pub(super) fn refresh_dropdown_captions(
    dropdowns: Query<&MenuDropdown, Changed<MenuDropdown>>,
    mut captions: Query<(&DropdownCaption, &mut Text)>,
) {
    for (caption, mut text) in &mut captions {
        if let Ok(dropdown) = dropdowns.get(caption.dropdown) {
            text.0 = dropdown.selected_label().unwrap_or_default().to_string();
        }
    }
}

pub(super) fn refresh_toggle_marks(
    toggles: Query<&MenuToggle, Changed<MenuToggle>>,
    mut marks: Query<(&ToggleMark, &mut Visibility)>,
) {
    for (mark, mut visibility) in &mut marks {
        if let Ok(toggle) = toggles.get(mark.toggle) {
            visibility.set_if_neq(mark_visibility(*toggle));
        }
    }
}

/// Mirrors widget values into `MenuSettings`.
pub(super) fn publish_settings(
    sliders: Query<(&SettingField, &MenuSlider)>,
    dropdowns: Query<(&SettingField, &MenuDropdown)>,
    toggles: Query<(&SettingField, &MenuToggle)>,
    mut settings: ResMut<MenuSettings>,
) {
    let mut next = *settings;

    for (field, slider) in &sliders {
        match field {
            SettingField::MasterVolume => next.master_volume = slider.value(),
            SettingField::Sensitivity => next.sensitivity = slider.value(),
            _ => {}
        }
    }
    for (field, dropdown) in &dropdowns {
        if *field != SettingField::RenderScale {
            continue;
        }
        if let Some(scale) = RenderScale::from_index(dropdown.selected_index()) {
            next.render_scale = scale;
        }
    }
    for (field, toggle) in &toggles {
        if *field == SettingField::PixelPerfect {
            next.pixel_perfect = toggle.on;
        }
    }

    if settings.set_if_neq(next) {
        debug!(target: LOG_MENU, "Settings changed: {next:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MASTER_VOLUME_RANGE, SENSITIVITY_RANGE};

    #[test]
    fn slider_clamps_into_range() {
        let mut slider = MenuSlider::new(MASTER_VOLUME_RANGE, MASTER_VOLUME_STEP).with_value(0.8);

        slider.nudge(10);
        assert_eq!(slider.value(), 1.0);
        assert_eq!(slider.fraction(), 1.0);

        slider.set_value(-3.0);
        assert_eq!(slider.value(), 0.0);

        slider.set_value(f32::NAN);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn sensitivity_slider_never_drops_below_minimum() {
        let mut slider = MenuSlider::new(SENSITIVITY_RANGE, SENSITIVITY_STEP).with_value(1.0);
        slider.nudge(-20);
        assert_eq!(slider.value(), 0.5);
        assert_eq!(slider.fraction(), 0.0);
    }

    #[test]
    fn dropdown_cycles_and_wraps() {
        let mut dropdown = MenuDropdown::new(RenderScale::options());
        assert_eq!(dropdown.selected_label(), Some("100%"));

        dropdown.cycle();
        dropdown.cycle();
        assert_eq!(dropdown.selected_label(), Some("200%"));

        dropdown.cycle();
        assert_eq!(dropdown.selected_index(), 0);
    }

    #[test]
    fn dropdown_selection_stays_in_bounds() {
        let mut dropdown = MenuDropdown::new(RenderScale::options());
        dropdown.select(7);
        assert_eq!(dropdown.selected_index(), 2);

        dropdown.set_options(vec!["only".to_string()]);
        assert_eq!(dropdown.selected_label(), Some("only"));

        let mut empty = MenuDropdown::default();
        empty.cycle();
        assert_eq!(empty.selected_label(), None);
    }
}
