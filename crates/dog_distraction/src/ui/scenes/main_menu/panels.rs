use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Settings,
    Credits,
    Loading,
}

/// Tags the root node of a menu panel
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPanel(pub PanelKind);

/// Which panels are shown. Settings and credits never show together.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    settings: bool,
    credits: bool,
    loading: bool,
}

impl PanelVisibility {
    pub fn open(&mut self, kind: PanelKind) {
        match kind {
            PanelKind::Settings => self.credits = false,
            PanelKind::Credits => self.settings = false,
            PanelKind::Loading => {}
        }
        *self.flag_mut(kind) = true;
    }

    pub fn close(&mut self, kind: PanelKind) {
        *self.flag_mut(kind) = false;
    }

    pub fn is_visible(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Settings => self.settings,
            PanelKind::Credits => self.credits,
            PanelKind::Loading => self.loading,
        }
    }

    fn flag_mut(&mut self, kind: PanelKind) -> &mut bool {
        match kind {
            PanelKind::Settings => &mut self.settings,
            PanelKind::Credits => &mut self.credits,
            PanelKind::Loading => &mut self.loading,
        }
    }
}

pub(super) fn sync_panel_visibility(
    panels: Res<PanelVisibility>,
    mut query: Query<(&MenuPanel, &mut Visibility)>,
) {
    if !panels.is_changed() {
        return;
    }

    for (panel, mut visibility) in &mut query {
        let wanted = if panels.is_visible(panel.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_and_credits_are_exclusive() {
        let mut panels = PanelVisibility::default();

        panels.open(PanelKind::Credits);
        panels.open(PanelKind::Settings);
        assert!(panels.is_visible(PanelKind::Settings));
        assert!(!panels.is_visible(PanelKind::Credits));

        panels.open(PanelKind::Credits);
        assert!(panels.is_visible(PanelKind::Credits));
        assert!(!panels.is_visible(PanelKind::Settings));
    }

    #[test]
    fn opening_twice_is_idempotent() {
        let mut panels = PanelVisibility::default();
        panels.open(PanelKind::Settings);
        let once = panels;
        panels.open(PanelKind::Settings);
        assert_eq!(panels, once);
    }

    #[test]
    fn loading_is_independent() {
        let mut panels = PanelVisibility::default();
        panels.open(PanelKind::Settings);
        panels.open(PanelKind::Loading);
        assert!(panels.is_visible(PanelKind::Settings));
        assert!(panels.is_visible(PanelKind::Loading));

        panels.close(PanelKind::Settings);
        assert!(panels.is_visible(PanelKind::Loading));
    }

    #[test]
    fn closing_is_unconditional() {
        let mut panels = PanelVisibility::default();
        panels.close(PanelKind::Credits);
        assert_eq!(panels, PanelVisibility::default());

        panels.open(PanelKind::Credits);
        panels.close(PanelKind::Settings);
        assert!(panels.is_visible(PanelKind::Credits));
    }
}
