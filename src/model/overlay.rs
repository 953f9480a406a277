/// Optional visual layers drawn on top of the base timeline.
///
/// The set is closed: layers are toggled on and off but never added or
/// removed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Milestones,
    Weather,
    Conflicts,
    CriticalPath,
    SmartCollisions,
    DropZones,
    Performance,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 7] = [
        OverlayKind::Milestones,
        OverlayKind::Weather,
        OverlayKind::Conflicts,
        OverlayKind::CriticalPath,
        OverlayKind::SmartCollisions,
        OverlayKind::DropZones,
        OverlayKind::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverlayKind::Milestones => "Milestones",
            OverlayKind::Weather => "Weather",
            OverlayKind::Conflicts => "Equipment Conflicts",
            OverlayKind::CriticalPath => "Critical Path",
            OverlayKind::SmartCollisions => "Collision Hints",
            OverlayKind::DropZones => "Drop Zones",
            OverlayKind::Performance => "Performance Readout",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OverlayKind::Milestones => egui_phosphor::regular::FLAG,
            OverlayKind::Weather => egui_phosphor::regular::CLOUD_RAIN,
            OverlayKind::Conflicts => egui_phosphor::regular::WARNING,
            OverlayKind::CriticalPath => egui_phosphor::regular::PATH,
            OverlayKind::SmartCollisions => egui_phosphor::regular::INTERSECT,
            OverlayKind::DropZones => egui_phosphor::regular::SQUARES_FOUR,
            OverlayKind::Performance => egui_phosphor::regular::GAUGE,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }
}

/// Session-scoped on/off state for each overlay layer.
///
/// Built fresh at startup and never persisted; the layers are
/// independent booleans with no interaction between keys.
#[derive(Debug, Clone)]
pub struct OverlayRegistry {
    enabled: [bool; OverlayKind::ALL.len()],
}

impl Default for OverlayRegistry {
    fn default() -> Self {
        let mut enabled = [true; OverlayKind::ALL.len()];
        // The frame-time readout is developer chrome.
        enabled[OverlayKind::Performance.index()] = cfg!(debug_assertions);
        Self { enabled }
    }
}

impl OverlayRegistry {
    pub fn is_enabled(&self, kind: OverlayKind) -> bool {
        self.enabled[kind.index()]
    }

    /// Flip one layer, leaving the rest untouched. Returns the new state.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        let slot = &mut self.enabled[kind.index()];
        *slot = !*slot;
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayKind, bool)> + '_ {
        OverlayKind::ALL
            .iter()
            .map(move |&kind| (kind, self.is_enabled(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything_but_performance() {
        let registry = OverlayRegistry::default();
        for (kind, enabled) in registry.iter() {
            if kind == OverlayKind::Performance {
                assert_eq!(enabled, cfg!(debug_assertions));
            } else {
                assert!(enabled, "{kind:?} should default on");
            }
        }
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut registry = OverlayRegistry::default();
        for kind in OverlayKind::ALL {
            let before = registry.is_enabled(kind);
            assert_eq!(registry.toggle(kind), !before);
            assert_eq!(registry.toggle(kind), before);
        }
    }

    #[test]
    fn toggle_touches_exactly_one_key() {
        let mut registry = OverlayRegistry::default();
        let before: Vec<bool> = registry.iter().map(|(_, on)| on).collect();
        registry.toggle(OverlayKind::Weather);
        for (i, (kind, on)) in registry.iter().enumerate() {
            if kind == OverlayKind::Weather {
                assert_ne!(on, before[i]);
            } else {
                assert_eq!(on, before[i]);
            }
        }
    }
}
