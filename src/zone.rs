// Zones of the world and the placeholder routing between them.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum ZoneName {
    Battlefield,
    SullenVillage,
    ThrivingVillage,
    CastleOfMan,
    FortressOfDark,
}

impl ZoneName {
    /// Zones that are played under the darkness grade.
    pub fn is_dark(self) -> bool {
        matches!(self, ZoneName::ThrivingVillage | ZoneName::FortressOfDark)
    }
}

/// A horizontal level segment. The player leaves it by walking past `end_point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    name: ZoneName,
    end_point: f32,
    #[serde(default)]
    entry_x: f32,
    #[serde(default)]
    active: bool,
}

impl Zone {
    pub fn new(name: ZoneName, end_point: f32) -> Self {
        Self {
            name,
            end_point,
            entry_x: 0.0,
            active: false,
        }
    }

    #[cfg(test)]
    pub fn with_entry(mut self, entry_x: f32) -> Self {
        self.entry_x = entry_x;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn name(&self) -> ZoneName {
        self.name
    }

    pub fn end_point(&self) -> f32 {
        self.end_point
    }

    pub fn entry_x(&self) -> f32 {
        self.entry_x
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Picks the zone that follows `current`.
///
/// Every exit currently leads to the Sullen Village.
// TODO: route on plot flags once the village and castle progression is written.
pub fn next_zone(_current: ZoneName) -> ZoneName {
    ZoneName::SullenVillage
}
