// Lookup table from zone name to zone, fixed once built.
use std::collections::HashMap;

use thiserror::Error;

use crate::zone::{Zone, ZoneName};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ZoneError {
    #[error("zone {0} is configured more than once")]
    Duplicate(ZoneName),
    #[error("zone {0} is not in the registry")]
    Unknown(ZoneName),
    #[error("fade rate must be a positive number, got {0}")]
    InvalidFadeRate(f32),
}

/// Zones in configuration order, indexed by name.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    index: HashMap<ZoneName, usize>,
}

impl ZoneRegistry {
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Result<Self, ZoneError> {
        let zones: Vec<Zone> = zones.into_iter().collect();
        let mut index = HashMap::with_capacity(zones.len());
        for (i, zone) in zones.iter().enumerate() {
            if index.insert(zone.name(), i).is_some() {
                return Err(ZoneError::Duplicate(zone.name()));
            }
        }
        Ok(Self { zones, index })
    }

    pub fn lookup(&self, name: ZoneName) -> Result<&Zone, ZoneError> {
        self.index
            .get(&name)
            .and_then(|&i| self.zones.get(i))
            .ok_or(ZoneError::Unknown(name))
    }

    pub(crate) fn lookup_mut(&mut self, name: ZoneName) -> Result<&mut Zone, ZoneError> {
        match self.index.get(&name) {
            Some(&i) => self.zones.get_mut(i).ok_or(ZoneError::Unknown(name)),
            None => Err(ZoneError::Unknown(name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn active_zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|zone| zone.is_active())
    }
}
