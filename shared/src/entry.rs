use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

/// The fixed set of source categories offered by the sidebar radio filter.
///
/// Category codes match the `data-source` attributes the page generator
/// writes (`SUN`, `WND`, `WAT`). Entries can carry codes outside this set;
/// those only match the all-sources filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergySource {
    Solar,
    Wind,
    Water,
}

impl EnergySource {
    pub const ALL: [EnergySource; 3] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Water,
    ];

    pub fn code(self) -> &'static str {
        match self {
            EnergySource::Solar => "SUN",
            EnergySource::Wind => "WND",
            EnergySource::Water => "WAT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SUN" => Some(EnergySource::Solar),
            "WND" => Some(EnergySource::Wind),
            "WAT" => Some(EnergySource::Water),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergySource::Solar => "Solar",
            EnergySource::Wind => "Wind",
            EnergySource::Water => "Water",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("plant entry {index}: missing attribute `{attr}`")]
    MissingAttribute { index: usize, attr: &'static str },
    #[error("plant entry `{id}`: attribute `{attr}` is not a finite number: `{value}`")]
    InvalidNumber {
        id: String,
        attr: &'static str,
        value: String,
    },
}

/// One searchable plant record: shown as a sidebar list row and as a marker
/// on the map. Built once at page load from the static data markup and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    /// Raw source category code (`SUN`, `WND`, `WAT`, ...).
    pub source: String,
    /// Nameplate capacity in MW, when the page provides one.
    pub capacity_mw: Option<f64>,
    pub coordinate: Coordinate,
}

impl Entry {
    /// Build an entry from the raw `data-*` attribute values of one markup
    /// node. `index` is the node's position in the data container, used for
    /// diagnostics when an attribute is missing.
    pub fn from_attrs(
        index: usize,
        id: Option<String>,
        name: Option<String>,
        source: Option<String>,
        lat: Option<String>,
        lon: Option<String>,
        capacity: Option<String>,
    ) -> Result<Self, EntryError> {
        let missing = |attr| EntryError::MissingAttribute { index, attr };
        let id = id.ok_or_else(|| missing("data-id"))?;
        let name = name.ok_or_else(|| missing("data-name"))?;
        let source = source.ok_or_else(|| missing("data-source"))?;
        let lat = parse_finite(&id, "data-lat", &lat.ok_or_else(|| missing("data-lat"))?)?;
        let lon = parse_finite(&id, "data-lon", &lon.ok_or_else(|| missing("data-lon"))?)?;
        let capacity_mw = match capacity {
            Some(raw) => Some(parse_finite(&id, "data-capacity", &raw)?),
            None => None,
        };

        Ok(Self {
            id,
            name,
            source,
            capacity_mw,
            coordinate: Coordinate::new(lat, lon),
        })
    }
}

fn parse_finite(id: &str, attr: &'static str, value: &str) -> Result<f64, EntryError> {
    let invalid = || EntryError::InvalidNumber {
        id: id.to_string(),
        attr,
        value: value.to_string(),
    };
    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Process-scoped, id-indexed collection of plant entries, in document
/// order. Owned by the initialization routine and handed to the components
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    by_id: HashMap<String, usize>,
}

impl EntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.id.clone(), idx))
            .collect();
        Self { entries, by_id }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }
}
