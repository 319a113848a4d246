//! JSON inputs and outputs: venue layouts, row tables and persisted seat lists.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use seatgen_core::{
    naming::{row_label, slug},
    validator::SeatRecord,
    Direction, Polygon, RowSpec, Section, R2,
};

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Venue layout as exported by the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLayout {
    pub sections: Vec<VenueSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSection {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub polygon_points: Vec<R2<f64>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub zone: Option<String>,
}

impl VenueSection {
    /// Explicit id, else the slugged name.
    pub fn id(&self) -> String {
        self.id.clone().unwrap_or_else(|| slug(&self.name))
    }

    pub fn to_section(&self) -> Result<Section> {
        if self.polygon_points.len() < 3 {
            return Err(anyhow!(
                "section {:?} has {} polygon points, need at least 3",
                self.name,
                self.polygon_points.len()
            ));
        }
        Ok(Section {
            id: self.id(),
            name: self.name.clone(),
            polygon: Polygon::new(self.polygon_points.clone()),
            zone: self.zone.clone(),
        })
    }
}

/// One row as written in a row table; omitted fields are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowEntry {
    /// Defaults to A, B, C… by position.
    #[serde(default)]
    pub label: Option<String>,
    pub seat_count: u32,
    #[serde(default = "default_start")]
    pub number_range_start: u32,
    /// Defaults to `numberRangeStart + seatCount - 1`.
    #[serde(default)]
    pub number_range_end: Option<u32>,
    pub direction: Direction,
    /// Aisle breaks, each after the k-th seat from the low-u end.
    #[serde(default)]
    pub aisles: Vec<u32>,
}

fn default_start() -> u32 {
    1
}

impl RowEntry {
    pub fn to_spec(&self, index: usize) -> RowSpec {
        let label = self.label.clone().unwrap_or_else(|| row_label(index, 'A'));
        let mut spec = RowSpec::new(&label, self.seat_count, self.number_range_start, self.direction)
            .with_aisles(self.aisles.clone());
        if let Some(end) = self.number_range_end {
            spec.number_range_end = end;
        }
        spec
    }
}

/// Section name → its rows, front to back.
pub type RowTable = BTreeMap<String, Vec<RowEntry>>;

pub fn row_specs(entries: &[RowEntry]) -> Vec<RowSpec> {
    entries.iter().enumerate().map(|(idx, e)| e.to_spec(idx)).collect()
}

/// Rows for a section, looked up by exact name, then by slug.
pub fn rows_for<'a>(table: &'a RowTable, name: &str) -> Option<&'a Vec<RowEntry>> {
    table.get(name).or_else(|| {
        let wanted = slug(name);
        table.iter().find(|(k, _)| slug(k) == wanted).map(|(_, v)| v)
    })
}

/// A seat read back from storage; accepts the field names the various exports use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDoc {
    #[serde(default, alias = "section", alias = "section_id")]
    pub section_id: Option<String>,
    #[serde(alias = "rowLabel", alias = "fila")]
    pub row: String,
    #[serde(alias = "number", alias = "seat_number")]
    pub seat_number: u32,
    #[serde(default)]
    pub position: Option<R2<f64>>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl SeatDoc {
    /// Whether this seat belongs to the section called `name`; seats without a section match only when `only` is set.
    pub fn in_section(&self, name: &str, only: bool) -> bool {
        match &self.section_id {
            Some(id) => id == name || slug(id) == slug(name),
            None => only,
        }
    }
}

impl SeatRecord for SeatDoc {
    fn row(&self) -> &str {
        &self.row
    }

    fn seat_number(&self) -> u32 {
        self.seat_number
    }

    fn position(&self) -> Option<R2<f64>> {
        self.position.or(match (self.x, self.y) {
            (Some(x), Some(y)) => Some(R2 { x, y }),
            _ => None,
        })
    }
}
