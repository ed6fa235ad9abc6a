// Axis aligned bounding box of a dataset
use std::fmt;

use crate::datatype::Row;
use crate::entity::{write_field, Record};
use crate::error::{Result, StrataError};
use crate::schema::Schema;

/// North, south, east and west bounds, plus top and bottom for volumetric
/// datasets. The bounds are only stored, never compared topologically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialExtent {
    north: Option<f64>,
    south: Option<f64>,
    east: Option<f64>,
    west: Option<f64>,
    top: Option<f64>,
    bottom: Option<f64>,
}

impl SpatialExtent {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north: Some(north),
            south: Some(south),
            east: Some(east),
            west: Some(west),
            top: None,
            bottom: None,
        }
    }
    pub fn volume(north: f64, south: f64, east: f64, west: f64, top: f64, bottom: f64) -> Self {
        Self {
            top: Some(top),
            bottom: Some(bottom),
            ..Self::new(north, south, east, west)
        }
    }
    pub fn north(&self) -> Option<f64> {
        self.north
    }
    pub fn south(&self) -> Option<f64> {
        self.south
    }
    pub fn east(&self) -> Option<f64> {
        self.east
    }
    pub fn west(&self) -> Option<f64> {
        self.west
    }
    pub fn top(&self) -> Option<f64> {
        self.top
    }
    pub fn bottom(&self) -> Option<f64> {
        self.bottom
    }
    pub fn set_north(&mut self, north: impl Into<Option<f64>>) {
        self.north = north.into();
    }
    pub fn set_south(&mut self, south: impl Into<Option<f64>>) {
        self.south = south.into();
    }
    pub fn set_east(&mut self, east: impl Into<Option<f64>>) {
        self.east = east.into();
    }
    pub fn set_west(&mut self, west: impl Into<Option<f64>>) {
        self.west = west.into();
    }
    pub fn set_top(&mut self, top: impl Into<Option<f64>>) {
        self.top = top.into();
    }
    pub fn set_bottom(&mut self, bottom: impl Into<Option<f64>>) {
        self.bottom = bottom.into();
    }
    pub fn is_volumetric(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }
}

fn check_order(upper: Option<f64>, lower: Option<f64>, upper_name: &str, lower_name: &str) -> Result<()> {
    match (upper, lower) {
        (Some(u), Some(l)) if !(u >= l) => Err(StrataError::InvalidExtent(format!(
            "{upper_name} ({u}) must not be less than {lower_name} ({l})"
        ))),
        _ => Ok(()),
    }
}

impl Record for SpatialExtent {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("north", self.north);
        row.insert("south", self.south);
        row.insert("east", self.east);
        row.insert("west", self.west);
        row.insert("top", self.top);
        row.insert("bottom", self.bottom);
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("north", &mut self.north)?;
        row.assign("south", &mut self.south)?;
        row.assign("east", &mut self.east)?;
        row.assign("west", &mut self.west)?;
        row.assign("top", &mut self.top)?;
        row.assign("bottom", &mut self.bottom)
    }
    fn validate(&self, _schema: &Schema) -> Result<()> {
        let bounds = [
            ("north", self.north),
            ("south", self.south),
            ("east", self.east),
            ("west", self.west),
            ("top", self.top),
            ("bottom", self.bottom),
        ];
        // SQLite stores NaN as NULL
        if let Some((name, _)) = bounds.iter().find(|(_, bound)| bound.is_some_and(f64::is_nan)) {
            return Err(StrataError::InvalidExtent(format!("{name} is not a number")));
        }
        check_order(self.north, self.south, "north", "south")?;
        check_order(self.east, self.west, "east", "west")?;
        check_order(self.top, self.bottom, "top", "bottom")
    }
}

impl fmt::Display for SpatialExtent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "North", &self.north)?;
        write_field(f, "South", &self.south)?;
        write_field(f, "East", &self.east)?;
        write_field(f, "West", &self.west)?;
        write_field(f, "Top", &self.top)?;
        write_field(f, "Bottom", &self.bottom)
    }
}
