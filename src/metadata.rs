//! Type specific descriptive attributes.
//!
//! Raster and 3D raster share [`RasterMetadata`]; the 3D schema adds the
//! `depths` and `tbres` columns, which the 2D schema neither writes nor
//! reads. Vectors only record the space time dataset they are registered in.

use std::fmt;

use tracing::warn;

use crate::datatype::Row;
use crate::entity::{write_field, Record};
use crate::error::Result;
use crate::schema::Schema;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterMetadata {
    datatype: Option<String>,
    cols: Option<i64>,
    rows: Option<i64>,
    depths: Option<i64>,
    number_of_cells: Option<i64>,
    nsres: Option<f64>,
    ewres: Option<f64>,
    tbres: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    series_register: Option<String>,
}

impl RasterMetadata {
    pub fn new(datatype: &str, cols: i64, rows: i64) -> Self {
        Self {
            datatype: Some(datatype.to_string()),
            cols: Some(cols),
            rows: Some(rows),
            ..Self::default()
        }
    }
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }
    pub fn cols(&self) -> Option<i64> {
        self.cols
    }
    pub fn rows(&self) -> Option<i64> {
        self.rows
    }
    pub fn depths(&self) -> Option<i64> {
        self.depths
    }
    pub fn number_of_cells(&self) -> Option<i64> {
        self.number_of_cells
    }
    pub fn nsres(&self) -> Option<f64> {
        self.nsres
    }
    pub fn ewres(&self) -> Option<f64> {
        self.ewres
    }
    pub fn tbres(&self) -> Option<f64> {
        self.tbres
    }
    pub fn min(&self) -> Option<f64> {
        self.min
    }
    pub fn max(&self) -> Option<f64> {
        self.max
    }
    pub fn series_register(&self) -> Option<&str> {
        self.series_register.as_deref()
    }
    pub fn set_datatype<'a>(&mut self, datatype: impl Into<Option<&'a str>>) {
        self.datatype = datatype.into().map(str::to_string);
    }
    pub fn set_cols(&mut self, cols: impl Into<Option<i64>>) {
        self.cols = cols.into();
    }
    pub fn set_rows(&mut self, rows: impl Into<Option<i64>>) {
        self.rows = rows.into();
    }
    pub fn set_depths(&mut self, depths: impl Into<Option<i64>>) {
        self.depths = depths.into();
    }
    pub fn set_number_of_cells(&mut self, number_of_cells: impl Into<Option<i64>>) {
        self.number_of_cells = number_of_cells.into();
    }
    pub fn set_nsres(&mut self, nsres: impl Into<Option<f64>>) {
        self.nsres = nsres.into();
    }
    pub fn set_ewres(&mut self, ewres: impl Into<Option<f64>>) {
        self.ewres = ewres.into();
    }
    pub fn set_tbres(&mut self, tbres: impl Into<Option<f64>>) {
        self.tbres = tbres.into();
    }
    pub fn set_min(&mut self, min: impl Into<Option<f64>>) {
        self.min = min.into();
    }
    pub fn set_max(&mut self, max: impl Into<Option<f64>>) {
        self.max = max.into();
    }
    pub fn set_series_register<'a>(&mut self, series_register: impl Into<Option<&'a str>>) {
        self.series_register = series_register.into().map(str::to_string);
    }

    /// `cols * rows`, times `depths` when the schema is volumetric, if all
    /// factors are known.
    pub fn derived_number_of_cells(&self, schema: &Schema) -> Option<i64> {
        let cells = self.cols?.checked_mul(self.rows?)?;
        if schema.has_column("depths") {
            cells.checked_mul(self.depths?)
        } else {
            Some(cells)
        }
    }
}

impl Record for RasterMetadata {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("datatype", self.datatype.clone());
        row.insert("cols", self.cols);
        row.insert("rows", self.rows);
        row.insert("depths", self.depths);
        row.insert("number_of_cells", self.number_of_cells);
        row.insert("nsres", self.nsres);
        row.insert("ewres", self.ewres);
        row.insert("tbres", self.tbres);
        row.insert("min", self.min);
        row.insert("max", self.max);
        row.insert("series_register", self.series_register.clone());
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("datatype", &mut self.datatype)?;
        row.assign("cols", &mut self.cols)?;
        row.assign("rows", &mut self.rows)?;
        row.assign("depths", &mut self.depths)?;
        row.assign("number_of_cells", &mut self.number_of_cells)?;
        row.assign("nsres", &mut self.nsres)?;
        row.assign("ewres", &mut self.ewres)?;
        row.assign("tbres", &mut self.tbres)?;
        row.assign("min", &mut self.min)?;
        row.assign("max", &mut self.max)?;
        row.assign("series_register", &mut self.series_register)
    }
    // a mismatching cell count is reported, never rejected
    fn validate(&self, schema: &Schema) -> Result<()> {
        if let (Some(stored), Some(derived)) = (self.number_of_cells, self.derived_number_of_cells(schema)) {
            if stored != derived {
                warn!(table = schema.table, stored, derived, "number of cells does not match the grid shape");
            }
        }
        Ok(())
    }
}

impl fmt::Display for RasterMetadata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "Datatype", &self.datatype)?;
        write_field(f, "Number of columns", &self.cols)?;
        write_field(f, "Number of rows", &self.rows)?;
        if self.depths.is_some() {
            write_field(f, "Number of depths", &self.depths)?;
        }
        write_field(f, "Number of cells", &self.number_of_cells)?;
        write_field(f, "North-South resolution", &self.nsres)?;
        write_field(f, "East-west resolution", &self.ewres)?;
        if self.tbres.is_some() {
            write_field(f, "Top-Bottom resolution", &self.tbres)?;
        }
        write_field(f, "Minimum value", &self.min)?;
        write_field(f, "Maximum value", &self.max)?;
        write_field(f, "Registered in", &self.series_register)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorMetadata {
    series_register: Option<String>,
}

impl VectorMetadata {
    pub fn new(series_register: &str) -> Self {
        Self { series_register: Some(series_register.to_string()) }
    }
    pub fn series_register(&self) -> Option<&str> {
        self.series_register.as_deref()
    }
    pub fn set_series_register<'a>(&mut self, series_register: impl Into<Option<&'a str>>) {
        self.series_register = series_register.into().map(str::to_string);
    }
}

impl Record for VectorMetadata {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("series_register", self.series_register.clone());
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("series_register", &mut self.series_register)
    }
}

impl fmt::Display for VectorMetadata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "Registered in", &self.series_register)
    }
}
