//! Table descriptors for every facet kind.
//!
//! A facet table is always keyed by the dataset identifier in the `id`
//! column. Kinds that share a record type (all base tables use
//! [`crate::base::BaseRecord`], for instance) differ only in their table
//! name and, for the space-time kinds, a few extra columns.

use crate::datatype::ColumnType::{self, Integer, Real, Text, Timestamp};
use crate::serializer::quote_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn column(name: &'static str, column_type: ColumnType) -> Column {
    Column { name, column_type }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
    pub fn create_table_sql(&self) -> String {
        let mut definitions = vec![format!(
            "{} text not null primary key",
            quote_identifier(self.primary_key)
        )];
        for column in self.columns {
            definitions.push(format!(
                "{} {} null",
                quote_identifier(column.name),
                column.column_type.sql_type()
            ));
        }
        format!(
            "create table if not exists {} (\n    {}\n);",
            quote_identifier(self.table),
            definitions.join(",\n    ")
        )
    }
}

const PRIMARY_KEY: &str = "id";

const fn schema(table: &'static str, columns: &'static [Column]) -> Schema {
    Schema { table, primary_key: PRIMARY_KEY, columns }
}

// ------------- Column sets -------------
const BASE: &[Column] = &[
    column("name", Text),
    column("mapset", Text),
    column("creator", Text),
    column("temporal_type", Text),
    column("revision", Integer),
];
const STDS_BASE: &[Column] = &[
    column("name", Text),
    column("mapset", Text),
    column("creator", Text),
    column("temporal_type", Text),
    column("revision", Integer),
    column("semantic_type", Text),
];
const ABSOLUTE_TIME: &[Column] = &[
    column("start_time", Timestamp),
    column("end_time", Timestamp),
    column("timezone", Integer),
];
const STDS_ABSOLUTE_TIME: &[Column] = &[
    column("start_time", Timestamp),
    column("end_time", Timestamp),
    column("timezone", Integer),
    column("granularity", Text),
];
const RELATIVE_TIME: &[Column] = &[
    column("start_interval", Real),
    column("end_interval", Real),
    column("unit", Text),
];
const STDS_RELATIVE_TIME: &[Column] = &[
    column("start_interval", Real),
    column("end_interval", Real),
    column("unit", Text),
    column("granularity", Real),
];
const SPATIAL_EXTENT: &[Column] = &[
    column("north", Real),
    column("south", Real),
    column("east", Real),
    column("west", Real),
    column("top", Real),
    column("bottom", Real),
];
const RASTER_METADATA_COLUMNS: &[Column] = &[
    column("datatype", Text),
    column("cols", Integer),
    column("rows", Integer),
    column("number_of_cells", Integer),
    column("nsres", Real),
    column("ewres", Real),
    column("min", Real),
    column("max", Real),
    column("series_register", Text),
];
const RASTER3D_METADATA_COLUMNS: &[Column] = &[
    column("datatype", Text),
    column("cols", Integer),
    column("rows", Integer),
    column("depths", Integer),
    column("number_of_cells", Integer),
    column("nsres", Real),
    column("ewres", Real),
    column("tbres", Real),
    column("min", Real),
    column("max", Real),
    column("series_register", Text),
];
const VECTOR_METADATA_COLUMNS: &[Column] = &[column("series_register", Text)];

// ------------- Base -------------
pub const RASTER_BASE: Schema = schema("raster_base", BASE);
pub const RASTER3D_BASE: Schema = schema("raster3d_base", BASE);
pub const VECTOR_BASE: Schema = schema("vector_base", BASE);
pub const STRDS_BASE: Schema = schema("strds_base", STDS_BASE);
pub const STR3DS_BASE: Schema = schema("str3ds_base", STDS_BASE);
pub const STVDS_BASE: Schema = schema("stvds_base", STDS_BASE);

// ------------- Absolute time -------------
pub const RASTER_ABSOLUTE_TIME: Schema = schema("raster_absolute_time", ABSOLUTE_TIME);
pub const RASTER3D_ABSOLUTE_TIME: Schema = schema("raster3d_absolute_time", ABSOLUTE_TIME);
pub const VECTOR_ABSOLUTE_TIME: Schema = schema("vector_absolute_time", ABSOLUTE_TIME);
pub const STRDS_ABSOLUTE_TIME: Schema = schema("strds_absolute_time", STDS_ABSOLUTE_TIME);
pub const STR3DS_ABSOLUTE_TIME: Schema = schema("str3ds_absolute_time", STDS_ABSOLUTE_TIME);
pub const STVDS_ABSOLUTE_TIME: Schema = schema("stvds_absolute_time", STDS_ABSOLUTE_TIME);

// ------------- Relative time -------------
pub const RASTER_RELATIVE_TIME: Schema = schema("raster_relative_time", RELATIVE_TIME);
pub const RASTER3D_RELATIVE_TIME: Schema = schema("raster3d_relative_time", RELATIVE_TIME);
pub const VECTOR_RELATIVE_TIME: Schema = schema("vector_relative_time", RELATIVE_TIME);
pub const STRDS_RELATIVE_TIME: Schema = schema("strds_relative_time", STDS_RELATIVE_TIME);
pub const STR3DS_RELATIVE_TIME: Schema = schema("str3ds_relative_time", STDS_RELATIVE_TIME);
pub const STVDS_RELATIVE_TIME: Schema = schema("stvds_relative_time", STDS_RELATIVE_TIME);

// ------------- Spatial extent -------------
pub const RASTER_SPATIAL_EXTENT: Schema = schema("raster_spatial_extent", SPATIAL_EXTENT);
pub const RASTER3D_SPATIAL_EXTENT: Schema = schema("raster3d_spatial_extent", SPATIAL_EXTENT);
pub const VECTOR_SPATIAL_EXTENT: Schema = schema("vector_spatial_extent", SPATIAL_EXTENT);
pub const STRDS_SPATIAL_EXTENT: Schema = schema("strds_spatial_extent", SPATIAL_EXTENT);
pub const STR3DS_SPATIAL_EXTENT: Schema = schema("str3ds_spatial_extent", SPATIAL_EXTENT);
pub const STVDS_SPATIAL_EXTENT: Schema = schema("stvds_spatial_extent", SPATIAL_EXTENT);

// ------------- Metadata -------------
pub const RASTER_METADATA: Schema = schema("raster_metadata", RASTER_METADATA_COLUMNS);
pub const RASTER3D_METADATA: Schema = schema("raster3d_metadata", RASTER3D_METADATA_COLUMNS);
pub const VECTOR_METADATA: Schema = schema("vector_metadata", VECTOR_METADATA_COLUMNS);

/// Every facet table, in the order they are created.
pub const ALL_SCHEMAS: &[&Schema] = &[
    &RASTER_BASE,
    &RASTER3D_BASE,
    &VECTOR_BASE,
    &STRDS_BASE,
    &STR3DS_BASE,
    &STVDS_BASE,
    &RASTER_ABSOLUTE_TIME,
    &RASTER3D_ABSOLUTE_TIME,
    &VECTOR_ABSOLUTE_TIME,
    &STRDS_ABSOLUTE_TIME,
    &STR3DS_ABSOLUTE_TIME,
    &STVDS_ABSOLUTE_TIME,
    &RASTER_RELATIVE_TIME,
    &RASTER3D_RELATIVE_TIME,
    &VECTOR_RELATIVE_TIME,
    &STRDS_RELATIVE_TIME,
    &STR3DS_RELATIVE_TIME,
    &STVDS_RELATIVE_TIME,
    &RASTER_SPATIAL_EXTENT,
    &RASTER3D_SPATIAL_EXTENT,
    &VECTOR_SPATIAL_EXTENT,
    &STRDS_SPATIAL_EXTENT,
    &STR3DS_SPATIAL_EXTENT,
    &STVDS_SPATIAL_EXTENT,
    &RASTER_METADATA,
    &RASTER3D_METADATA,
    &VECTOR_METADATA,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_unique() {
        let mut tables: Vec<&str> = ALL_SCHEMAS.iter().map(|s| s.table).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), ALL_SCHEMAS.len());
    }

    #[test]
    fn create_table_keys_on_the_identifier() {
        let sql = VECTOR_METADATA.create_table_sql();
        assert_eq!(
            sql,
            "create table if not exists \"vector_metadata\" (\n    \"id\" text not null primary key,\n    \"series_register\" text null\n);"
        );
    }

    #[test]
    fn only_volumetric_metadata_has_depths() {
        assert!(RASTER3D_METADATA.has_column("depths"));
        assert!(!RASTER_METADATA.has_column("depths"));
        assert!(STRDS_ABSOLUTE_TIME.has_column("granularity"));
        assert!(!RASTER_ABSOLUTE_TIME.has_column("granularity"));
    }
}
