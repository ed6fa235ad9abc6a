use chrono::{NaiveDate, NaiveDateTime};
use strata::base::BaseRecord;
use strata::entity::{Entity, Identifier};
use strata::metadata::{RasterMetadata, VectorMetadata};
use strata::persist::{PersistenceMode, Persistor};
use strata::schema::{self, Schema};
use strata::spatial::SpatialExtent;
use strata::temporal::{AbsoluteTime, RelativeTime, TemporalType};
use strata::StrataError;

fn setup() -> Persistor {
    let persistor = Persistor::new(PersistenceMode::InMemory).unwrap();
    persistor.create_temporal_database().unwrap();
    persistor
}

fn soil(i: usize) -> Identifier {
    Identifier::new(&format!("soil{i}@PERMANENT")).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

const BASE_TABLES: [&Schema; 6] = [
    &schema::RASTER_BASE,
    &schema::RASTER3D_BASE,
    &schema::VECTOR_BASE,
    &schema::STRDS_BASE,
    &schema::STR3DS_BASE,
    &schema::STVDS_BASE,
];

#[test]
fn base_facets_round_trip_for_every_kind() {
    let persistor = setup();
    for (i, table) in BASE_TABLES.into_iter().enumerate() {
        let ident = soil(i);
        let mut record = BaseRecord::new(ident.name(), ident.mapset(), "soeren", TemporalType::Absolute);
        record.set_semantic_type("event");
        let base = Entity::with_record(table, ident.clone(), record);
        base.insert(&persistor).unwrap();
        assert!(base.is_in_db(&persistor).unwrap());

        let mut loaded: Entity<BaseRecord> = Entity::new(table, ident);
        loaded.select(&persistor).unwrap();
        assert_eq!(loaded.creator(), Some("soeren"));
        assert_eq!(loaded.temporal_type(), Some(TemporalType::Absolute));
        assert_eq!(loaded.revision(), Some(1));
        // only the space time tables keep a semantic type
        let expected = table.has_column("semantic_type").then_some("event");
        assert_eq!(loaded.semantic_type(), expected);
    }
}

#[test]
fn update_overwrites_every_column() {
    let persistor = setup();
    let ident = soil(1);
    let record = BaseRecord::new("soil1", "PERMANENT", "soeren", TemporalType::Absolute);
    let mut base = Entity::with_record(&schema::RASTER_BASE, ident.clone(), record);
    base.insert(&persistor).unwrap();

    base.clear();
    base.set_creator("rene");
    base.update(&persistor).unwrap();

    let mut loaded: Entity<BaseRecord> = Entity::new(&schema::RASTER_BASE, ident);
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.creator(), Some("rene"));
    assert_eq!(loaded.name(), None);
    assert_eq!(loaded.mapset(), None);
    assert_eq!(loaded.temporal_type(), None);
    assert_eq!(loaded.revision(), None);
}

#[test]
fn absent_rows_are_reported() {
    let persistor = setup();
    let mut base: Entity<BaseRecord> = Entity::new(&schema::VECTOR_BASE, soil(7));
    assert!(!base.is_in_db(&persistor).unwrap());
    assert!(matches!(base.select(&persistor), Err(StrataError::NotFound { .. })));
    assert!(matches!(base.update(&persistor), Err(StrataError::NotFound { .. })));
    assert!(matches!(base.delete(&persistor), Err(StrataError::NotFound { .. })));
}

#[test]
fn inserting_twice_is_a_duplicate() {
    let persistor = setup();
    let base: Entity<BaseRecord> = Entity::new(&schema::STRDS_BASE, soil(2));
    base.insert(&persistor).unwrap();
    assert!(matches!(base.insert(&persistor), Err(StrataError::DuplicateEntity { .. })));
    base.delete(&persistor).unwrap();
    assert!(!base.is_in_db(&persistor).unwrap());
}

#[test]
fn the_same_identifier_lives_independently_in_each_table() {
    let persistor = setup();
    let raster: Entity<BaseRecord> = Entity::new(&schema::RASTER_BASE, soil(3));
    let vector: Entity<BaseRecord> = Entity::new(&schema::VECTOR_BASE, soil(3));
    raster.insert(&persistor).unwrap();
    assert!(!vector.is_in_db(&persistor).unwrap());
    vector.insert(&persistor).unwrap();
    raster.delete(&persistor).unwrap();
    assert!(vector.is_in_db(&persistor).unwrap());
}

#[test]
fn absolute_time_keeps_timestamps_and_timezone() {
    let persistor = setup();
    let ident = soil(4);
    let mut time = AbsoluteTime::new(date(2011, 1, 1), Some(date(2011, 7, 1)), Some(1));
    time.set_granularity("1 day");
    let entity = Entity::with_record(&schema::STRDS_ABSOLUTE_TIME, ident.clone(), time.clone());
    entity.insert(&persistor).unwrap();

    let mut loaded: Entity<AbsoluteTime> = Entity::new(&schema::STRDS_ABSOLUTE_TIME, ident.clone());
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.record(), &time);

    loaded.set_start_time(date(2010, 1, 1));
    loaded.update(&persistor).unwrap();
    let mut reloaded: Entity<AbsoluteTime> = Entity::new(&schema::STRDS_ABSOLUTE_TIME, ident);
    reloaded.select(&persistor).unwrap();
    assert_eq!(reloaded.start_time(), Some(date(2010, 1, 1)));
    assert_eq!(reloaded.end_time(), Some(date(2011, 7, 1)));
}

#[test]
fn granularity_is_dropped_by_map_tables() {
    let persistor = setup();
    let mut time = AbsoluteTime::instant(date(2011, 1, 1));
    time.set_granularity("1 day");
    Entity::with_record(&schema::RASTER_ABSOLUTE_TIME, soil(5), time)
        .insert(&persistor)
        .unwrap();
    let mut loaded: Entity<AbsoluteTime> = Entity::new(&schema::RASTER_ABSOLUTE_TIME, soil(5));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.granularity(), None);
    assert!(loaded.is_instant());
}

#[test]
fn reversed_time_is_not_written() {
    let persistor = setup();
    let time = AbsoluteTime::new(date(2011, 7, 1), Some(date(2011, 1, 1)), None);
    let entity = Entity::with_record(&schema::VECTOR_ABSOLUTE_TIME, soil(6), time);
    assert!(matches!(entity.insert(&persistor), Err(StrataError::InvalidTemporalExtent(_))));
    assert!(!entity.is_in_db(&persistor).unwrap());
}

#[test]
fn relative_time_round_trips() {
    let persistor = setup();
    let mut time = RelativeTime::new(1.0, Some(2.5), Some("years"));
    time.set_granularity(0.5);
    let entity = Entity::with_record(&schema::STR3DS_RELATIVE_TIME, soil(8), time.clone());
    entity.insert(&persistor).unwrap();
    let mut loaded: Entity<RelativeTime> = Entity::new(&schema::STR3DS_RELATIVE_TIME, soil(8));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.record(), &time);
}

#[test]
fn nan_values_are_not_written() {
    let persistor = setup();
    let time = Entity::with_record(
        &schema::RASTER_RELATIVE_TIME,
        soil(14),
        RelativeTime::new(f64::NAN, Some(1.0), None),
    );
    assert!(matches!(time.insert(&persistor), Err(StrataError::InvalidTemporalExtent(_))));
    assert!(!time.is_in_db(&persistor).unwrap());

    let mut extent = SpatialExtent::default();
    extent.set_east(f64::NAN);
    let extent = Entity::with_record(&schema::VECTOR_SPATIAL_EXTENT, soil(14), extent);
    assert!(matches!(extent.insert(&persistor), Err(StrataError::InvalidExtent(_))));
    assert!(!extent.is_in_db(&persistor).unwrap());
}

#[test]
fn text_fields_can_be_reset_one_at_a_time() {
    let persistor = setup();
    let mut record = BaseRecord::new("soil15", "PERMANENT", "soeren", TemporalType::Absolute);
    record.set_semantic_type("mean");
    let mut base = Entity::with_record(&schema::STVDS_BASE, soil(15), record);
    base.insert(&persistor).unwrap();

    base.set_semantic_type(None);
    base.update(&persistor).unwrap();
    let mut loaded: Entity<BaseRecord> = Entity::new(&schema::STVDS_BASE, soil(15));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.semantic_type(), None);
    assert_eq!(loaded.creator(), Some("soeren"));
}

#[test]
fn spatial_extent_round_trips_and_rejects_swapped_bounds() {
    let persistor = setup();
    let extent = SpatialExtent::volume(100.0, 0.0, 50.0, 0.0, 10.0, -10.0);
    let entity = Entity::with_record(&schema::RASTER3D_SPATIAL_EXTENT, soil(9), extent.clone());
    entity.insert(&persistor).unwrap();
    let mut loaded: Entity<SpatialExtent> = Entity::new(&schema::RASTER3D_SPATIAL_EXTENT, soil(9));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.record(), &extent);

    loaded.set_south(200.0);
    assert!(matches!(loaded.update(&persistor), Err(StrataError::InvalidExtent(_))));
}

#[test]
fn raster_metadata_round_trips() {
    let persistor = setup();
    let mut metadata = RasterMetadata::new("CELL", 100, 200);
    metadata.set_number_of_cells(20_000i64);
    metadata.set_nsres(1.0);
    metadata.set_ewres(1.0);
    metadata.set_min(-5.0);
    metadata.set_max(42.5);
    let entity = Entity::with_record(&schema::RASTER_METADATA, soil(10), metadata.clone());
    entity.insert(&persistor).unwrap();
    let mut loaded: Entity<RasterMetadata> = Entity::new(&schema::RASTER_METADATA, soil(10));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.record(), &metadata);
}

#[test]
fn mismatching_cell_count_is_still_stored() {
    let persistor = setup();
    let mut metadata = RasterMetadata::new("DCELL", 10, 10);
    metadata.set_depths(10i64);
    metadata.set_tbres(1.0);
    metadata.set_number_of_cells(999i64);
    let entity = Entity::with_record(&schema::RASTER3D_METADATA, soil(11), metadata);
    entity.insert(&persistor).unwrap();
    let mut loaded: Entity<RasterMetadata> = Entity::new(&schema::RASTER3D_METADATA, soil(11));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.number_of_cells(), Some(999));
    assert_eq!(loaded.depths(), Some(10));
}

#[test]
fn vector_metadata_round_trips() {
    let persistor = setup();
    let entity = Entity::with_record(&schema::VECTOR_METADATA, soil(12), VectorMetadata::new("lidar@PERMANENT"));
    entity.insert(&persistor).unwrap();
    let mut loaded: Entity<VectorMetadata> = Entity::new(&schema::VECTOR_METADATA, soil(12));
    loaded.select(&persistor).unwrap();
    assert_eq!(loaded.series_register(), Some("lidar@PERMANENT"));
}

#[test]
fn print_self_lists_every_field() {
    let base = Entity::with_record(
        &schema::RASTER_BASE,
        soil(13),
        BaseRecord::new("soil13", "PERMANENT", "soeren", TemporalType::Relative),
    );
    let dump = base.to_string();
    assert!(dump.contains("raster_base"));
    assert!(dump.contains("soil13@PERMANENT"));
    assert!(dump.contains("relative"));
    base.print_self();
}
