//! Strata – persistent metadata for time stamped geospatial datasets.
//!
//! Every registered map (a raster, a 3D raster or a vector map) and every
//! space time dataset is described by a handful of *facets*, each stored as
//! one row keyed by the identifier `name@mapset`:
//! * a base facet with the name, mapset, creator, temporal type and revision,
//! * either an absolute time facet (timestamps) or a relative time facet
//!   (numbers plus a unit),
//! * a spatial extent facet with the bounding box,
//! * a metadata facet with type specific attributes.
//!
//! ## Modules
//! * [`datatype`] – The [`datatype::Value`] cell type and the [`datatype::Row`]
//!   column map that facets are read from and written to.
//! * [`serializer`] – Parameterised SQL statements built from a row.
//! * [`schema`] – The facet tables of every dataset kind and their DDL.
//! * [`persist`] – The [`persist::Store`] seam and its SQLite backed
//!   [`persist::Persistor`] and [`persist::Session`].
//! * [`entity`] – [`entity::Entity`], the CRUD pattern shared by all facets.
//! * [`base`], [`temporal`], [`spatial`], [`metadata`] – The facet records.
//! * [`relation`] – Allen style relations between two time extents.
//! * [`dataset`] – A dataset as the composition of its facets.
//! * [`settings`] – Configuration and logging setup for the binary.
//!
//! ## Temporal Relations
//! Two extents of the same temporal type can be compared with
//! [`temporal::TemporalExtent::temporal_relation`]. Instants behave like
//! extents that start and end at the same moment. Comparing an absolute
//! with a relative extent fails with
//! [`StrataError::IncompatibleTemporalType`].
//!
//! ## Quick Start
//! ```
//! use chrono::NaiveDate;
//! use strata::dataset::RasterDataset;
//! use strata::persist::{PersistenceMode, Persistor};
//! use strata::relation::TemporalRelation;
//! use strata::temporal::AbsoluteTime;
//!
//! let persistor = Persistor::new(PersistenceMode::InMemory).unwrap();
//! persistor.create_temporal_database().unwrap();
//!
//! let day = |d| NaiveDate::from_ymd_opt(2001, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mut january = RasterDataset::new("precip_jan@climate").unwrap();
//! *january.absolute_time = AbsoluteTime::new(day(1), Some(day(10)), None);
//! january.insert(&persistor).unwrap();
//!
//! let mut later = RasterDataset::new("precip_later@climate").unwrap();
//! *later.absolute_time = AbsoluteTime::new(day(10), Some(day(20)), None);
//! later.insert(&persistor).unwrap();
//!
//! let mut loaded = RasterDataset::new("precip_jan@climate").unwrap();
//! loaded.load(&persistor).unwrap();
//! assert_eq!(loaded.temporal_relation(&later).unwrap(), TemporalRelation::Precedes);
//! ```

pub mod base;
pub mod dataset;
pub mod datatype;
pub mod entity;
pub mod error;
pub mod metadata;
pub mod persist;
pub mod relation;
pub mod schema;
pub mod serializer;
pub mod settings;
pub mod spatial;
pub mod temporal;

pub use error::{Result, StrataError};
