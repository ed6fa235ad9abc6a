//! Datasets: the four facets of one map under one identifier.
//!
//! A [`Dataset`] owns its base, temporal, spatial and metadata facets. The
//! base facet decides both whether the dataset exists and which of the two
//! temporal facets is in use.
//!
//! Aggregate operations touch one facet after the other and stop at the
//! first failure without undoing earlier writes. To make them atomic, pass a
//! [`crate::persist::Session`] as the store and commit it afterwards:
//!
//! ```
//! use strata::dataset::RasterDataset;
//! use strata::persist::{PersistenceMode, Persistor};
//!
//! let persistor = Persistor::new(PersistenceMode::InMemory).unwrap();
//! persistor.create_temporal_database().unwrap();
//! let dataset = RasterDataset::new("elevation@PERMANENT").unwrap();
//! let session = persistor.session().unwrap();
//! dataset.insert(&session).unwrap();
//! session.commit().unwrap();
//! assert!(dataset.is_in_db(&persistor).unwrap());
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::base::BaseRecord;
use crate::entity::{Entity, Identifier, Record};
use crate::error::{Result, StrataError};
use crate::metadata::{RasterMetadata, VectorMetadata};
use crate::persist::Store;
use crate::relation::TemporalRelation;
use crate::schema::{self, Schema};
use crate::spatial::SpatialExtent;
use crate::temporal::{AbsoluteTime, RelativeTime, TemporalExtent, TemporalType};

/// Everything that differs between dataset kinds: the facet tables and the
/// metadata record.
pub trait DatasetKind {
    const NAME: &'static str;
    const BASE: &'static Schema;
    const ABSOLUTE_TIME: &'static Schema;
    const RELATIVE_TIME: &'static Schema;
    const SPATIAL_EXTENT: &'static Schema;
    const METADATA: &'static Schema;
    type Metadata: Record;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raster;
impl DatasetKind for Raster {
    const NAME: &'static str = "raster";
    const BASE: &'static Schema = &schema::RASTER_BASE;
    const ABSOLUTE_TIME: &'static Schema = &schema::RASTER_ABSOLUTE_TIME;
    const RELATIVE_TIME: &'static Schema = &schema::RASTER_RELATIVE_TIME;
    const SPATIAL_EXTENT: &'static Schema = &schema::RASTER_SPATIAL_EXTENT;
    const METADATA: &'static Schema = &schema::RASTER_METADATA;
    type Metadata = RasterMetadata;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raster3d;
impl DatasetKind for Raster3d {
    const NAME: &'static str = "raster3d";
    const BASE: &'static Schema = &schema::RASTER3D_BASE;
    const ABSOLUTE_TIME: &'static Schema = &schema::RASTER3D_ABSOLUTE_TIME;
    const RELATIVE_TIME: &'static Schema = &schema::RASTER3D_RELATIVE_TIME;
    const SPATIAL_EXTENT: &'static Schema = &schema::RASTER3D_SPATIAL_EXTENT;
    const METADATA: &'static Schema = &schema::RASTER3D_METADATA;
    type Metadata = RasterMetadata;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector;
impl DatasetKind for Vector {
    const NAME: &'static str = "vector";
    const BASE: &'static Schema = &schema::VECTOR_BASE;
    const ABSOLUTE_TIME: &'static Schema = &schema::VECTOR_ABSOLUTE_TIME;
    const RELATIVE_TIME: &'static Schema = &schema::VECTOR_RELATIVE_TIME;
    const SPATIAL_EXTENT: &'static Schema = &schema::VECTOR_SPATIAL_EXTENT;
    const METADATA: &'static Schema = &schema::VECTOR_METADATA;
    type Metadata = VectorMetadata;
}

pub type RasterDataset = Dataset<Raster>;
pub type Raster3dDataset = Dataset<Raster3d>;
pub type VectorDataset = Dataset<Vector>;

/// Turns a missing facet into `Ok(false)`.
fn tolerate_missing(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => {
            debug!(error = %e, "facet absent");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn select_or_clear<R: Record, S: Store + ?Sized>(facet: &mut Entity<R>, store: &S) -> Result<()> {
    if !tolerate_missing(facet.select(store))? {
        facet.clear();
    }
    Ok(())
}

pub struct Dataset<K: DatasetKind> {
    ident: Identifier,
    pub base: Entity<BaseRecord>,
    pub absolute_time: Entity<AbsoluteTime>,
    pub relative_time: Entity<RelativeTime>,
    pub spatial_extent: Entity<SpatialExtent>,
    pub metadata: Entity<K::Metadata>,
    kind: PhantomData<K>,
}

impl<K: DatasetKind> Dataset<K> {
    /// A dataset whose base facet already knows its name and mapset, and
    /// which uses absolute time until told otherwise.
    pub fn new(ident: &str) -> Result<Self> {
        let ident = Identifier::new(ident)?;
        let mut base = BaseRecord::default();
        base.set_name(ident.name());
        base.set_mapset(ident.mapset());
        base.set_temporal_type(TemporalType::Absolute);
        Ok(Self {
            base: Entity::with_record(K::BASE, ident.clone(), base),
            absolute_time: Entity::new(K::ABSOLUTE_TIME, ident.clone()),
            relative_time: Entity::new(K::RELATIVE_TIME, ident.clone()),
            spatial_extent: Entity::new(K::SPATIAL_EXTENT, ident.clone()),
            metadata: Entity::new(K::METADATA, ident.clone()),
            ident,
            kind: PhantomData,
        })
    }

    pub fn ident(&self) -> &Identifier {
        &self.ident
    }

    pub fn kind(&self) -> &'static str {
        K::NAME
    }

    /// The base facet's temporal type; absolute when it has none.
    pub fn temporal_type(&self) -> TemporalType {
        self.base.temporal_type().unwrap_or(TemporalType::Absolute)
    }

    /// A copy of whichever temporal facet the base facet points at.
    pub fn temporal_extent(&self) -> TemporalExtent {
        match self.temporal_type() {
            TemporalType::Absolute => TemporalExtent::Absolute(self.absolute_time.record().clone()),
            TemporalType::Relative => TemporalExtent::Relative(self.relative_time.record().clone()),
        }
    }

    pub fn is_in_db<S: Store + ?Sized>(&self, store: &S) -> Result<bool> {
        self.base.is_in_db(store)
    }

    /// Hydrates every facet. Only the base facet has to exist; facets that
    /// are absent from the store, and the unused temporal facet, are cleared.
    pub fn load<S: Store + ?Sized>(&mut self, store: &S) -> Result<()> {
        self.base.select(store)?;
        match self.temporal_type() {
            TemporalType::Absolute => {
                self.relative_time.clear();
                select_or_clear(&mut self.absolute_time, store)?
            }
            TemporalType::Relative => {
                self.absolute_time.clear();
                select_or_clear(&mut self.relative_time, store)?
            }
        }
        select_or_clear(&mut self.spatial_extent, store)?;
        select_or_clear(&mut self.metadata, store)?;
        debug!(kind = K::NAME, ident = %self.ident, "loaded");
        Ok(())
    }

    pub fn insert<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        self.base.insert(store)?;
        match self.temporal_type() {
            TemporalType::Absolute => self.absolute_time.insert(store)?,
            TemporalType::Relative => self.relative_time.insert(store)?,
        }
        self.spatial_extent.insert(store)?;
        self.metadata.insert(store)?;
        debug!(kind = K::NAME, ident = %self.ident, "inserted");
        Ok(())
    }

    pub fn update<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        self.base.update(store)?;
        match self.temporal_type() {
            TemporalType::Absolute => self.absolute_time.update(store)?,
            TemporalType::Relative => self.relative_time.update(store)?,
        }
        self.spatial_extent.update(store)?;
        self.metadata.update(store)?;
        debug!(kind = K::NAME, ident = %self.ident, "updated");
        Ok(())
    }

    /// Removes every facet, dependents first. Facets that are already
    /// gone are skipped.
    pub fn delete<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        tolerate_missing(self.metadata.delete(store))?;
        tolerate_missing(self.spatial_extent.delete(store))?;
        tolerate_missing(self.relative_time.delete(store))?;
        tolerate_missing(self.absolute_time.delete(store))?;
        tolerate_missing(self.base.delete(store))?;
        debug!(kind = K::NAME, ident = %self.ident, "deleted");
        Ok(())
    }

    pub fn temporal_relation<O: DatasetKind>(&self, other: &Dataset<O>) -> Result<TemporalRelation> {
        if self.temporal_type() != other.temporal_type() {
            return Err(StrataError::incompatible(self.temporal_type(), other.temporal_type()));
        }
        self.temporal_extent().temporal_relation(&other.temporal_extent())
    }

    pub fn print_self(&self) {
        print!("{}", self);
    }
}

impl<K: DatasetKind> fmt::Display for Dataset<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base)?;
        match self.temporal_type() {
            TemporalType::Absolute => write!(f, "{}", self.absolute_time)?,
            TemporalType::Relative => write!(f, "{}", self.relative_time)?,
        }
        write!(f, "{}", self.spatial_extent)?;
        write!(f, "{}", self.metadata)
    }
}
