// The identity facet shared by every dataset kind
use std::fmt;

use crate::datatype::Row;
use crate::entity::{write_field, Record};
use crate::error::Result;
use crate::temporal::TemporalType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseRecord {
    name: Option<String>,
    mapset: Option<String>,
    creator: Option<String>,
    temporal_type: Option<TemporalType>,
    revision: Option<i64>,
    // only stored by the space time dataset kinds
    semantic_type: Option<String>,
}

impl BaseRecord {
    pub fn new(name: &str, mapset: &str, creator: &str, temporal_type: TemporalType) -> Self {
        Self {
            name: Some(name.to_string()),
            mapset: Some(mapset.to_string()),
            creator: Some(creator.to_string()),
            temporal_type: Some(temporal_type),
            revision: Some(1),
            semantic_type: None,
        }
    }
    // fields are hydrated and written as a whole, so only accessors are public
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn mapset(&self) -> Option<&str> {
        self.mapset.as_deref()
    }
    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }
    pub fn temporal_type(&self) -> Option<TemporalType> {
        self.temporal_type
    }
    pub fn revision(&self) -> Option<i64> {
        self.revision
    }
    pub fn semantic_type(&self) -> Option<&str> {
        self.semantic_type.as_deref()
    }
    pub fn set_name<'a>(&mut self, name: impl Into<Option<&'a str>>) {
        self.name = name.into().map(str::to_string);
    }
    pub fn set_mapset<'a>(&mut self, mapset: impl Into<Option<&'a str>>) {
        self.mapset = mapset.into().map(str::to_string);
    }
    pub fn set_creator<'a>(&mut self, creator: impl Into<Option<&'a str>>) {
        self.creator = creator.into().map(str::to_string);
    }
    pub fn set_temporal_type(&mut self, temporal_type: impl Into<Option<TemporalType>>) {
        self.temporal_type = temporal_type.into();
    }
    pub fn set_revision(&mut self, revision: impl Into<Option<i64>>) {
        self.revision = revision.into();
    }
    pub fn set_semantic_type<'a>(&mut self, semantic_type: impl Into<Option<&'a str>>) {
        self.semantic_type = semantic_type.into().map(str::to_string);
    }
}

impl Record for BaseRecord {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("name", self.name.clone());
        row.insert("mapset", self.mapset.clone());
        row.insert("creator", self.creator.clone());
        row.insert("temporal_type", self.temporal_type);
        row.insert("revision", self.revision);
        row.insert("semantic_type", self.semantic_type.clone());
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("name", &mut self.name)?;
        row.assign("mapset", &mut self.mapset)?;
        row.assign("creator", &mut self.creator)?;
        row.assign("temporal_type", &mut self.temporal_type)?;
        row.assign("revision", &mut self.revision)?;
        row.assign("semantic_type", &mut self.semantic_type)
    }
}

impl fmt::Display for BaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "Name", &self.name)?;
        write_field(f, "Mapset", &self.mapset)?;
        write_field(f, "Creator", &self.creator)?;
        write_field(f, "Temporal type", &self.temporal_type)?;
        write_field(f, "Revision", &self.revision)?;
        if self.semantic_type.is_some() {
            write_field(f, "Semantic type", &self.semantic_type)?;
        }
        Ok(())
    }
}
