//! Temporal extents: absolute calendar time and relative offsets.
//!
//! Both kinds are [`Record`]s persisted through an [`crate::entity::Entity`],
//! and both can be related to another extent of the same kind with
//! `temporal_relation`. An extent without an end is an instant.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::datatype::{FromValue, Row, Value};
use crate::entity::{write_field, Record};
use crate::error::{Result, StrataError};
use crate::relation::{relate, TemporalRelation};
use crate::schema::Schema;

// ------------- TemporalType -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalType {
    Absolute,
    Relative,
}

impl TemporalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalType::Absolute => "absolute",
            TemporalType::Relative => "relative",
        }
    }
}

impl FromStr for TemporalType {
    type Err = StrataError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "absolute" => Ok(TemporalType::Absolute),
            "relative" => Ok(TemporalType::Relative),
            other => Err(StrataError::Serialization(format!("unknown temporal type '{other}'"))),
        }
    }
}

impl fmt::Display for TemporalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<TemporalType> for Value {
    fn from(t: TemporalType) -> Self {
        Value::Text(t.as_str().to_string())
    }
}

impl FromValue for TemporalType {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match String::from_value(value)? {
            Some(s) => s.parse().map(Some),
            None => Ok(None),
        }
    }
}

// ------------- AbsoluteTime -------------
/// Calendar time. The timezone is an offset in minutes east of UTC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbsoluteTime {
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    timezone: Option<i32>,
    granularity: Option<String>,
}

impl AbsoluteTime {
    pub fn new(start_time: NaiveDateTime, end_time: Option<NaiveDateTime>, timezone: Option<i32>) -> Self {
        Self {
            start_time: Some(start_time),
            end_time,
            timezone,
            granularity: None,
        }
    }
    pub fn instant(start_time: NaiveDateTime) -> Self {
        Self::new(start_time, None, None)
    }
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }
    pub fn timezone(&self) -> Option<i32> {
        self.timezone
    }
    pub fn granularity(&self) -> Option<&str> {
        self.granularity.as_deref()
    }
    pub fn set_start_time(&mut self, start_time: impl Into<Option<NaiveDateTime>>) {
        self.start_time = start_time.into();
    }
    pub fn set_end_time(&mut self, end_time: impl Into<Option<NaiveDateTime>>) {
        self.end_time = end_time.into();
    }
    pub fn set_timezone(&mut self, timezone: impl Into<Option<i32>>) {
        self.timezone = timezone.into();
    }
    pub fn set_granularity<'a>(&mut self, granularity: impl Into<Option<&'a str>>) {
        self.granularity = granularity.into().map(str::to_string);
    }
    pub fn is_instant(&self) -> bool {
        self.end_time.is_none()
    }

    fn to_utc(&self, time: NaiveDateTime) -> Result<NaiveDateTime> {
        let offset = TimeDelta::minutes(i64::from(self.timezone.unwrap_or(0)));
        time.checked_sub_signed(offset)
            .ok_or_else(|| StrataError::InvalidTemporalExtent(format!("{time} is out of range in UTC")))
    }

    /// The extent as a UTC span; an instant spans a single point.
    pub fn span(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let start = self
            .start_time
            .ok_or_else(|| StrataError::InvalidTemporalExtent("no start time".to_string()))?;
        let end = self.end_time.unwrap_or(start);
        if end < start {
            return Err(StrataError::InvalidTemporalExtent(format!(
                "end time {end} lies before start time {start}"
            )));
        }
        Ok((self.to_utc(start)?, self.to_utc(end)?))
    }

    pub fn temporal_relation(&self, other: &AbsoluteTime) -> Result<TemporalRelation> {
        Ok(relate(self.span()?, other.span()?))
    }
}

impl Record for AbsoluteTime {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("start_time", self.start_time);
        row.insert("end_time", self.end_time);
        row.insert("timezone", self.timezone);
        row.insert("granularity", self.granularity.clone());
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("start_time", &mut self.start_time)?;
        row.assign("end_time", &mut self.end_time)?;
        row.assign("timezone", &mut self.timezone)?;
        row.assign("granularity", &mut self.granularity)
    }
    fn validate(&self, _schema: &Schema) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(StrataError::InvalidTemporalExtent(format!(
                    "end time {end} lies before start time {start}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for AbsoluteTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "Start time", &self.start_time)?;
        write_field(f, "End time", &self.end_time)?;
        write_field(f, "Timezone", &self.timezone)?;
        write_field(f, "Granularity", &self.granularity)
    }
}

// ------------- RelativeTime -------------
/// An offset from an unspecified origin, in `unit`s when a unit is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeTime {
    start_interval: Option<f64>,
    end_interval: Option<f64>,
    unit: Option<String>,
    granularity: Option<f64>,
}

impl RelativeTime {
    pub fn new(start_interval: f64, end_interval: Option<f64>, unit: Option<&str>) -> Self {
        Self {
            start_interval: Some(start_interval),
            end_interval,
            unit: unit.map(str::to_string),
            granularity: None,
        }
    }
    pub fn start_interval(&self) -> Option<f64> {
        self.start_interval
    }
    pub fn end_interval(&self) -> Option<f64> {
        self.end_interval
    }
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
    pub fn granularity(&self) -> Option<f64> {
        self.granularity
    }
    pub fn set_start_interval(&mut self, start_interval: impl Into<Option<f64>>) {
        self.start_interval = start_interval.into();
    }
    pub fn set_end_interval(&mut self, end_interval: impl Into<Option<f64>>) {
        self.end_interval = end_interval.into();
    }
    pub fn set_unit<'a>(&mut self, unit: impl Into<Option<&'a str>>) {
        self.unit = unit.into().map(str::to_string);
    }
    pub fn set_granularity(&mut self, granularity: impl Into<Option<f64>>) {
        self.granularity = granularity.into();
    }
    pub fn is_instant(&self) -> bool {
        self.end_interval.is_none()
    }

    pub fn span(&self) -> Result<(f64, f64)> {
        let start = self
            .start_interval
            .ok_or_else(|| StrataError::InvalidTemporalExtent("no start interval".to_string()))?;
        let end = self.end_interval.unwrap_or(start);
        if start.is_nan() || end.is_nan() {
            return Err(StrataError::InvalidTemporalExtent("interval is not a number".to_string()));
        }
        if end < start {
            return Err(StrataError::InvalidTemporalExtent(format!(
                "end interval {end} lies before start interval {start}"
            )));
        }
        Ok((start, end))
    }

    /// Offsets in two different units cannot be compared.
    pub fn temporal_relation(&self, other: &RelativeTime) -> Result<TemporalRelation> {
        if let (Some(left), Some(right)) = (self.unit(), other.unit()) {
            if left != right {
                return Err(StrataError::incompatible(
                    format!("relative ({left})"),
                    format!("relative ({right})"),
                ));
            }
        }
        Ok(relate(self.span()?, other.span()?))
    }
}

impl Record for RelativeTime {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("start_interval", self.start_interval);
        row.insert("end_interval", self.end_interval);
        row.insert("unit", self.unit.clone());
        row.insert("granularity", self.granularity);
        row
    }
    fn hydrate(&mut self, row: &Row) -> Result<()> {
        row.assign("start_interval", &mut self.start_interval)?;
        row.assign("end_interval", &mut self.end_interval)?;
        row.assign("unit", &mut self.unit)?;
        row.assign("granularity", &mut self.granularity)
    }
    fn validate(&self, _schema: &Schema) -> Result<()> {
        if [self.start_interval, self.end_interval, self.granularity]
            .into_iter()
            .flatten()
            .any(f64::is_nan)
        {
            return Err(StrataError::InvalidTemporalExtent("interval is not a number".to_string()));
        }
        match (self.start_interval, self.end_interval) {
            (Some(start), Some(end)) if end < start => Err(StrataError::InvalidTemporalExtent(format!(
                "end interval {end} lies before start interval {start}"
            ))),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_field(f, "Start interval", &self.start_interval)?;
        write_field(f, "End interval", &self.end_interval)?;
        write_field(f, "Unit", &self.unit)?;
        write_field(f, "Granularity", &self.granularity)
    }
}

// ------------- TemporalExtent -------------
/// Either kind of temporal extent, for comparing datasets whose kind is
/// only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalExtent {
    Absolute(AbsoluteTime),
    Relative(RelativeTime),
}

impl TemporalExtent {
    pub fn temporal_type(&self) -> TemporalType {
        match self {
            TemporalExtent::Absolute(_) => TemporalType::Absolute,
            TemporalExtent::Relative(_) => TemporalType::Relative,
        }
    }

    pub fn temporal_relation(&self, other: &TemporalExtent) -> Result<TemporalRelation> {
        match (self, other) {
            (TemporalExtent::Absolute(a), TemporalExtent::Absolute(b)) => a.temporal_relation(b),
            (TemporalExtent::Relative(a), TemporalExtent::Relative(b)) => a.temporal_relation(b),
            (a, b) => Err(StrataError::incompatible(a.temporal_type(), b.temporal_type())),
        }
    }
}

impl From<AbsoluteTime> for TemporalExtent {
    fn from(time: AbsoluteTime) -> Self {
        TemporalExtent::Absolute(time)
    }
}

impl From<RelativeTime> for TemporalExtent {
    fn from(time: RelativeTime) -> Self {
        TemporalExtent::Relative(time)
    }
}
