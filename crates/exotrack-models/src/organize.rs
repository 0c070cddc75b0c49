//! Aggregation keys and their mapping onto dataset fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which dataset field drives the aggregation for a job.
///
/// The wire strings match the submission API of the original service
/// (`None`, `Mass`, `Radius`, `Orbit_Period`). `None` means "group by
/// discovery year".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrganizeBy {
    #[default]
    None,
    Mass,
    Radius,
    #[serde(rename = "Orbit_Period")]
    OrbitPeriod,
}

impl OrganizeBy {
    /// The dataset field this key aggregates over.
    pub fn field(&self) -> DatasetField {
        match self {
            OrganizeBy::None => DatasetField::DiscoveryYear,
            OrganizeBy::Mass => DatasetField::Mass,
            OrganizeBy::Radius => DatasetField::Radius,
            OrganizeBy::OrbitPeriod => DatasetField::OrbitalPeriod,
        }
    }

    /// The wire string accepted at submission time.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizeBy::None => "None",
            OrganizeBy::Mass => "Mass",
            OrganizeBy::Radius => "Radius",
            OrganizeBy::OrbitPeriod => "Orbit_Period",
        }
    }
}

impl fmt::Display for OrganizeBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a submission carries an unknown aggregation key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown organize_by value: {0:?}")]
pub struct ParseOrganizeByError(pub String);

impl FromStr for OrganizeBy {
    type Err = ParseOrganizeByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(OrganizeBy::None),
            "Mass" => Ok(OrganizeBy::Mass),
            "Radius" => Ok(OrganizeBy::Radius),
            "Orbit_Period" => Ok(OrganizeBy::OrbitPeriod),
            other => Err(ParseOrganizeByError(other.to_string())),
        }
    }
}

/// A numeric field of a planet record the pipeline can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetField {
    /// Year the planet was discovered
    DiscoveryYear,
    /// Planet mass in Earth masses
    Mass,
    /// Planet radius in Earth radii
    Radius,
    /// Orbital period in Earth days
    OrbitalPeriod,
}

impl DatasetField {
    /// JSON key of the field in a planet record.
    pub fn key(&self) -> &'static str {
        match self {
            DatasetField::DiscoveryYear => "disc_year",
            DatasetField::Mass => "pl_masse",
            DatasetField::Radius => "pl_rade",
            DatasetField::OrbitalPeriod => "pl_orbper",
        }
    }

    /// Axis label used when rendering the artifact.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetField::DiscoveryYear => "Year of discovery",
            DatasetField::Mass => "Mass of planet (Earth Masses)",
            DatasetField::Radius => "Radius of planet (Earth Radii)",
            DatasetField::OrbitalPeriod => "Orbit Period (Earth Days)",
        }
    }
}
