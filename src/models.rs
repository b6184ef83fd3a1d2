// models.rs
// Domain types shared across storage, catalog, groups and generation

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error_handling::ParseOriginError;

/// A launch point that scopes region ownership.
///
/// The same region may be owned by different groups under different origins;
/// the exclusivity constraint applies per origin. Stored in the database as
/// its three-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origin {
    /// Hong Kong
    #[value(name = "HKG", alias = "hkg")]
    Hkg,
    /// Japan
    #[value(name = "JPN", alias = "jpn")]
    Jpn,
    /// Singapore
    #[value(name = "SIN", alias = "sin")]
    Sin,
}

impl Origin {
    /// Returns the three-letter code used in the database and in CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Hkg => "HKG",
            Origin::Jpn => "JPN",
            Origin::Sin => "SIN",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = ParseOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HKG" => Ok(Origin::Hkg),
            "JPN" => Ok(Origin::Jpn),
            "SIN" => Ok(Origin::Sin),
            other => Err(ParseOriginError(other.to_string())),
        }
    }
}

/// A `(province, city)` pair derived from the reference dataset.
///
/// An empty `city` denotes a province-level bucket: addresses the dataset
/// could not localize below province granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub province: String,
    pub city: String,
}

impl Region {
    /// Convenience constructor used heavily in tests.
    pub fn new(province: impl Into<String>, city: impl Into<String>) -> Self {
        Region {
            province: province.into(),
            city: city.into(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.city.is_empty() {
            f.write_str(&self.province)
        } else {
            write!(f, "{} / {}", self.province, self.city)
        }
    }
}

/// A region annotated with its current owner under some origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOwnership {
    pub province: String,
    pub city: String,
    /// Id of the owning group, or `None` if the region is unassigned.
    pub assigned_to: Option<String>,
}

/// A named routing group and its owned regions.
///
/// `isp` is an exact-match carrier filter applied when generating CIDRs; the
/// empty string means "match any carrier". `origin` is fixed at creation and
/// never changes across updates.
#[derive(Debug, Clone, Serialize)]
pub struct RouteGroup {
    pub id: String,
    pub name: String,
    pub isp: String,
    pub origin: Origin,
    pub created_at: String,
    pub regions: Vec<Region>,
}

/// One row of the read-only reference dataset: an inclusive IPv4 range and
/// where it is located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRecord {
    pub min_ip: u32,
    pub max_ip: u32,
    pub country: String,
    pub province: String,
    pub city: String,
    pub isp: String,
}

/// Summary counts over the reference dataset and the group store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatasetStats {
    pub total_records: i64,
    pub country_records: i64,
    pub group_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_round_trip() {
        for origin in [Origin::Hkg, Origin::Jpn, Origin::Sin] {
            assert_eq!(origin.as_str().parse::<Origin>().unwrap(), origin);
        }
    }

    #[test]
    fn test_origin_rejects_unknown() {
        assert!("LAX".parse::<Origin>().is_err());
        assert!("hkg".parse::<Origin>().is_err());
        assert!("".parse::<Origin>().is_err());
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::new("Guangdong", "Shenzhen").to_string(), "Guangdong / Shenzhen");
        // Province-level buckets have no city suffix
        assert_eq!(Region::new("Guangdong", "").to_string(), "Guangdong");
    }
}
