//! Domain model for IPO records, decoupled from the storage rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a listing.
///
/// Any status may be set from any status via update; the store applies no
/// transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpoStatus {
    #[default]
    Upcoming,
    Ongoing,
    /// Listed on the exchange. Accepts the legacy `new-listed` spelling.
    #[serde(alias = "new-listed")]
    Listed,
    Closed,
}

#[derive(Debug, Error)]
#[error("unknown status: {0}")]
pub struct InvalidStatus(String);

impl IpoStatus {
    pub const ALL: [Self; 4] = [Self::Upcoming, Self::Ongoing, Self::Listed, Self::Closed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Listed => "listed",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for IpoStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "listed" | "new-listed" => Ok(Self::Listed),
            "closed" => Ok(Self::Closed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for IpoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the issue is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    BookBuilding,
    FixedPrice,
}

#[derive(Debug, Error)]
#[error("unknown issue type: {0}")]
pub struct InvalidIssueType(String);

impl IssueType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BookBuilding => "book-building",
            Self::FixedPrice => "fixed-price",
        }
    }
}

impl FromStr for IssueType {
    type Err = InvalidIssueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book-building" | "book building" => Ok(Self::BookBuilding),
            "fixed-price" | "fixed price" => Ok(Self::FixedPrice),
            other => Err(InvalidIssueType(other.to_string())),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued listing.
///
/// Dates are ISO `YYYY-MM-DD` strings; absent values mean "to be announced".
/// The post-listing fields (`listing_price`, `listing_gain`, `current_price`,
/// `current_return`) only carry meaning once `status` reaches `listed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ipo {
    pub id: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub logo_url: Option<String>,
    pub logo_initials: Option<String>,
    pub logo_color: Option<String>,
    pub price_band: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lot_size: Option<i32>,
    pub issue_size: Option<String>,
    pub issue_type: Option<IssueType>,
    pub open_date: Option<String>,
    pub close_date: Option<String>,
    pub listing_date: Option<String>,
    pub status: IpoStatus,
    pub description: Option<String>,
    pub ipo_price: Option<f64>,
    pub listing_price: Option<f64>,
    pub listing_gain: Option<String>,
    pub current_price: Option<f64>,
    pub current_return: Option<String>,
    pub rhp_link: Option<String>,
    pub drhp_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Normalized create payload. Produced by the validation layer; the store
/// assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpoDraft {
    pub company_name: String,
    pub sector: Option<String>,
    pub logo_url: Option<String>,
    pub logo_initials: Option<String>,
    pub logo_color: Option<String>,
    pub price_band: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lot_size: Option<i32>,
    pub issue_size: Option<String>,
    pub issue_type: Option<IssueType>,
    pub open_date: Option<String>,
    pub close_date: Option<String>,
    pub listing_date: Option<String>,
    pub status: IpoStatus,
    pub description: Option<String>,
    pub ipo_price: Option<f64>,
    pub listing_price: Option<f64>,
    pub listing_gain: Option<String>,
    pub current_price: Option<f64>,
    pub current_return: Option<String>,
    pub rhp_link: Option<String>,
    pub drhp_link: Option<String>,
}

/// Normalized partial-update payload.
///
/// The outer `Option` distinguishes "field absent, leave unchanged" from a
/// supplied value; for nullable fields the inner `Option` distinguishes a
/// new value from an explicit clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpoPatch {
    pub company_name: Option<String>,
    pub sector: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub logo_initials: Option<Option<String>>,
    pub logo_color: Option<Option<String>>,
    pub price_band: Option<Option<String>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub lot_size: Option<Option<i32>>,
    pub issue_size: Option<Option<String>>,
    pub issue_type: Option<Option<IssueType>>,
    pub open_date: Option<Option<String>>,
    pub close_date: Option<Option<String>>,
    pub listing_date: Option<Option<String>>,
    pub status: Option<IpoStatus>,
    pub description: Option<Option<String>>,
    pub ipo_price: Option<Option<f64>>,
    pub listing_price: Option<Option<f64>>,
    pub listing_gain: Option<Option<String>>,
    pub current_price: Option<Option<f64>>,
    pub current_return: Option<Option<String>>,
    pub rhp_link: Option<Option<String>>,
    pub drhp_link: Option<Option<String>>,
}

impl IpoPatch {
    /// True when no field was supplied at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Equality filters for the list operation. Combinable; both default to "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub status: Option<IpoStatus>,
    pub sector: Option<String>,
}

/// Aggregate counts grouped by status, for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: i64,
    pub upcoming: i64,
    pub ongoing: i64,
    pub listed: i64,
    pub closed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in IpoStatus::ALL {
            assert_eq!(status.as_str().parse::<IpoStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_accepts_legacy_spelling() {
        assert_eq!("new-listed".parse::<IpoStatus>().unwrap(), IpoStatus::Listed);
        assert_eq!("LISTED".parse::<IpoStatus>().unwrap(), IpoStatus::Listed);
    }

    #[test]
    fn status_rejects_unknown() {
        assert!("delisted".parse::<IpoStatus>().is_err());
    }

    #[test]
    fn status_serde_aliases() {
        let listed: IpoStatus = serde_json::from_str("\"new-listed\"").unwrap();
        assert_eq!(listed, IpoStatus::Listed);
        assert_eq!(serde_json::to_string(&listed).unwrap(), "\"listed\"");
    }

    #[test]
    fn empty_patch_detection() {
        assert!(IpoPatch::default().is_empty());

        let patch = IpoPatch {
            status: Some(IpoStatus::Closed),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
