use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sale status of a plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Reserved,
    Sold,
    #[serde(other)]
    Unknown,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Reserved => "reserved",
            ListingStatus::Sold => "sold",
            ListingStatus::Unknown => "unknown",
        }
    }
}

/// Permitted land use of a plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    Residential,
    Commercial,
    Agricultural,
    Industrial,
    Mixed,
}

impl UsageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageType::Residential => "residential",
            UsageType::Commercial => "commercial",
            UsageType::Agricultural => "agricultural",
            UsageType::Industrial => "industrial",
            UsageType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top of the administrative hierarchy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct District {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
}

/// Administrative unit a plot is registered under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Council {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district_id: Option<String>,
    #[serde(default)]
    pub district: Option<District>,
}

/// One land plot for sale or lease, as returned by the listing store.
///
/// The `council` field carries the joined council → district → region
/// chain when the store resolved it. Snapshots are never mutated after a
/// fetch; a new fetch replaces the whole result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Square meters
    pub area: f64,
    pub usage_type: UsageType,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub council_id: Option<String>,
    #[serde(default)]
    pub council: Option<Council>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Listing {
    pub fn district(&self) -> Option<&District> {
        self.council.as_ref()?.district.as_ref()
    }

    pub fn region(&self) -> Option<&Region> {
        self.district()?.region.as_ref()
    }

    /// "Council, District, Region", skipping levels the store did not resolve
    pub fn location_label(&self) -> String {
        let parts: Vec<&str> = [
            self.council.as_ref().map(|c| c.name.as_str()),
            self.district().map(|d| d.name.as_str()),
            self.region().map(|r| r.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();

        parts.join(", ")
    }

    /// Coordinates for the map view, if the plot has been geolocated
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_joined_listing() {
        let payload = json!({
            "id": "p-1",
            "title": "Beach plot",
            "description": "Close to the shore",
            "price": 4500000,
            "area": 800.5,
            "usage_type": "residential",
            "status": "available",
            "created_at": "2024-03-01T10:00:00Z",
            "council_id": "c-1",
            "council": {
                "id": "c-1",
                "name": "Kinondoni Municipal",
                "district_id": "d-1",
                "district": {
                    "id": "d-1",
                    "name": "Kinondoni",
                    "region_id": "r-1",
                    "region": { "id": "r-1", "name": "Dar es Salaam" }
                }
            }
        });

        let listing: Listing = serde_json::from_value(payload).unwrap();

        assert_eq!(listing.price, 4_500_000.0);
        assert_eq!(listing.usage_type, UsageType::Residential);
        assert_eq!(listing.region().map(|r| r.name.as_str()), Some("Dar es Salaam"));
        assert_eq!(
            listing.location_label(),
            "Kinondoni Municipal, Kinondoni, Dar es Salaam"
        );
        assert!(listing.coordinates().is_none());
    }

    #[test]
    fn test_unresolved_hierarchy_and_unknown_status() {
        let payload = json!({
            "id": "p-2",
            "title": "Farm land",
            "price": 100,
            "area": 5000,
            "usage_type": "agricultural",
            "status": "withdrawn",
            "created_at": "2024-03-01T10:00:00Z",
            "council": null
        });

        let listing: Listing = serde_json::from_value(payload).unwrap();

        assert_eq!(listing.status, ListingStatus::Unknown);
        assert_eq!(listing.description, "");
        assert_eq!(listing.location_label(), "");
    }
}
