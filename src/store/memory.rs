use crate::models::{Council, District, Listing, ListingStatus, Region, UsageType};
use crate::store::error::StoreError;
use crate::store::query::ListingQuery;
use crate::store::traits::ListingStore;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Listing store held entirely in memory.
///
/// Plots are stored with only their `council_id`; the council → district
/// → region chain is joined on every fetch, like the remote store does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    listings: Vec<Listing>,
    councils: HashMap<String, Council>,
    districts: HashMap<String, District>,
    regions: HashMap<String, Region>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, id: &str, name: &str) -> Self {
        self.regions.insert(
            id.to_string(),
            Region {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_district(mut self, id: &str, name: &str, region_id: &str) -> Self {
        self.districts.insert(
            id.to_string(),
            District {
                id: id.to_string(),
                name: name.to_string(),
                region_id: Some(region_id.to_string()),
                region: None,
            },
        );
        self
    }

    pub fn with_council(mut self, id: &str, name: &str, district_id: &str) -> Self {
        self.councils.insert(
            id.to_string(),
            Council {
                id: id.to_string(),
                name: name.to_string(),
                district_id: Some(district_id.to_string()),
                district: None,
            },
        );
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listings.push(listing);
        self
    }

    fn resolve_council(&self, council_id: &str) -> Option<Council> {
        let mut council = self.councils.get(council_id)?.clone();

        council.district = council
            .district_id
            .as_deref()
            .and_then(|id| self.districts.get(id))
            .map(|district| {
                let mut district = district.clone();
                district.region = district
                    .region_id
                    .as_deref()
                    .and_then(|id| self.regions.get(id))
                    .cloned();
                district
            });

        Some(council)
    }

    /// Demo plots across three regions, used when no remote store is configured
    pub fn with_demo_plots() -> Self {
        info!("📋 Loading demo plots into the in-memory store");

        let now = Utc::now();
        let plot = |id: &str,
                    title: &str,
                    description: &str,
                    price: f64,
                    area: f64,
                    usage_type: UsageType,
                    status: ListingStatus,
                    council_id: &str,
                    days_ago: i64,
                    coordinates: (f64, f64)| Listing {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            price,
            area,
            usage_type,
            status,
            created_at: now - Duration::days(days_ago),
            council_id: Some(council_id.to_string()),
            council: None,
            latitude: Some(coordinates.0),
            longitude: Some(coordinates.1),
        };

        Self::new()
            .with_region("r-dar", "Dar es Salaam")
            .with_region("r-aru", "Arusha")
            .with_region("r-dod", "Dodoma")
            .with_district("d-kin", "Kinondoni", "r-dar")
            .with_district("d-ila", "Ilala", "r-dar")
            .with_district("d-aru", "Arusha", "r-aru")
            .with_district("d-dod", "Dodoma", "r-dod")
            .with_council("c-kin", "Kinondoni Municipal Council", "d-kin")
            .with_council("c-ila", "Ilala City Council", "d-ila")
            .with_council("c-aru", "Arusha City Council", "d-aru")
            .with_council("c-dod", "Dodoma City Council", "d-dod")
            .with_listing(plot(
                "plot-001",
                "Beach plot in Mbezi",
                "Surveyed residential plot with sea view, title deed ready.",
                85_000_000.0,
                1_200.0,
                UsageType::Residential,
                ListingStatus::Available,
                "c-kin",
                2,
                (-6.7167, 39.2167),
            ))
            .with_listing(plot(
                "plot-002",
                "Corner plot on Nyerere Road",
                "Commercial frontage near the airport junction.",
                9_500_000.0,
                650.0,
                UsageType::Commercial,
                ListingStatus::Available,
                "c-ila",
                5,
                (-6.8500, 39.2500),
            ))
            .with_listing(plot(
                "plot-003",
                "Farm land near Usa River",
                "Fertile agricultural land with borehole access.",
                6_000_000.0,
                8_500.0,
                UsageType::Agricultural,
                ListingStatus::Available,
                "c-aru",
                9,
                (-3.3667, 36.8500),
            ))
            .with_listing(plot(
                "plot-004",
                "Residential plot in Njiro",
                "Quiet neighbourhood, water and power on site.",
                4_200_000.0,
                900.0,
                UsageType::Residential,
                ListingStatus::Reserved,
                "c-aru",
                12,
                (-3.4000, 36.7000),
            ))
            .with_listing(plot(
                "plot-005",
                "Industrial yard in Nzuguni",
                "Flat industrial land close to the railway line.",
                7_800_000.0,
                4_000.0,
                UsageType::Industrial,
                ListingStatus::Available,
                "c-dod",
                20,
                (-6.1700, 35.7800),
            ))
            .with_listing(plot(
                "plot-006",
                "Mixed use plot in Kisasa",
                "Suitable for shops on the ground floor and flats above.",
                3_100_000.0,
                750.0,
                UsageType::Mixed,
                ListingStatus::Sold,
                "c-dod",
                30,
                (-6.2000, 35.8000),
            ))
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        let mut results: Vec<Listing> = self
            .listings
            .iter()
            .filter(|listing| query.matches(listing))
            .cloned()
            .map(|mut listing| {
                listing.council = listing
                    .council_id
                    .as_deref()
                    .and_then(|id| self.resolve_council(id));
                listing
            })
            .collect();

        query.sort(&mut results);

        debug!("In-memory query matched {} of {} plots", results.len(), self.listings.len());

        Ok(results)
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::FilterCriteria;

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unfiltered_returns_available_newest_first() {
        let store = MemoryStore::with_demo_plots();

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(None))
            .await
            .unwrap();

        assert_eq!(ids(&listings), vec!["plot-001", "plot-002", "plot-003", "plot-005"]);
        assert!(listings.iter().all(|l| l.status == ListingStatus::Available));
    }

    #[tokio::test]
    async fn test_hierarchy_is_joined() {
        let store = MemoryStore::with_demo_plots();

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(None))
            .await
            .unwrap();

        let beach = &listings[0];
        assert_eq!(
            beach.location_label(),
            "Kinondoni Municipal Council, Kinondoni, Dar es Salaam"
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_title_and_description() {
        let store = MemoryStore::with_demo_plots();
        let filters = FilterCriteria {
            search: "BOREHOLE".to_string(),
            ..Default::default()
        };

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(Some(&filters)))
            .await
            .unwrap();

        assert_eq!(ids(&listings), vec!["plot-003"]);
    }

    #[tokio::test]
    async fn test_bounds_are_inclusive() {
        let store = MemoryStore::with_demo_plots();
        let filters = FilterCriteria {
            min_price: 6_000_000.0,
            max_price: 9_500_000.0,
            min_area: 650.0,
            ..Default::default()
        };

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(Some(&filters)))
            .await
            .unwrap();

        assert_eq!(ids(&listings), vec!["plot-002", "plot-003", "plot-005"]);
    }

    #[tokio::test]
    async fn test_council_and_usage_filters() {
        let store = MemoryStore::with_demo_plots();
        let filters = FilterCriteria {
            council_id: Some("c-aru".to_string()),
            usage_type: Some(UsageType::Agricultural),
            ..Default::default()
        };

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(Some(&filters)))
            .await
            .unwrap();

        assert_eq!(ids(&listings), vec!["plot-003"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let store = MemoryStore::with_demo_plots();
        let filters = FilterCriteria {
            search: "skyscraper".to_string(),
            ..Default::default()
        };

        let listings = store
            .fetch_listings(&ListingQuery::from_filters(Some(&filters)))
            .await
            .unwrap();

        assert!(listings.is_empty());
    }
}
