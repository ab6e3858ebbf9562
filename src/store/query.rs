use crate::models::{Listing, ListingStatus};
use crate::store::types::FilterCriteria;
use std::cmp::Ordering;

/// Nested projection: plot → council → district → region
pub const LISTING_SELECT: &str = "*,council:councils(id,name,district_id,district:districts(id,name,region_id,region:regions(id,name)))";

/// Columns of the plots table the controller filters or orders on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Status,
    Title,
    Description,
    Price,
    Area,
    CouncilId,
    UsageType,
    CreatedAt,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Status => "status",
            Column::Title => "title",
            Column::Description => "description",
            Column::Price => "price",
            Column::Area => "area",
            Column::CouncilId => "council_id",
            Column::UsageType => "usage_type",
            Column::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Column, String),
    Gte(Column, f64),
    Lte(Column, f64),
    /// Case-insensitive partial match on any of the columns
    AnyContains(Vec<Column>, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: Column,
    pub descending: bool,
}

/// A query against the plots table.
///
/// Built through [`ListingQuery::from_filters`] for the search page, then
/// either encoded for the REST endpoint or evaluated locally.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    predicates: Vec<Predicate>,
    order: Option<Order>,
    select: &'static str,
}

impl ListingQuery {
    /// Every search is restricted to plots that are still on the market
    pub fn available() -> Self {
        Self {
            predicates: Vec::new(),
            order: None,
            select: LISTING_SELECT,
        }
        .eq(Column::Status, ListingStatus::Available.as_str())
    }

    pub fn eq(mut self, column: Column, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Eq(column, value.into()));
        self
    }

    pub fn gte(mut self, column: Column, value: f64) -> Self {
        self.predicates.push(Predicate::Gte(column, value));
        self
    }

    pub fn lte(mut self, column: Column, value: f64) -> Self {
        self.predicates.push(Predicate::Lte(column, value));
        self
    }

    pub fn any_contains(mut self, columns: Vec<Column>, term: impl Into<String>) -> Self {
        self.predicates.push(Predicate::AnyContains(columns, term.into()));
        self
    }

    pub fn order_by(mut self, column: Column, descending: bool) -> Self {
        self.order = Some(Order { column, descending });
        self
    }

    /// Translate the filter panel's criteria. Sentinel bounds and empty
    /// fields produce no predicate at all.
    pub fn from_filters(filters: Option<&FilterCriteria>) -> Self {
        let mut query = Self::available();

        if let Some(filters) = filters {
            if let Some(term) = filters.search_term() {
                query = query.any_contains(vec![Column::Title, Column::Description], term);
            }
            if let Some(min) = filters.min_price_bound() {
                query = query.gte(Column::Price, min);
            }
            if let Some(max) = filters.max_price_bound() {
                query = query.lte(Column::Price, max);
            }
            if let Some(min) = filters.min_area_bound() {
                query = query.gte(Column::Area, min);
            }
            if let Some(max) = filters.max_area_bound() {
                query = query.lte(Column::Area, max);
            }
            if let Some(council_id) = filters.council() {
                query = query.eq(Column::CouncilId, council_id);
            }
            if let Some(usage) = filters.usage_type {
                query = query.eq(Column::UsageType, usage.as_str());
            }
        }

        query.order_by(Column::CreatedAt, true)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order(&self) -> Option<Order> {
        self.order
    }

    /// Encode as PostgREST query parameters
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.to_string())];

        for predicate in &self.predicates {
            let pair = match predicate {
                Predicate::Eq(column, value) => (column.as_str().to_string(), format!("eq.{}", value)),
                Predicate::Gte(column, value) => (column.as_str().to_string(), format!("gte.{}", value)),
                Predicate::Lte(column, value) => (column.as_str().to_string(), format!("lte.{}", value)),
                Predicate::AnyContains(columns, term) => {
                    let pattern = quote_pattern(term);
                    let alternatives: Vec<String> = columns
                        .iter()
                        .map(|column| format!("{}.ilike.{}", column.as_str(), pattern))
                        .collect();
                    ("or".to_string(), format!("({})", alternatives.join(",")))
                }
            };
            pairs.push(pair);
        }

        if let Some(order) = self.order {
            let direction = if order.descending { "desc" } else { "asc" };
            pairs.push(("order".to_string(), format!("{}.{}", order.column.as_str(), direction)));
        }

        pairs
    }

    /// Evaluate the predicates against a listing held in memory
    pub fn matches(&self, listing: &Listing) -> bool {
        self.predicates.iter().all(|predicate| match predicate {
            Predicate::Eq(column, value) => {
                text_value(listing, *column).map_or(false, |actual| actual == value.as_str())
            }
            Predicate::Gte(column, bound) => {
                numeric_value(listing, *column).map_or(false, |actual| actual >= *bound)
            }
            Predicate::Lte(column, bound) => {
                numeric_value(listing, *column).map_or(false, |actual| actual <= *bound)
            }
            Predicate::AnyContains(columns, term) => {
                let needle = term.to_lowercase();
                columns.iter().any(|column| {
                    text_value(listing, *column)
                        .map_or(false, |actual| actual.to_lowercase().contains(&needle))
                })
            }
        })
    }

    /// Order listings the way the store would
    pub fn sort(&self, listings: &mut [Listing]) {
        let Some(order) = self.order else {
            return;
        };

        listings.sort_by(|a, b| {
            let ordering = match order.column {
                Column::CreatedAt => a.created_at.cmp(&b.created_at),
                column => numeric_value(a, column)
                    .partial_cmp(&numeric_value(b, column))
                    .unwrap_or(Ordering::Equal),
            };
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

fn text_value(listing: &Listing, column: Column) -> Option<&str> {
    match column {
        Column::Status => Some(listing.status.as_str()),
        Column::Title => Some(listing.title.as_str()),
        Column::Description => Some(listing.description.as_str()),
        Column::CouncilId => listing.council_id.as_deref(),
        Column::UsageType => Some(listing.usage_type.as_str()),
        Column::Price | Column::Area | Column::CreatedAt => None,
    }
}

fn numeric_value(listing: &Listing, column: Column) -> Option<f64> {
    match column {
        Column::Price => Some(listing.price),
        Column::Area => Some(listing.area),
        _ => None,
    }
}

/// Wrap a search term as a quoted `*term*` ilike pattern. Commas and
/// parentheses are safe inside quotes; quotes and backslashes are escaped.
fn quote_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"*{}*\"", escaped)
}
