use crate::models::{Listing, ListingQuery};

/// Inclusive price bounds, either side optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PriceRange {
    pub fn between(min: u32, max: u32) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    #[inline]
    pub fn contains(&self, price: u32) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Errors raised while turning a query string into a filter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("min_price ({min}) is greater than max_price ({max})")]
    InvertedPriceRange { min: u32, max: u32 },
}

/// Current filter selection of a directory page
///
/// All active predicates are combined with a logical AND; an inactive
/// predicate matches everything, so an empty filter keeps every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Lowercased, trimmed search term
    search: Option<String>,
    pub municipality: Option<String>,
    pub price: PriceRange,
    pub services: Vec<String>,
    pub activities: Vec<String>,
    pub autism_wing: Option<bool>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term; blank terms clear it
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() { None } else { Some(term.to_lowercase()) };
        self
    }

    pub fn with_municipality(mut self, id: impl Into<String>) -> Self {
        self.municipality = Some(id.into());
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = range;
        self
    }

    pub fn with_service(mut self, id: impl Into<String>) -> Self {
        self.services.push(id.into());
        self
    }

    pub fn with_activity(mut self, id: impl Into<String>) -> Self {
        self.activities.push(id.into());
        self
    }

    pub fn with_autism_wing(mut self, required: bool) -> Self {
        self.autism_wing = Some(required);
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Build a filter from the directory query string
    pub fn from_query(query: &ListingQuery) -> Result<Self, FilterError> {
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(FilterError::InvertedPriceRange { min, max });
            }
        }

        let mut filter = Self::new().with_price(PriceRange {
            min: query.min_price,
            max: query.max_price,
        });

        if let Some(term) = &query.search {
            filter = filter.with_search(term);
        }

        filter.municipality = query
            .municipality
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != "all")
            .map(str::to_string);
        filter.services = split_ids(query.services.as_deref());
        filter.activities = split_ids(query.activities.as_deref());
        filter.autism_wing = query.autism_wing;

        Ok(filter)
    }

    /// Whether no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.municipality.is_none()
            && self.price.is_unbounded()
            && self.services.is_empty()
            && self.activities.is_empty()
            && self.autism_wing.is_none()
    }

    /// Reset every predicate
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check whether a listing satisfies every active predicate
    #[inline]
    pub fn matches(&self, listing: &Listing) -> bool {
        matches_search(listing, self.search.as_deref())
            && matches_municipality(listing, self.municipality.as_deref())
            && self.price.contains(listing.price)
            && has_all(&listing.services, &self.services)
            && has_all(&listing.activities, &self.activities)
            && self.autism_wing.map_or(true, |flag| listing.has_autism_wing == flag)
    }
}

fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|ids| {
        ids.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Case-insensitive substring match on the name, in any language
#[inline]
pub fn matches_search(listing: &Listing, term: Option<&str>) -> bool {
    match term {
        None => true,
        Some(term) => listing
            .name
            .variants()
            .any(|name| name.to_lowercase().contains(term)),
    }
}

#[inline]
pub fn matches_municipality(listing: &Listing, municipality: Option<&str>) -> bool {
    municipality.map_or(true, |id| listing.municipality_id == id)
}

/// Every required tag must be present in the listing's tags
#[inline]
pub fn has_all(tags: &[String], required: &[String]) -> bool {
    required.iter().all(|tag| tags.contains(tag))
}
