use crate::core::filters::ListingFilter;
use crate::models::{DataSource, Listing};
use std::fmt::Display;

/// Result of running a filter over a listing list
#[derive(Debug)]
pub struct SearchResult<'a> {
    pub listings: Vec<&'a Listing>,
    /// Size of the unfiltered list
    pub total: usize,
}

impl SearchResult<'_> {
    pub fn matched(&self) -> usize {
        self.listings.len()
    }
}

/// Apply a filter to a list, keeping the original order
///
/// The source slice is only borrowed; filtering never reorders or mutates it.
pub fn search<'a>(listings: &'a [Listing], filter: &ListingFilter) -> SearchResult<'a> {
    SearchResult {
        listings: listings.iter().filter(|l| filter.matches(l)).collect(),
        total: listings.len(),
    }
}

pub fn find_by_id<'a>(listings: &'a [Listing], id: &str) -> Option<&'a Listing> {
    listings.iter().find(|l| l.id == id)
}

/// Prefer the live list, fall back to the bundled one when the live list is
/// empty or could not be fetched
pub fn live_or_static<E: Display>(live: Result<Vec<Listing>, E>, fallback: &[Listing]) -> (DataSource, Vec<Listing>) {
    match live {
        Ok(listings) if !listings.is_empty() => (DataSource::Live, listings),
        Ok(_) => {
            tracing::debug!("Remote list is empty, serving {} bundled listings", fallback.len());
            (DataSource::Static, fallback.to_vec())
        }
        Err(e) => {
            tracing::warn!("Remote list unavailable ({}), serving {} bundled listings", e, fallback.len());
            (DataSource::Static, fallback.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::models::Category;

    #[test]
    fn test_search_keeps_source_intact() {
        let listings = catalog::listings(Category::Kindergarten).to_vec();
        let before = listings.clone();

        let filter = ListingFilter::new().with_municipality("mascara");
        let result = search(&listings, &filter);

        assert_eq!(result.total, listings.len());
        assert!(result.matched() < result.total);
        assert_eq!(listings, before);
    }

    #[test]
    fn test_find_by_id() {
        let doctors = catalog::listings(Category::Doctor);
        assert_eq!(find_by_id(doctors, "doc-2").map(|d| d.municipality_id.as_str()), Some("sig"));
        assert!(find_by_id(doctors, "kg-1").is_none());
    }

    #[test]
    fn test_live_or_static() {
        let fallback = catalog::listings(Category::Kindergarten);

        let (source, listings) = live_or_static::<String>(Ok(vec![]), fallback);
        assert_eq!(source, DataSource::Static);
        assert_eq!(listings.len(), fallback.len());

        let (source, _) = live_or_static(Err("timeout"), fallback);
        assert_eq!(source, DataSource::Static);

        let live = vec![fallback[0].clone()];
        let (source, listings) = live_or_static::<String>(Ok(live), fallback);
        assert_eq!(source, DataSource::Live);
        assert_eq!(listings.len(), 1);
    }
}
