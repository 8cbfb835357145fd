// Unit tests for the directory filters and the payment simulation

use kids_directory::core::{catalog, search, ListingFilter, PaymentMethod, PaymentPhase, PaymentSimulation, PriceRange};
use kids_directory::models::{Category, Language, ListingCard, ListingQuery};

fn ids(listings: &[&kids_directory::models::Listing]) -> Vec<String> {
    listings.iter().map(|l| l.id.clone()).collect()
}

#[test]
fn test_municipality_filter_on_clothing_stores() {
    let stores = catalog::listings(Category::ClothingStore);
    let result = search(stores, &ListingFilter::new().with_municipality("mascara"));

    assert_eq!(result.total, 6);
    assert_eq!(result.matched(), 2);
    assert!(result.listings.iter().all(|l| l.municipality_id == "mascara"));
}

#[test]
fn test_price_range_excludes_higher_fees() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let filter = ListingFilter::new().with_price(PriceRange::between(0, 5000));
    let result = search(kindergartens, &filter);

    assert!(result.listings.iter().all(|l| l.price <= 5000));
    assert!(!ids(&result.listings).contains(&"kg-3".to_string()));
    assert!(!ids(&result.listings).contains(&"kg-4".to_string()));
    assert_eq!(result.matched(), 4);
}

#[test]
fn test_price_bounds_are_inclusive() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let filter = ListingFilter::new().with_price(PriceRange::between(4500, 4500));
    assert_eq!(ids(&search(kindergartens, &filter).listings), vec!["kg-1"]);
}

#[test]
fn test_filter_is_deterministic() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let filter = ListingFilter::new().with_service("meals").with_activity("drawing");

    let first = ids(&search(kindergartens, &filter).listings);
    let second = ids(&search(kindergartens, &filter).listings);
    assert_eq!(first, second);
}

#[test]
fn test_filter_order_does_not_matter() {
    let kindergartens = catalog::listings(Category::Kindergarten);

    let a = ListingFilter::new()
        .with_municipality("mascara")
        .with_service("meals")
        .with_price(PriceRange::between(0, 5000));
    let b = ListingFilter::new()
        .with_price(PriceRange::between(0, 5000))
        .with_service("meals")
        .with_municipality("mascara");

    assert_eq!(ids(&search(kindergartens, &a).listings), ids(&search(kindergartens, &b).listings));
    assert_eq!(ids(&search(kindergartens, &a).listings), vec!["kg-1"]);
}

#[test]
fn test_all_services_required() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let filter = ListingFilter::new().with_service("transport").with_service("medical");

    assert_eq!(ids(&search(kindergartens, &filter).listings), vec!["kg-3"]);
}

#[test]
fn test_clearing_filters_restores_everything() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let mut filter = ListingFilter::new()
        .with_search("crèche")
        .with_municipality("mascara")
        .with_autism_wing(true);
    assert!(search(kindergartens, &filter).matched() < kindergartens.len());

    filter.clear();
    assert!(filter.is_empty());
    assert_eq!(search(kindergartens, &filter).matched(), kindergartens.len());
}

#[test]
fn test_search_matches_every_language() {
    let kindergartens = catalog::listings(Category::Kindergarten);

    for term in ["étoiles", "little stars", "النجوم"] {
        let result = search(kindergartens, &ListingFilter::new().with_search(term));
        assert_eq!(ids(&result.listings), vec!["kg-3"], "term {}", term);
    }
}

#[test]
fn test_autism_wing_filter() {
    let kindergartens = catalog::listings(Category::Kindergarten);
    let result = search(kindergartens, &ListingFilter::new().with_autism_wing(true));
    assert_eq!(ids(&result.listings), vec!["kg-1", "kg-5"]);
}

#[test]
fn test_filter_from_query_string() {
    let query = ListingQuery {
        municipality: Some("all".to_string()),
        services: Some("meals, nap".to_string()),
        max_price: Some(4000),
        ..Default::default()
    };
    let filter = ListingFilter::from_query(&query).unwrap();

    assert_eq!(filter.municipality, None);
    assert_eq!(filter.services, vec!["meals", "nap"]);

    let result = search(catalog::listings(Category::Kindergarten), &filter);
    assert_eq!(ids(&result.listings), vec!["kg-2", "kg-6"]);
}

#[test]
fn test_inverted_price_range_rejected() {
    let query = ListingQuery {
        min_price: Some(6000),
        max_price: Some(1000),
        ..Default::default()
    };
    assert!(ListingFilter::from_query(&query).is_err());
}

#[test]
fn test_card_localization_falls_back_to_french() {
    let mut listing = catalog::listings(Category::Kindergarten)[0].clone();
    listing.name.en = None;

    let card = ListingCard::localized(&listing, Language::En);
    assert_eq!(card.name, listing.name.fr);

    let card = ListingCard::localized(&listing, Language::Ar);
    assert_eq!(card.name, listing.name.ar);
}

#[test]
fn test_payment_progress_is_monotonic() {
    let mut simulation = PaymentSimulation::new("kg-1", 4500, PaymentMethod::Edahabia);
    assert_eq!(simulation.phase, PaymentPhase::Selection);
    simulation.begin().unwrap();

    let mut last = simulation.phase.progress();
    let mut completions = 0;
    while !simulation.phase.is_complete() {
        if simulation.tick(7).unwrap() {
            completions += 1;
        }
        let progress = simulation.phase.progress();
        assert!(progress >= last);
        assert!(progress <= 100);
        last = progress;
    }

    assert_eq!(completions, 1);
    match &simulation.phase {
        PaymentPhase::Success { transaction_id } => assert!(transaction_id.starts_with("TXN-")),
        other => panic!("unexpected phase {:?}", other),
    }
}

#[test]
fn test_payment_cannot_start_twice() {
    let mut simulation = PaymentSimulation::new("kg-2", 3500, PaymentMethod::Cib);
    simulation.begin().unwrap();
    assert!(simulation.begin().is_err());
}
