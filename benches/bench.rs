// Criterion benchmarks for the directory filters

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kids_directory::core::{catalog, search, ListingFilter, PriceRange};
use kids_directory::models::{Category, Listing};

fn create_listings(count: usize) -> Vec<Listing> {
    let base = catalog::listings(Category::Kindergarten);
    let municipalities = catalog::municipalities();

    (0..count)
        .map(|i| {
            let mut listing = base[i % base.len()].clone();
            listing.id = format!("kg-bench-{}", i);
            listing.municipality_id = municipalities[i % municipalities.len()].id.clone();
            listing.price = 2500 + (i as u32 % 40) * 100;
            listing
        })
        .collect()
}

fn full_filter() -> ListingFilter {
    ListingFilter::new()
        .with_search("crèche")
        .with_municipality("mascara")
        .with_price(PriceRange::between(0, 5000))
        .with_service("meals")
        .with_activity("drawing")
}

fn bench_search_catalog(c: &mut Criterion) {
    let listings = catalog::listings(Category::Kindergarten);
    let filter = full_filter();

    c.bench_function("search_catalog_kindergartens", |b| {
        b.iter(|| search(black_box(listings), black_box(&filter)).matched());
    });
}

fn bench_search_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_scaling");
    let filter = full_filter();

    for size in [100, 1_000, 10_000] {
        let listings = create_listings(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &listings, |b, listings| {
            b.iter(|| search(black_box(listings), black_box(&filter)).matched());
        });
    }

    group.finish();
}

fn bench_text_search(c: &mut Criterion) {
    let listings = create_listings(1_000);
    let filter = ListingFilter::new().with_search("النجوم");

    c.bench_function("text_search_1000", |b| {
        b.iter(|| search(black_box(&listings), black_box(&filter)).matched());
    });
}

criterion_group!(benches, bench_search_catalog, bench_search_scaling, bench_text_search);
criterion_main!(benches);
