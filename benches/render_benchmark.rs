use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lakbay_site::{render_records, CityActivityCatalog, Currency, PriceFormatter};
use rand::{seq::SliceRandom, thread_rng, Rng};

// Builds a synthetic catalog document with the requested number of cities.
// Every city gets three activities; every other city gets a package.
fn synthetic_catalog(city_count: usize) -> CityActivityCatalog {
    let mut rng = thread_rng();
    let mut cities = Vec::with_capacity(city_count);

    for i in 0..city_count {
        let mut activities = Vec::new();
        for j in 0..3 {
            activities.push(format!(
                r#"{{"title":"Tour {}-{}","image":"images/tour-{}-{}.jpg","rating":{:.1},"price":"₱{}"}}"#,
                i,
                j,
                i,
                j,
                rng.gen_range(3.5..5.0),
                rng.gen_range(500..20_000)
            ));
        }

        let package = if i % 2 == 0 {
            format!(
                r#","package":{{"title":"Package {}","details":"Transfers and tours.","price":"₱{}"}}"#,
                i,
                rng.gen_range(5_000..50_000)
            )
        } else {
            String::new()
        };

        cities.push(format!(
            r#"{{"name":"City{}","activities":[{}]{}}}"#,
            i,
            activities.join(","),
            package
        ));
    }

    let json = format!(r#"{{"cities":[{}]}}"#, cities.join(","));
    CityActivityCatalog::from_json(&json).unwrap()
}

// Benchmark for rendering a city's activity records
pub fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("activity_rendering");

    // Benchmark with different catalog sizes
    for city_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(city_count),
            city_count,
            |b, &city_count| {
                let catalog = synthetic_catalog(city_count);
                let formatter = PriceFormatter::default();
                let cities = (0..city_count)
                    .map(|i| format!("City{}", i))
                    .collect::<Vec<_>>();

                b.iter(|| {
                    let mut rng = thread_rng();
                    let city = cities.choose(&mut rng).unwrap();
                    let currency = if rng.gen_bool(0.5) {
                        Currency::Usd
                    } else {
                        Currency::Php
                    };

                    black_box(render_records(&catalog, city, currency, &formatter))
                });
            },
        );
    }

    group.finish();
}

// Benchmark for the full price-node rewrite a currency toggle performs
pub fn toggle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_node_rewrite");

    for node_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(node_count),
            node_count,
            |b, &node_count| {
                let formatter = PriceFormatter::default();
                let mut rng = thread_rng();
                let values = (0..node_count)
                    .map(|_| rng.gen_range(10.0..500.0))
                    .collect::<Vec<f64>>();

                b.iter(|| {
                    let mut rng = thread_rng();
                    let currency = if rng.gen_bool(0.5) {
                        Currency::Usd
                    } else {
                        Currency::Php
                    };

                    let texts = values
                        .iter()
                        .map(|&usd| formatter.format_usd_value(usd, currency))
                        .collect::<Vec<_>>();
                    black_box(texts)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, render_benchmark, toggle_benchmark);
criterion_main!(benches);
