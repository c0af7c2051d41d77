use criterion::{Criterion, criterion_group, criterion_main};
use pinpoints::{
    geometry::{PolygonGeometry, Shape},
    prelude::Store,
    seed::{ResourceRecord, User},
};
use rand::{SeedableRng, rngs::StdRng};
use std::{hint::black_box, time::Duration};

const RESOURCES: usize = 2_000;

/// A floor of desks laid out on a grid, every third one taken.
fn floor() -> Vec<ResourceRecord> {
    (0..RESOURCES)
        .map(|i| {
            let lon = 3.88 + (i % 50) as f64 * 0.0001;
            let lat = 43.6 + (i / 50) as f64 * 0.0001;
            let shape = Shape::new(PolygonGeometry::new(vec![vec![
                [lon, lat],
                [lon + 0.00005, lat],
                [lon + 0.0001, lat],
                [lon + 0.0001, lat + 0.0001],
                [lon, lat + 0.0001],
                [lon, lat],
            ]]));
            let tag = if i % 3 == 0 { "Unavailable" } else { "Available" };
            ResourceRecord::new(format!("desk-{i}"), &["desk", tag], shape)
        })
        .collect()
}

fn users() -> Vec<User> {
    (0..100).map(|i| User::new(i.to_string())).collect()
}

fn initialize(resources: &[ResourceRecord], users: &[User]) {
    let mut rng = StdRng::seed_from_u64(7);
    let _ = black_box(Store::new().initialize(resources.to_vec(), users.to_vec(), &mut rng));
}

fn book_unbook(store: &Store) {
    let _ = black_box(
        store
            .book("desk-1", User::new("bench"))
            .and_then(|store| store.unbook("desk-1")),
    );
}

fn criterion_benchmark(c: &mut Criterion) {
    let resources = floor();
    let users = users();
    let mut rng = StdRng::seed_from_u64(7);
    let store = match Store::new().initialize(resources.clone(), users.clone(), &mut rng) {
        Ok(store) => store,
        Err(err) => {
            println!("Failed to initialize store: {err}");
            return;
        }
    };

    let mut group = c.benchmark_group("Pinpoints");

    group.warm_up_time(Duration::from_secs(5));

    group.measurement_time(Duration::from_secs(15));

    group.bench_function("Initialize floor", |b| {
        b.iter(|| initialize(&resources, &users))
    });

    group.bench_function("Book then unbook", |b| b.iter(|| book_unbook(&store)));

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
