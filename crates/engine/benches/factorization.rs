//! Benchmarks for matrix construction and factorization
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic rating table so the bench has no dataset dependency.

use catalog::{RatingRecord, Style};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::latent::LatentModel;
use engine::matrix::RatingMatrix;
use engine::profile::{UserProfile, UserRating};

/// 200 users x 150 items, ~30 ratings per user, deterministic values.
fn synthetic_records() -> Vec<RatingRecord> {
    let mut records = Vec::new();
    for user in 0..200u32 {
        for slot in 0..30u32 {
            let item = (user * 7 + slot * 11) % 150;
            let rating = 1.0 + ((user + item) % 9) as f32 * 0.5;
            records.push(RatingRecord {
                user_id: format!("user-{:03}", user),
                item_id: format!("beer-{:03}", item),
                rating,
            });
        }
    }
    records
}

fn synthetic_profile() -> UserProfile {
    let mut profile = UserProfile::default();
    for item in 0..10u32 {
        let id = format!("beer-{:03}", item * 13 % 150);
        profile.entries.push(UserRating {
            item_id: id.clone(),
            style: Style::Ipa,
            rating: 4.0,
        });
        profile.rated_items.insert(id);
    }
    profile
}

fn bench_matrix_build(c: &mut Criterion) {
    let records = synthetic_records();
    let profile = synthetic_profile();

    c.bench_function("matrix_build", |b| {
        b.iter(|| {
            let matrix = RatingMatrix::build(black_box(&records), black_box(&profile));
            black_box(matrix)
        })
    });
}

fn bench_latent_fit(c: &mut Criterion) {
    let records = synthetic_records();
    let profile = synthetic_profile();
    let matrix = RatingMatrix::build(&records, &profile);

    c.bench_function("latent_fit", |b| {
        b.iter(|| {
            let model = LatentModel::fit(black_box(&matrix), black_box(42));
            black_box(model)
        })
    });
}

fn bench_predict_target(c: &mut Criterion) {
    let records = synthetic_records();
    let profile = synthetic_profile();
    let matrix = RatingMatrix::build(&records, &profile);
    let model = LatentModel::fit(&matrix, 42);

    c.bench_function("predict_target", |b| {
        b.iter(|| {
            let predicted = model.predict_target(black_box(&matrix));
            black_box(predicted)
        })
    });
}

criterion_group!(
    benches,
    bench_matrix_build,
    bench_latent_fit,
    bench_predict_target
);
criterion_main!(benches);
