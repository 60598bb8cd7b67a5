// Substitution scoring benchmarks over a synthetic corpus
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::sync::Arc;
use subx_core::{KeyedVectors, MeanPoolingDocModel, Recipe, RecipeCatalog, Vector};
use subx_similarity::{EngineConfig, Resources, SubstitutionEngine, Weights};

const METHODS: &[&str] = &["볶음", "끓이기", "찜", "조림", "굽기"];
const CATEGORIES: &[&str] = &["메인반찬", "국/탕", "밑반찬", "간식"];

fn generate_random_vector(rng: &mut StdRng, dim: usize) -> Vector {
    let data: Vec<f32> = (0..dim).map(|_| rng.random_range(-1.0f32..1.0f32)).collect();
    Vector::new(data)
}

fn generate_vectors(rng: &mut StdRng, vocab: usize, dim: usize) -> KeyedVectors {
    (0..vocab)
        .map(|i| (format!("ing{i}"), generate_random_vector(rng, dim)))
        .collect()
}

fn generate_resources(vocab: usize, recipes: usize, dim: usize) -> Resources {
    let mut rng = StdRng::seed_from_u64(42);
    let words = generate_vectors(&mut rng, vocab, dim);
    let docs = generate_vectors(&mut rng, vocab, dim);

    let recipes: Vec<Recipe> = (0..recipes)
        .map(|id| {
            let count = rng.random_range(5..12);
            let mut ingredients: Vec<String> = (0..count)
                .map(|_| format!("ing{}", rng.random_range(0..vocab)))
                .collect();
            ingredients.sort();
            ingredients.dedup();
            Recipe::new(id as u64, format!("recipe {id}"), ingredients)
                .with_method(METHODS[id % METHODS.len()])
                .with_category(CATEGORIES[id % CATEGORIES.len()])
        })
        .collect();

    let catalog = RecipeCatalog::from_recipes(recipes).expect("ids are unique");
    Resources::new(
        catalog,
        Box::new(words),
        Box::new(MeanPoolingDocModel::new(docs)),
        Default::default(),
    )
}

fn first_ingredient(engine: &SubstitutionEngine) -> String {
    engine.resources().catalog.get(0).expect("recipe 0 exists").ingredients[0].clone()
}

fn benchmark_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute_single");
    let weights = Weights::new(0.4, 0.4, 0.1, 0.1);

    for vocab in [1000, 5000, 20000].iter() {
        let resources = Arc::new(generate_resources(*vocab, 2000, 100));
        let engine = SubstitutionEngine::new(resources, EngineConfig::default());
        let target = first_ingredient(&engine);

        group.bench_with_input(BenchmarkId::new("vocab", vocab), vocab, |b, _| {
            b.iter(|| {
                let ranked = engine
                    .substitute_single(0, black_box(&target), &[], weights)
                    .expect("recipe 0 exists");
                black_box(ranked)
            });
        });
    }

    group.finish();
}

fn benchmark_multi(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute_multi");
    group.sample_size(20);
    let resources = Arc::new(generate_resources(5000, 2000, 100));
    let engine = SubstitutionEngine::new(resources, EngineConfig::default());
    let targets = engine.resources().catalog.get(0).expect("recipe 0 exists").ingredients.clone();

    for n in [1usize, 2, 3].iter() {
        let chosen: Vec<String> = targets.iter().take(*n).cloned().collect();
        group.bench_with_input(BenchmarkId::new("targets", chosen.len()), &chosen, |b, chosen| {
            b.iter(|| {
                let combos = engine
                    .substitute_multi(0, black_box(chosen), &[], Weights::default())
                    .expect("valid targets");
                black_box(combos)
            });
        });
    }

    group.finish();
}

fn benchmark_catalog_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_build");
    group.sample_size(10);

    for recipes in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("recipes", recipes), recipes, |b, &recipes| {
            b.iter(|| black_box(generate_resources(5000, recipes, 32)));
        });
    }

    group.finish();
}

fn benchmark_cosine(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a = generate_random_vector(&mut rng, 300);
    let b = generate_random_vector(&mut rng, 300);
    c.bench_function("cosine_300", |bench| {
        bench.iter(|| black_box(a.cosine_similarity(black_box(&b))))
    });
}

criterion_group!(
    benches,
    benchmark_single,
    benchmark_multi,
    benchmark_catalog_build,
    benchmark_cosine
);
criterion_main!(benches);
