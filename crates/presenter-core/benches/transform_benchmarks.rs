//! Benchmarks for presenter transformations
//!
//! These benchmarks cover the common transformer shapes: flat property
//! lists, templates, nested specifications and collection presentation.
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use presenter_core::{GetterPattern, Presenter, Specification, Transmogrifier};
use serde_json::{json, Value};

fn create_test_model() -> Value {
    json!({
        "id": 42,
        "firstname": "James",
        "lastname": "Bond",
        "code": "007",
        "active": true,
        "address": {
            "street": "85 Albert Embankment",
            "city": "London"
        }
    })
}

fn create_models(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Item {}", i),
                "category": if i % 3 == 0 { "A" } else if i % 3 == 1 { "B" } else { "C" },
                "price": (i as f64) * 1.5 + 10.0,
            })
        })
        .collect()
}

fn bench_flat_properties(c: &mut Criterion) {
    let model = create_test_model();
    let presenter =
        Presenter::new(Specification::from(["id", "firstname", "lastname", "code"])).unwrap();

    c.bench_function("flat_properties", |b| {
        b.iter(|| black_box(presenter.transform(black_box(&model)).unwrap()))
    });
}

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("templates");
    let model = create_test_model();
    let pattern = GetterPattern::default();
    let engine = Transmogrifier::new(&pattern);

    let templates = vec![
        ("no_placeholder", "Licence to kill"),
        ("single", "Agent {{code}}"),
        ("multiple", "{{firstname}} {{lastname}}, agent {{code}} ({{id}})"),
        ("unresolved", "{{missing}} and {{unknown}}"),
    ];

    for (name, template) in templates {
        group.bench_with_input(BenchmarkId::new("render", name), template, |b, template| {
            b.iter(|| black_box(engine.render(&model, black_box(template))))
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let model = create_test_model();
    let presenter = Presenter::new(json!({
        "agent": ["id", "code", {"name": "{{firstname}} {{lastname}}"}],
        "location": {"city": "{{city}}", "active": true},
        "tags": [1, 2, 3]
    }))
    .unwrap();

    c.bench_function("nested_specification", |b| {
        b.iter(|| black_box(presenter.transform(black_box(&model)).unwrap()))
    });
}

fn bench_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");
    let presenter =
        Presenter::new(json!(["id", "name", {"label": "{{name}} ({{category}})"}])).unwrap();

    for size in [10usize, 100, 1000] {
        let models = create_models(size);
        group.bench_with_input(BenchmarkId::new("transform_all", size), &models, |b, models| {
            b.iter(|| black_box(presenter.transform_all(models.iter()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flat_properties, bench_templates, bench_nested, bench_collection);
criterion_main!(benches);
