//! Evaluator benchmarks
//!
//! Measures validation of order documents of growing size:
//! - expressions built in code vs. compiled from JSON
//! - passing documents vs. documents where every item fails
//!
//! Run with: cargo bench --package validobj-bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use validobj::{checks, has_errors, schema, Expression, Registry, Value};

fn order_expression() -> Expression {
    Expression::fields()
        .field("name", Expression::leaf([checks::required(), checks::is_string()]))
        .field("email", checks::is_email())
        .field("orderNumber", checks::is_number())
        .field(
            "items",
            Expression::array(
                Expression::fields()
                    .field("sku", Expression::leaf([checks::required(), checks::is_number()]))
                    .field("quantity", checks::is_number())
                    .field("color", checks::is_in(["red", "green", "blue"])),
            ),
        )
        .build()
}

fn create_order(items: usize, valid: bool) -> Value {
    let items: Vec<serde_json::Value> = (0..items)
        .map(|i| {
            if valid {
                json!({"sku": i, "quantity": 1 + i % 5, "color": "red"})
            } else {
                json!({"sku": format!("{i}"), "quantity": "many", "color": "pink"})
            }
        })
        .collect();
    Value::from(json!({
        "name": "john",
        "email": "john@example.com",
        "orderNumber": 12345,
        "items": items,
    }))
}

fn benchmark_evaluation(c: &mut Criterion) {
    let expr = order_expression();
    let mut group = c.benchmark_group("evaluate");

    for size in [1, 10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        let passing = create_order(*size, true);
        group.bench_with_input(BenchmarkId::new("passing", size), size, |b, _| {
            b.iter(|| black_box(has_errors(&passing, &expr)));
        });

        let failing = create_order(*size, false);
        group.bench_with_input(BenchmarkId::new("failing", size), size, |b, _| {
            b.iter(|| black_box(has_errors(&failing, &expr)));
        });
    }

    group.finish();
}

fn benchmark_compile(c: &mut Criterion) {
    let registry = Registry::with_builtins();
    let source = json!({
        "name": ["required", "isString"],
        "email": "isEmail",
        "orderNumber": "isNumber",
        "items": [{
            "sku": ["required", "isNumber"],
            "quantity": "isNumber",
            "color": {"$check": "isIn", "params": ["red", "green", "blue"]}
        }]
    });

    c.bench_function("compile_json_expression", |b| {
        b.iter(|| black_box(schema::compile(&source, &registry)));
    });
}

criterion_group!(benches, benchmark_evaluation, benchmark_compile);
criterion_main!(benches);
