use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uno_core::{deep_equal, format_value, Value};

fn make_tree(depth: usize) -> Value {
    if depth == 0 {
        return Value::array([Value::from(1.5), Value::Number(f64::NAN), Value::from("leaf")]);
    }
    Value::object([
        ("left", make_tree(depth - 1)),
        ("right", make_tree(depth - 1)),
        ("pattern", Value::regexp("a+b", "gi")),
    ])
}

fn bench_deep_equal(c: &mut Criterion) {
    let a = make_tree(6);
    let b = make_tree(6);
    c.bench_function("deep_equal_tree", |bench| {
        bench.iter(|| deep_equal(black_box(&a), black_box(&b)));
    });
    c.bench_function("format_tree", |bench| {
        bench.iter(|| format_value(black_box(&a)));
    });
}

criterion_group!(benches, bench_deep_equal);
criterion_main!(benches);
