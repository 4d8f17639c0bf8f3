//! Criterion benchmarks for the property path mapper.
//!
//! Measures traversal and both mapping directions over form trees of
//! increasing size, flat and with nested virtual groups.
//!
//! Run:
//!   cargo bench
//!   cargo bench -- flatten        # one group

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use form_path_mapper::value::IndexMap;
use form_path_mapper::{flatten, DataMapper, Form, FormConfig, PropertyPathMapper, Value};

// ── Data builders ─────────────────────────────────────────────────────────────

/// Object with `n` string properties: field_0 .. field_{n-1}.
fn object_with_fields(n: usize) -> Value {
    let mut m = IndexMap::new();
    for i in 0..n {
        m.insert(format!("field_{i}"), Value::string(format!("value {i}")));
    }
    Value::object("Record", Value::map(m))
}

/// Map with `n` string entries, addressed by index paths.
fn map_with_fields(n: usize) -> Value {
    let mut m = IndexMap::new();
    for i in 0..n {
        m.insert(format!("field_{i}"), Value::string(format!("value {i}")));
    }
    Value::map(m)
}

/// `n` flat fields bound to object properties.
fn flat_forms(n: usize) -> Vec<Form> {
    (0..n)
        .map(|i| Form::field(format!("field_{i}")).unwrap())
        .collect()
}

/// `n` fields bound to map entries, wrapped in virtual groups of four,
/// each group nested one level inside another.
fn grouped_forms(n: usize) -> Vec<Form> {
    let mut forms = Vec::new();
    let mut i = 0;
    while i < n {
        let mut inner = Form::new(format!("inner_{i}"), FormConfig::virtual_group()).unwrap();
        for j in i..(i + 4).min(n) {
            let config = FormConfig::default().with_property_path(format!("[field_{j}]"));
            inner.add(Form::new(format!("field_{j}"), config).unwrap());
        }
        let outer = Form::new(format!("outer_{i}"), FormConfig::virtual_group())
            .unwrap()
            .with_child(inner);
        forms.push(outer);
        i += 4;
    }
    forms
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for n in [10usize, 100, 1000] {
        let forms = grouped_forms(n);
        group.bench_with_input(BenchmarkId::new("grouped", n), &forms, |b, forms| {
            b.iter(|| black_box(flatten(black_box(forms)).count()))
        });
    }
    group.finish();
}

fn bench_data_to_forms(c: &mut Criterion) {
    let mapper = PropertyPathMapper::new();
    let mut group = c.benchmark_group("data_to_forms");
    for n in [10usize, 100, 1000] {
        let data = object_with_fields(n);
        let mut forms = flat_forms(n);
        group.bench_function(BenchmarkId::new("object_flat", n), |b| {
            b.iter(|| mapper.map_data_to_forms(black_box(&data), &mut forms).unwrap())
        });

        let data = map_with_fields(n);
        let mut forms = grouped_forms(n);
        group.bench_function(BenchmarkId::new("map_grouped", n), |b| {
            b.iter(|| mapper.map_data_to_forms(black_box(&data), &mut forms).unwrap())
        });
    }
    group.finish();
}

fn bench_forms_to_data(c: &mut Criterion) {
    let mapper = PropertyPathMapper::new();
    let mut group = c.benchmark_group("forms_to_data");
    for n in [10usize, 100, 1000] {
        let mut data = object_with_fields(n);
        let mut forms = flat_forms(n);
        mapper.map_data_to_forms(&data, &mut forms).unwrap();
        group.bench_function(BenchmarkId::new("object_flat", n), |b| {
            b.iter(|| mapper.map_forms_to_data(black_box(&forms), &mut data).unwrap())
        });

        let mut data = map_with_fields(n);
        let mut forms = grouped_forms(n);
        mapper.map_data_to_forms(&data, &mut forms).unwrap();
        group.bench_function(BenchmarkId::new("map_grouped", n), |b| {
            b.iter(|| mapper.map_forms_to_data(black_box(&forms), &mut data).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flatten, bench_data_to_forms, bench_forms_to_data);
criterion_main!(benches);
