use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use scoped_store::{
    create_count_store, use_count_store, App, Component, ContextError, CountProvider, Element,
    Root, Scope,
};

fn store_creation_benchmark(c: &mut Criterion) {
    c.bench_function("count_store_creation", |b| {
        b.iter(|| create_count_store(black_box(42)));
    });
}

fn store_read_benchmark(c: &mut Criterion) {
    let store = create_count_store(42);

    c.bench_function("store_read", |b| {
        b.iter(|| {
            black_box(store.read(|s| s.count));
        });
    });
}

fn increment_benchmark(c: &mut Criterion) {
    let store = create_count_store(0);
    let increment = store.get_state().increment;

    c.bench_function("increment", |b| {
        b.iter(|| increment.call());
    });
}

/// Selects the `increment` action, which never changes, so pressing it
/// notifies every reader without re-rendering any of them.
struct IncrementReader;

impl Component for IncrementReader {
    fn render(&self, cx: &Scope) -> Result<Element, ContextError> {
        let increment = use_count_store(cx, |s| s.increment.clone())?;
        Ok(Element::button("+1", increment))
    }
}

fn gated_readers_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gated_readers");

    for readers in [1usize, 10, 100] {
        let tree = CountProvider::new(Element::group(
            (0..readers).map(|_| Element::component(IncrementReader)),
        ));
        let root = Root::mount(tree).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(readers), &readers, |b, _| {
            b.iter(|| black_box(root.press(0).unwrap()));
        });
    }
    group.finish();
}

fn rerender_benchmark(c: &mut Criterion) {
    let root = Root::mount(App::new(0)).unwrap();

    c.bench_function("rerender_tree", |b| {
        b.iter(|| black_box(root.rerender().unwrap()));
    });
}

fn press_and_flush_benchmark(c: &mut Criterion) {
    let root = Root::mount(App::new(0)).unwrap();

    c.bench_function("press_and_flush", |b| {
        b.iter(|| root.press(black_box(0)).unwrap());
    });
}

criterion_group!(
    benches,
    store_creation_benchmark,
    store_read_benchmark,
    increment_benchmark,
    gated_readers_benchmark,
    rerender_benchmark,
    press_and_flush_benchmark,
);
criterion_main!(benches);
