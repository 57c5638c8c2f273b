//! Benchmarks for widget tree passes

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lucent_core::math::Vec2;
use lucent_input::InputSnapshot;
use lucent_render::Color;
use lucent_ui::{Theme, Widget, WidgetHandle, WidgetTree};

fn grid(count: usize) -> (WidgetTree, Vec<WidgetHandle>) {
    let mut tree = WidgetTree::new(Theme::dark());
    tree.set_viewport_size(1920.0, 1080.0);
    let root = tree.root();
    let mut handles = Vec::with_capacity(count);
    for i in 0..count {
        let x = (i % 40) as f32 * 24.0;
        let y = (i / 40) as f32 * 24.0;
        let cell = Widget::panel()
            .sized(20.0, 20.0)
            .with_panel(|panel| panel.set_fill_bg(true, Color::BLUE));
        if let Some(handle) = tree.add_widget(root, cell, x, y, (i % 3) as i32) {
            handles.push(handle);
        }
    }
    tree.update(0);
    (tree, handles)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_update");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (mut tree, handles) = grid(count);
            for handle in &handles {
                if let Some(base) = tree.base_mut(*handle) {
                    base.position.plot(100.0, 0.0, 1_000_000);
                }
            }
            b.iter(|| {
                tree.update(black_box(16));
            });
        });
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_widget");

    for count in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (tree, _) = grid(count);
            b.iter(|| black_box(tree.find_widget(black_box(250.0), black_box(130.0), true)));
        });
    }

    group.finish();
}

fn bench_process_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_input");

    for count in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (mut tree, _) = grid(count);
            let mut timestamp = 0;
            b.iter(|| {
                timestamp += 16;
                let x = (timestamp % 960) as f32;
                tree.process_input(&InputSnapshot::at(Vec2::new(x, 100.0), timestamp));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_hit_test, bench_process_input);
criterion_main!(benches);
