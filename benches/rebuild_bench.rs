use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cluster_map_widget::app::{reconciler, MountedMap};
use cluster_map_widget::surface::SurfaceOptions;
use cluster_map_widget::ui::EguiSurface;
use cluster_map_widget::{Background, Item, LatLng, WidgetOptions};
use std::hint::black_box;
use std::sync::Arc;

const CENTER: LatLng = LatLng::new(50.85, 4.35);

fn build_items(count: usize) -> Vec<Arc<Item>> {
    (0..count)
        .map(|i| {
            let column = (i % 100) as f64;
            let row = (i / 100) as f64;
            let coord = LatLng::new(CENTER.lat + row * 0.001, CENTER.lng + column * 0.0015);
            Arc::new(Item::new(format!("item-{i}"), coord, i % 20 == 0))
        })
        .collect()
}

fn new_map() -> MountedMap<EguiSurface> {
    let surface = EguiSurface::new(SurfaceOptions::at(CENTER, 13), 80.0);
    MountedMap::new(surface, CENTER, 13)
}

fn bench_rebuild(c: &mut Criterion) {
    let options = WidgetOptions::default();
    let mut group = c.benchmark_group("marker_rebuild");

    for &count in &[1_000usize, 5_000usize] {
        let items = build_items(count);
        let mut map = new_map();

        group.bench_with_input(BenchmarkId::new("full_rebuild", count), &items, |b, items| {
            b.iter(|| {
                let added = reconciler::rebuild(
                    &mut map,
                    black_box(items),
                    Background::Light,
                    &options,
                )
                .expect("Rebuild fehlgeschlagen");
                black_box(added)
            })
        });
    }

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let options = WidgetOptions::default();
    let mut group = c.benchmark_group("clustering");

    for &count in &[1_000usize, 5_000usize] {
        let mut map = new_map();
        reconciler::rebuild(&mut map, &build_items(count), Background::Light, &options)
            .expect("Rebuild fehlgeschlagen");

        group.bench_with_input(BenchmarkId::new("grid_clusters", count), &map, |b, map| {
            b.iter(|| black_box(map.surface.clusters().len()))
        });
    }

    group.finish();
}

fn bench_shallow_equality(c: &mut Criterion) {
    let items = build_items(5_000);
    let same = items.clone();
    let fresh: Vec<Arc<Item>> = items.iter().map(|item| Arc::new(Item::clone(item))).collect();

    c.bench_function("items_shallow_equal_same_refs", |b| {
        b.iter(|| reconciler::items_shallow_equal(black_box(&items), black_box(&same)))
    });
    c.bench_function("items_shallow_equal_fresh_refs", |b| {
        b.iter(|| reconciler::items_shallow_equal(black_box(&items), black_box(&fresh)))
    });
}

criterion_group!(
    rebuild_benches,
    bench_rebuild,
    bench_clustering,
    bench_shallow_equality
);
criterion_main!(rebuild_benches);
