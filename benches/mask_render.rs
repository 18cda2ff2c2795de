use criterion::{criterion_group, criterion_main, Criterion};
use golden_grid::grid::model::{Size, SENTINEL_COLOR};
use golden_grid::grid::render::render_mask;
use golden_grid::grid::settings::GridConfig;
use golden_grid::grid::shape::ShapeRegion;
use golden_grid::grid::toolbar::TOOLBAR_HEIGHT;

fn bench_render(c: &mut Criterion) {
    let config = GridConfig {
        segments: 12,
        show_frame: true,
        frame_thickness: 20,
        ..GridConfig::default()
    };
    let client = Size::new(1920, 1080);
    c.bench_function("render_mask_1080p", |b| {
        b.iter(|| render_mask(client, &config, TOOLBAR_HEIGHT, 334))
    });

    let mask = render_mask(client, &config, TOOLBAR_HEIGHT, 334).unwrap().bitmap;
    c.bench_function("shape_region_1080p", |b| {
        b.iter(|| ShapeRegion::from_mask(&mask, SENTINEL_COLOR))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
