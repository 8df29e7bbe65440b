use blockz_engine::{
    BlockContainerTemplate, BlockCounter, BlockRenderer, RenderRequest, RuleTables, ThemePalette,
};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_deep_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let template = BlockContainerTemplate;
    let rules = RuleTables::default();
    let ids = BlockCounter::new();
    let renderer = BlockRenderer::new(&template).with_rules(&rules).with_ids(&ids);
    let tree = common::nested_tree(200);

    group.bench_function("deep_tree", |b| {
        b.iter(|| {
            let rendered = renderer
                .render(RenderRequest::new(std::hint::black_box(&tree)).wrapped())
                .unwrap();
            std::hint::black_box(rendered);
        });
    });

    group.finish();
}

fn bench_flat_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let template = BlockContainerTemplate;
    let rules = RuleTables::default();
    let ids = BlockCounter::new();
    let palette: ThemePalette = [("primary", "#0e7490"), ("white", "#ffffff")]
        .into_iter()
        .collect();
    let renderer = BlockRenderer::new(&template)
        .with_rules(&rules)
        .with_ids(&ids)
        .with_palette(&palette);
    let page = common::flat_page(500);

    group.bench_function("flat_page", |b| {
        b.iter(|| {
            let html = renderer
                .render_blocks(std::hint::black_box(&page), true)
                .unwrap();
            std::hint::black_box(html);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_deep_tree, bench_flat_page);
criterion_main!(benches);
