// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use keycopy_dom::{DomTree, LocalElement, Viewport};
use keycopy_hints::{
    Alphabet, HintIndex, Mode, allocate, assign_labels, assign_layers, collect,
};
use kurbo::Rect;

/// A page of `sections` sections, each holding `per_section` paragraphs with
/// an inline span, laid out in a grid that fills a 1920x1080 viewport.
fn gen_page(sections: usize, per_section: usize) -> DomTree {
    let mut page = DomTree::new(Viewport::new(1920.0, 1080.0));
    let body = page.insert(
        None,
        LocalElement {
            bounds: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            ..Default::default()
        },
    );
    let cols = 8;
    let rows = sections.div_ceil(cols);
    let cell_w = 1920.0 / cols as f64;
    let cell_h = 1080.0 / rows as f64;
    for s in 0..sections {
        let x0 = (s % cols) as f64 * cell_w;
        let y0 = (s / cols) as f64 * cell_h;
        let section = page.insert(
            Some(body),
            LocalElement {
                bounds: Rect::new(x0, y0, x0 + cell_w, y0 + cell_h),
                ..Default::default()
            },
        );
        page.push_text(section, "Section heading");
        let row_h = cell_h / (per_section + 1) as f64;
        for p in 0..per_section {
            let py = y0 + row_h * (p + 1) as f64;
            let para = page.insert(
                Some(section),
                LocalElement {
                    bounds: Rect::new(x0 + 4.0, py, x0 + cell_w - 4.0, py + row_h - 2.0),
                    ..Default::default()
                },
            );
            page.push_text(para, "Lorem ipsum dolor sit amet ");
            let span = page.insert(
                Some(para),
                LocalElement {
                    bounds: Rect::new(x0 + 4.0, py, x0 + cell_w / 2.0, py + row_h - 2.0),
                    ..Default::default()
                },
            );
            page.push_text(span, "emphasis");
        }
    }
    page
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");
    for &(sections, per) in &[(16_usize, 4_usize), (64, 8), (128, 12)] {
        let page = gen_page(sections, per);
        let elements = sections * (1 + 2 * per);
        group.throughput(Throughput::Elements(elements as u64));
        for mode in [Mode::DirectText, Mode::AllText] {
            group.bench_function(format!("{mode:?}_{elements}"), |b| {
                b.iter(|| {
                    let forest = collect(black_box(&page), mode, None).unwrap();
                    black_box(forest.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_layers_and_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("layers_labels");
    let page = gen_page(128, 12);
    let forest = collect(&page, Mode::DirectText, None).unwrap();
    let alphabet = Alphabet::digits();
    group.throughput(Throughput::Elements(forest.len() as u64));
    group.bench_function("assign", |b| {
        b.iter_batched(
            || forest.clone(),
            |mut f| {
                let layers = assign_layers(&mut f);
                assign_labels(&mut f, &alphabet);
                black_box(layers.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("allocate_10k", |b| {
        b.iter(|| black_box(allocate(black_box(10_000), &alphabet)));
    });
    group.finish();
}

fn bench_prefix_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("hint_index");
    let page = gen_page(128, 12);
    let mut forest = collect(&page, Mode::DirectText, None).unwrap();
    let layers = assign_layers(&mut forest);
    assign_labels(&mut forest, &Alphabet::digits());
    group.bench_function("build", |b| {
        b.iter(|| black_box(HintIndex::build(&forest, layers.window(0))));
    });
    let index = HintIndex::build(&forest, layers.window(0));
    group.bench_function("matches", |b| {
        b.iter(|| {
            for prefix in ["", "1", "12", "123", "9"] {
                black_box(index.matches(black_box(prefix)));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_collect,
    bench_layers_and_labels,
    bench_prefix_match
);
criterion_main!(benches);
