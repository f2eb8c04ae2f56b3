use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elevation_core::{MergedStream, ProfileChart, RenderError, RenderOptions, StreamMerger};
use elevation_core::{ActivityRecord, ActivitySummary};

fn build_records(activities: usize, samples: usize) -> Vec<ActivityRecord> {
    let t0 = chrono::Utc::now();
    (0..activities)
        .map(|k| {
            let data = (0..samples)
                .map(|i| 200.0 + (i as f64 * 0.05 + k as f64).sin() * 80.0 + k as f64 * 3.0)
                .collect();
            ActivityRecord::new(ActivitySummary::new(k as i64, format!("a{k}"), t0), data)
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let records = build_records(30, 1_000);
    let merger = StreamMerger::default();
    c.bench_function("merge_30x1000", |b| {
        b.iter(|| black_box(merger.merge(&records)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[10usize, 100usize] {
        let merged: MergedStream = StreamMerger::default().merge(&build_records(n, 1_000));
        group.bench_function(format!("activities_{n}"), |b| {
            let opts = RenderOptions::default();
            b.iter(|| -> Result<(), RenderError> {
                let bytes = ProfileChart::new(&merged).render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge, bench_render);
criterion_main!(benches);
