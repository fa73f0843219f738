use pprof::criterion::{Output, PProfProfiler};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridflow::{Cell, DistanceField, Measurement};

fn open_room(side: usize) -> Vec<Vec<char>> {
    vec![vec!['.'; side]; side]
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_field_scan");
    group.sample_size(50);

    let side = 256u32;
    let rows = open_room(side as usize);

    group.bench_function("full_scan", |b| {
        b.iter(|| {
            let mut field = DistanceField::new(Measurement::Euclidean);
            field.initialize(&rows, '#');
            field.set_goal(black_box(Cell::new(side / 2, side / 2)));
            let grid = field.scan(None).unwrap();
            black_box(grid);
        })
    });

    let mut reusable = DistanceField::new(Measurement::Euclidean);
    reusable.initialize(&rows, '#');
    reusable.set_goal(Cell::new(side / 2, side / 2));
    let _ = reusable.scan_from(None, None, false);

    group.bench_function("find_path_pre_scanned", |b| {
        b.iter(|| {
            let path =
                reusable.find_path_pre_scanned(black_box(Cell::new(0, 0)), side * 2, None, None);
            black_box(path);
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
