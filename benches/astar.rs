use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridflow::{Cell, Graph};

fn build_grid(side: u32) -> Graph<Cell> {
    let mut g = Graph::new(false);
    for y in 0..side {
        for x in 0..side {
            g.add_vertex(Cell::new(x, y));
        }
    }
    for y in 0..side {
        for x in 0..side {
            let c = Cell::new(x, y);
            if x + 1 < side {
                g.add_edge(&c, &Cell::new(x + 1, y), 1.0).unwrap();
            }
            if y + 1 < side {
                g.add_edge(&c, &Cell::new(x, y + 1), 1.0).unwrap();
            }
        }
    }
    g
}

fn manhattan(a: &Cell, b: &Cell) -> f32 {
    ((a.x() as i64 - b.x() as i64).unsigned_abs() + (a.y() as i64 - b.y() as i64).unsigned_abs())
        as f32
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar");
    group.sample_size(50);

    let side = 128;
    let mut g = build_grid(side);
    let start = Cell::new(0, 0);
    let goal = Cell::new(side - 1, side - 1);

    group.bench_function("find_shortest_path", |b| {
        b.iter(|| {
            let path = g
                .find_shortest_path(black_box(&start), black_box(&goal), Some(manhattan))
                .unwrap();
            black_box(path);
        })
    });

    group.bench_function("dijkstra", |b| {
        b.iter(|| {
            let path = g
                .find_shortest_path(
                    black_box(&start),
                    black_box(&goal),
                    None::<fn(&Cell, &Cell) -> f32>,
                )
                .unwrap();
            black_box(path);
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
