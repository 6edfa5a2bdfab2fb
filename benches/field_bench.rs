use criterion::{criterion_group, criterion_main, Criterion};
use grid_flowfield::*;
use rand::prelude::*;
use std::hint::black_box;

fn random_costs(n: usize, seed: u64) -> CostField {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut costs = CostField::new(n, n, 1);
    for i in 0..costs.area() {
        if rng.gen_bool(0.2) {
            costs.set_index(i, IMPASSABLE);
        } else {
            costs.set_index(i, rng.gen_range(1..=9));
        }
    }
    costs
}

fn propagation_bench(c: &mut Criterion) {
    for n in [64, 256] {
        let costs = random_costs(n, 0);
        let goals = [costs.get_ix(n / 2, n / 2)];
        let mut field = IntegrationField::unreached(n, n);
        for relaxation in [Relaxation::Fifo, Relaxation::Ordered] {
            c.bench_function(format!("propagate {n}x{n}, {relaxation:?}").as_str(), |b| {
                b.iter(|| {
                    generate_integration_field_with(&costs, &goals, &mut field, relaxation)
                        .unwrap();
                    black_box(&field);
                })
            });
        }
    }
}

fn resolver_bench(c: &mut Criterion) {
    let n = 256;
    let costs = random_costs(n, 1);
    let field = IntegrationField::from_costs(&costs, &[costs.get_ix(0, 0)]).unwrap();
    let mut angles = Grid::new(n, n, 0.0);
    c.bench_function("vector field 256x256", |b| {
        b.iter(|| {
            generate_vector_field_into(&field, &mut angles).unwrap();
            black_box(&angles);
        })
    });
    c.bench_function("clearance field 256x256", |b| {
        b.iter(|| black_box(clearance_field(&costs, Some(8))))
    });
    let mut rng = StdRng::seed_from_u64(2);
    let pairs: Vec<(usize, usize)> = (0..1000)
        .map(|_| (rng.gen_range(0..costs.area()), rng.gen_range(0..costs.area())))
        .collect();
    c.bench_function("direct path x1000", |b| {
        b.iter(|| {
            for &(a, goal) in &pairs {
                black_box(direct_path(&costs, a, goal));
            }
        })
    });
}

criterion_group!(benches, propagation_bench, resolver_bench);
criterion_main!(benches);
