use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use girder::*;
use std::hint::black_box;

/// Flat deck of `panels` road links between two anchors, braced by a steel
/// chord hung below it.
fn prepare_truss(panels: usize) -> Blueprint {
    let mut blueprint = Blueprint::new();
    let panel = 500.0 / panels as f32;
    let mut deck = vec![blueprint.add_anchor(Vec2::new(200.0, 550.0))];
    let mut chord = vec![deck[0]];
    for i in 1..panels {
        let x = 200.0 + panel * i as f32;
        deck.push(blueprint.add_point(Vec2::new(x, 550.0)));
        chord.push(blueprint.add_point(Vec2::new(x, 600.0)));
    }
    let end = blueprint.add_anchor(Vec2::new(700.0, 550.0));
    deck.push(end);
    chord.push(end);

    for pair in deck.windows(2) {
        blueprint.add_link(pair[0], pair[1], MaterialKind::Road).expect("bench truss link");
    }
    for pair in chord.windows(2) {
        blueprint.add_link(pair[0], pair[1], MaterialKind::Steel).expect("bench truss link");
    }
    for i in 1..panels {
        blueprint.add_link(deck[i], chord[i], MaterialKind::Steel).expect("bench truss link");
    }
    for i in 2..panels {
        blueprint.add_link(deck[i - 1], chord[i], MaterialKind::Steel).expect("bench truss link");
    }
    blueprint
}

fn bench_run_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_step");
    for &panels in &[5usize, 20, 80] {
        let blueprint = prepare_truss(panels);
        group.bench_with_input(BenchmarkId::new("structure", panels), &blueprint, |b, blueprint| {
            let config = SimulationConfig::default().with_spawn_vehicle(false);
            let mut run = SimulationRun::new(blueprint, config);
            b.iter(|| black_box(run.step()))
        });
        group.bench_with_input(BenchmarkId::new("with_vehicle", panels), &blueprint, |b, blueprint| {
            b.iter(|| {
                let mut run = SimulationRun::new(blueprint, SimulationConfig::default());
                for _ in 0..16 {
                    black_box(run.step());
                }
            })
        });
    }
    group.finish();
}

fn bench_relaxation(c: &mut Criterion) {
    let mut group = c.benchmark_group("relaxation");
    let blueprint = prepare_truss(40);
    let stress = StressModel::new(0.3, MaterialTable::default());
    for &iterations in &[4u32, 8, 16] {
        group.bench_with_input(BenchmarkId::new("passes", iterations), &iterations, |b, &iterations| {
            let solver = RelaxationSolver::new(iterations);
            b.iter(|| {
                let mut points = blueprint.points().clone();
                let mut links = blueprint.links().clone();
                black_box(solver.relax(&mut points, &mut links, Some(&stress)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_step, bench_relaxation);
criterion_main!(benches);
