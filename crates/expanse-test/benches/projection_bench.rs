//! Benchmarks for history queries, the light delay solver, and projection

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use expanse_core::TimeSeries;
use expanse_model::{CosmologyConfig, ExpansionModel};
use expanse_observe::{LightDelaySolver, SolverConfig, SolverMode, SpaceTime};
use expanse_runtime::random_space;

const TICKS: u32 = 3600;
const DT: f64 = 1.0 / 60.0;

fn ramp(len: u32) -> TimeSeries {
    let mut series = TimeSeries::new(1.0);
    for i in 1..=len {
        let t = i as f64 * DT;
        series.update(1.0 + 0.1 * t, t).unwrap();
    }
    series
}

fn stepped(config: CosmologyConfig) -> ExpansionModel {
    let mut model = ExpansionModel::new(config).unwrap();
    for i in 1..=TICKS {
        model.step(DT, i as f64 * DT).unwrap();
    }
    model
}

fn bench_value_at(c: &mut Criterion) {
    let series = ramp(TICKS);

    c.bench_function("series_value_at", |b| {
        b.iter(|| series.value_at(black_box(31.7)))
    });
}

fn bench_integrate(c: &mut Criterion) {
    let series = ramp(TICKS);

    c.bench_function("series_integrate_10s", |b| {
        b.iter(|| series.integrate(black_box(50.0)))
    });
}

fn bench_model_step(c: &mut Criterion) {
    let mut model = ExpansionModel::new(CosmologyConfig::lambda_cdm(0.3, 0.7, 1.0)).unwrap();
    let mut t = 0.0;

    c.bench_function("lambda_cdm_step", |b| {
        b.iter(|| {
            t += DT;
            model.step(black_box(DT), t).unwrap();
            black_box(model.scale_factor().get())
        })
    });
}

fn bench_solver(c: &mut Criterion) {
    let model = stepped(CosmologyConfig::linear(0.1));
    let now = TICKS as f64 * DT;
    let scale = LightDelaySolver::default();
    let light =
        LightDelaySolver::new(SolverConfig::default().with_mode(SolverMode::LightSpeed)).unwrap();

    c.bench_function("solver_scale_factor_mode", |b| {
        b.iter(|| scale.solve(black_box(150.0), now, &model))
    });
    c.bench_function("solver_light_speed_mode", |b| {
        b.iter(|| light.solve(black_box(150.0), now, &model))
    });
}

fn bench_project_all(c: &mut Criterion) {
    let mut space = SpaceTime::new(
        CosmologyConfig::linear(0.1),
        SolverConfig::default(),
        random_space(200, 200.0, 42),
    )
    .unwrap();
    for i in 1..=TICKS {
        space.step(DT, i as f64 * DT).unwrap();
    }
    let now = TICKS as f64 * DT;

    c.bench_function("project_all_200", |b| {
        b.iter(|| space.project_all(black_box(now)).count())
    });
}

criterion_group!(
    benches,
    bench_value_at,
    bench_integrate,
    bench_model_step,
    bench_solver,
    bench_project_all,
);
criterion_main!(benches);
