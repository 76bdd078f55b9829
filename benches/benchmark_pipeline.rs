// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

use criterion::{criterion_group, criterion_main, Criterion};

use epidf::common::{BuildingType, LeedLevel};
use epidf::params::UserBuildingSpec;
use epidf::pipeline::{CancellationToken, Pipeline};

fn run_small_office() {
    let user = UserBuildingSpec {
        building_type: Some(BuildingType::Office),
        stories: Some(3),
        floor_area_per_story: Some(500.0),
        leed_level: Some(LeedLevel::None),
        ..Default::default()
    };
    let token = CancellationToken::new();
    let _ = Pipeline::run(&user, None, &token).unwrap();
}

fn run_large_office() {
    let user = UserBuildingSpec {
        building_type: Some(BuildingType::Office),
        stories: Some(10),
        floor_area_per_story: Some(5000.0),
        leed_level: Some(LeedLevel::Gold),
        ..Default::default()
    };
    let token = CancellationToken::new();
    let _ = Pipeline::run(&user, None, &token).unwrap();
}

fn run_residential_multi_ptac() {
    let user = UserBuildingSpec {
        building_type: Some(BuildingType::ResidentialMulti),
        stories: Some(15),
        floor_area_per_story: Some(800.0),
        leed_level: Some(LeedLevel::None),
        ..Default::default()
    };
    let token = CancellationToken::new();
    let _ = Pipeline::run(&user, None, &token).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("small office, 3 stories x 500 m2", |b| b.iter(run_small_office));
    c.bench_function("large office, 10 stories x 5000 m2", |b| b.iter(run_large_office));
    c.bench_function("residential multi, 15 stories PTAC", |b| b.iter(run_residential_multi_ptac));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
