use std::time::Duration;

use cachelab::builder::{PolicyBuilder, PolicyKind};
use cachelab::cost::LatencyModel;
use cachelab::harness::{Harness, HarnessConfig};
use cachelab::traits::ReplacementPolicy;
use cachelab::workload::{WorkloadKind, WorkloadSpec};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 256;
const OPS: usize = 16_384;

fn spec() -> WorkloadSpec {
    WorkloadSpec {
        low: 0,
        high: 1_023,
        len: OPS,
        mean: 512.0,
        std_dev: 128.0,
        cycle_len: 300,
        ..WorkloadSpec::default()
    }
}

fn bench_access(c: &mut Criterion) {
    let spec = spec();
    for workload in [WorkloadKind::Uniform, WorkloadKind::Gaussian, WorkloadKind::Repeating] {
        let Ok(seq) = spec.generate(workload) else {
            continue;
        };
        let mut group = c.benchmark_group(format!("access/{workload}"));
        group.throughput(Throughput::Elements(seq.len() as u64));
        for kind in PolicyKind::ALL {
            group.bench_with_input(BenchmarkId::from_parameter(kind), &seq, |b, seq| {
                b.iter_batched(
                    || {
                        PolicyBuilder::new(CAPACITY)
                            .expected_len(seq.len())
                            .seed(7)
                            .build::<i64>(kind)
                            .unwrap()
                    },
                    |mut policy| {
                        for &key in &seq.keys {
                            let _ = std::hint::black_box(policy.access(std::hint::black_box(key)));
                        }
                        policy.hits()
                    },
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }
}

fn bench_harness_run(c: &mut Criterion) {
    let harness = Harness::new(HarnessConfig {
        capacity: CAPACITY,
        latency: LatencyModel::default(),
        settle: Duration::ZERO,
        seed: Some(7),
    })
    .unwrap();
    let seq = spec().generate(WorkloadKind::Periodic).unwrap();

    let mut group = c.benchmark_group("harness_run");
    group.throughput(Throughput::Elements(2 * seq.len() as u64));
    for kind in [PolicyKind::Lru, PolicyKind::Arc, PolicyKind::Clock] {
        group.bench_function(kind.name(), |b| {
            b.iter(|| std::hint::black_box(harness.run(kind, &seq).unwrap().total_hits()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_access, bench_harness_run);
criterion_main!(benches);
